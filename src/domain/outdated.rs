//! Per-requirement comparison of installed and published versions

use super::{Requirement, Version};

/// Outcome of checking one requirement against the local environment and the
/// package index. All derived values are computed once in [`OutdatedResult::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutdatedResult {
    requirement: Requirement,
    installed: Option<Version>,
    published: Vec<Version>,
    wanted: Option<Version>,
    latest: Option<Version>,
}

impl OutdatedResult {
    /// Creates a result; `published` is sorted ascending and deduplicated here
    pub fn new(
        requirement: Requirement,
        installed: Option<Version>,
        mut published: Vec<Version>,
    ) -> Self {
        published.sort();
        published.dedup();

        let wanted = published
            .iter()
            .rev()
            .find(|v| requirement.constraint.contains(v))
            .cloned();
        let latest = published.last().cloned();

        Self {
            requirement,
            installed,
            published,
            wanted,
            latest,
        }
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    /// Package name as declared
    pub fn name(&self) -> &str {
        &self.requirement.name
    }

    pub fn installed(&self) -> Option<&Version> {
        self.installed.as_ref()
    }

    pub fn published(&self) -> &[Version] {
        &self.published
    }

    /// Greatest published version satisfying the constraint
    pub fn wanted(&self) -> Option<&Version> {
        self.wanted.as_ref()
    }

    /// Greatest published version overall
    pub fn latest(&self) -> Option<&Version> {
        self.latest.as_ref()
    }

    pub fn install_not_found(&self) -> bool {
        self.installed.is_none()
    }

    /// Installed, but outside the declared constraint
    pub fn install_not_wanted(&self) -> bool {
        self.installed
            .as_ref()
            .is_some_and(|v| !self.requirement.constraint.contains(v))
    }

    pub fn pypi_not_found(&self) -> bool {
        self.latest.is_none()
    }

    /// The installed version differs from either the wanted or the latest
    /// version.
    ///
    /// A package that satisfies its constraint is still outdated when a newer
    /// release exists upstream, whether or not that release matches.
    ///
    /// The `installed.is_none()` clause departs from the plain inequality
    /// rule: a package that is not installed and not published has all three
    /// versions absent, and is still reported as outdated.
    pub fn outdated(&self) -> bool {
        self.installed.is_none()
            || self.installed != self.wanted
            || self.installed != self.latest
    }

    /// An installed version exists and the wanted version is newer
    pub fn wanted_is_upgrade(&self) -> bool {
        matches!((&self.installed, &self.wanted), (Some(i), Some(w)) if i < w)
    }

    /// An installed version exists and the latest version is newer
    pub fn latest_is_upgrade(&self) -> bool {
        matches!((&self.installed, &self.latest), (Some(i), Some(l)) if i < l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VersionConstraint;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    fn versions(list: &[&str]) -> Vec<Version> {
        list.iter().map(|s| v(s)).collect()
    }

    fn req(name: &str, constraint: &str) -> Requirement {
        Requirement::new(name, VersionConstraint::parse(constraint).unwrap())
    }

    #[test]
    fn test_wanted_and_latest_with_upper_bound() {
        let result = OutdatedResult::new(
            req("foo", "<2.0.0"),
            Some(v("1.0.0")),
            versions(&["1.0.0", "1.1.0", "2.0.0"]),
        );
        assert_eq!(result.wanted(), Some(&v("1.1.0")));
        assert_eq!(result.latest(), Some(&v("2.0.0")));
        assert!(result.outdated());
        assert!(result.wanted_is_upgrade());
        assert!(result.latest_is_upgrade());
        assert!(!result.install_not_wanted());
    }

    #[test]
    fn test_not_installed_and_not_published() {
        let result = OutdatedResult::new(req("ghost", ""), None, Vec::new());
        assert!(result.install_not_found());
        assert!(result.pypi_not_found());
        assert!(result.wanted().is_none());
        assert!(result.latest().is_none());
        assert!(result.outdated());
    }

    #[test]
    fn test_not_installed_but_published() {
        let result = OutdatedResult::new(req("foo", ""), None, versions(&["1.0"]));
        assert!(result.install_not_found());
        assert!(result.outdated());
        assert!(!result.wanted_is_upgrade());
    }

    #[test]
    fn test_up_to_date() {
        let result = OutdatedResult::new(
            req("foo", ">=1.0"),
            Some(v("2.0.0")),
            versions(&["1.0.0", "2.0.0"]),
        );
        assert!(!result.outdated());
        assert!(!result.install_not_found());
        assert!(!result.install_not_wanted());
        assert!(!result.pypi_not_found());
    }

    #[test]
    fn test_equal_but_differently_spelled_versions_are_current() {
        let result = OutdatedResult::new(req("foo", ""), Some(v("2.0")), versions(&["2.0.0"]));
        assert!(!result.outdated());
    }

    #[test]
    fn test_matches_constraint_but_newer_release_exists() {
        let result = OutdatedResult::new(
            req("foo", "==1.0"),
            Some(v("1.0")),
            versions(&["1.0", "1.5"]),
        );
        assert_eq!(result.wanted(), Some(&v("1.0")));
        assert!(result.outdated());
        assert!(!result.wanted_is_upgrade());
        assert!(result.latest_is_upgrade());
    }

    #[test]
    fn test_installed_outside_constraint() {
        let result = OutdatedResult::new(
            req("foo", "<2.0"),
            Some(v("2.1")),
            versions(&["1.9", "2.1"]),
        );
        assert!(result.install_not_wanted());
        assert_eq!(result.wanted(), Some(&v("1.9")));
    }

    #[test]
    fn test_no_published_version_matches() {
        let result = OutdatedResult::new(req("foo", ">=5.0"), None, versions(&["1.0", "2.0"]));
        assert!(result.wanted().is_none());
        assert_eq!(result.latest(), Some(&v("2.0")));
        assert!(!result.pypi_not_found());
    }

    #[test]
    fn test_published_is_sorted_and_deduplicated() {
        let result = OutdatedResult::new(
            req("foo", ""),
            None,
            versions(&["2.0", "1.0", "1.0.0", "1.5"]),
        );
        assert_eq!(result.published(), &versions(&["1.0", "1.5", "2.0"])[..]);
    }

    #[test]
    fn test_wanted_never_exceeds_latest() {
        let constraints = ["", "<1.5", ">=1.0,!=2.0", "==3.0", "~=1.0"];
        let published = versions(&["0.9", "1.0", "1.4", "1.5", "2.0", "2.1"]);
        for constraint in constraints {
            let result = OutdatedResult::new(req("foo", constraint), None, published.clone());
            if let (Some(wanted), Some(latest)) = (result.wanted(), result.latest()) {
                assert!(wanted <= latest, "constraint {}", constraint);
            }
        }
    }
}

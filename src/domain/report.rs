//! Aggregated report of all checked requirements

use super::OutdatedResult;
use crate::error::CheckError;
use std::fmt;

/// Exit status when outdated packages were found
pub const EXIT_OUTDATED: u8 = 1;

/// Exit status when a lookup or manifest failed
pub const EXIT_FAILURE: u8 = 2;

/// A requirement whose lookups failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    /// Package name as declared
    pub name: String,
    pub error: CheckError,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.error)
    }
}

/// One row of the report, in requirement discovery order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry {
    Checked(OutdatedResult),
    Failed(CheckFailure),
}

/// Overall state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    /// Nothing to check
    NoRequirements,
    /// Requirements found, none outdated
    UpToDate,
    /// This many requirements are outdated
    Outdated(usize),
}

/// Ordered results of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<ReportEntry>,
    manifest_errors: usize,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// Records manifest files that could not be read
    pub fn with_manifest_errors(mut self, count: usize) -> Self {
        self.manifest_errors = count;
        self
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Number of requirements processed, outdated or not
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Results flagged as outdated, in discovery order
    pub fn outdated(&self) -> impl Iterator<Item = &OutdatedResult> {
        self.entries.iter().filter_map(|entry| match entry {
            ReportEntry::Checked(result) if result.outdated() => Some(result),
            _ => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckFailure> {
        self.entries.iter().filter_map(|entry| match entry {
            ReportEntry::Failed(failure) => Some(failure),
            ReportEntry::Checked(_) => None,
        })
    }

    pub fn manifest_errors(&self) -> usize {
        self.manifest_errors
    }

    pub fn has_failures(&self) -> bool {
        self.manifest_errors > 0 || self.failures().next().is_some()
    }

    pub fn status(&self) -> ReportStatus {
        if self.entries.is_empty() {
            return ReportStatus::NoRequirements;
        }
        match self.outdated().count() {
            0 => ReportStatus::UpToDate,
            n => ReportStatus::Outdated(n),
        }
    }

    /// Process exit status: failures win, then outdated rows unless quiet
    pub fn exit_code(&self, quiet: bool) -> u8 {
        if self.has_failures() {
            return EXIT_FAILURE;
        }
        match self.status() {
            ReportStatus::Outdated(_) if !quiet => EXIT_OUTDATED,
            _ => 0,
        }
    }
}

impl FromIterator<ReportEntry> for Report {
    fn from_iter<I: IntoIterator<Item = ReportEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            manifest_errors: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Requirement, Version, VersionConstraint};
    use crate::error::RegistryError;

    fn checked(name: &str, installed: Option<&str>, published: &[&str]) -> ReportEntry {
        ReportEntry::Checked(OutdatedResult::new(
            Requirement::new(name, VersionConstraint::any()),
            installed.map(|v| Version::parse(v).unwrap()),
            published.iter().map(|v| Version::parse(v).unwrap()).collect(),
        ))
    }

    fn failed(name: &str) -> ReportEntry {
        ReportEntry::Failed(CheckFailure {
            name: name.to_string(),
            error: RegistryError::package_not_found(name, "PyPI").into(),
        })
    }

    #[test]
    fn test_empty_report() {
        let report = Report::new();
        assert_eq!(report.status(), ReportStatus::NoRequirements);
        assert_eq!(report.total(), 0);
        assert_eq!(report.exit_code(false), 0);
    }

    #[test]
    fn test_all_up_to_date() {
        let report: Report = vec![
            checked("a", Some("1.0"), &["1.0"]),
            checked("b", Some("2.0"), &["1.0", "2.0"]),
        ]
        .into_iter()
        .collect();
        assert_eq!(report.status(), ReportStatus::UpToDate);
        assert_eq!(report.total(), 2);
        assert_eq!(report.exit_code(false), 0);
    }

    #[test]
    fn test_outdated_rows_keep_discovery_order() {
        let report: Report = vec![
            checked("zeta", Some("1.0"), &["1.0", "2.0"]),
            checked("current", Some("1.0"), &["1.0"]),
            checked("alpha", None, &["0.1"]),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = report.outdated().map(|r| r.name()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert_eq!(report.status(), ReportStatus::Outdated(2));
        assert_eq!(report.total(), 3);
    }

    #[test]
    fn test_exit_code_outdated_respects_quiet() {
        let report: Report = vec![checked("a", Some("1.0"), &["2.0"])].into_iter().collect();
        assert_eq!(report.exit_code(false), EXIT_OUTDATED);
        assert_eq!(report.exit_code(true), 0);
    }

    #[test]
    fn test_failures_are_isolated_rows() {
        let report: Report = vec![
            checked("a", Some("1.0"), &["1.0"]),
            failed("missing"),
            checked("b", Some("1.0"), &["1.0"]),
        ]
        .into_iter()
        .collect();

        assert_eq!(report.total(), 3);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.status(), ReportStatus::UpToDate);
        assert!(report.has_failures());
        assert_eq!(report.exit_code(true), EXIT_FAILURE);
    }

    #[test]
    fn test_manifest_errors_fail_the_run() {
        let report = Report::new().with_manifest_errors(1);
        assert_eq!(report.status(), ReportStatus::NoRequirements);
        assert_eq!(report.exit_code(false), EXIT_FAILURE);
    }

    #[test]
    fn test_check_failure_display() {
        if let ReportEntry::Failed(failure) = failed("nope") {
            assert!(failure.to_string().starts_with("nope: package 'nope' not found"));
        } else {
            panic!("Expected Failed variant");
        }
    }
}

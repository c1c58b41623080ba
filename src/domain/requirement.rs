//! Dependency declarations parsed from manifest lines (PEP 508)

use super::VersionConstraint;
use crate::error::RequirementParseError;
use pep508_rs::{VerbatimUrl, VersionOrUrl};
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

// Trailing install-time option: whitespace followed by `-x` or `--xyz`
static OPTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)\s--?[a-z]").unwrap());

// Leading package name exactly as written
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)").unwrap());

// Runs of `-`, `_` and `.` collapse to a single `-`
static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_.]+").unwrap());

/// A single dependency declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Package name as declared
    pub name: String,
    /// Accepted versions
    pub constraint: VersionConstraint,
    /// Requested extras (informational only)
    pub extras: BTreeSet<String>,
    /// Direct URL reference, when the declaration points at one
    pub url: Option<String>,
}

impl Requirement {
    /// Creates a requirement without extras
    pub fn new(name: impl Into<String>, constraint: VersionConstraint) -> Self {
        Self {
            name: name.into(),
            constraint,
            extras: BTreeSet::new(),
            url: None,
        }
    }

    /// Adds extras (builder pattern)
    pub fn with_extras<I, S>(mut self, extras: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extras = extras.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the canonical form of the package name
    pub fn canonical_name(&self) -> String {
        canonicalize_name(&self.name)
    }
}

impl FromStr for Requirement {
    type Err = RequirementParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = pep508_rs::Requirement::<VerbatimUrl>::from_str(s.trim())
            .map_err(|e| RequirementParseError::new(s, e.to_string()))?;

        let (constraint, url) = match parsed.version_or_url {
            Some(VersionOrUrl::VersionSpecifier(specifiers)) => {
                (VersionConstraint::from_specifiers(specifiers), None)
            }
            Some(VersionOrUrl::Url(url)) => (VersionConstraint::any(), Some(url.to_string())),
            None => (VersionConstraint::any(), None),
        };

        // Keep the declared spelling for display; lookups canonicalize anyway
        let canonical = parsed.name.to_string();
        let name = NAME_RE
            .captures(s)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|declared| canonicalize_name(declared) == canonical)
            .unwrap_or(canonical);

        Ok(Self {
            name,
            constraint,
            extras: parsed.extras.iter().map(|e| e.to_string()).collect(),
            url,
        })
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.extras.is_empty() {
            let extras: Vec<&str> = self.extras.iter().map(String::as_str).collect();
            write!(f, "[{}]", extras.join(","))?;
        }
        if let Some(url) = &self.url {
            return write!(f, " @ {}", url);
        }
        write!(f, "{}", self.constraint)
    }
}

/// Parse one declaration line, returning `None` for anything that is not a
/// requirement (blank lines, `-r other.txt`, editable installs, ...).
pub fn parse_requirement_line(line: &str) -> Option<Requirement> {
    let spec = strip_options(line);
    match spec.parse::<Requirement>() {
        Ok(requirement) => Some(requirement),
        Err(e) => {
            if !spec.trim().is_empty() {
                debug!("Skipping line: {}", e);
            }
            None
        }
    }
}

/// Drop a trailing pip option such as `--hash=...` or `-i URL`
fn strip_options(line: &str) -> &str {
    OPTION_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(line)
}

/// Lowercase a package name and normalize separators so that
/// `Foo_Bar`, `foo.bar` and `foo-bar` compare equal
pub fn canonicalize_name(name: &str) -> String {
    SEPARATOR_RE
        .replace_all(name.trim(), "-")
        .to_ascii_lowercase()
}

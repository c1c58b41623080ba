//! Version and version constraint types
//!
//! Versions follow PEP 440 ordering: release segments compare component-wise
//! with missing trailing components treated as zero (`1.0 == 1.0.0`), and
//! dev/pre/post/local qualifiers order the way the packaging ecosystem does.

use crate::error::VersionParseError;
use pep508_rs::pep440_rs;
use std::fmt;
use std::str::FromStr;

/// A parsed, totally ordered package version
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(pep440_rs::Version);

impl Version {
    /// Parse a version string
    pub fn parse(s: &str) -> Result<Self, VersionParseError> {
        s.parse()
    }

    /// Returns true for alpha/beta/rc and dev releases
    pub fn is_prerelease(&self) -> bool {
        self.0.is_pre() || self.0.is_dev()
    }

    pub(crate) fn as_pep440(&self) -> &pep440_rs::Version {
        &self.0
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        pep440_rs::Version::from_str(s.trim())
            .map(Version)
            .map_err(|e| VersionParseError::new(s, e.to_string()))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A set of comparison clauses joined with logical AND (e.g. `>=1.2,<2.0`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint(pep440_rs::VersionSpecifiers);

impl VersionConstraint {
    /// A constraint that accepts every version
    pub fn any() -> Self {
        Self(pep440_rs::VersionSpecifiers::empty())
    }

    /// Parse a comma-separated list of clauses
    pub fn parse(s: &str) -> Result<Self, VersionParseError> {
        s.parse()
    }

    pub(crate) fn from_specifiers(specifiers: pep440_rs::VersionSpecifiers) -> Self {
        Self(specifiers)
    }

    /// Returns true when there are no clauses
    pub fn is_any(&self) -> bool {
        self.0.is_empty()
    }

    /// Membership test evaluating every clause.
    ///
    /// An empty constraint accepts everything. A non-empty constraint only
    /// admits pre-releases when one of its clauses names a pre-release.
    pub fn contains(&self, version: &Version) -> bool {
        if self.is_any() {
            return true;
        }
        if version.is_prerelease() && !self.names_prerelease() {
            return false;
        }
        self.0.contains(version.as_pep440())
    }

    fn names_prerelease(&self) -> bool {
        self.0
            .iter()
            .any(|clause| clause.version().is_pre() || clause.version().is_dev())
    }
}

impl Default for VersionConstraint {
    fn default() -> Self {
        Self::any()
    }
}

impl FromStr for VersionConstraint {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::any());
        }
        pep440_rs::VersionSpecifiers::from_str(s)
            .map(Self)
            .map_err(|e| VersionParseError::new(s, e.to_string()))
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

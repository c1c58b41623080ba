//! Manifest file discovery and parsing
//!
//! This module provides functionality to:
//! - Expand file patterns into concrete manifest paths
//! - Pick a reader from the file suffix
//! - Extract raw requirement strings from requirements files, setup.cfg and pyproject.toml

mod pyproject_toml;
mod requirements_txt;
mod resolver;
mod setup_cfg;

pub use pyproject_toml::PyprojectTomlReader;
pub use requirements_txt::{logical_lines, RequirementsTxtReader};
pub use resolver::{discover, resolve_files, Discovery, DEFAULT_PATTERNS};
pub use setup_cfg::SetupCfgReader;

use crate::domain::{parse_requirement_line, Requirement};
use crate::error::ManifestError;
use std::fmt;
use std::path::Path;
use tracing::info;

/// Kinds of manifest files, selected by suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    /// Line-oriented requirements file (anything not matched below)
    RequirementsTxt,
    /// INI-like packaging config (`.cfg`)
    SetupCfg,
    /// Project manifest (`.toml`)
    PyprojectToml,
}

impl ManifestKind {
    /// Select the manifest kind purely from the path suffix
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("cfg") => ManifestKind::SetupCfg,
            Some("toml") => ManifestKind::PyprojectToml,
            _ => ManifestKind::RequirementsTxt,
        }
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ManifestKind::RequirementsTxt => "requirements",
            ManifestKind::SetupCfg => "setup.cfg",
            ManifestKind::PyprojectToml => "pyproject.toml",
        };
        write!(f, "{}", name)
    }
}

/// Trait for extracting raw requirement strings from a manifest
pub trait ManifestReader {
    /// Extract declaration strings; `path` is used for messages and relative includes
    fn extract(&self, content: &str, path: &Path) -> Result<Vec<String>, ManifestError>;

    /// Returns the manifest kind this reader handles
    fn kind(&self) -> ManifestKind;
}

/// Get a manifest reader for the specified kind
pub fn get_reader(kind: ManifestKind) -> Box<dyn ManifestReader> {
    match kind {
        ManifestKind::RequirementsTxt => Box::new(RequirementsTxtReader),
        ManifestKind::SetupCfg => Box::new(SetupCfgReader),
        ManifestKind::PyprojectToml => Box::new(PyprojectTomlReader),
    }
}

/// Parse requirements from a manifest file path, skipping lines that are not requirements
pub fn parse_manifest(path: &Path) -> Result<Vec<Requirement>, ManifestError> {
    info!("Parse: {}", path.display());

    let content =
        std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;

    let reader = get_reader(ManifestKind::from_path(path));
    let lines = reader.extract(&content, path)?;

    Ok(lines
        .iter()
        .filter_map(|line| parse_requirement_line(line))
        .collect())
}

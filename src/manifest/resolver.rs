//! Manifest file resolution and requirement discovery
//!
//! Patterns are processed in order. A pattern naming an existing file is used
//! as-is; anything else is expanded as a glob relative to the project root.

use super::parse_manifest;
use crate::domain::Requirement;
use crate::error::ManifestError;
use glob::{MatchOptions, Pattern};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Patterns used when none are given on the command line
pub const DEFAULT_PATTERNS: &[&str] = &["requirements.txt", "setup.cfg", "pyproject.toml"];

/// Result of scanning all manifest files
#[derive(Debug, Default)]
pub struct Discovery {
    /// Files that were resolved, in pattern order
    pub files: Vec<PathBuf>,
    /// Requirements in discovery order
    pub requirements: Vec<Requirement>,
    /// Files that could not be read or decoded
    pub errors: Vec<ManifestError>,
}

/// Expand `patterns` into existing files under `root`, dropping duplicates.
///
/// `*` does not cross directory separators; `**` recurses.
pub fn resolve_files(patterns: &[String], root: &Path) -> Result<Vec<PathBuf>, ManifestError> {
    let options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::default()
    };

    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        let literal = root.join(pattern);
        if literal.is_file() {
            if seen.insert(dedup_key(&literal)) {
                files.push(literal);
            }
            continue;
        }

        let full_pattern = if Path::new(pattern).is_absolute() {
            pattern.clone()
        } else {
            format!(
                "{}/{}",
                Pattern::escape(&root.to_string_lossy()),
                pattern
            )
        };

        let matches = glob::glob_with(&full_pattern, options)
            .map_err(|e| ManifestError::invalid_pattern(pattern, e.msg))?;

        let mut matched = 0;
        for entry in matches {
            match entry {
                Ok(path) if path.is_file() => {
                    matched += 1;
                    if seen.insert(dedup_key(&path)) {
                        files.push(path);
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable path {}: {}", e.path().display(), e),
            }
        }

        if matched == 0 {
            debug!("No files match '{}'", pattern);
        }
    }

    Ok(files)
}

/// Identity of a file regardless of spelling; `./a.txt` and `a.txt` match
fn dedup_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| {
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    })
}

/// Resolve `patterns` and parse every matched file.
///
/// Files are read sequentially. A file that fails to read or decode is
/// recorded in [`Discovery::errors`] and the scan continues.
pub fn discover(patterns: &[String], root: &Path) -> Result<Discovery, ManifestError> {
    let files = resolve_files(patterns, root)?;
    let mut discovery = Discovery::default();

    for file in &files {
        match parse_manifest(file) {
            Ok(requirements) => {
                debug!("{}: {} requirement(s)", file.display(), requirements.len());
                discovery.requirements.extend(requirements);
            }
            Err(e) => {
                warn!("{}", e);
                discovery.errors.push(e);
            }
        }
    }

    discovery.files = files;
    Ok(discovery)
}

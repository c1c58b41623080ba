//! pyproject.toml reader
//!
//! Handles:
//! - project.dependencies (PEP 621)
//! - project.optional-dependencies (PEP 621)
//! - dependency-groups (PEP 735)
//!
//! A field of the wrong shape is skipped with a warning; the others are still read.

use super::{ManifestKind, ManifestReader};
use crate::error::ManifestError;
use std::path::Path;
use toml::{Table, Value};
use tracing::warn;

/// Reader for pyproject.toml files
pub struct PyprojectTomlReader;

impl ManifestReader for PyprojectTomlReader {
    fn extract(&self, content: &str, path: &Path) -> Result<Vec<String>, ManifestError> {
        let document: Table = toml::from_str(content)
            .map_err(|e: toml::de::Error| ManifestError::toml_parse_error(path, e.to_string()))?;

        let mut lines = Vec::new();
        let project = document.get("project");

        if let Some(deps) = project.and_then(|p| p.get("dependencies")) {
            collect_list(deps, path, "project.dependencies", &mut lines);
        }

        if let Some(optional) = project.and_then(|p| p.get("optional-dependencies")) {
            collect_groups(optional, path, "project.optional-dependencies", &mut lines);
        }

        if let Some(groups) = document.get("dependency-groups") {
            collect_groups(groups, path, "dependency-groups", &mut lines);
        }

        Ok(lines)
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::PyprojectToml
    }
}

fn collect_groups(value: &Value, path: &Path, field: &str, out: &mut Vec<String>) {
    let Some(table) = value.as_table() else {
        warn!("{}", ManifestError::invalid_field(path, field, "expected a table"));
        return;
    };

    for (group, deps) in table {
        collect_list(deps, path, &format!("{}.{}", field, group), out);
    }
}

fn collect_list(value: &Value, path: &Path, field: &str, out: &mut Vec<String>) {
    let Some(items) = value.as_array() else {
        warn!("{}", ManifestError::invalid_field(path, field, "expected an array"));
        return;
    };

    for item in items {
        match item {
            Value::String(line) => out.push(line.clone()),
            // `{ include-group = "..." }` entries of dependency groups
            Value::Table(_) => {}
            other => warn!(
                "{}",
                ManifestError::invalid_field(
                    path,
                    field,
                    format!("expected a string, found {}", other.type_str())
                )
            ),
        }
    }
}

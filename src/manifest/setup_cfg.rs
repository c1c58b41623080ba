//! setup.cfg reader
//!
//! Handles:
//! - [options] setup_requires
//! - [options] install_requires
//! - [options.extras_require] (one list per extra)
//! - `file:` directives naming requirements files next to setup.cfg
//!
//! Multi-line values are split by line, single-line values by `;`.

use super::{logical_lines, ManifestKind, ManifestReader};
use crate::error::ManifestError;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Reader for setup.cfg files
pub struct SetupCfgReader;

impl ManifestReader for SetupCfgReader {
    fn extract(&self, content: &str, path: &Path) -> Result<Vec<String>, ManifestError> {
        let document = IniDocument::parse(content, path);
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let mut lines = Vec::new();

        for key in ["setup_requires", "install_requires"] {
            if let Some(value) = document.get("options", key) {
                extend_field(&mut lines, value, base, path, &format!("options.{}", key));
            }
        }

        if let Some(extras) = document.section("options.extras_require") {
            for (extra, value) in extras {
                let field = format!("extras_require[{}]", extra);
                extend_field(&mut lines, value, base, path, &field);
            }
        }

        Ok(lines)
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::SetupCfg
    }
}

fn extend_field(out: &mut Vec<String>, value: &str, base: &Path, path: &Path, field: &str) {
    match field_values(value, base) {
        Ok(values) => out.extend(values),
        Err(message) => warn!("{}", ManifestError::invalid_field(path, field, message)),
    }
}

fn field_values(value: &str, base: &Path) -> Result<Vec<String>, String> {
    if let Some(files) = value.trim().strip_prefix("file:") {
        let mut lines = Vec::new();
        for file in files.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            let content = fs::read_to_string(base.join(file))
                .map_err(|e| format!("cannot read '{}': {}", file, e))?;
            lines.extend(logical_lines(&content));
        }
        return Ok(lines);
    }

    let items: Vec<&str> = if value.contains('\n') {
        value.lines().collect()
    } else {
        value.split(';').collect()
    };

    Ok(items
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty() && !item.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Minimal INI document: ordered sections of ordered key/value pairs.
///
/// Keys are lowercased. Indented lines continue the previous value.
#[derive(Debug, Default)]
struct IniDocument {
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl IniDocument {
    fn parse(content: &str, path: &Path) -> Self {
        let mut document = IniDocument::default();
        let mut current: Option<usize> = None;
        let mut open_key = false;

        for (number, raw) in content.lines().enumerate() {
            let line = raw.trim_end();
            let trimmed = line.trim_start();

            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let indented = line.len() != trimmed.len();

            if indented && open_key {
                if let Some((_, entries)) = current.map(|i| &mut document.sections[i]) {
                    if let Some((_, value)) = entries.last_mut() {
                        if !value.is_empty() {
                            value.push('\n');
                        }
                        value.push_str(trimmed);
                    }
                }
                continue;
            }

            if let Some(name) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            {
                current = Some(document.section_index(name.trim()));
                open_key = false;
                continue;
            }

            let Some(index) = current else {
                warn!("{}:{}: entry outside of any section", path.display(), number + 1);
                continue;
            };

            match trimmed.find(['=', ':']) {
                Some(pos) => {
                    let key = trimmed[..pos].trim().to_lowercase();
                    let value = trimmed[pos + 1..].trim().to_string();
                    document.sections[index].1.push((key, value));
                    open_key = true;
                }
                None => {
                    warn!("{}:{}: malformed line '{}'", path.display(), number + 1, trimmed);
                    open_key = false;
                }
            }
        }

        document
    }

    fn section_index(&mut self, name: &str) -> usize {
        if let Some(index) = self.sections.iter().position(|(n, _)| n == name) {
            return index;
        }
        self.sections.push((name.to_string(), Vec::new()));
        self.sections.len() - 1
    }

    fn section(&self, name: &str) -> Option<&[(String, String)]> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entries)| entries.as_slice())
    }

    /// Last value of `key` in `section`, accepting dashed spellings of the key
    fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?
            .iter()
            .rev()
            .find(|(k, _)| k.replace('-', "_") == key)
            .map(|(_, v)| v.as_str())
    }
}

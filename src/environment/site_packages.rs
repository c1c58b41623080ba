//! Installed distribution metadata scanning
//!
//! Recognizes `*.dist-info` directories (METADATA) and `*.egg-info`
//! directories or files (PKG-INFO). When the metadata file lacks a header the
//! value is taken from the entry name, e.g. `foo_bar-1.2.dist-info`.

use crate::domain::canonicalize_name;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One installed distribution as recorded on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledDist {
    /// Name as written in the metadata
    pub name: String,
    /// Unparsed version string
    pub version: String,
    /// Metadata entry the values were read from
    pub path: PathBuf,
}

/// Read every distribution found directly inside `dir`, sorted by entry name.
///
/// Unreadable directories yield nothing.
pub fn scan_dir(dir: &Path) -> Vec<InstalledDist> {
    let Ok(entries) = fs::read_dir(dir) else {
        debug!("Skipping unreadable path entry {}", dir.display());
        return Vec::new();
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    paths.sort();

    paths.iter().filter_map(|path| read_dist(path)).collect()
}

fn read_dist(path: &Path) -> Option<InstalledDist> {
    let file_name = path.file_name()?.to_str()?;
    let (stem, metadata) = if let Some(stem) = file_name.strip_suffix(".dist-info") {
        (stem, path.join("METADATA"))
    } else if let Some(stem) = file_name.strip_suffix(".egg-info") {
        let metadata = if path.is_dir() {
            path.join("PKG-INFO")
        } else {
            path.to_path_buf()
        };
        (stem, metadata)
    } else {
        return None;
    };

    let headers = fs::read_to_string(&metadata)
        .map(|content| parse_headers(&content))
        .unwrap_or_default();

    let mut parts = stem.splitn(3, '-');
    let stem_name = parts.next().filter(|s| !s.is_empty());
    let stem_version = parts.next().filter(|s| !s.is_empty());

    let name = headers.name.or_else(|| stem_name.map(String::from))?;
    let version = headers.version.or_else(|| stem_version.map(String::from))?;

    Some(InstalledDist {
        name,
        version,
        path: path.to_path_buf(),
    })
}

#[derive(Debug, Default)]
struct Headers {
    name: Option<String>,
    version: Option<String>,
}

/// Read `Name:` and `Version:` from the RFC 822 style header block
fn parse_headers(content: &str) -> Headers {
    let mut headers = Headers::default();
    for line in content.lines() {
        if line.trim().is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim().to_string();
            match key.trim().to_ascii_lowercase().as_str() {
                "name" if headers.name.is_none() => headers.name = Some(value),
                "version" if headers.version.is_none() => headers.version = Some(value),
                _ => {}
            }
        }
    }
    headers
}

/// Canonical key for a distribution
pub fn dist_key(dist: &InstalledDist) -> String {
    canonicalize_name(&dist.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dist_info(dir: &Path, entry: &str, metadata: Option<&str>) {
        let path = dir.join(entry);
        fs::create_dir(&path).unwrap();
        if let Some(metadata) = metadata {
            fs::write(path.join("METADATA"), metadata).unwrap();
        }
    }

    #[test]
    fn test_parse_headers_stops_at_body() {
        let headers = parse_headers(
            "Metadata-Version: 2.1\nName: Requests\nVersion: 2.31.0\n\nName: not-this\n",
        );
        assert_eq!(headers.name.as_deref(), Some("Requests"));
        assert_eq!(headers.version.as_deref(), Some("2.31.0"));
    }

    #[test]
    fn test_scan_dist_info() {
        let dir = TempDir::new().unwrap();
        dist_info(
            dir.path(),
            "requests-2.31.0.dist-info",
            Some("Metadata-Version: 2.1\nName: requests\nVersion: 2.31.0\n"),
        );
        fs::create_dir(dir.path().join("requests")).unwrap();

        let dists = scan_dir(dir.path());
        assert_eq!(dists.len(), 1);
        assert_eq!(dists[0].name, "requests");
        assert_eq!(dists[0].version, "2.31.0");
    }

    #[test]
    fn test_name_and_version_from_entry_name() {
        let dir = TempDir::new().unwrap();
        dist_info(dir.path(), "typing_extensions-4.9.0.dist-info", None);

        let dists = scan_dir(dir.path());
        assert_eq!(dists[0].name, "typing_extensions");
        assert_eq!(dists[0].version, "4.9.0");
        assert_eq!(dist_key(&dists[0]), "typing-extensions");
    }

    #[test]
    fn test_egg_info_file_and_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("six-1.16.0-py3.11.egg-info"),
            "Name: six\nVersion: 1.16.0\n",
        )
        .unwrap();
        let egg_dir = dir.path().join("PyYAML-6.0.1-py3.11.egg-info");
        fs::create_dir(&egg_dir).unwrap();
        fs::write(egg_dir.join("PKG-INFO"), "Name: PyYAML\nVersion: 6.0.1\n").unwrap();

        let dists = scan_dir(dir.path());
        let found: Vec<(&str, &str)> = dists
            .iter()
            .map(|d| (d.name.as_str(), d.version.as_str()))
            .collect();
        assert_eq!(found, vec![("PyYAML", "6.0.1"), ("six", "1.16.0")]);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(scan_dir(&dir.path().join("missing")).is_empty());
    }
}

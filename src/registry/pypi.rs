//! PyPI JSON API adapter
//!
//! Fetches published versions from a PyPI-compatible index.
//! API endpoint: {index}/pypi/{package}/json

use crate::domain::Version;
use crate::error::RegistryError;
use crate::registry::{HttpClient, VersionSource};
use async_trait::async_trait;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

/// Public PyPI base URL
pub const DEFAULT_INDEX_URL: &str = "https://pypi.org";

/// PyPI adapter
pub struct PyPIAdapter {
    client: HttpClient,
    base_url: String,
}

/// PyPI package metadata response; only the release keys are used
#[derive(Debug, Deserialize)]
struct PyPIResponse {
    #[serde(default)]
    releases: HashMap<String, IgnoredAny>,
}

impl PyPIAdapter {
    /// Create a new adapter for the public index
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, DEFAULT_INDEX_URL)
    }

    /// Create an adapter for another index, such as a mirror or a test server
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> String {
        format!("{}/pypi/{}/json", self.base_url, package)
    }
}

#[async_trait]
impl VersionSource for PyPIAdapter {
    fn registry_name(&self) -> &'static str {
        "PyPI"
    }

    async fn published_versions(&self, package: &str) -> Result<Vec<Version>, RegistryError> {
        let url = self.build_url(package);
        let response: PyPIResponse = self
            .client
            .get_json(&url, package, self.registry_name())
            .await?;

        Ok(filter_published(response.releases.keys()))
    }
}

/// Parse raw release keys, dropping malformed and pre-release entries.
///
/// The result is sorted ascending with duplicates (by value) removed.
pub fn filter_published<I, S>(raw: I) -> Vec<Version>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut versions: Vec<Version> = raw
        .into_iter()
        .filter_map(|s| match Version::parse(s.as_ref()) {
            Ok(version) => Some(version),
            Err(e) => {
                debug!("Skipping release: {}", e);
                None
            }
        })
        .filter(|v| !v.is_prerelease())
        .collect();

    versions.sort();
    versions.dedup();
    versions
}

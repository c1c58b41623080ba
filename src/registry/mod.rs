//! Package index access for published version lists
//!
//! This module provides:
//! - HTTP client shared foundation with a per-host connection gate
//! - PyPI JSON API adapter

mod client;
mod pypi;

pub use client::{HttpClient, DEFAULT_MAX_PER_HOST, DEFAULT_TIMEOUT};
pub use pypi::{filter_published, PyPIAdapter, DEFAULT_INDEX_URL};

use crate::domain::Version;
use crate::error::RegistryError;
use async_trait::async_trait;

/// Source of published versions for a package
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// Fetch published, non-pre-release versions for a canonical package name,
    /// ascending and deduplicated
    async fn published_versions(&self, package: &str) -> Result<Vec<Version>, RegistryError>;
}

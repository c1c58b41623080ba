//! Local installed-version lookup
//!
//! This module provides:
//! - The `LocalInspector` trait used by the checker
//! - `InstalledPackages`, an index of distributions found on the interpreter's search path
//! - Interpreter discovery through a mockable command runner

mod interpreter;
mod site_packages;

pub use interpreter::{default_interpreter, query_sys_path, CommandOutput, CommandRunner, SystemRunner};
pub use site_packages::{scan_dir, InstalledDist};

use crate::domain::{canonicalize_name, Version};
use crate::error::EnvironmentError;
use async_trait::async_trait;
use site_packages::dist_key;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Source of installed versions
#[async_trait]
pub trait LocalInspector: Send + Sync {
    /// Installed version of a canonical package name, or `None` when not installed
    async fn installed_version(&self, package: &str) -> Result<Option<Version>, EnvironmentError>;
}

/// Distributions indexed by canonical name. The first directory that
/// provides a name wins, mirroring the interpreter's own lookup order.
#[derive(Debug, Clone, Default)]
pub struct InstalledPackages {
    dists: HashMap<String, InstalledDist>,
}

impl InstalledPackages {
    /// Scan `dirs` in order
    pub fn scan(dirs: &[PathBuf]) -> Self {
        let mut dists = HashMap::new();
        for dir in dirs {
            for dist in scan_dir(dir) {
                dists.entry(dist_key(&dist)).or_insert(dist);
            }
        }
        debug!("Found {} installed distribution(s)", dists.len());
        Self { dists }
    }

    /// Scan the search path reported by `python`.
    ///
    /// An interpreter that cannot be queried gives an empty environment.
    pub fn from_interpreter<R: CommandRunner>(runner: &R, python: &str) -> Self {
        match query_sys_path(runner, python) {
            Ok(dirs) => Self::scan(&dirs),
            Err(e) => {
                warn!("{}; treating every package as not installed", e);
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.dists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dists.is_empty()
    }

    /// Metadata entry for a package name, in any spelling
    pub fn get(&self, package: &str) -> Option<&InstalledDist> {
        self.dists.get(&canonicalize_name(package))
    }
}

#[async_trait]
impl LocalInspector for InstalledPackages {
    async fn installed_version(&self, package: &str) -> Result<Option<Version>, EnvironmentError> {
        let Some(dist) = self.get(package) else {
            return Ok(None);
        };

        Version::parse(&dist.version).map(Some).map_err(|_| {
            EnvironmentError::invalid_installed_version(&dist.name, &dist.version, &dist.path)
        })
    }
}

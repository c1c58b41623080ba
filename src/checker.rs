//! Outdated checker coordinating local and remote lookups
//!
//! This module provides:
//! - Per-requirement checks running the installed and published lookups concurrently
//! - One spawned task per requirement, awaited in discovery order
//! - One index request per distinct package name
//! - Failure isolation: a failed lookup becomes a report row, not an abort

use crate::domain::{CheckFailure, OutdatedResult, Report, ReportEntry, Requirement, Version};
use crate::environment::LocalInspector;
use crate::error::{CheckError, RegistryError};
use crate::progress::Progress;
use crate::registry::{
    HttpClient, PyPIAdapter, VersionSource, DEFAULT_INDEX_URL, DEFAULT_MAX_PER_HOST,
    DEFAULT_TIMEOUT,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Shared published-versions lookup for one canonical name
type PublishedCell = Arc<OnceCell<Result<Vec<Version>, RegistryError>>>;

/// Settings for a checker run
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Package index base URL
    pub index_url: String,
    /// Simultaneous requests per host
    pub max_connections: usize,
    /// Per-request deadline
    pub timeout: Duration,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            max_connections: DEFAULT_MAX_PER_HOST,
            timeout: DEFAULT_TIMEOUT,
            show_progress: false,
        }
    }
}

/// Checks requirements against a version source and a local inspector
pub struct OutdatedChecker {
    source: Arc<dyn VersionSource>,
    inspector: Arc<dyn LocalInspector>,
    show_progress: bool,
}

impl OutdatedChecker {
    /// Create a checker from explicit lookups
    pub fn new(source: Arc<dyn VersionSource>, inspector: Arc<dyn LocalInspector>) -> Self {
        Self {
            source,
            inspector,
            show_progress: false,
        }
    }

    /// Create a checker querying the configured PyPI index
    pub fn from_config(
        config: &CheckerConfig,
        inspector: Arc<dyn LocalInspector>,
    ) -> Result<Self, RegistryError> {
        let client = HttpClient::with_config(config.timeout, config.max_connections)?;
        let source = PyPIAdapter::with_base_url(client, config.index_url.clone());

        Ok(Self::new(Arc::new(source), inspector).with_progress(config.show_progress))
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check a single requirement
    pub async fn check(&self, requirement: Requirement) -> Result<OutdatedResult, CheckError> {
        check_requirement(
            Arc::clone(&self.source),
            Arc::clone(&self.inspector),
            requirement,
            PublishedCell::default(),
        )
        .await
    }

    /// Check every requirement concurrently and collect the results in input order
    pub async fn run(&self, requirements: Vec<Requirement>) -> Report {
        let mut progress = Progress::new(self.show_progress);
        progress.start(requirements.len() as u64, "Checking packages");
        let ticker = progress.ticker();

        let mut cells: HashMap<String, PublishedCell> = HashMap::new();
        let handles: Vec<_> = requirements
            .into_iter()
            .map(|requirement| {
                let name = requirement.name.clone();
                let cell = Arc::clone(cells.entry(requirement.canonical_name()).or_default());
                let source = Arc::clone(&self.source);
                let inspector = Arc::clone(&self.inspector);
                let ticker = ticker.clone();

                let handle = tokio::spawn(async move {
                    let result = check_requirement(source, inspector, requirement, cell).await;
                    ticker.inc();
                    result
                });
                (name, handle)
            })
            .collect();

        let mut report = Report::new();
        for (name, handle) in handles {
            let entry = match handle.await {
                Ok(Ok(result)) => ReportEntry::Checked(result),
                Ok(Err(error)) => {
                    debug!("Check failed for {}: {}", name, error);
                    ReportEntry::Failed(CheckFailure { name, error })
                }
                Err(join_error) => ReportEntry::Failed(CheckFailure {
                    error: CheckError::Task {
                        package: name.clone(),
                        message: join_error.to_string(),
                    },
                    name,
                }),
            };
            report.push(entry);
        }

        progress.finish_and_clear();
        report
    }
}

async fn check_requirement(
    source: Arc<dyn VersionSource>,
    inspector: Arc<dyn LocalInspector>,
    requirement: Requirement,
    cell: PublishedCell,
) -> Result<OutdatedResult, CheckError> {
    let name = requirement.canonical_name();
    info!("Checking: {} {}", requirement.name, requirement.constraint);

    let (installed, published) = tokio::join!(
        inspector.installed_version(&name),
        cell.get_or_init(|| source.published_versions(&name)),
    );

    Ok(OutdatedResult::new(
        requirement,
        installed?,
        published.clone()?,
    ))
}

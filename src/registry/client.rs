//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - Configurable timeout and User-Agent
//! - A per-host connection gate (requests beyond the limit wait for a permit)
//! - Status code mapping into RegistryError
//!
//! Failed requests are not retried.

use crate::error::RegistryError;
use reqwest::{Client, StatusCode, Url};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::debug;

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of simultaneous requests per host
pub const DEFAULT_MAX_PER_HOST: usize = 5;

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("pip-outdated/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper with a per-host request limit
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_per_host: usize,
    gates: Arc<Mutex<HashMap<String, Arc<Semaphore>>>>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, RegistryError> {
        Self::with_config(DEFAULT_TIMEOUT, DEFAULT_MAX_PER_HOST)
    }

    /// Create a new HTTP client with custom timeout and per-host limit
    pub fn with_config(timeout: Duration, max_per_host: usize) -> Result<Self, RegistryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| RegistryError::ClientError {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            max_per_host: max_per_host.max(1),
            gates: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Maximum simultaneous requests per host
    pub fn max_per_host(&self) -> usize {
        self.max_per_host
    }

    /// Semaphore shared by every request to `host`
    fn gate(&self, host: &str) -> Arc<Semaphore> {
        let mut gates = match self.gates.lock() {
            Ok(gates) => gates,
            Err(poisoned) => poisoned.into_inner(),
        };
        gates
            .entry(host.to_string())
            .or_insert_with(|| Arc::new(Semaphore::new(self.max_per_host)))
            .clone()
    }

    /// Perform a GET request and parse the JSON body.
    ///
    /// The host permit is held until the body has been read.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        package: &str,
        registry: &str,
    ) -> Result<T, RegistryError> {
        let parsed = Url::parse(url)
            .map_err(|e| RegistryError::network_error(package, registry, e.to_string()))?;
        let host = parsed.host_str().unwrap_or_default().to_string();

        let gate = self.gate(&host);
        let _permit = gate
            .acquire_owned()
            .await
            .map_err(|e| RegistryError::network_error(package, registry, e.to_string()))?;

        debug!("GET {}", url);
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| map_send_error(e, package, registry))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => {
                return Err(RegistryError::package_not_found(package, registry));
            }
            status => {
                return Err(RegistryError::network_error(
                    package,
                    registry,
                    format!("HTTP {}", status),
                ));
            }
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                RegistryError::timeout(package, registry)
            } else {
                RegistryError::invalid_response(
                    package,
                    registry,
                    format!("failed to parse JSON: {}", e),
                )
            }
        })
    }
}

fn map_send_error(error: reqwest::Error, package: &str, registry: &str) -> RegistryError {
    if error.is_timeout() {
        RegistryError::timeout(package, registry)
    } else {
        RegistryError::network_error(package, registry, error.to_string())
    }
}

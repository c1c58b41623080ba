//! Application error types using thiserror
//!
//! Error hierarchy:
//! - VersionParseError / RequirementParseError: line-level parse failures (skippable)
//! - ManifestError: Issues reading or decoding manifest files
//! - RegistryError: Issues with package index communication
//! - EnvironmentError: Issues reading the local installed-package metadata
//! - CheckError: A single requirement's lookup failed

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Package index related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Local environment related errors
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}

/// A version string that does not follow the versioning scheme
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid version '{input}': {message}")]
pub struct VersionParseError {
    pub input: String,
    pub message: String,
}

/// A declaration line that is not a valid requirement
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid requirement '{input}': {message}")]
pub struct RequirementParseError {
    pub input: String,
    pub message: String,
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error (for pyproject.toml)
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// A single field of a structured manifest has the wrong shape
    #[error("ignoring field '{field}' in {path}: {message}")]
    InvalidField {
        path: PathBuf,
        field: String,
        message: String,
    },

    /// Glob pattern could not be compiled
    #[error("invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Errors related to package index communication
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed or returned a non-success status
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// The HTTP client could not be built
    #[error("failed to create HTTP client: {message}")]
    ClientError { message: String },
}

/// Errors related to the local installed-package metadata
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    /// Installed metadata carries a version that does not parse
    #[error("installed package '{package}' has invalid version '{version}' ({path})")]
    InvalidInstalledVersion {
        package: String,
        version: String,
        path: PathBuf,
    },

    /// The interpreter could not report its search path
    #[error("failed to query interpreter '{python}': {message}")]
    InterpreterFailed { python: String, message: String },
}

/// Failure of a single requirement's lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    /// The check task panicked or was aborted
    #[error("check for '{package}' did not complete: {message}")]
    Task { package: String, message: String },
}

impl VersionParseError {
    /// Creates a new VersionParseError
    pub fn new(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            message: message.into(),
        }
    }
}

impl RequirementParseError {
    /// Creates a new RequirementParseError
    pub fn new(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            message: message.into(),
        }
    }
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidField error
    pub fn invalid_field(
        path: impl Into<PathBuf>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ManifestError::InvalidField {
            path: path.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidPattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        ManifestError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}

impl EnvironmentError {
    /// Creates a new InvalidInstalledVersion error
    pub fn invalid_installed_version(
        package: impl Into<String>,
        version: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        EnvironmentError::InvalidInstalledVersion {
            package: package.into(),
            version: version.into(),
            path: path.into(),
        }
    }

    /// Creates a new InterpreterFailed error
    pub fn interpreter_failed(python: impl Into<String>, message: impl Into<String>) -> Self {
        EnvironmentError::InterpreterFailed {
            python: python.into(),
            message: message.into(),
        }
    }
}

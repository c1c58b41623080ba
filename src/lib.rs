//! pip-outdated - find outdated Python dependencies
//!
//! This library scans dependency declarations in:
//! - requirements files (requirements.txt and friends)
//! - setup.cfg
//! - pyproject.toml
//!
//! and compares each requirement with the installed version and the
//! versions published on a PyPI-compatible index.

pub mod checker;
pub mod cli;
pub mod domain;
pub mod environment;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod progress;
pub mod registry;

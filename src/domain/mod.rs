//! Core domain models for pip-outdated
//!
//! This module contains the fundamental types used throughout the application:
//! - Versions and version constraints
//! - Requirements parsed from manifest lines
//! - Per-requirement outdated results
//! - The aggregated report

mod outdated;
mod report;
mod requirement;
mod version;

pub use outdated::OutdatedResult;
pub use report::{CheckFailure, Report, ReportEntry, ReportStatus, EXIT_FAILURE, EXIT_OUTDATED};
pub use requirement::{canonicalize_name, parse_requirement_line, Requirement};
pub use version::{Version, VersionConstraint};

//! JSON output formatter for machine processing
//!
//! Emits the outdated rows with their derived predicates, the failed
//! lookups, and the overall status.

use crate::domain::{OutdatedResult, Report, ReportStatus};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput {
    /// Requirements processed, outdated or not
    total: usize,
    status: &'static str,
    outdated: Vec<JsonRow>,
    failures: Vec<JsonFailure>,
    /// Manifest files that could not be read
    #[serde(skip_serializing_if = "is_zero")]
    manifest_errors: usize,
}

/// JSON representation of an outdated requirement
#[derive(Serialize)]
struct JsonRow {
    name: String,
    constraint: String,
    installed: Option<String>,
    wanted: Option<String>,
    latest: Option<String>,
    install_not_found: bool,
    install_not_wanted: bool,
    pypi_not_found: bool,
    outdated: bool,
}

/// JSON representation of a failed lookup
#[derive(Serialize)]
struct JsonFailure {
    name: String,
    error: String,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

fn status_label(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::NoRequirements => "no_requirements",
        ReportStatus::UpToDate => "up_to_date",
        ReportStatus::Outdated(_) => "outdated",
    }
}

impl From<&OutdatedResult> for JsonRow {
    fn from(result: &OutdatedResult) -> Self {
        Self {
            name: result.name().to_string(),
            constraint: result.requirement().constraint.to_string(),
            installed: result.installed().map(ToString::to_string),
            wanted: result.wanted().map(ToString::to_string),
            latest: result.latest().map(ToString::to_string),
            install_not_found: result.install_not_found(),
            install_not_wanted: result.install_not_wanted(),
            pypi_not_found: result.pypi_not_found(),
            outdated: result.outdated(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            total: report.total(),
            status: status_label(report.status()),
            outdated: report.outdated().map(JsonRow::from).collect(),
            failures: report
                .failures()
                .map(|failure| JsonFailure {
                    name: failure.name.clone(),
                    error: failure.error.to_string(),
                })
                .collect(),
            manifest_errors: report.manifest_errors(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CheckFailure, ReportEntry, Requirement, Version, VersionConstraint};
    use crate::error::RegistryError;
    use serde_json::Value;

    fn render(report: &Report) -> Value {
        let mut buffer = Vec::new();
        JsonFormatter::new().format(report, &mut buffer).unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    #[test]
    fn test_empty_report() {
        let json = render(&Report::new());
        assert_eq!(json["total"], 0);
        assert_eq!(json["status"], "no_requirements");
        assert!(json["outdated"].as_array().unwrap().is_empty());
        assert!(json.get("manifest_errors").is_none());
    }

    #[test]
    fn test_outdated_row() {
        let report: Report = vec![ReportEntry::Checked(OutdatedResult::new(
            Requirement::new("requests", VersionConstraint::parse(">=2.0,<3.0").unwrap()),
            Some(Version::parse("2.0.0").unwrap()),
            vec![
                Version::parse("2.0.0").unwrap(),
                Version::parse("2.31.0").unwrap(),
                Version::parse("3.0.0").unwrap(),
            ],
        ))]
        .into_iter()
        .collect();

        let json = render(&report);
        assert_eq!(json["status"], "outdated");
        let row = &json["outdated"][0];
        assert_eq!(row["name"], "requests");
        assert_eq!(row["installed"], "2.0.0");
        assert_eq!(row["wanted"], "2.31.0");
        assert_eq!(row["latest"], "3.0.0");
        assert_eq!(row["install_not_found"], false);
        assert_eq!(row["outdated"], true);
        assert!(row["constraint"].as_str().unwrap().contains(">=2.0"));
    }

    #[test]
    fn test_failures_and_manifest_errors() {
        let report = vec![ReportEntry::Failed(CheckFailure {
            name: "nope".to_string(),
            error: RegistryError::package_not_found("nope", "PyPI").into(),
        })]
        .into_iter()
        .collect::<Report>()
        .with_manifest_errors(2);

        let json = render(&report);
        assert_eq!(json["total"], 1);
        assert_eq!(json["failures"][0]["name"], "nope");
        assert!(json["failures"][0]["error"]
            .as_str()
            .unwrap()
            .contains("not found"));
        assert_eq!(json["manifest_errors"], 2);
    }
}

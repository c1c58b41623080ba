//! Text output formatter for human-readable display
//!
//! This module provides:
//! - A color legend followed by an ASCII table of outdated packages
//! - Summary lines for the "nothing found" and "up-to-date" states
//! - A list of packages whose lookups failed

use crate::domain::{OutdatedResult, Report, ReportStatus, Version};
use crate::output::OutputFormatter;
use colored::Colorize;
use std::io::Write;

const HEADERS: [&str; 4] = ["Name", "Installed", "Wanted", "Latest"];

/// Highlight applied to a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Plain,
    /// Unavailable, outdated or outside the constraint
    Bad,
    /// An upgrade is available
    Good,
}

#[derive(Debug, Clone)]
struct Cell {
    text: String,
    tone: Tone,
}

impl Cell {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self { color: true }
    }

    /// Create a new text formatter with color option
    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Plain => text.to_string(),
            Tone::Bad => text.red().to_string(),
            Tone::Good => text.green().to_string(),
        }
    }

    /// Cells for one outdated row
    fn row(&self, result: &OutdatedResult) -> [Cell; 4] {
        let installed_tone = if result.install_not_found() || result.install_not_wanted() {
            Tone::Bad
        } else {
            Tone::Plain
        };
        let installed = Cell::new(display(result.installed()), installed_tone);

        let wanted = match result.wanted() {
            Some(v) if !result.pypi_not_found() => {
                let tone = if result.wanted_is_upgrade() {
                    Tone::Good
                } else {
                    Tone::Plain
                };
                Cell::new(v.to_string(), tone)
            }
            _ => Cell::new("None", Tone::Bad),
        };

        let latest = match result.latest() {
            Some(v) => {
                let tone = if result.latest_is_upgrade() {
                    Tone::Good
                } else {
                    Tone::Plain
                };
                Cell::new(v.to_string(), tone)
            }
            None => Cell::new("None", Tone::Bad),
        };

        [
            Cell::new(result.name(), Tone::Plain),
            installed,
            wanted,
            latest,
        ]
    }

    fn write_legend(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            writer,
            "{} = unavailable/outdated/out of version specifier",
            self.paint("Red", Tone::Bad)
        )?;
        writeln!(writer, "{} = updatable", self.paint("Green", Tone::Good))
    }

    fn write_table(&self, rows: &[[Cell; 4]], writer: &mut dyn Write) -> std::io::Result<()> {
        let mut widths = HEADERS.map(str::len);
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.text.chars().count());
            }
        }

        let border: String = widths
            .iter()
            .map(|w| format!("+{}", "-".repeat(w + 2)))
            .collect::<String>()
            + "+";

        let header = HEADERS.map(|h| Cell::new(h, Tone::Plain));

        writeln!(writer, "{}", border)?;
        self.write_row(&header, &widths, writer)?;
        writeln!(writer, "{}", border)?;
        for row in rows {
            self.write_row(row, &widths, writer)?;
        }
        writeln!(writer, "{}", border)
    }

    fn write_row(
        &self,
        row: &[Cell; 4],
        widths: &[usize; 4],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for (cell, width) in row.iter().zip(widths) {
            // Pad on the plain text so escape codes do not skew alignment
            let padding = width - cell.text.chars().count();
            write!(
                writer,
                "| {}{} ",
                self.paint(&cell.text, cell.tone),
                " ".repeat(padding)
            )?;
        }
        writeln!(writer, "|")
    }

    fn write_failures(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        let failures: Vec<_> = report.failures().collect();
        if failures.is_empty() {
            return Ok(());
        }

        writeln!(writer)?;
        writeln!(
            writer,
            "{}",
            self.paint(
                &format!("Failed to check {} package(s):", failures.len()),
                Tone::Bad
            )
        )?;
        for failure in failures {
            writeln!(writer, "  {}", failure)?;
        }
        Ok(())
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn display(version: Option<&Version>) -> String {
    version.map_or_else(|| "None".to_string(), |v| v.to_string())
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
        match report.status() {
            ReportStatus::NoRequirements => {
                writeln!(writer, "{}", self.paint("No requirements found.", Tone::Bad))?;
            }
            ReportStatus::UpToDate => {
                let message = "Everything is up-to-date!";
                if self.color {
                    writeln!(writer, "{}", message.cyan().bold())?;
                } else {
                    writeln!(writer, "{}", message)?;
                }
            }
            ReportStatus::Outdated(count) => {
                self.write_legend(writer)?;
                writeln!(writer)?;

                let rows: Vec<[Cell; 4]> = report.outdated().map(|r| self.row(r)).collect();
                self.write_table(&rows, writer)?;

                writeln!(writer, "{} of {} package(s) outdated", count, report.total())?;
            }
        }

        self.write_failures(report, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CheckFailure, ReportEntry, Requirement, VersionConstraint};
    use crate::error::RegistryError;

    fn checked(name: &str, constraint: &str, installed: Option<&str>, published: &[&str]) -> ReportEntry {
        ReportEntry::Checked(OutdatedResult::new(
            Requirement::new(name, VersionConstraint::parse(constraint).unwrap()),
            installed.map(|v| Version::parse(v).unwrap()),
            published.iter().map(|v| Version::parse(v).unwrap()).collect(),
        ))
    }

    fn render(report: &Report) -> String {
        let mut buffer = Vec::new();
        TextFormatter::with_color(false)
            .format(report, &mut buffer)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_no_requirements() {
        assert_eq!(render(&Report::new()), "No requirements found.\n");
    }

    #[test]
    fn test_up_to_date() {
        let report: Report = vec![checked("click", "", Some("8.1.7"), &["8.1.7"])]
            .into_iter()
            .collect();
        assert_eq!(render(&report), "Everything is up-to-date!\n");
    }

    #[test]
    fn test_outdated_table() {
        let report: Report = vec![
            checked("requests", "<3.0", Some("2.0.0"), &["2.0.0", "2.31.0", "3.0.0"]),
            checked("click", "", Some("8.1.7"), &["8.1.7"]),
            checked("ghost", "", None, &[]),
        ]
        .into_iter()
        .collect();

        let expected = "\
Red = unavailable/outdated/out of version specifier
Green = updatable

+----------+-----------+--------+--------+
| Name     | Installed | Wanted | Latest |
+----------+-----------+--------+--------+
| requests | 2.0.0     | 2.31.0 | 3.0.0  |
| ghost    | None      | None   | None   |
+----------+-----------+--------+--------+
2 of 3 package(s) outdated
";
        assert_eq!(render(&report), expected);
    }

    #[test]
    fn test_cell_tones() {
        let formatter = TextFormatter::with_color(false);
        let result = OutdatedResult::new(
            Requirement::new("foo", VersionConstraint::parse("<2.0").unwrap()),
            Some(Version::parse("2.1").unwrap()),
            vec![Version::parse("1.9").unwrap(), Version::parse("3.0").unwrap()],
        );

        let row = formatter.row(&result);
        assert_eq!(row[1].tone, Tone::Bad);
        assert_eq!(row[2].text, "1.9");
        assert_eq!(row[2].tone, Tone::Plain);
        assert_eq!(row[3].tone, Tone::Good);
    }

    #[test]
    fn test_colored_output_keeps_alignment() {
        colored::control::set_override(true);
        let report: Report = vec![checked("a", "", Some("1.0"), &["1.0", "2.0"])]
            .into_iter()
            .collect();
        let mut buffer = Vec::new();
        TextFormatter::with_color(true)
            .format(&report, &mut buffer)
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        colored::control::unset_override();

        assert!(output.contains("| a    | 1.0       | "));
        assert!(output.contains("2.0\u{1b}[0m    | "));
    }

    #[test]
    fn test_failures_are_listed() {
        let report: Report = vec![
            checked("click", "", Some("8.1.7"), &["8.1.7"]),
            ReportEntry::Failed(CheckFailure {
                name: "nope".to_string(),
                error: RegistryError::package_not_found("nope", "PyPI").into(),
            }),
        ]
        .into_iter()
        .collect();

        let output = render(&report);
        assert!(output.starts_with("Everything is up-to-date!\n"));
        assert!(output.contains("Failed to check 1 package(s):"));
        assert!(output.contains("  nope: package 'nope' not found in PyPI registry"));
    }
}

//! CLI argument parsing module for pip-outdated

use crate::manifest::DEFAULT_PATTERNS;
use crate::registry::{DEFAULT_INDEX_URL, DEFAULT_MAX_PER_HOST};
use clap::builder::TypedValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Parse a timeout given in whole seconds, optionally suffixed with `s`
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let digits = s.strip_suffix('s').unwrap_or(s);

    let secs: u64 = digits
        .parse()
        .map_err(|_| format!("invalid timeout: {}", s))?;
    if secs == 0 {
        return Err("timeout must be at least one second".to_string());
    }

    Ok(Duration::from_secs(secs))
}

/// Find outdated dependencies in requirements.txt, setup.cfg and pyproject.toml
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pip-outdated",
    version,
    about = "Find outdated dependencies in requirements.txt, setup.cfg and pyproject.toml"
)]
pub struct CliArgs {
    /// Manifest files or glob patterns to scan
    #[arg(default_values_t = DEFAULT_PATTERNS.iter().map(|s| s.to_string()).collect::<Vec<_>>())]
    pub patterns: Vec<String>,

    // General options
    /// Print which files are parsed and which packages are checked
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not exit with status 1 when outdated packages are found
    #[arg(short, long)]
    pub quiet: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    // Index options
    /// Package index base URL
    #[arg(long, default_value = DEFAULT_INDEX_URL)]
    pub index_url: String,

    /// Simultaneous requests per index host
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_PER_HOST,
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from)
    )]
    pub max_connections: usize,

    /// Per-request timeout in seconds (e.g., 30, 10s)
    #[arg(long, default_value = "30", value_parser = parse_timeout)]
    pub timeout: Duration,

    // Environment options
    /// Interpreter whose installed packages are inspected
    /// (default: the active virtualenv's python, else python3)
    #[arg(long)]
    pub python: Option<String>,

    /// Inspect these site-packages directories instead of asking an interpreter
    /// (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub site_packages: Vec<PathBuf>,
}

impl CliArgs {
    /// Whether a progress bar should be drawn
    pub fn show_progress(&self) -> bool {
        !(self.quiet || self.verbose || self.json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["pip-outdated"]);
        assert_eq!(
            args.patterns,
            vec!["requirements.txt", "setup.cfg", "pyproject.toml"]
        );
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(!args.json);
        assert!(!args.no_color);
        assert_eq!(args.index_url, "https://pypi.org");
        assert_eq!(args.max_connections, 5);
        assert_eq!(args.timeout, Duration::from_secs(30));
        assert!(args.python.is_none());
        assert!(args.site_packages.is_empty());
        assert!(args.show_progress());
    }

    #[test]
    fn test_patterns_replace_defaults() {
        let args = CliArgs::parse_from(["pip-outdated", "requirements/*.txt", "setup.cfg"]);
        assert_eq!(args.patterns, vec!["requirements/*.txt", "setup.cfg"]);
    }

    #[test]
    fn test_verbose_flags() {
        let args = CliArgs::parse_from(["pip-outdated", "-v"]);
        assert!(args.verbose);
        assert!(!args.show_progress());

        let args = CliArgs::parse_from(["pip-outdated", "--verbose"]);
        assert!(args.verbose);
    }

    #[test]
    fn test_quiet_flags() {
        let args = CliArgs::parse_from(["pip-outdated", "-q"]);
        assert!(args.quiet);
        assert!(!args.show_progress());

        let args = CliArgs::parse_from(["pip-outdated", "--quiet"]);
        assert!(args.quiet);
    }

    #[test]
    fn test_output_flags() {
        let args = CliArgs::parse_from(["pip-outdated", "--json", "--no-color"]);
        assert!(args.json);
        assert!(args.no_color);
        assert!(!args.show_progress());
    }

    #[test]
    fn test_index_options() {
        let args = CliArgs::parse_from([
            "pip-outdated",
            "--index-url",
            "http://localhost:8080",
            "--max-connections",
            "12",
            "--timeout",
            "10s",
        ]);
        assert_eq!(args.index_url, "http://localhost:8080");
        assert_eq!(args.max_connections, 12);
        assert_eq!(args.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_zero_connections_rejected() {
        let result = CliArgs::try_parse_from(["pip-outdated", "--max-connections", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_environment_options() {
        let args = CliArgs::parse_from([
            "pip-outdated",
            "--python",
            "/opt/py/bin/python",
            "--site-packages",
            "/a",
            "--site-packages",
            "/b",
        ]);
        assert_eq!(args.python.as_deref(), Some("/opt/py/bin/python"));
        assert_eq!(
            args.site_packages,
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("5"), Ok(Duration::from_secs(5)));
        assert_eq!(parse_timeout("45s"), Ok(Duration::from_secs(45)));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
        assert!(parse_timeout("").is_err());
    }
}

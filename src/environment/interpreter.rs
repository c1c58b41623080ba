//! Interpreter integration for locating installed-package directories
//!
//! This module provides:
//! - A mockable command runner
//! - Default interpreter selection (active virtualenv first)
//! - `sys.path` discovery

use crate::error::EnvironmentError;
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Prints the interpreter search path as a JSON array
const SYS_PATH_SCRIPT: &str = "import json, sys; print(json.dumps(sys.path))";

/// Captured result of running a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Trait for running external commands
pub trait CommandRunner {
    /// Run `program` with `args` and capture its output
    fn run(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput>;
}

/// Default runner that executes real commands
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> std::io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Interpreter of the active virtualenv, or `python3` from PATH
pub fn default_interpreter() -> String {
    interpreter_for(env::var_os("VIRTUAL_ENV").map(PathBuf::from))
}

fn interpreter_for(virtual_env: Option<PathBuf>) -> String {
    match virtual_env {
        Some(venv) if cfg!(windows) => venv.join("Scripts").join("python.exe"),
        Some(venv) => venv.join("bin").join("python"),
        None => return "python3".to_string(),
    }
    .to_string_lossy()
    .into_owned()
}

/// Ask `python` for its `sys.path`, dropping empty entries
pub fn query_sys_path<R: CommandRunner>(
    runner: &R,
    python: &str,
) -> Result<Vec<PathBuf>, EnvironmentError> {
    let output = runner
        .run(python, &["-c", SYS_PATH_SCRIPT])
        .map_err(|e| EnvironmentError::interpreter_failed(python, e.to_string()))?;

    if !output.success {
        return Err(EnvironmentError::interpreter_failed(
            python,
            output.stderr.trim(),
        ));
    }

    let entries: Vec<String> = serde_json::from_str(output.stdout.trim())
        .map_err(|e| EnvironmentError::interpreter_failed(python, e.to_string()))?;

    Ok(entries
        .into_iter()
        .filter(|entry| !entry.is_empty())
        .map(PathBuf::from)
        .collect())
}

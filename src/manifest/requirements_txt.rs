//! Line-oriented requirements file reader
//!
//! Handles:
//! - `#` comments at line start or after whitespace
//! - backslash line continuations
//!
//! Includes (`-r`, `-c`) and other pip options are passed through as lines and
//! later rejected by the requirement parser.

use super::{ManifestKind, ManifestReader};
use crate::error::ManifestError;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Reader for requirements.txt style files
pub struct RequirementsTxtReader;

// Text before an unescaped comment marker
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)(?:^|\s)#").unwrap());

impl ManifestReader for RequirementsTxtReader {
    fn extract(&self, content: &str, _path: &Path) -> Result<Vec<String>, ManifestError> {
        Ok(logical_lines(content))
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::RequirementsTxt
    }
}

/// Split file content into logical lines.
///
/// A physical line carrying a comment ends the logical line at the comment.
/// Otherwise a trailing backslash joins the line with the next physical line.
pub fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending = String::new();

    for raw in content.split_inclusive('\n') {
        let has_newline = raw.ends_with('\n');
        let line = raw.trim_end_matches(['\n', '\r']);

        if let Some(caps) = COMMENT_RE.captures(line) {
            pending.push_str(&caps[1]);
            lines.push(std::mem::take(&mut pending));
            continue;
        }

        if has_newline {
            if let Some(head) = line.strip_suffix('\\') {
                pending.push_str(head);
                continue;
            }
        }

        pending.push_str(line);
        lines.push(std::mem::take(&mut pending));
    }

    // Continuation on the final line
    if !pending.is_empty() {
        lines.push(pending);
    }

    lines
}

//! Backend that shells out to `du -k -d 1`.

use std::path::Path;
use std::process::Command;

use crate::error::{DuimError, Result};

use super::entry::UsageReport;
use super::parse::parse_output;
use super::UsageSource;

/// Marker in du diagnostics that makes a failed query non-fatal
pub const PERMISSION_DENIED: &str = "Permission denied";

/// One-level query through an external `du`.
#[derive(Debug, Clone)]
pub struct DuCommand {
    program: String,
}

impl DuCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Build the query command. `-k` pins 1024-byte blocks for GNU and BSD du.
    pub fn command(&self, target: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-k", "-d", "1"]).arg(target);
        cmd
    }
}

impl Default for DuCommand {
    fn default() -> Self {
        Self::new("du")
    }
}

impl UsageSource for DuCommand {
    fn collect(&self, target: &Path) -> Result<UsageReport> {
        tracing::debug!(program = %self.program, path = %target.display(), "Running du");

        // output() drains stdout and stderr before waiting, on every path
        let output = self
            .command(target)
            .output()
            .map_err(|source| DuimError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() && stderr.trim().is_empty() {
            stderr = format!("{} exited with {}", self.program, output.status);
        }

        classify(target, output.status.success(), &stdout, &stderr)
    }
}

/// Turn a finished query into a report or an error.
///
/// Success parses stdout. A failure whose diagnostics mention permission
/// denial yields an empty report flagged `permission_denied`. Any other
/// failure is fatal.
pub fn classify(target: &Path, success: bool, stdout: &str, stderr: &str) -> Result<UsageReport> {
    if success {
        let entries = parse_output(stdout)?;
        tracing::debug!(count = entries.len(), "Parsed du output");
        return Ok(UsageReport::new(entries));
    }

    if stderr.contains(PERMISSION_DENIED) {
        tracing::debug!(
            path = %target.display(),
            stderr = %stderr.trim(),
            "du reported permission errors, discarding partial output"
        );
        return Ok(UsageReport::permission_denied());
    }

    Err(DuimError::QueryFailed {
        path: target.to_path_buf(),
        stderr: stderr.trim().to_string(),
    })
}

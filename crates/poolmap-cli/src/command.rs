//! The per-item operation: run an external program with the item appended to
//! its arguments.

use poolmap::Operation;
use std::io;
use std::process::{Command, ExitStatus, Stdio};

/// Why a single item failed. Other items are unaffected.
#[derive(thiserror::Error, Debug)]
pub enum CommandError {
    /// The program could not be started at all.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("{status}{}", stderr_suffix(.stderr))]
    Failed { status: ExitStatus, stderr: String },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// `program args... ITEM`, with stdout captured as the item's output.
#[derive(Debug, Clone)]
pub struct LineCommand {
    program: String,
    args: Vec<String>,
}

impl LineCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Operation<String> for LineCommand {
    type Output = String;
    type Error = CommandError;

    fn apply(&self, item: String) -> Result<String, CommandError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&item)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| CommandError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CommandError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        #[cfg(feature = "tracing")]
        tracing::trace!("`{} {}` succeeded", self.program, item);

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}

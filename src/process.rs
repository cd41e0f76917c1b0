use std::path::Path;
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::error::AppError;

/// Captured result of a finished external command.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Best text to show when the command failed: stderr, else stdout, else the status.
    pub fn failure_text(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }
        format!("exited with status {}", self.status)
    }
}

/// Run `program` with `args` to completion and capture both streams.
///
/// Spawn failures are returned as errors; a non-zero exit is not, callers
/// inspect [`CommandOutput::success`].
pub fn capture<S: AsRef<str>>(
    program: &str,
    args: &[S],
    cwd: Option<&Path>,
) -> Result<CommandOutput, AppError> {
    let mut command = Command::new(program);
    command.args(args.iter().map(AsRef::as_ref));
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }
    debug!(
        "$ {} {}",
        program,
        args.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ")
    );

    let output = command.output()?;
    Ok(CommandOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

//! Process adapters
//!
//! Commands are spawned directly (never through a shell) with stdin closed
//! and `kill_on_drop`, so a timed-out child does not outlive the call.

mod help;
mod runner;

pub use help::CliHelpFetcher;
pub use runner::TokioCommandRunner;

use askcli_application::RunError;
use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::trace;

/// Captured output of a finished process
#[derive(Debug)]
pub(crate) struct Captured {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

pub(crate) async fn capture(
    command: &str,
    args: &[String],
    timeout: Duration,
    env: &HashMap<String, String>,
) -> Result<Captured, RunError> {
    let mut cmd = Command::new(command);
    cmd.args(args)
        .envs(env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd.spawn().map_err(|e| RunError::Spawn {
        command: command.to_string(),
        reason: e.to_string(),
    })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|e| RunError::Spawn {
            command: command.to_string(),
            reason: e.to_string(),
        })?,
        Err(_) => {
            return Err(RunError::Timeout {
                command: command.to_string(),
                after: timeout,
            });
        }
    };

    trace!(command, status = ?output.status, "Process finished");
    Ok(Captured {
        success: output.status.success(),
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

//! Process execution port

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to start '{command}': {reason}")]
    Spawn { command: String, reason: String },

    #[error("'{command}' failed: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("'{command}' timed out after {}s", .after.as_secs())]
    Timeout { command: String, after: Duration },
}

impl RunError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RunError::Timeout { .. })
    }
}

/// Port for running a command with an exact argument vector.
///
/// Arguments are passed without a shell. On success the trimmed stdout is
/// returned; on a non-zero exit the error carries the captured stderr.
#[async_trait]
pub trait CommandRunnerPort: Send + Sync {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        timeout: Duration,
        env: &HashMap<String, String>,
    ) -> Result<String, RunError>;
}

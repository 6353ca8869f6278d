//! Tool process runner

use super::capture;
use askcli_application::{CommandRunnerPort, RunError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// [`CommandRunnerPort`] backed by `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunnerPort for TokioCommandRunner {
    async fn run(
        &self,
        command: &str,
        args: &[String],
        timeout: Duration,
        env: &HashMap<String, String>,
    ) -> Result<String, RunError> {
        let captured = capture(command, args, timeout, env).await?;

        if captured.success {
            debug!(command, bytes = captured.stdout.len(), "Command succeeded");
            return Ok(captured.stdout.trim().to_string());
        }

        let stderr = captured.stderr.trim();
        let message = if stderr.is_empty() {
            match captured.code {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            }
        } else {
            stderr.to_string()
        };
        warn!(command, code = ?captured.code, "Command failed");
        Err(RunError::Failed {
            command: command.to_string(),
            code: captured.code,
            stderr: message,
        })
    }
}

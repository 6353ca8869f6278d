//! Help text fetcher

use super::capture;
use askcli_application::{FetchError, HelpFetcherPort};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const HELP_FLAGS: [&str; 2] = ["--help", "-h"];

/// Runs `<command> --help`, falling back to `<command> -h`.
///
/// Each attempt gets its own timeout. Some tools print help to stderr, so
/// stderr is accepted when the process exits successfully with an empty
/// stdout.
#[derive(Debug, Clone)]
pub struct CliHelpFetcher {
    timeout: Duration,
}

impl Default for CliHelpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl CliHelpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn attempt(&self, command: &str, flag: &str) -> Result<String, String> {
        let captured = capture(command, &[flag.to_string()], self.timeout, &HashMap::new())
            .await
            .map_err(|e| e.to_string())?;
        help_output(captured.success, captured.code, &captured.stdout, &captured.stderr)
    }
}

/// The help text of a finished attempt, or why it is unusable
fn help_output(
    success: bool,
    code: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> Result<String, String> {
    if !success {
        return Err(match code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        });
    }
    let text = if stdout.trim().is_empty() { stderr } else { stdout };
    if text.trim().is_empty() {
        return Err("empty help output".to_string());
    }
    Ok(text.to_string())
}

#[async_trait]
impl HelpFetcherPort for CliHelpFetcher {
    async fn fetch_help(&self, command: &str) -> Result<String, FetchError> {
        if which::which(command).is_err() {
            return Err(FetchError::NotFound(command.to_string()));
        }

        let mut reasons = Vec::new();
        for flag in HELP_FLAGS {
            match self.attempt(command, flag).await {
                Ok(text) => {
                    debug!(command, flag, bytes = text.len(), "Fetched help text");
                    return Ok(text);
                }
                Err(reason) => {
                    debug!(command, flag, reason = %reason, "Help attempt failed");
                    reasons.push(format!("{} {}: {}", command, flag, reason));
                }
            }
        }

        Err(FetchError::Failed {
            command: command.to_string(),
            reason: reasons.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_preferred() {
        assert_eq!(
            help_output(true, Some(0), "Options:\n", "warning\n").unwrap(),
            "Options:\n"
        );
    }

    #[test]
    fn test_stderr_accepted_on_success() {
        assert_eq!(
            help_output(true, Some(0), "  \n", "Usage of mods:\n").unwrap(),
            "Usage of mods:\n"
        );
    }

    #[test]
    fn test_failed_attempt() {
        assert_eq!(
            help_output(false, Some(2), "", "flag provided but not defined").unwrap_err(),
            "exit code 2"
        );
        assert!(help_output(true, Some(0), "", "").is_err());
    }

    #[tokio::test]
    async fn test_missing_command_not_found() {
        let fetcher = CliHelpFetcher::default();
        let err = fetcher
            .fetch_help("askcli-definitely-not-installed")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::NotFound(_)));
    }
}

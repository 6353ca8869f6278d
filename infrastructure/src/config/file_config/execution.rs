//! Execution configuration from TOML (`[execution]` section)

use askcli_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 600;
const DEFAULT_HELP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    /// Timeout for a tool invocation
    pub timeout_secs: u64,
    /// Timeout for each help fetch attempt
    pub help_timeout_secs: u64,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            help_timeout_secs: DEFAULT_HELP_TIMEOUT_SECS,
        }
    }
}

impl FileExecutionConfig {
    /// Resolve both timeouts; zero values fall back to the defaults.
    pub fn parse_timeouts(&self) -> ((Duration, Duration), Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut resolve = |field: &str, secs: u64, default: u64| {
            if secs == 0 {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::ZeroTimeout,
                    format!("execution.{}: cannot be 0, using {}", field, default),
                ));
                Duration::from_secs(default)
            } else {
                Duration::from_secs(secs)
            }
        };
        let timeout = resolve("timeout_secs", self.timeout_secs, DEFAULT_TIMEOUT_SECS);
        let help_timeout = resolve(
            "help_timeout_secs",
            self.help_timeout_secs,
            DEFAULT_HELP_TIMEOUT_SECS,
        );
        ((timeout, help_timeout), issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_falls_back() {
        let config = FileExecutionConfig {
            timeout_secs: 0,
            help_timeout_secs: 3,
        };
        let ((timeout, help), issues) = config.parse_timeouts();
        assert_eq!(timeout, Duration::from_secs(600));
        assert_eq!(help, Duration::from_secs(3));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::ZeroTimeout);
    }
}

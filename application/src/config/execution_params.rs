//! Execution parameters: timeouts applied when no tool overrides them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Timeout for a tool invocation
    pub timeout: Duration,
    /// Timeout for each help fetch attempt
    pub help_timeout: Duration,
    /// Prompt characters kept in log lines
    pub max_prompt_log_length: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            help_timeout: Duration::from_secs(10),
            max_prompt_log_length: 1000,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_help_timeout(mut self, timeout: Duration) -> Self {
        self.help_timeout = timeout;
        self
    }

    pub fn with_max_prompt_log_length(mut self, max: usize) -> Self {
        self.max_prompt_log_length = max;
        self
    }
}

//! Security configuration from TOML (`[security]` section)
//!
//! ```toml
//! [security]
//! enabled = true
//! max_argument_length = 10000
//! max_prompt_log_length = 1000
//! shell_special_chars = [";", "|", "&"]
//! ```

use askcli_domain::ScreeningPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSecurityConfig {
    /// Argument screening on/off
    pub enabled: bool,
    pub max_argument_length: usize,
    /// Prompt characters kept in log lines
    pub max_prompt_log_length: usize,
    pub max_session_id_length: usize,
    /// Rejected in command names
    pub shell_special_chars: Vec<String>,
    pub path_traversal_patterns: Vec<String>,
}

impl Default for FileSecurityConfig {
    fn default() -> Self {
        let policy = ScreeningPolicy::default();
        Self {
            enabled: policy.enabled,
            max_argument_length: policy.max_argument_length,
            max_prompt_log_length: 1000,
            max_session_id_length: policy.max_session_id_length,
            shell_special_chars: policy.shell_special_chars,
            path_traversal_patterns: policy.path_traversal_patterns,
        }
    }
}

impl FileSecurityConfig {
    pub fn to_policy(&self) -> ScreeningPolicy {
        ScreeningPolicy {
            enabled: self.enabled,
            max_argument_length: self.max_argument_length,
            max_session_id_length: self.max_session_id_length,
            shell_special_chars: self.shell_special_chars.clone(),
            path_traversal_patterns: self.path_traversal_patterns.clone(),
        }
    }
}

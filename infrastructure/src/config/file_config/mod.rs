//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod execution;
mod security;
mod tools;

pub use execution::FileExecutionConfig;
pub use security::FileSecurityConfig;
pub use tools::FileToolConfig;

use askcli_application::{ExecutionParams, ToolSettings};
use askcli_domain::{
    ArgumentScreen, ConfigIssue, ConfigIssueCode, ConventionTable, ScreeningPolicy,
    ToolConvention,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Commands to expose as tools
    pub tools: Vec<FileToolConfig>,
    /// Timeouts
    pub execution: FileExecutionConfig,
    /// Argument screening
    pub security: FileSecurityConfig,
    /// Per-command quirks, merged over the built-in table
    pub conventions: BTreeMap<String, ToolConvention>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks every tool entry (command, strategy, patterns, timeout), unsafe
    /// command names, duplicate tool names and the execution timeouts.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let screen = self.argument_screen();
        let mut seen = HashSet::new();

        for tool in &self.tools {
            issues.extend(tool.to_settings().1);

            let command = tool.command.trim();
            if command.is_empty() {
                continue;
            }
            if let Err(e) = screen.screen_command(command) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnsafeCommand,
                    format!("tools.{}: {}", command, e),
                ));
            }
            let name = tool.tool_name();
            if !seen.insert(name.clone()) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::DuplicateTool,
                    format!("tools: '{}' is defined more than once, the last entry wins", name),
                ));
            }
        }

        issues.extend(self.execution.parse_timeouts().1);
        issues
    }

    /// Settings for every enabled, usable tool entry.
    ///
    /// Entries with an error-level issue are skipped; the issues are returned
    /// alongside so the caller can report them.
    pub fn tool_settings(&self) -> (Vec<ToolSettings>, Vec<ConfigIssue>) {
        let mut settings = Vec::new();
        let mut issues = Vec::new();
        for tool in self.tools.iter().filter(|t| t.enabled) {
            let (entry, entry_issues) = tool.to_settings();
            issues.extend(entry_issues);
            settings.extend(entry);
        }
        (settings, issues)
    }

    /// Find a tool entry by command or tool name
    pub fn find_tool(&self, name: &str) -> Option<&FileToolConfig> {
        self.tools
            .iter()
            .rev()
            .find(|t| t.command.trim() == name || t.tool_name() == name)
    }

    pub fn execution_params(&self) -> ExecutionParams {
        let ((timeout, help_timeout), _) = self.execution.parse_timeouts();
        ExecutionParams::default()
            .with_timeout(timeout)
            .with_help_timeout(help_timeout)
            .with_max_prompt_log_length(self.security.max_prompt_log_length)
    }

    pub fn screening_policy(&self) -> ScreeningPolicy {
        self.security.to_policy()
    }

    pub fn argument_screen(&self) -> ArgumentScreen {
        ArgumentScreen::new(self.screening_policy())
    }

    /// Built-in conventions with configured entries replacing them per command
    pub fn convention_table(&self) -> ConventionTable {
        ConventionTable::builtin().merge(self.conventions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[[tools]]
command = "claude"

[[tools]]
command = "mods"
parser_strategy = "go"
enabled = false

[execution]
timeout_secs = 120

[security]
max_prompt_log_length = 200

[conventions.opencode]
leading_subcommand = "run"
positional_prompt = true
structured_output = true
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.tools.len(), 2);
        assert_eq!(config.execution.timeout_secs, 120);
        assert_eq!(config.execution.help_timeout_secs, 10);

        let params = config.execution_params();
        assert_eq!(params.timeout, Duration::from_secs(120));
        assert_eq!(params.max_prompt_log_length, 200);

        let (settings, issues) = config.tool_settings();
        assert!(issues.is_empty());
        assert_eq!(settings.len(), 1);
        assert_eq!(settings[0].command, "claude");

        assert!(config.convention_table().get("opencode").structured_output);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.tools.is_empty());
        assert!(config.security.enabled);
        assert_eq!(config.execution_params(), ExecutionParams::default());
        assert_eq!(
            config.convention_table().get("opencode").leading_subcommand.as_deref(),
            Some("run")
        );
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_duplicates_and_unsafe_commands() {
        let config = FileConfig {
            tools: vec![
                FileToolConfig::new("qwen"),
                FileToolConfig::new("qwen"),
                FileToolConfig::new("qwen && rm -rf /"),
            ],
            ..Default::default()
        };
        let codes: Vec<ConfigIssueCode> = config.validate().iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            vec![ConfigIssueCode::DuplicateTool, ConfigIssueCode::UnsafeCommand]
        );
    }

    #[test]
    fn test_error_entry_is_skipped() {
        let config = FileConfig {
            tools: vec![
                FileToolConfig {
                    parser_strategy: "custom".to_string(),
                    option_pattern: Some("(".to_string()),
                    ..FileToolConfig::new("broken")
                },
                FileToolConfig::new("gemini"),
            ],
            ..Default::default()
        };
        let (settings, issues) = config.tool_settings();
        assert_eq!(settings.len(), 1);
        assert_eq!(settings[0].command, "gemini");
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_find_tool_by_command_or_alias() {
        let config = FileConfig {
            tools: vec![FileToolConfig {
                alias: Some("coder".to_string()),
                ..FileToolConfig::new("qwen")
            }],
            ..Default::default()
        };
        assert!(config.find_tool("qwen").is_some());
        assert!(config.find_tool("coder").is_some());
        assert!(config.find_tool("ask-qwen").is_none());
    }
}

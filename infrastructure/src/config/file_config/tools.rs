//! Tool entries from TOML (`[[tools]]` array)
//!
//! Example configuration:
//!
//! ```toml
//! [[tools]]
//! command = "qwen"
//! alias = "ask-qwen"
//! system_prompt = "You are a senior code reviewer."
//! default_args = { model = "qwen-max", yolo = true }
//! env = { QWEN_HOME = "/opt/qwen" }
//!
//! [[tools]]
//! command = "mods"
//! parser_strategy = "go"
//! timeout_secs = 120
//! ```

use askcli_application::ToolSettings;
use askcli_domain::capability::default_tool_name;
use askcli_domain::{
    ArgValue, ConfigIssue, ConfigIssueCode, ParserStrategy, StrategyError, ToolOverlay,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// One `[[tools]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolConfig {
    /// Executable name or path
    pub command: String,
    pub enabled: bool,
    /// Tool name override (default `ask-<command>`)
    pub alias: Option<String>,
    pub description: Option<String>,
    /// Persona text kept on the registered model
    pub system_prompt: Option<String>,
    /// "gnu" (default), "go" or "custom"
    pub parser_strategy: String,
    /// Option line regex for the custom strategy
    pub option_pattern: Option<String>,
    /// Positional line regex for the custom strategy
    pub positional_pattern: Option<String>,
    pub default_args: BTreeMap<String, ArgValue>,
    pub env: BTreeMap<String, String>,
    pub timeout_secs: Option<u64>,
}

impl Default for FileToolConfig {
    fn default() -> Self {
        Self {
            command: String::new(),
            enabled: true,
            alias: None,
            description: None,
            system_prompt: None,
            parser_strategy: "gnu".to_string(),
            option_pattern: None,
            positional_pattern: None,
            default_args: BTreeMap::new(),
            env: BTreeMap::new(),
            timeout_secs: None,
        }
    }
}

impl FileToolConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    /// Name the tool will be registered under
    pub fn tool_name(&self) -> String {
        match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() => alias.to_string(),
            _ => default_tool_name(self.command.trim()),
        }
    }

    /// Resolve the parser strategy.
    ///
    /// Unknown names fall back to GNU with a warning; a pattern that does
    /// not compile is an error and yields `None`.
    pub fn parse_strategy(&self) -> (Option<ParserStrategy>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let strategy = match ParserStrategy::from_name(
            &self.parser_strategy,
            self.option_pattern.as_deref(),
            self.positional_pattern.as_deref(),
        ) {
            Ok(strategy) => {
                if matches!(strategy, ParserStrategy::Custom { option: None, positional: None })
                {
                    issues.push(ConfigIssue::warning(
                        ConfigIssueCode::CustomWithoutPattern,
                        format!(
                            "tools.{}: parser_strategy = \"custom\" without patterns, using GNU defaults",
                            self.command
                        ),
                    ));
                }
                Some(strategy)
            }
            Err(StrategyError::Unknown(name)) => {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownParserStrategy,
                    format!(
                        "tools.{}: unknown parser_strategy '{}', falling back to 'gnu'",
                        self.command, name
                    ),
                ));
                Some(ParserStrategy::Gnu)
            }
            Err(e @ StrategyError::InvalidPattern(_)) => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::InvalidPattern,
                    format!("tools.{}: {}", self.command, e),
                ));
                None
            }
        };
        (strategy, issues)
    }

    /// Per-tool timeout; zero falls back to the execution default.
    pub fn parse_timeout(&self) -> (Option<Duration>, Vec<ConfigIssue>) {
        match self.timeout_secs {
            Some(0) => (
                None,
                vec![ConfigIssue::warning(
                    ConfigIssueCode::ZeroTimeout,
                    format!(
                        "tools.{}: timeout_secs cannot be 0, using the execution default",
                        self.command
                    ),
                )],
            ),
            Some(secs) => (Some(Duration::from_secs(secs)), Vec::new()),
            None => (None, Vec::new()),
        }
    }

    pub fn overlay(&self) -> ToolOverlay {
        ToolOverlay {
            alias: self.alias.clone().filter(|a| !a.is_empty()),
            description: self.description.clone().filter(|d| !d.is_empty()),
            system_prompt: self.system_prompt.clone().filter(|p| !p.is_empty()),
            default_args: self.default_args.clone(),
        }
    }

    /// Convert into application settings, or `None` when the entry is unusable.
    pub fn to_settings(&self) -> (Option<ToolSettings>, Vec<ConfigIssue>) {
        let command = self.command.trim();
        if command.is_empty() {
            return (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::EmptyCommand,
                    "tools: entry has an empty command",
                )],
            );
        }

        let (strategy, mut issues) = self.parse_strategy();
        let (timeout, timeout_issues) = self.parse_timeout();
        issues.extend(timeout_issues);

        let settings = strategy.map(|strategy| {
            let mut settings = ToolSettings::new(command)
                .with_strategy(strategy)
                .with_overlay(self.overlay());
            settings.env = self
                .env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            settings.timeout = timeout;
            settings
        });
        (settings, issues)
    }
}

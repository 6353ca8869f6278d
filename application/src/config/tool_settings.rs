//! Per-tool settings: how to parse a command's help and how to run it.

use askcli_domain::{ArgValue, ParserStrategy, ToolOverlay};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Everything configured for one command.
///
/// Built by the infrastructure config layer from a `[[tools]]` entry, or
/// directly from CLI arguments for ad-hoc commands.
#[derive(Debug, Clone)]
pub struct ToolSettings {
    pub command: String,
    pub strategy: ParserStrategy,
    pub overlay: ToolOverlay,
    /// Extra environment for the spawned process
    pub env: HashMap<String, String>,
    /// Overrides the execution default when set
    pub timeout: Option<Duration>,
}

impl ToolSettings {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            strategy: ParserStrategy::default(),
            overlay: ToolOverlay::default(),
            env: HashMap::new(),
            timeout: None,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_strategy(mut self, strategy: ParserStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_overlay(mut self, overlay: ToolOverlay) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn with_default_arg(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.overlay.default_args.insert(key.into(), value.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Configured default argument values, merged under caller values
    pub fn default_args(&self) -> &BTreeMap<String, ArgValue> {
        &self.overlay.default_args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let settings = ToolSettings::new("qwen")
            .with_default_arg("model", "qwen-max")
            .with_env("QWEN_HOME", "/tmp/qwen")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(settings.command, "qwen");
        assert_eq!(settings.strategy.name(), "gnu");
        assert_eq!(
            settings.default_args().get("model"),
            Some(&ArgValue::from("qwen-max"))
        );
        assert_eq!(settings.env.get("QWEN_HOME").map(String::as_str), Some("/tmp/qwen"));
        assert_eq!(settings.timeout, Some(Duration::from_secs(30)));
    }
}

//! Per-tool invocation conventions
//!
//! Some CLIs need quirks the help text cannot express: `opencode` only
//! accepts a prompt after a leading `run` subcommand. These live in a lookup
//! table keyed by command name and injected into the builder, so the
//! builder itself stays generic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Quirks for one command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConvention {
    /// Token emitted before anything else (e.g. `run`)
    pub leading_subcommand: Option<String>,
    /// Always pass the prompt positionally, even if a `--prompt` flag exists
    pub positional_prompt: bool,
    /// Output is line-delimited JSON events to post-process
    pub structured_output: bool,
}

static GENERIC: ToolConvention = ToolConvention {
    leading_subcommand: None,
    positional_prompt: false,
    structured_output: false,
};

#[derive(Debug, Clone, Default)]
pub struct ConventionTable {
    entries: HashMap<String, ToolConvention>,
}

impl ConventionTable {
    /// No special cases at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Conventions for known AI CLIs
    pub fn builtin() -> Self {
        Self::empty().with(
            "opencode",
            ToolConvention {
                leading_subcommand: Some("run".to_string()),
                positional_prompt: true,
                structured_output: false,
            },
        )
    }

    pub fn with(mut self, command: impl Into<String>, convention: ToolConvention) -> Self {
        self.entries.insert(command.into(), convention);
        self
    }

    /// Overlay entries; an override replaces the whole entry for its command.
    pub fn merge(mut self, overrides: impl IntoIterator<Item = (String, ToolConvention)>) -> Self {
        self.entries.extend(overrides);
        self
    }

    /// Convention for a command, or the generic one
    pub fn get(&self, command: &str) -> &ToolConvention {
        self.entries.get(command).unwrap_or(&GENERIC)
    }

    pub fn contains(&self, command: &str) -> bool {
        self.entries.contains_key(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_opencode() {
        let table = ConventionTable::builtin();
        let opencode = table.get("opencode");
        assert_eq!(opencode.leading_subcommand.as_deref(), Some("run"));
        assert!(opencode.positional_prompt);
    }

    #[test]
    fn test_unknown_command_is_generic() {
        let table = ConventionTable::builtin();
        assert_eq!(table.get("qwen"), &ToolConvention::default());
        assert!(!table.contains("qwen"));
    }

    #[test]
    fn test_merge_replaces_entry() {
        let table = ConventionTable::builtin().merge([(
            "opencode".to_string(),
            ToolConvention {
                structured_output: true,
                ..Default::default()
            },
        )]);
        let opencode = table.get("opencode");
        assert!(opencode.leading_subcommand.is_none());
        assert!(opencode.structured_output);
    }
}

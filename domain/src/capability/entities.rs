//! Capability model entities

use super::value::ArgValue;
use serde::{Deserialize, Serialize};

/// Value type accepted by an option or positional argument
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    #[default]
    String,
    Number,
    /// Presence-only flag; never carries a value on the command line
    Boolean,
    /// A string that names a file or directory
    File,
}

impl OptionType {
    pub fn as_str(&self) -> &str {
        match self {
            OptionType::String => "string",
            OptionType::Number => "number",
            OptionType::Boolean => "boolean",
            OptionType::File => "file",
        }
    }

    /// Whether the flag takes a value token after it
    pub fn takes_value(&self) -> bool {
        !matches!(self, OptionType::Boolean)
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Shape of the tool: a single command, or a command with subcommands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolType {
    #[default]
    Simple,
    WithSubcommands,
}

/// A named command-line option (flag)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliOption {
    /// Property key callers use (e.g. "model")
    pub name: String,
    /// Literal command-line token (e.g. "--model")
    pub flag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_flag: Option<String>,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ArgValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

impl CliOption {
    pub fn new(
        name: impl Into<String>,
        flag: impl Into<String>,
        option_type: OptionType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            flag: flag.into(),
            short_flag: None,
            option_type,
            description: description.into(),
            required: false,
            default_value: None,
            choices: Vec::new(),
            deprecated: false,
        }
    }

    pub fn with_short_flag(mut self, short: impl Into<String>) -> Self {
        self.short_flag = Some(short.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<ArgValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_boolean(&self) -> bool {
        self.option_type == OptionType::Boolean
    }
}

/// The positional argument of a tool (usually the prompt)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliArgument {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub arg_type: OptionType,
    #[serde(default)]
    pub required: bool,
}

impl CliArgument {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            arg_type: OptionType::String,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcommand {
    pub name: String,
    pub description: String,
    pub has_arguments: bool,
}

/// Structured description of a CLI tool, derived from its help text.
///
/// Built once per tool and treated as immutable afterwards; the builder
/// only ever borrows it, so one model can serve any number of concurrent
/// invocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityModel {
    /// Callable tool name, `ask-<command>` unless aliased
    pub tool_name: String,
    /// Executable name; never altered after creation
    pub command: String,
    pub description: String,
    pub tool_type: ToolType,
    pub options: Vec<CliOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<CliArgument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<Subcommand>,
    /// Version reported by `<command> --version` at registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Persona text from configuration; carried as metadata, never sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

/// Fallback key for the prompt when no positional argument was parsed
pub const DEFAULT_PROMPT_KEY: &str = "prompt";

impl CapabilityModel {
    /// Minimal model: no options, no positional, `Simple`.
    pub fn new(command: impl Into<String>) -> Self {
        let command = command.into();
        Self {
            tool_name: default_tool_name(&command),
            command,
            description: String::new(),
            tool_type: ToolType::Simple,
            options: Vec::new(),
            argument: None,
            subcommands: Vec::new(),
            version: None,
            system_prompt: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_option(mut self, option: CliOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_argument(mut self, argument: CliArgument) -> Self {
        self.argument = Some(argument);
        self
    }

    pub fn with_subcommand(mut self, subcommand: Subcommand) -> Self {
        self.tool_type = ToolType::WithSubcommands;
        self.subcommands.push(subcommand);
        self
    }

    pub fn option(&self, name: &str) -> Option<&CliOption> {
        self.options.iter().find(|o| o.name == name)
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.option(name).is_some()
    }

    /// Request key that carries the prompt
    pub fn prompt_key(&self) -> &str {
        self.argument
            .as_ref()
            .map(|a| a.name.as_str())
            .unwrap_or(DEFAULT_PROMPT_KEY)
    }

    pub fn has_subcommands(&self) -> bool {
        self.tool_type == ToolType::WithSubcommands
    }
}

pub fn default_tool_name(command: &str) -> String {
    format!("ask-{}", command)
}

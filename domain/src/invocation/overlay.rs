//! Static per-tool overrides applied after parsing

use super::session::SESSION_ID_KEY;
use crate::capability::{ArgValue, CapabilityModel, CliOption, OptionType};
use std::collections::BTreeMap;
use tracing::debug;

/// Display name, description, persona and default argument overrides for one tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOverlay {
    pub alias: Option<String>,
    pub description: Option<String>,
    pub system_prompt: Option<String>,
    pub default_args: BTreeMap<String, ArgValue>,
}

impl ToolOverlay {
    pub fn is_empty(&self) -> bool {
        self.alias.is_none()
            && self.description.is_none()
            && self.system_prompt.is_none()
            && self.default_args.is_empty()
    }

    /// Apply the overrides to a freshly parsed model.
    ///
    /// A default naming an option the help text did not list gets a
    /// synthesized `--<key>` option so the value still reaches the command
    /// line. Defaults for the prompt key or the session id never synthesize.
    pub fn apply(&self, mut model: CapabilityModel) -> CapabilityModel {
        if let Some(alias) = self.alias.as_deref().filter(|a| !a.is_empty()) {
            model.tool_name = alias.to_string();
        }
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            model.description = description.to_string();
        }
        if let Some(system_prompt) = self.system_prompt.as_deref().filter(|p| !p.is_empty()) {
            model.system_prompt = Some(system_prompt.to_string());
        }

        for (key, value) in &self.default_args {
            if let Some(option) = model.options.iter_mut().find(|o| &o.name == key) {
                option.default_value = Some(value.clone());
                continue;
            }
            if key == model.prompt_key() || key == SESSION_ID_KEY {
                continue;
            }
            debug!(command = %model.command, option = %key, "Synthesizing option for configured default");
            model.options.push(
                CliOption::new(
                    key.as_str(),
                    format!("--{}", key),
                    type_of(value),
                    format!("Configured default for --{}", key),
                )
                .with_default(value.clone()),
            );
        }
        model
    }
}

fn type_of(value: &ArgValue) -> OptionType {
    match value {
        ArgValue::Bool(_) => OptionType::Boolean,
        ArgValue::Number(_) => OptionType::Number,
        ArgValue::String(_) => OptionType::String,
    }
}

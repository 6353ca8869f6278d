//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] describing a capability
//! model as a tool with a JSON Schema input.

use askcli_application::ToolSchemaPort;
use askcli_domain::{CapabilityModel, CliOption, OptionType};
use serde_json::{Map, Value, json};

/// Default implementation producing JSON Schema tool descriptions.
///
/// Handles option type → JSON Schema type mapping:
/// - `boolean` → `"boolean"`
/// - `number` → `"number"`
/// - `string`, `file` → `"string"`
pub struct JsonSchemaToolConverter;

fn schema_type(option_type: OptionType) -> &'static str {
    match option_type {
        OptionType::Boolean => "boolean",
        OptionType::Number => "number",
        OptionType::String | OptionType::File => "string",
    }
}

fn option_property(option: &CliOption) -> Value {
    let mut prop = Map::new();
    prop.insert("type".to_string(), json!(schema_type(option.option_type)));
    prop.insert("description".to_string(), json!(option.description));
    if !option.choices.is_empty() && !option.is_boolean() {
        prop.insert("enum".to_string(), json!(option.choices));
    }
    if let Some(default) = &option.default_value {
        prop.insert("default".to_string(), default.to_json());
    }
    if option.deprecated {
        prop.insert("deprecated".to_string(), json!(true));
    }
    Value::Object(prop)
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, model: &CapabilityModel) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        if let Some(argument) = &model.argument {
            properties.insert(
                argument.name.clone(),
                json!({
                    "type": "string",
                    "description": argument.description,
                }),
            );
            if argument.required {
                required.push(json!(argument.name));
            }
        }

        for option in &model.options {
            // A positional of the same name is the prompt; it already has a property
            if properties.contains_key(&option.name) {
                continue;
            }
            properties.insert(option.name.clone(), option_property(option));
            if option.required {
                required.push(json!(option.name));
            }
        }

        json!({
            "name": model.tool_name,
            "description": model.description,
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askcli_domain::{ArgValue, CliArgument, ToolCatalog};

    fn qwen() -> CapabilityModel {
        CapabilityModel::new("qwen")
            .with_description("Qwen Code")
            .with_argument(CliArgument::new("query", "Prompt").required())
            .with_option(
                CliOption::new("model", "--model", OptionType::String, "Model to use")
                    .with_choices(vec!["a".to_string(), "b".to_string()])
                    .with_default(ArgValue::from("a")),
            )
            .with_option(CliOption::new(
                "debug",
                "--debug",
                OptionType::Boolean,
                "Run in debug mode?",
            ))
            .with_option(CliOption::new(
                "config",
                "--config",
                OptionType::File,
                "Config file",
            ))
            .with_option(
                CliOption::new("max-tokens", "--max-tokens", OptionType::Number, "Cap")
                    .with_default(ArgValue::Number(4096.0)),
            )
    }

    #[test]
    fn test_tool_to_schema() {
        let schema = JsonSchemaToolConverter.tool_to_schema(&qwen());

        assert_eq!(schema["name"], "ask-qwen");
        assert_eq!(schema["description"], "Qwen Code");
        assert_eq!(schema["inputSchema"]["type"], "object");

        let props = &schema["inputSchema"]["properties"];
        assert_eq!(props["query"]["type"], "string");
        assert_eq!(props["model"]["enum"], json!(["a", "b"]));
        assert_eq!(props["model"]["default"], "a");
        assert_eq!(props["debug"]["type"], "boolean");
        assert_eq!(props["config"]["type"], "string"); // file maps to string
        assert_eq!(props["max-tokens"]["type"], "number");
        assert_eq!(props["max-tokens"]["default"], 4096.0);

        assert_eq!(schema["inputSchema"]["required"], json!(["query"]));
    }

    #[test]
    fn test_optional_positional_not_required() {
        let model = CapabilityModel::new("gemini")
            .with_argument(CliArgument::new("prompt", "Prompt"));
        let schema = JsonSchemaToolConverter.tool_to_schema(&model);
        assert_eq!(schema["inputSchema"]["required"], json!([]));
        assert_eq!(schema["inputSchema"]["properties"]["prompt"]["type"], "string");
    }

    #[test]
    fn test_all_tools_schema() {
        let catalog = ToolCatalog::new()
            .register(CapabilityModel::new("qwen"))
            .register(CapabilityModel::new("claude"));

        let tools = JsonSchemaToolConverter.all_tools_schema(&catalog);
        assert_eq!(tools.len(), 2);

        // Results are sorted by name
        assert_eq!(tools[0]["name"], "ask-claude");
        assert_eq!(tools[1]["name"], "ask-qwen");
    }
}

//! Scalar argument values shared by the capability model and invocation requests

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar value supplied for a tool argument or declared as a default.
///
/// Deserializes untagged, so JSON `true`, `3` and `"gpt"` map to the
/// matching variant without a wrapper object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl ArgValue {
    /// Parse a `key=value` literal as typed on a command line.
    ///
    /// `true`/`false` become booleans, finite numbers become numbers and
    /// everything else stays a string.
    pub fn parse_literal(raw: &str) -> Self {
        match raw {
            "true" => return ArgValue::Bool(true),
            "false" => return ArgValue::Bool(false),
            _ => {}
        }
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() && !raw.trim().is_empty() => ArgValue::Number(n),
            _ => ArgValue::String(raw.to_string()),
        }
    }

    /// Convert a JSON value; `null`, arrays and objects have no scalar form.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(ArgValue::Bool(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(ArgValue::Number),
            serde_json::Value::String(s) => Some(ArgValue::String(s.clone())),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ArgValue::Bool(b) => serde_json::Value::Bool(*b),
            ArgValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            ArgValue::String(s) => serde_json::Value::String(s.clone()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Strictly `true`; strings like `"true"` do not count.
    pub fn is_true(&self) -> bool {
        matches!(self, ArgValue::Bool(true))
    }

    /// An empty string is treated the same as an absent value.
    pub fn is_blank(&self) -> bool {
        matches!(self, ArgValue::String(s) if s.is_empty())
    }

    /// Name of the variant, used in validation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ArgValue::Bool(_) => "boolean",
            ArgValue::Number(_) => "number",
            ArgValue::String(_) => "string",
        }
    }
}

/// Command-line representation: `true`, `3`, `0.5`, or the string itself.
impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Number(n) => write!(f, "{}", n),
            ArgValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Number(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        ArgValue::Number(value as f64)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal() {
        assert_eq!(ArgValue::parse_literal("true"), ArgValue::Bool(true));
        assert_eq!(ArgValue::parse_literal("false"), ArgValue::Bool(false));
        assert_eq!(ArgValue::parse_literal("42"), ArgValue::Number(42.0));
        assert_eq!(ArgValue::parse_literal("0.5"), ArgValue::Number(0.5));
        assert_eq!(
            ArgValue::parse_literal("gpt-4"),
            ArgValue::String("gpt-4".to_string())
        );
        assert_eq!(ArgValue::parse_literal(""), ArgValue::String(String::new()));
        assert_eq!(
            ArgValue::parse_literal("inf"),
            ArgValue::String("inf".to_string())
        );
    }

    #[test]
    fn test_display_matches_command_line_form() {
        assert_eq!(ArgValue::Number(3.0).to_string(), "3");
        assert_eq!(ArgValue::Number(0.25).to_string(), "0.25");
        assert_eq!(ArgValue::Bool(false).to_string(), "false");
        assert_eq!(ArgValue::from("hello world").to_string(), "hello world");
    }

    #[test]
    fn test_untagged_serde() {
        let values: Vec<ArgValue> = serde_json::from_str(r#"[true, 8080, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                ArgValue::Bool(true),
                ArgValue::Number(8080.0),
                ArgValue::String("x".to_string())
            ]
        );
        assert_eq!(serde_json::to_string(&ArgValue::Bool(true)).unwrap(), "true");
    }

    #[test]
    fn test_from_json_rejects_non_scalars() {
        assert!(ArgValue::from_json(&serde_json::json!(null)).is_none());
        assert!(ArgValue::from_json(&serde_json::json!([1, 2])).is_none());
        assert_eq!(
            ArgValue::from_json(&serde_json::json!(1.5)),
            Some(ArgValue::Number(1.5))
        );
    }

    #[test]
    fn test_truthiness_is_strict() {
        assert!(ArgValue::Bool(true).is_true());
        assert!(!ArgValue::from("true").is_true());
        assert!(!ArgValue::Number(1.0).is_true());
        assert!(ArgValue::from("").is_blank());
        assert!(!ArgValue::Bool(false).is_blank());
    }
}

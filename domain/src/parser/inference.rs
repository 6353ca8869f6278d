//! Type, default and choice inference for option lines
//!
//! Help text carries type information in two ways: explicit bracketed
//! metadata (`[boolean]`, `[choices: ...]`, `[default: ...]`) as printed by
//! yargs, and nothing at all. The latter is resolved by an ordered list of
//! predicates over the flag and its description, first match wins.

use crate::capability::{ArgValue, OptionType};
use regex::Regex;
use std::sync::LazyLock;

static TYPE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[boolean\]|\[string\]|\[number\]|\[array\]").unwrap()
});
static CHOICES_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[choices:\s*([^\]]+)\]").unwrap());
static DEFAULT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[default:\s*([^\]]+)\]").unwrap());
static DEPRECATED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[deprecated:[^\]]*\]?").unwrap());
static GO_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(default\s+([^)]+)\)").unwrap());

static BOOLEAN_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(enable|disable|show|hide|print|verbose|quiet|debug|trace)").unwrap()
});
static BOOLEAN_QUESTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:is|are|has|have)").unwrap());
static NUMERIC_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d|port|count|num|timeout|limit").unwrap());
static FILE_FLAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"file|path|dir|directory|config|output|input").unwrap());
static FILE_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"file|path|directory|folder").unwrap());
static FILE_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(json|yaml|yml|txt|md|toml|conf|cfg)$").unwrap());

/// Metadata pulled out of an option's trailing text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionHints {
    /// Type from an explicit token, if one was present
    pub explicit_type: Option<OptionType>,
    pub choices: Vec<String>,
    /// Raw `[default: X]` payload, resolved once the type is known
    pub default_raw: Option<String>,
    pub deprecated: bool,
    /// Description with all metadata tokens removed
    pub description: String,
}

impl OptionHints {
    /// Resolve the final type: explicit token, else heuristic.
    pub fn resolve_type(&self, flag: &str) -> OptionType {
        self.explicit_type
            .unwrap_or_else(|| infer_type(&self.description, flag))
    }

    pub fn resolve_default(&self, option_type: OptionType) -> Option<ArgValue> {
        self.default_raw
            .as_deref()
            .map(|raw| parse_default(raw, option_type))
    }
}

/// Extract bracketed metadata from trailing option text.
///
/// Each token is located independently on the original text, so the order
/// in which they appear does not matter.
pub fn extract_hints(text: &str) -> OptionHints {
    let explicit_type = TYPE_TOKEN
        .find(text)
        .map(|m| match m.as_str() {
            "[boolean]" => OptionType::Boolean,
            "[number]" => OptionType::Number,
            // arrays travel as one comma-separated string
            _ => OptionType::String,
        });

    let choices = CHOICES_TOKEN
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| parse_choices(m.as_str()))
        .unwrap_or_default();

    let default_raw = DEFAULT_TOKEN
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    let deprecated = DEPRECATED_TOKEN.is_match(text);

    let cleaned = TYPE_TOKEN.replace_all(text, "");
    let cleaned = CHOICES_TOKEN.replace(&cleaned, "");
    let cleaned = DEFAULT_TOKEN.replace(&cleaned, "");
    let cleaned = DEPRECATED_TOKEN.replace(&cleaned, "");

    OptionHints {
        explicit_type,
        choices,
        default_raw,
        deprecated,
        description: cleaned.trim().to_string(),
    }
}

/// Pull a Go-style `(default X)` out of a description.
///
/// Returns the description without the marker and the raw default.
pub fn extract_go_default(description: &str) -> (String, Option<String>) {
    match GO_DEFAULT.captures(description) {
        Some(caps) => {
            let raw = caps.get(1).map(|m| m.as_str().trim().to_string());
            let stripped = GO_DEFAULT.replace(description, "");
            (stripped.trim().to_string(), raw)
        }
        None => (description.to_string(), None),
    }
}

type Predicate = fn(&str, &str, &str) -> bool;

/// Ordered heuristics over (lowercased description, lowercased flag,
/// description as written).
const INFERENCE_RULES: &[(Predicate, OptionType)] = &[
    (looks_boolean, OptionType::Boolean),
    (looks_numeric, OptionType::Number),
    (looks_like_file, OptionType::File),
];

fn looks_boolean(desc: &str, _flag: &str, original: &str) -> bool {
    BOOLEAN_VERB.is_match(desc) || BOOLEAN_QUESTION.is_match(desc) || original.trim().ends_with('?')
}

fn looks_numeric(_desc: &str, flag: &str, _original: &str) -> bool {
    NUMERIC_FLAG.is_match(flag)
}

fn looks_like_file(desc: &str, flag: &str, original: &str) -> bool {
    FILE_FLAG.is_match(flag) || FILE_WORDS.is_match(desc) || FILE_EXTENSION.is_match(original)
}

/// Infer a type for an option that carried no explicit type token.
pub fn infer_type(description: &str, flag: &str) -> OptionType {
    let desc = description.to_lowercase();
    let flag = flag.to_lowercase();
    INFERENCE_RULES
        .iter()
        .find(|(predicate, _)| predicate(&desc, &flag, description))
        .map(|(_, ty)| *ty)
        .unwrap_or(OptionType::String)
}

/// Interpret a raw default according to the resolved type.
///
/// Surrounding quotes are removed first. Booleans are `true` only for the
/// literal `true`; numbers that fail to parse, or are not finite, keep
/// their raw text.
pub fn parse_default(raw: &str, option_type: OptionType) -> ArgValue {
    let value = unquote(raw.trim());
    match option_type {
        OptionType::Boolean => ArgValue::Bool(value == "true"),
        OptionType::Number => match value.parse::<f64>() {
            Ok(n) if n.is_finite() => ArgValue::Number(n),
            _ => ArgValue::String(value.to_string()),
        },
        OptionType::String | OptionType::File => ArgValue::String(value.to_string()),
    }
}

/// Split a `choices:` payload into clean, non-empty entries.
pub fn parse_choices(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim().replace(['"', '\''], ""))
        .filter(|c| !c.is_empty())
        .collect()
}

fn unquote(s: &str) -> &str {
    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')));
    if quoted { &s[1..s.len() - 1] } else { s }
}

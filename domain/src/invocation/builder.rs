//! Invocation builder: capability model + request → argument vector

use super::conventions::ConventionTable;
use super::request::InvocationRequest;
use super::session::{SESSION_ID_KEY, SessionFlags};
use crate::capability::{ArgValue, CapabilityModel, entities::DEFAULT_PROMPT_KEY};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use tracing::trace;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Missing required argument: {name}")]
    MissingRequiredArgument { name: String },
}

/// What a token in the vector stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRole {
    Subcommand,
    Flag,
    /// Value following a flag
    Value,
    /// Session id following a session flag
    SessionId,
    /// The prompt, as a bare token or after a prompt flag
    Prompt,
}

/// Ordered argument tokens for process execution, each tagged with its role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationVector {
    args: Vec<String>,
    roles: Vec<TokenRole>,
}

impl InvocationVector {
    fn push(&mut self, token: impl Into<String>, role: TokenRole) {
        self.args.push(token.into());
        self.roles.push(role);
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenRole)> {
        self.args
            .iter()
            .map(String::as_str)
            .zip(self.roles.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn prompt(&self) -> Option<&str> {
        self.find(TokenRole::Prompt)
    }

    pub fn session_id(&self) -> Option<&str> {
        self.find(TokenRole::SessionId)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.args.iter().any(|a| a == token)
    }

    fn find(&self, role: TokenRole) -> Option<&str> {
        self.iter().find(|(_, r)| *r == role).map(|(t, _)| t)
    }
}

/// Space-joined, with POSIX single quotes where a token needs them.
impl fmt::Display for InvocationVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let plain = !arg.is_empty()
                && arg
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || "-_./=:@,+".contains(c));
            if plain {
                f.write_str(arg)?;
            } else {
                write!(f, "'{}'", arg.replace('\'', r"'\''"))?;
            }
        }
        Ok(())
    }
}

/// Maps a request onto a model's flags.
///
/// Pure: no I/O, no shared state. The only per-tool knowledge comes from the
/// injected [`ConventionTable`].
#[derive(Debug, Clone)]
pub struct InvocationBuilder {
    conventions: ConventionTable,
}

impl Default for InvocationBuilder {
    fn default() -> Self {
        Self::new(ConventionTable::builtin())
    }
}

impl InvocationBuilder {
    pub fn new(conventions: ConventionTable) -> Self {
        Self { conventions }
    }

    pub fn conventions(&self) -> &ConventionTable {
        &self.conventions
    }

    /// Merge configured defaults (caller values win), then build.
    pub fn build_with_defaults(
        &self,
        model: &CapabilityModel,
        request: &InvocationRequest,
        defaults: &BTreeMap<String, ArgValue>,
    ) -> Result<InvocationVector, BuildError> {
        let merged = request.clone().merged_with_defaults(defaults);
        self.build(model, &merged)
    }

    /// Produce the argument vector.
    ///
    /// Order: leading subcommand, session flag, prompt, then the remaining
    /// options in model order. Keys naming no option are ignored.
    pub fn build(
        &self,
        model: &CapabilityModel,
        request: &InvocationRequest,
    ) -> Result<InvocationVector, BuildError> {
        let convention = self.conventions.get(&model.command);
        let mut vector = InvocationVector::default();

        if let Some(token) = &convention.leading_subcommand {
            vector.push(token.as_str(), TokenRole::Subcommand);
        }

        let mut session_flag = None;
        if let Some(session_id) = request.value(SESSION_ID_KEY) {
            match SessionFlags::of(model).tokens(&session_id.to_string()) {
                Some((flag, value)) => {
                    session_flag = Some(flag);
                    vector.push(flag, TokenRole::Flag);
                    if let Some(value) = value {
                        vector.push(value, TokenRole::SessionId);
                    }
                }
                None => trace!(command = %model.command, "No session flag, sessionId ignored"),
            }
        }

        let prompt_key = model.prompt_key();
        let mut prompt_flag_used = false;
        match request.value(prompt_key) {
            Some(prompt) => {
                let prompt_option = model
                    .option(DEFAULT_PROMPT_KEY)
                    .filter(|_| !convention.positional_prompt);
                if let Some(option) = prompt_option {
                    vector.push(option.flag.as_str(), TokenRole::Flag);
                    prompt_flag_used = true;
                }
                vector.push(prompt.to_string(), TokenRole::Prompt);
            }
            None => {
                if model.argument.as_ref().is_some_and(|a| a.required) {
                    return Err(BuildError::MissingRequiredArgument {
                        name: prompt_key.to_string(),
                    });
                }
            }
        }

        for option in &model.options {
            let name = option.name.as_str();
            // the session branch may already have emitted this flag
            let consumed = name == SESSION_ID_KEY
                || session_flag == Some(option.flag.as_str())
                || name == prompt_key
                || (prompt_flag_used && name == DEFAULT_PROMPT_KEY);
            if consumed {
                continue;
            }
            let Some(value) = request.value(name) else {
                continue;
            };

            if option.is_boolean() {
                if value.is_true() {
                    vector.push(option.flag.as_str(), TokenRole::Flag);
                }
            } else {
                vector.push(option.flag.as_str(), TokenRole::Flag);
                vector.push(value.to_string(), TokenRole::Value);
            }
        }

        Ok(vector)
    }

    /// Whether the output is line-delimited JSON events.
    ///
    /// True when the request asks for `format = "json"` or the command's
    /// convention says so.
    pub fn wants_structured(&self, model: &CapabilityModel, request: &InvocationRequest) -> bool {
        request.get_str("format") == Some("json")
            || self.conventions.get(&model.command).structured_output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{CliArgument, CliOption, OptionType};
    use crate::invocation::conventions::ToolConvention;
    use crate::invocation::session::with_session_option;

    fn opt(name: &str, ty: OptionType) -> CliOption {
        CliOption::new(name, format!("--{}", name), ty, name)
    }

    fn generic_model() -> CapabilityModel {
        CapabilityModel::new("qwen")
            .with_argument(CliArgument::new("query", "Prompt"))
            .with_option(opt("verbose", OptionType::Boolean))
            .with_option(opt("model", OptionType::String))
            .with_option(opt("max-tokens", OptionType::Number))
    }

    fn build(model: &CapabilityModel, request: InvocationRequest) -> Vec<String> {
        InvocationBuilder::default()
            .build(model, &request)
            .unwrap()
            .into_args()
    }

    #[test]
    fn test_boolean_round_trip() {
        let model = generic_model();

        let on = build(&model, InvocationRequest::new().with_arg("verbose", true));
        assert_eq!(on.iter().filter(|a| *a == "--verbose").count(), 1);

        let off = build(&model, InvocationRequest::new().with_arg("verbose", false));
        assert!(!off.contains(&"--verbose".to_string()));

        let absent = build(&model, InvocationRequest::new());
        assert!(absent.is_empty());
    }

    #[test]
    fn test_boolean_requires_strict_true() {
        let model = generic_model();
        let args = build(&model, InvocationRequest::new().with_arg("verbose", "true"));
        assert!(args.is_empty());
    }

    #[test]
    fn test_values_follow_flags_in_model_order() {
        let model = generic_model();
        let args = build(
            &model,
            InvocationRequest::new()
                .with_arg("max-tokens", 512.0)
                .with_arg("model", "qwen-max")
                .with_arg("query", "hello world"),
        );
        assert_eq!(
            args,
            vec!["hello world", "--model", "qwen-max", "--max-tokens", "512"]
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let model = generic_model();
        let args = build(&model, InvocationRequest::new().with_arg("nope", "x"));
        assert!(args.is_empty());
    }

    #[test]
    fn test_prompt_uses_prompt_option_when_present() {
        let model = CapabilityModel::new("qwen")
            .with_argument(CliArgument::new("query", "Prompt"))
            .with_option(opt("prompt", OptionType::String));
        let args = build(
            &model,
            InvocationRequest::new()
                .with_arg("query", "hi")
                .with_arg("prompt", "ignored duplicate"),
        );
        assert_eq!(args, vec!["--prompt", "hi"]);
    }

    #[test]
    fn test_prompt_without_positional_uses_prompt_key() {
        let model = CapabilityModel::new("claude").with_option(opt("print", OptionType::Boolean));
        let args = build(
            &model,
            InvocationRequest::new()
                .with_arg("prompt", "hi")
                .with_arg("print", true),
        );
        assert_eq!(args, vec!["hi", "--print"]);
    }

    #[test]
    fn test_empty_prompt_is_absent() {
        let model = generic_model();
        assert!(build(&model, InvocationRequest::new().with_arg("query", "")).is_empty());
    }

    #[test]
    fn test_leading_subcommand_first() {
        let model = CapabilityModel::new("opencode")
            .with_option(opt("prompt", OptionType::String))
            .with_option(opt("model", OptionType::String));
        let args = build(
            &model,
            InvocationRequest::new()
                .with_arg("model", "x")
                .with_arg("prompt", "fix it"),
        );
        // positional-prompt convention beats the parsed --prompt option
        assert_eq!(args, vec!["run", "fix it", "--model", "x"]);

        let bare = build(&model, InvocationRequest::new());
        assert_eq!(bare.first().map(String::as_str), Some("run"));
    }

    #[test]
    fn test_session_precedence() {
        let model = with_session_option(
            CapabilityModel::new("claude")
                .with_option(opt("continue", OptionType::Boolean))
                .with_option(opt("resume", OptionType::String)),
        );

        let latest = build(&model, InvocationRequest::new().with_arg("sessionId", "latest"));
        assert_eq!(latest, vec!["--continue"]);

        let by_id = build(&model, InvocationRequest::new().with_arg("sessionId", "abc"));
        assert_eq!(by_id, vec!["--resume", "abc"]);
    }

    #[test]
    fn test_session_flag_emitted_once() {
        let model = with_session_option(
            CapabilityModel::new("claude")
                .with_option(opt("continue", OptionType::Boolean))
                .with_option(opt("resume", OptionType::String)),
        );

        let latest = build(
            &model,
            InvocationRequest::new()
                .with_arg("sessionId", "latest")
                .with_arg("continue", true),
        );
        assert_eq!(latest, vec!["--continue"]);

        let by_id = build(
            &model,
            InvocationRequest::new()
                .with_arg("sessionId", "abc")
                .with_arg("resume", "x"),
        );
        assert_eq!(by_id, vec!["--resume", "abc"]);
    }

    #[test]
    fn test_session_flag_before_prompt() {
        let model = with_session_option(
            CapabilityModel::new("gemini").with_option(opt("session", OptionType::String)),
        );
        let vector = InvocationBuilder::default()
            .build(
                &model,
                &InvocationRequest::new()
                    .with_arg("sessionId", "s-1")
                    .with_arg("prompt", "continue please"),
            )
            .unwrap();
        assert_eq!(vector.args(), ["--session", "s-1", "continue please"]);
        assert_eq!(vector.session_id(), Some("s-1"));
        assert_eq!(vector.prompt(), Some("continue please"));
        assert!(!vector.contains("--session-id"));
    }

    #[test]
    fn test_missing_required_argument() {
        let model =
            CapabilityModel::new("x").with_argument(CliArgument::new("prompt", "Prompt").required());
        let err = InvocationBuilder::default()
            .build(&model, &InvocationRequest::new())
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingRequiredArgument {
                name: "prompt".to_string()
            }
        );
        assert_eq!(err.to_string(), "Missing required argument: prompt");
    }

    #[test]
    fn test_required_satisfied_by_defaults() {
        let model =
            CapabilityModel::new("x").with_argument(CliArgument::new("prompt", "Prompt").required());
        let defaults = [("prompt".to_string(), ArgValue::from("from config"))]
            .into_iter()
            .collect();
        let vector = InvocationBuilder::default()
            .build_with_defaults(&model, &InvocationRequest::new(), &defaults)
            .unwrap();
        assert_eq!(vector.args(), ["from config"]);
    }

    #[test]
    fn test_caller_overrides_configured_default() {
        let model = generic_model();
        let defaults = [("model".to_string(), ArgValue::from("default"))]
            .into_iter()
            .collect();
        let vector = InvocationBuilder::default()
            .build_with_defaults(
                &model,
                &InvocationRequest::new().with_arg("model", "mine"),
                &defaults,
            )
            .unwrap();
        assert_eq!(vector.args(), ["--model", "mine"]);
    }

    #[test]
    fn test_custom_convention_table() {
        let table = ConventionTable::empty().with(
            "ollama",
            ToolConvention {
                leading_subcommand: Some("run".to_string()),
                ..Default::default()
            },
        );
        let model = CapabilityModel::new("ollama");
        let vector = InvocationBuilder::new(table)
            .build(&model, &InvocationRequest::new().with_arg("prompt", "hi"))
            .unwrap();
        assert_eq!(vector.args(), ["run", "hi"]);
        assert_eq!(vector.first(), Some("run"));
    }

    #[test]
    fn test_wants_structured() {
        let builder = InvocationBuilder::new(ConventionTable::empty().with(
            "opencode",
            ToolConvention {
                structured_output: true,
                ..Default::default()
            },
        ));
        let qwen = CapabilityModel::new("qwen");
        assert!(builder.wants_structured(&qwen, &InvocationRequest::new().with_arg("format", "json")));
        assert!(!builder.wants_structured(&qwen, &InvocationRequest::new().with_arg("format", "text")));
        assert!(builder.wants_structured(&CapabilityModel::new("opencode"), &InvocationRequest::new()));
    }

    #[test]
    fn test_display_quotes_when_needed() {
        let model = generic_model();
        let vector = InvocationBuilder::default()
            .build(
                &model,
                &InvocationRequest::new()
                    .with_arg("query", "it's done")
                    .with_arg("model", "qwen-max"),
            )
            .unwrap();
        assert_eq!(vector.to_string(), r"'it'\''s done' --model qwen-max");
    }
}

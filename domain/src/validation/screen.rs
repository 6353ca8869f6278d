//! Argument screening against injection and traversal patterns
//!
//! Arguments are passed to the process without a shell, but the target
//! tools may themselves hand prompts to a shell or resolve `@file`
//! references. The screen rejects the patterns that make that dangerous.

use crate::invocation::{InvocationVector, TokenRole};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static SESSION_ID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Shell command substitution, rejected inside prompts
const COMMAND_SUBSTITUTION: &[&str] = &["$(", "`"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreeningError {
    #[error("Potential command injection detected: '{pattern}'")]
    CommandInjection { pattern: String },

    #[error("Path traversal detected in argument: {argument}")]
    PathTraversal { argument: String },

    #[error("Path traversal detected in @ reference: {argument}")]
    AtSyntaxTraversal { argument: String },

    #[error("Invalid session id: {id} (only letters, digits, '-' and '_' are allowed)")]
    InvalidSessionId { id: String },

    #[error("Argument too long: {length} characters (max {max})")]
    ArgumentTooLong { length: usize, max: usize },

    #[error("Argument contains a null byte")]
    NullByte,
}

/// Limits and patterns for [`ArgumentScreen`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningPolicy {
    pub enabled: bool,
    pub max_argument_length: usize,
    pub max_session_id_length: usize,
    pub shell_special_chars: Vec<String>,
    pub path_traversal_patterns: Vec<String>,
}

impl Default for ScreeningPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            max_argument_length: 10_000,
            max_session_id_length: 256,
            shell_special_chars: [";", "|", "&", "$", "`", "(", ")", "{", "}", "<", ">"]
                .into_iter()
                .map(String::from)
                .collect(),
            path_traversal_patterns: vec!["../".to_string(), "..\\".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArgumentScreen {
    policy: ScreeningPolicy,
}

impl ArgumentScreen {
    pub fn new(policy: ScreeningPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScreeningPolicy {
        &self.policy
    }

    /// The executable name: no shell metacharacters, no traversal.
    pub fn screen_command(&self, command: &str) -> Result<(), ScreeningError> {
        if !self.policy.enabled {
            return Ok(());
        }
        self.check_common(command)?;
        if let Some(c) = self
            .policy
            .shell_special_chars
            .iter()
            .find(|c| command.contains(c.as_str()))
        {
            return Err(ScreeningError::CommandInjection { pattern: c.clone() });
        }
        self.check_traversal(command)
    }

    /// Screen every token of a built vector according to its role.
    pub fn screen(&self, vector: &InvocationVector) -> Result<(), ScreeningError> {
        if !self.policy.enabled {
            return Ok(());
        }
        for (token, role) in vector.iter() {
            self.check_common(token)?;
            match role {
                TokenRole::Prompt => self.check_prompt(token)?,
                TokenRole::SessionId => self.check_session_id(token)?,
                TokenRole::Value => self.check_traversal(token)?,
                TokenRole::Subcommand | TokenRole::Flag => {}
            }
        }
        Ok(())
    }

    pub fn check_session_id(&self, id: &str) -> Result<(), ScreeningError> {
        let length = id.chars().count();
        if length > self.policy.max_session_id_length {
            return Err(ScreeningError::ArgumentTooLong {
                length,
                max: self.policy.max_session_id_length,
            });
        }
        if !SESSION_ID_CHARS.is_match(id) {
            return Err(ScreeningError::InvalidSessionId { id: id.to_string() });
        }
        Ok(())
    }

    fn check_common(&self, token: &str) -> Result<(), ScreeningError> {
        let length = token.chars().count();
        if length > self.policy.max_argument_length {
            return Err(ScreeningError::ArgumentTooLong {
                length,
                max: self.policy.max_argument_length,
            });
        }
        if token.contains('\0') {
            return Err(ScreeningError::NullByte);
        }
        Ok(())
    }

    fn check_prompt(&self, prompt: &str) -> Result<(), ScreeningError> {
        if let Some(pattern) = COMMAND_SUBSTITUTION.iter().find(|p| prompt.contains(**p)) {
            return Err(ScreeningError::CommandInjection {
                pattern: pattern.to_string(),
            });
        }
        for reference in prompt.split_whitespace().filter(|w| w.starts_with('@')) {
            let path = &reference[1..];
            if self.has_traversal(path) {
                return Err(ScreeningError::AtSyntaxTraversal {
                    argument: reference.to_string(),
                });
            }
        }
        Ok(())
    }

    fn check_traversal(&self, token: &str) -> Result<(), ScreeningError> {
        if self.has_traversal(token) {
            return Err(ScreeningError::PathTraversal {
                argument: token.to_string(),
            });
        }
        Ok(())
    }

    fn has_traversal(&self, s: &str) -> bool {
        self.policy
            .path_traversal_patterns
            .iter()
            .any(|p| s.contains(p.as_str()))
    }
}

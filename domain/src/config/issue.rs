//! Configuration issues reported by validation.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The entry cannot be used; it is skipped.
    Error,
    /// The entry works, with a fallback applied.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `[[tools]]` entry without a command.
    EmptyCommand,
    /// Two entries resolve to the same tool name.
    DuplicateTool,
    /// `parser_strategy` is not gnu, go or custom.
    UnknownParserStrategy,
    /// A custom option or positional pattern does not compile.
    InvalidPattern,
    /// `parser_strategy = "custom"` without any pattern.
    CustomWithoutPattern,
    /// A timeout of zero seconds.
    ZeroTimeout,
    /// The command contains shell metacharacters or traversal.
    UnsafeCommand,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let issue = ConfigIssue::error(ConfigIssueCode::EmptyCommand, "tools[0] has no command");
        assert!(issue.is_error());
        assert_eq!(issue.to_string(), "error: tools[0] has no command");

        let issue = ConfigIssue::warning(ConfigIssueCode::ZeroTimeout, "timeout is 0");
        assert!(!issue.is_error());
        assert_eq!(issue.severity, Severity::Warning);
    }
}

//! Line-recognition strategies for option and positional sections

use regex::Regex;
use std::sync::LazyLock;

/// `-m, --model   Model to use` (short flag optional, long flag required)
pub(crate) static GNU_OPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:(-[a-zA-Z]),\s+)?(--[a-zA-Z0-9-]+)\s+(.*)$").expect("valid regex")
});

/// `  query  Positional prompt`
pub(crate) static DEFAULT_POSITIONAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s{2}([a-zA-Z0-9-]+)\s+(.*)$").expect("valid regex"));

/// `  -port int` as printed by Go's `flag` package
pub(crate) static GO_FLAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-[A-Za-z][A-Za-z0-9_.-]*)(?:\s+(.*))?$").expect("valid regex")
});

/// How option lines are recognized.
#[derive(Debug, Clone, Default)]
pub enum ParserStrategy {
    /// `-x, --long  description` lines (commander.js, yargs, clap, argparse)
    #[default]
    Gnu,
    /// Single-dash flags with the description on the following line
    Go,
    /// Caller-supplied patterns.
    ///
    /// The option pattern captures 1 = optional short flag, 2 = long flag,
    /// 3 = trailing text. The positional pattern captures 1 = name,
    /// 2 = description. A missing pattern falls back to the GNU default.
    Custom {
        option: Option<Regex>,
        positional: Option<Regex>,
    },
}

impl ParserStrategy {
    /// Compile a custom strategy from pattern strings.
    pub fn custom(option: Option<&str>, positional: Option<&str>) -> Result<Self, regex::Error> {
        Ok(ParserStrategy::Custom {
            option: option.map(Regex::new).transpose()?,
            positional: positional.map(Regex::new).transpose()?,
        })
    }

    /// Resolve a strategy by its configuration name (`gnu`, `go`, `custom`).
    pub fn from_name(
        name: &str,
        option: Option<&str>,
        positional: Option<&str>,
    ) -> Result<Self, StrategyError> {
        match name.to_ascii_lowercase().as_str() {
            "gnu" | "" => Ok(ParserStrategy::Gnu),
            "go" => Ok(ParserStrategy::Go),
            "custom" => {
                ParserStrategy::custom(option, positional).map_err(StrategyError::InvalidPattern)
            }
            other => Err(StrategyError::Unknown(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ParserStrategy::Gnu => "gnu",
            ParserStrategy::Go => "go",
            ParserStrategy::Custom { .. } => "custom",
        }
    }

    pub(crate) fn option_pattern(&self) -> &Regex {
        match self {
            ParserStrategy::Custom {
                option: Some(re), ..
            } => re,
            _ => &GNU_OPTION,
        }
    }

    pub(crate) fn positional_pattern(&self) -> &Regex {
        match self {
            ParserStrategy::Custom {
                positional: Some(re),
                ..
            } => re,
            _ => &DEFAULT_POSITIONAL,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error("unknown parser strategy '{0}' (expected gnu, go or custom)")]
    Unknown(String),

    #[error("invalid custom pattern: {0}")]
    InvalidPattern(#[source] regex::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert!(matches!(
            ParserStrategy::from_name("GNU", None, None).unwrap(),
            ParserStrategy::Gnu
        ));
        assert!(matches!(
            ParserStrategy::from_name("go", None, None).unwrap(),
            ParserStrategy::Go
        ));
        assert!(matches!(
            ParserStrategy::from_name("yaml", None, None),
            Err(StrategyError::Unknown(_))
        ));
        assert!(matches!(
            ParserStrategy::from_name("custom", Some("(unclosed"), None),
            Err(StrategyError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_custom_falls_back_to_defaults() {
        let strategy = ParserStrategy::custom(None, Some(r"^\s+<(\w+)>\s+(.*)$")).unwrap();
        assert_eq!(strategy.option_pattern().as_str(), GNU_OPTION.as_str());
        assert!(strategy.positional_pattern().is_match("  <file>  Input file"));
        assert_eq!(strategy.name(), "custom");
    }

    #[test]
    fn test_gnu_option_pattern() {
        let caps = GNU_OPTION
            .captures("  -m, --model <x>   Model to use")
            .unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "-m");
        assert_eq!(caps.get(2).unwrap().as_str(), "--model");
        assert_eq!(caps.get(3).unwrap().as_str(), "<x>   Model to use");

        let caps = GNU_OPTION.captures("      --yolo  Auto-approve").unwrap();
        assert!(caps.get(1).is_none());
    }
}

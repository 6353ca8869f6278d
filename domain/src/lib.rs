//! Domain layer for askcli
//!
//! This crate contains the capability inference and invocation logic. It
//! has no dependencies on I/O, async runtimes or presentation concerns:
//! every entry point is a pure function of its inputs.
//!
//! # Core Concepts
//!
//! ## Capability Model
//!
//! A structured description of a CLI tool (options, positional argument,
//! subcommands) recovered from its free-form `--help` output by the
//! [`HelpParser`].
//!
//! ## Invocation
//!
//! The [`InvocationBuilder`] maps a caller's named arguments back onto the
//! model, producing the exact argument vector to execute, including
//! per-tool conventions and session continuation flags.
//!
//! ## Output
//!
//! [`extract_text`] turns line-delimited JSON event output back into plain
//! text for tools that stream events.

pub mod capability;
pub mod config;
pub mod core;
pub mod invocation;
pub mod output;
pub mod parser;
pub mod validation;

// Re-export commonly used types
pub use capability::{
    ArgValue, CapabilityModel, CliArgument, CliOption, OptionType, Subcommand, ToolCatalog,
    ToolType, parse_version,
};
pub use config::{ConfigIssue, ConfigIssueCode, Severity};
pub use invocation::{
    BuildError, ConventionTable, InvocationBuilder, InvocationRequest, InvocationVector,
    SESSION_ID_KEY, TokenRole, ToolConvention, ToolOverlay, with_session_option,
};
pub use output::extract_text;
pub use parser::{HelpParser, ParserStrategy, StrategyError, parse_help};
pub use validation::{
    ArgumentScreen, DefaultRequestValidator, RequestError, RequestValidator, ScreeningError,
    ScreeningPolicy,
};

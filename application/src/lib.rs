//! Application layer for askcli
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ExecutionParams, ToolSettings};
pub use ports::{
    command_runner::{CommandRunnerPort, RunError},
    help_fetcher::{FetchError, HelpFetcherPort},
    progress::{NoProgress, ProgressNotifier},
    tool_schema::ToolSchemaPort,
};
pub use use_cases::invoke_tool::{
    InvokeToolError, InvokeToolOutput, InvokeToolUseCase, PreparedInvocation,
};
pub use use_cases::register_tool::{RegisterAllOutput, RegisterToolError, RegisterToolUseCase};

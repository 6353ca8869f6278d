//! Presentation layer for askcli
//!
//! This crate contains CLI definitions, output formatters
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{
    Cli, Command, InspectArgs, InvocationArgs, ParserArgs, RunArgs, StrategyArg, parse_key_value,
};
pub use output::console::{ConsoleFormatter, ToolRow};
pub use progress::reporter::{ProgressReporter, SimpleProgress};

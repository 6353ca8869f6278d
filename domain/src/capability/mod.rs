//! Capability model
//!
//! The vocabulary shared by the help-text parser and the invocation builder:
//! what a CLI tool accepts, derived from its `--help` output.
//!
//! ```text
//! ┌──────────────┐   parse    ┌─────────────────┐   build    ┌──────────────────┐
//! │ help text    │──────────▶│ CapabilityModel │──────────▶│ InvocationVector │
//! └──────────────┘            └────────┬────────┘            └──────────────────┘
//!                                      │
//!                                      ├─ options:     --model, --debug, ...
//!                                      ├─ argument:    prompt (positional)
//!                                      └─ subcommands: run, serve, ...
//! ```
//!
//! Models are plain data. [`ToolCatalog`] holds the registered set.

pub mod catalog;
pub mod entities;
pub mod value;
pub mod version;

pub use catalog::ToolCatalog;
pub use entities::{
    CapabilityModel, CliArgument, CliOption, OptionType, Subcommand, ToolType, default_tool_name,
};
pub use value::ArgValue;
pub use version::parse_version;

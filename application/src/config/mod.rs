//! Application configuration
//!
//! - [`ExecutionParams`]: invocation-wide timeouts and log limits
//! - [`ToolSettings`]: per-command parser strategy, overlay, env, timeout

mod execution_params;
mod tool_settings;

pub use execution_params::ExecutionParams;
pub use tool_settings::ToolSettings;

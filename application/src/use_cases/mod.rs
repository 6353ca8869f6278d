//! Use cases - application business logic

pub mod invoke_tool;
pub mod register_tool;

pub use invoke_tool::{InvokeToolError, InvokeToolOutput, InvokeToolUseCase, PreparedInvocation};
pub use register_tool::{RegisterAllOutput, RegisterToolError, RegisterToolUseCase};

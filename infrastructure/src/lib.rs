//! Infrastructure layer for askcli
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod process;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigSource, FileConfig, FileExecutionConfig, FileSecurityConfig,
    FileToolConfig,
};
pub use process::{CliHelpFetcher, TokioCommandRunner};
pub use tools::{
    DetectedTool, JsonSchemaToolConverter, KNOWN_TOOLS, discover_known_tools, discover_tools,
};

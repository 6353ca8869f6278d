//! Configuration file loading for askcli
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. `ASKCLI_` environment variables
//! 3. Project root: `./askcli.toml` or `./.askcli.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/askcli/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileExecutionConfig, FileSecurityConfig, FileToolConfig};
pub use loader::{ConfigLoader, ConfigSource};

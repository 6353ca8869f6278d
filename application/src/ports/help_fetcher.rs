//! Help fetch port
//!
//! Retrieves the raw `--help` text of a command.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("Failed to fetch help output for '{command}': {reason}")]
    Failed { command: String, reason: String },
}

/// Port for fetching help text.
///
/// Implementations try a primary flag and a fallback flag, each under its
/// own timeout, and fail only when both fail.
#[async_trait]
pub trait HelpFetcherPort: Send + Sync {
    async fn fetch_help(&self, command: &str) -> Result<String, FetchError>;
}

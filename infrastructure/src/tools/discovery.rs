//! Whitelist discovery of AI CLIs on `PATH`
//!
//! ```text
//! $ askcli discover
//!   ✓ claude    1.0.35   /usr/local/bin/claude
//!   ✓ qwen      0.0.9    /home/me/.npm/bin/qwen
//!   ✗ gemini
//!   ✗ opencode
//! ```
//!
//! Nothing is cached: every call probes again.

use askcli_application::CommandRunnerPort;
use askcli_domain::parse_version;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Commands probed by [`discover_known_tools`]
pub const KNOWN_TOOLS: &[&str] = &["claude", "opencode", "gemini", "qwen"];

const VERSION_TIMEOUT: Duration = Duration::from_secs(5);

/// Information about one probed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTool {
    pub command: String,
    /// Resolved executable, when installed
    pub path: Option<PathBuf>,
    /// First version-looking token of `--version`
    pub version: Option<String>,
}

impl DetectedTool {
    pub fn is_available(&self) -> bool {
        self.path.is_some()
    }
}

/// Check if a command is available on the system
pub fn is_command_available(command: &str) -> bool {
    which::which(command).is_ok()
}

/// Probe each command: resolve it on `PATH`, then ask for its version.
pub async fn discover_tools(
    runner: &dyn CommandRunnerPort,
    commands: &[&str],
) -> Vec<DetectedTool> {
    let mut detected = Vec::with_capacity(commands.len());
    for command in commands {
        let path = which::which(command).ok();
        let version = match &path {
            Some(_) => probe_version(runner, command).await,
            None => None,
        };
        debug!(command, available = path.is_some(), version = ?version, "Probed tool");
        detected.push(DetectedTool {
            command: command.to_string(),
            path,
            version,
        });
    }
    detected
}

pub async fn discover_known_tools(runner: &dyn CommandRunnerPort) -> Vec<DetectedTool> {
    discover_tools(runner, KNOWN_TOOLS).await
}

async fn probe_version(runner: &dyn CommandRunnerPort, command: &str) -> Option<String> {
    let args = ["--version".to_string()];
    match runner
        .run(command, &args, VERSION_TIMEOUT, &HashMap::new())
        .await
    {
        Ok(output) => parse_version(&output),
        Err(e) => {
            debug!(command, error = %e, "Version probe failed");
            None
        }
    }
}

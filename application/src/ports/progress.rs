//! Progress notification port
//!
//! Defines the interface for reporting progress while tools are registered
//! and invoked.

use askcli_domain::InvocationVector;

/// Callback for progress updates
///
/// Implementations live in the presentation layer (spinner, plain log, ...).
pub trait ProgressNotifier: Send + Sync {
    /// Called before a command's help text is fetched
    fn on_inspect_start(&self, command: &str);

    /// Called when registration of a command finishes
    fn on_inspect_complete(&self, command: &str, success: bool);

    /// Called right before the process is spawned
    fn on_run_start(&self, _tool: &str, _args: &InvocationVector) {}

    /// Called when the process finished
    fn on_run_complete(&self, _tool: &str, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_inspect_start(&self, _command: &str) {}
    fn on_inspect_complete(&self, _command: &str, _success: bool) {}
}

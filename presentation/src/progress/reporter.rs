//! Progress reporting for tool registration and invocation

use askcli_application::ProgressNotifier;
use askcli_domain::InvocationVector;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

/// Reports progress with one spinner per command.
///
/// Registration runs concurrently, so several spinners may be live at once.
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<String, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start(&self, key: &str, message: &str) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(key.to_string());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK);
        if let Ok(mut bars) = self.bars.lock() {
            bars.insert(key.to_string(), pb);
        }
    }

    fn finish(&self, key: &str, success: bool, done: &str) {
        let pb = self.bars.lock().ok().and_then(|mut bars| bars.remove(key));
        if let Some(pb) = pb {
            let status = if success {
                format!("{} {}", "v".green(), done)
            } else {
                format!("{} failed", "x".red())
            };
            pb.finish_with_message(status);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_inspect_start(&self, command: &str) {
        self.start(command, "reading --help...");
    }

    fn on_inspect_complete(&self, command: &str, success: bool) {
        self.finish(command, success, "parsed");
    }

    fn on_run_start(&self, tool: &str, args: &InvocationVector) {
        self.start(tool, &format!("running ({} args)...", args.len()));
    }

    fn on_run_complete(&self, tool: &str, success: bool) {
        self.finish(tool, success, "done");
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_inspect_start(&self, command: &str) {
        eprintln!("{} {} --help", "->".cyan(), command.bold());
    }

    fn on_inspect_complete(&self, command: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), command);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), command);
        }
    }
}

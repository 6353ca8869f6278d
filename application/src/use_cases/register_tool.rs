//! Register tool use case.
//!
//! Turns a configured command into a [`CapabilityModel`]:
//!
//! 1. **Screen** the command name
//! 2. **Fetch** its help text through [`HelpFetcherPort`]
//! 3. **Parse** with the configured [`ParserStrategy`](askcli_domain::ParserStrategy)
//! 4. **Augment** with a `sessionId` option when session flags exist
//! 5. **Overlay** alias, description, system prompt and default arguments
//! 6. **Version**: `<command> --version`, when a runner is attached

use crate::config::ToolSettings;
use crate::ports::command_runner::CommandRunnerPort;
use crate::ports::help_fetcher::{FetchError, HelpFetcherPort};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use askcli_domain::{
    ArgumentScreen, CapabilityModel, HelpParser, ScreeningError, ToolCatalog, parse_version,
    with_session_option,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum RegisterToolError {
    #[error("Refusing to register command: {0}")]
    UnsafeCommand(#[from] ScreeningError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Result of registering several tools at once.
#[derive(Debug, Default)]
pub struct RegisterAllOutput {
    pub catalog: ToolCatalog,
    /// Commands that could not be registered, sorted by command
    pub failures: Vec<(String, RegisterToolError)>,
}

const VERSION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct RegisterToolUseCase {
    help_fetcher: Arc<dyn HelpFetcherPort>,
    version_runner: Option<Arc<dyn CommandRunnerPort>>,
    screen: ArgumentScreen,
    progress: Arc<dyn ProgressNotifier>,
}

impl RegisterToolUseCase {
    pub fn new(help_fetcher: Arc<dyn HelpFetcherPort>) -> Self {
        Self {
            help_fetcher,
            version_runner: None,
            screen: ArgumentScreen::default(),
            progress: Arc::new(NoProgress),
        }
    }

    pub fn with_screen(mut self, screen: ArgumentScreen) -> Self {
        self.screen = screen;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    /// Record each tool's `--version` on its model.
    pub fn with_version_probe(mut self, runner: Arc<dyn CommandRunnerPort>) -> Self {
        self.version_runner = Some(runner);
        self
    }

    /// Build the model for one configured command.
    pub async fn execute(
        &self,
        settings: &ToolSettings,
    ) -> Result<CapabilityModel, RegisterToolError> {
        let command = settings.command.as_str();
        self.screen.screen_command(command)?;

        self.progress.on_inspect_start(command);
        let help = match self.help_fetcher.fetch_help(command).await {
            Ok(help) => help,
            Err(e) => {
                self.progress.on_inspect_complete(command, false);
                return Err(e.into());
            }
        };
        self.progress.on_inspect_complete(command, true);

        let mut model = Self::from_help_text(settings, &help);
        model.version = self.probe_version(settings).await;
        info!(
            command,
            tool = %model.tool_name,
            options = model.options.len(),
            version = ?model.version,
            "Registered tool"
        );
        Ok(model)
    }

    /// A failed probe leaves the version unset.
    async fn probe_version(&self, settings: &ToolSettings) -> Option<String> {
        let runner = self.version_runner.as_ref()?;
        let args = ["--version".to_string()];
        match runner
            .run(&settings.command, &args, VERSION_TIMEOUT, &settings.env)
            .await
        {
            Ok(output) => parse_version(&output),
            Err(e) => {
                debug!(command = %settings.command, error = %e, "Version probe failed");
                None
            }
        }
    }

    /// Parse, augment and overlay already-fetched help text.
    pub fn from_help_text(settings: &ToolSettings, help_text: &str) -> CapabilityModel {
        let parsed = HelpParser::new(settings.strategy.clone()).parse(&settings.command, help_text);
        settings.overlay.apply(with_session_option(parsed))
    }

    /// Register every command concurrently.
    ///
    /// One failing command does not affect the others.
    pub async fn register_all(&self, settings: &[ToolSettings]) -> RegisterAllOutput {
        let mut set = JoinSet::new();
        for entry in settings.iter().cloned() {
            let use_case = self.clone();
            set.spawn(async move {
                let result = use_case.execute(&entry).await;
                (entry.command, result)
            });
        }

        let mut output = RegisterAllOutput::default();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((_, Ok(model))) => {
                    if let Some(previous) = output.catalog.insert(model) {
                        warn!(
                            tool = %previous.tool_name,
                            command = %previous.command,
                            "Duplicate tool name, replaced earlier registration"
                        );
                    }
                }
                Ok((command, Err(e))) => {
                    warn!(command = %command, error = %e, "Tool registration failed");
                    output.failures.push((command, e));
                }
                Err(e) => warn!(error = %e, "Registration task panicked"),
            }
        }
        output.failures.sort_by(|a, b| a.0.cmp(&b.0));
        debug!(
            registered = output.catalog.len(),
            failed = output.failures.len(),
            "Registration finished"
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::command_runner::RunError;
    use askcli_domain::{ArgValue, OptionType, ParserStrategy, SESSION_ID_KEY, ToolOverlay};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct MockHelpFetcher {
        help: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
    }

    impl MockHelpFetcher {
        fn new(entries: &[(&str, &str)]) -> Self {
            Self {
                help: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HelpFetcherPort for MockHelpFetcher {
        async fn fetch_help(&self, command: &str) -> Result<String, FetchError> {
            self.calls.lock().unwrap().push(command.to_string());
            self.help
                .get(command)
                .cloned()
                .ok_or_else(|| FetchError::NotFound(command.to_string()))
        }
    }

    struct MockVersionRunner {
        output: Result<&'static str, &'static str>,
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl MockVersionRunner {
        fn new(output: Result<&'static str, &'static str>) -> Self {
            Self {
                output,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CommandRunnerPort for MockVersionRunner {
        async fn run(
            &self,
            command: &str,
            args: &[String],
            _timeout: Duration,
            _env: &HashMap<String, String>,
        ) -> Result<String, RunError> {
            self.calls
                .lock()
                .unwrap()
                .push((command.to_string(), args.to_vec()));
            self.output
                .map(str::to_string)
                .map_err(|stderr| RunError::Failed {
                    command: command.to_string(),
                    code: Some(1),
                    stderr: stderr.to_string(),
                })
        }
    }

    const CLAUDE_HELP: &str = "Usage: claude [options] [prompt]\n\nClaude Code\n\nArguments:\n  prompt  Your prompt\n\nOptions:\n  -p, --print   Print response and exit\n  -c, --continue   Continue the most recent conversation\n  -r, --resume [sessionId]   Resume a conversation\n  --model <model>   Model for the current session\n";

    #[tokio::test]
    async fn test_execute_parses_and_augments() {
        let fetcher = Arc::new(MockHelpFetcher::new(&[("claude", CLAUDE_HELP)]));
        let use_case = RegisterToolUseCase::new(fetcher.clone());

        let model = use_case.execute(&ToolSettings::new("claude")).await.unwrap();

        assert_eq!(model.tool_name, "ask-claude");
        assert_eq!(model.description, "Claude Code");
        assert_eq!(model.argument.as_ref().unwrap().name, "prompt");
        assert_eq!(model.option("print").unwrap().option_type, OptionType::Boolean);
        assert!(model.has_option(SESSION_ID_KEY));
        assert_eq!(*fetcher.calls.lock().unwrap(), vec!["claude"]);
    }

    #[tokio::test]
    async fn test_version_recorded_when_probe_attached() {
        let fetcher = Arc::new(MockHelpFetcher::new(&[("claude", CLAUDE_HELP)]));
        let runner = Arc::new(MockVersionRunner::new(Ok("1.0.35 (Claude Code)")));
        let use_case = RegisterToolUseCase::new(fetcher).with_version_probe(runner.clone());

        let model = use_case.execute(&ToolSettings::new("claude")).await.unwrap();
        assert_eq!(model.version.as_deref(), Some("1.0.35"));
        assert_eq!(
            *runner.calls.lock().unwrap(),
            vec![("claude".to_string(), vec!["--version".to_string()])]
        );
    }

    #[tokio::test]
    async fn test_failed_version_probe_still_registers() {
        let fetcher = Arc::new(MockHelpFetcher::new(&[("claude", CLAUDE_HELP)]));
        let runner = Arc::new(MockVersionRunner::new(Err("unknown option --version")));
        let use_case = RegisterToolUseCase::new(fetcher.clone()).with_version_probe(runner);

        let model = use_case.execute(&ToolSettings::new("claude")).await.unwrap();
        assert_eq!(model.version, None);
        assert_eq!(model.tool_name, "ask-claude");

        let unprobed = RegisterToolUseCase::new(fetcher)
            .execute(&ToolSettings::new("claude"))
            .await
            .unwrap();
        assert_eq!(unprobed.version, None);
    }

    #[tokio::test]
    async fn test_overlay_applied_after_parse() {
        let fetcher = Arc::new(MockHelpFetcher::new(&[("claude", CLAUDE_HELP)]));
        let use_case = RegisterToolUseCase::new(fetcher);
        let settings = ToolSettings::new("claude").with_overlay(ToolOverlay {
            alias: Some("claude-code".to_string()),
            description: None,
            system_prompt: None,
            default_args: [("model".to_string(), ArgValue::from("sonnet"))]
                .into_iter()
                .collect(),
        });

        let model = use_case.execute(&settings).await.unwrap();
        assert_eq!(model.tool_name, "claude-code");
        assert_eq!(model.description, "Claude Code");
        assert_eq!(
            model.option("model").unwrap().default_value,
            Some(ArgValue::from("sonnet"))
        );
    }

    #[tokio::test]
    async fn test_unsafe_command_never_fetched() {
        let fetcher = Arc::new(MockHelpFetcher::new(&[]));
        let use_case = RegisterToolUseCase::new(fetcher.clone());

        let err = use_case
            .execute(&ToolSettings::new("qwen; rm -rf ~"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegisterToolError::UnsafeCommand(_)));
        assert!(fetcher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_all_collects_failures() {
        let fetcher = Arc::new(MockHelpFetcher::new(&[
            ("claude", CLAUDE_HELP),
            ("qwen", "Options:\n  --yolo   Auto-approve all actions\n"),
        ]));
        let use_case = RegisterToolUseCase::new(fetcher);
        let settings = vec![
            ToolSettings::new("qwen"),
            ToolSettings::new("missing"),
            ToolSettings::new("claude"),
        ];

        let output = use_case.register_all(&settings).await;
        let names: Vec<&str> = output.catalog.names().collect();
        assert_eq!(names, vec!["ask-claude", "ask-qwen"]);
        assert_eq!(output.catalog.resolve("qwen").unwrap().tool_name, "ask-qwen");
        assert_eq!(output.catalog.resolve("ask-claude").unwrap().command, "claude");
        assert!(output.catalog.resolve("missing").is_none());
        assert_eq!(output.failures.len(), 1);
        assert_eq!(output.failures[0].0, "missing");
        assert!(matches!(output.failures[0].1, RegisterToolError::Fetch(FetchError::NotFound(_))));
    }

    #[test]
    fn test_from_help_text_uses_strategy() {
        let settings = ToolSettings::new("mods").with_strategy(ParserStrategy::Go);
        let model = RegisterToolUseCase::from_help_text(
            &settings,
            "Options:\n  -model string\n    \tDefault model (default \"gpt-4\")\n",
        );
        let option = model.option("model").unwrap();
        assert_eq!(option.flag, "-model");
        assert_eq!(option.default_value, Some(ArgValue::from("gpt-4")));
    }
}

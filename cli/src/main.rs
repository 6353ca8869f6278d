//! CLI entrypoint for askcli
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use askcli_application::{
    InvokeToolUseCase, NoProgress, ProgressNotifier, RegisterToolUseCase,
    ToolSchemaPort, ToolSettings,
};
use askcli_domain::{CapabilityModel, InvocationBuilder};
use askcli_infrastructure::tools::discovery::is_command_available;
use askcli_infrastructure::{
    CliHelpFetcher, ConfigLoader, FileConfig, JsonSchemaToolConverter, TokioCommandRunner,
    discover_known_tools,
};
use askcli_presentation::{
    Cli, Command, ConsoleFormatter, InspectArgs, InvocationArgs, ParserArgs, ProgressReporter,
    RunArgs, ToolRow,
};
use clap::{CommandFactory, Parser};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // stdout carries results only
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        println!("Configuration sources (in priority order):");
        for source in ConfigLoader::sources(cli.config.as_deref()) {
            let mark = if source.found { "FOUND" } else { "     " };
            println!("  [{}] {:<8} {}", mark, format!("{}:", source.label), source.location);
        }
        return Ok(());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    for issue in config.validate() {
        warn!("{}", issue);
    }

    info!("Starting askcli");

    // === Dependency Injection ===
    let app = App::new(config, cli.quiet);

    match command {
        Command::Inspect(args) => app.inspect(args).await,
        Command::Build(args) => app.build(args).await,
        Command::Run(args) => app.run(args).await,
        Command::Schema { command } => app.schema(command.as_deref()).await,
        Command::List => {
            app.list();
            Ok(())
        }
        Command::Discover => {
            app.discover().await;
            Ok(())
        }
    }
}

struct App {
    config: FileConfig,
    register: RegisterToolUseCase,
    invoke: InvokeToolUseCase,
}

impl App {
    fn new(config: FileConfig, quiet: bool) -> Self {
        let params = config.execution_params();
        let progress: Arc<dyn ProgressNotifier> = if quiet {
            Arc::new(NoProgress)
        } else {
            Arc::new(ProgressReporter::new())
        };

        let runner = Arc::new(TokioCommandRunner::new());
        let register = RegisterToolUseCase::new(Arc::new(CliHelpFetcher::new(params.help_timeout)))
            .with_version_probe(runner.clone())
            .with_screen(config.argument_screen())
            .with_progress(progress.clone());
        let invoke = InvokeToolUseCase::new(runner)
            .with_builder(InvocationBuilder::new(config.convention_table()))
            .with_screen(config.argument_screen())
            .with_params(params)
            .with_progress(progress);

        Self {
            config,
            register,
            invoke,
        }
    }

    /// Configured settings for a command or tool name, with CLI overrides
    fn settings_for(&self, name: &str, parser: &ParserArgs) -> Result<ToolSettings> {
        let mut settings = match self.config.find_tool(name) {
            Some(tool) => {
                let (settings, issues) = tool.to_settings();
                match settings {
                    Some(settings) => settings,
                    None => {
                        let messages: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
                        bail!("Tool '{}' is misconfigured: {}", name, messages.join("; "));
                    }
                }
            }
            None => ToolSettings::new(name),
        };
        if let Some(strategy) = parser.to_strategy()? {
            settings.strategy = strategy;
        }
        Ok(settings)
    }

    async fn model_for(
        &self,
        settings: &ToolSettings,
        help_file: Option<&Path>,
    ) -> Result<CapabilityModel> {
        match help_file {
            Some(path) => {
                let text = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(RegisterToolUseCase::from_help_text(settings, &text))
            }
            None => Ok(self.register.execute(settings).await?),
        }
    }

    async fn inspect(&self, args: InspectArgs) -> Result<()> {
        let settings = self.settings_for(&args.command, &args.parser)?;
        let model = self.model_for(&settings, args.help_file.as_deref()).await?;
        if args.json {
            println!("{}", ConsoleFormatter::format_model_json(&model));
        } else {
            print!("{}", ConsoleFormatter::format_model(&model));
        }
        Ok(())
    }

    async fn build(&self, args: InvocationArgs) -> Result<()> {
        let settings = self.settings_for(&args.command, &args.parser)?;
        let model = self.model_for(&settings, args.help_file.as_deref()).await?;
        let request = args.to_request(model.prompt_key());

        let prepared = self.invoke.prepare(&model, &settings, &request)?;
        println!(
            "{}",
            ConsoleFormatter::format_command_line(&model.command, &prepared.vector)
        );
        Ok(())
    }

    async fn run(&self, args: RunArgs) -> Result<()> {
        let invocation = &args.invocation;
        let mut settings = self.settings_for(&invocation.command, &invocation.parser)?;
        if let Some(secs) = args.timeout {
            if secs == 0 {
                bail!("--timeout must be greater than 0");
            }
            settings.timeout = Some(Duration::from_secs(secs));
        }
        let model = self
            .model_for(&settings, invocation.help_file.as_deref())
            .await?;
        let request = invocation.to_request(model.prompt_key());

        let output = self.invoke.execute(&model, &settings, &request).await?;
        if args.raw {
            println!("{}", output.raw);
        } else {
            println!("{}", output.text);
        }
        Ok(())
    }

    async fn schema(&self, only: Option<&str>) -> Result<()> {
        let (mut settings, issues) = self.config.tool_settings();
        for issue in issues.iter().filter(|i| i.is_error()) {
            warn!("{}", issue);
        }
        if let Some(name) = only {
            settings.retain(|s| {
                s.command == name
                    || self
                        .config
                        .find_tool(&s.command)
                        .is_some_and(|t| t.tool_name() == name)
            });
            if settings.is_empty() {
                settings.push(ToolSettings::new(name));
            }
        }

        let registered = self.register.register_all(&settings).await;
        for (command, error) in &registered.failures {
            warn!(command = %command, "Skipped: {}", error);
        }

        let tools = match only {
            Some(name) => {
                let model = registered
                    .catalog
                    .resolve(name)
                    .with_context(|| format!("No tool '{}' could be registered", name))?;
                vec![JsonSchemaToolConverter.tool_to_schema(model)]
            }
            None => JsonSchemaToolConverter.all_tools_schema(&registered.catalog),
        };
        println!("{}", serde_json::to_string_pretty(&tools)?);
        Ok(())
    }

    fn list(&self) {
        let rows: Vec<ToolRow> = self
            .config
            .tools
            .iter()
            .map(|tool| {
                let command = tool.command.trim();
                let mut detail = format!("{} ({})", command, tool.parser_strategy);
                if !tool.enabled {
                    detail.push_str(" [disabled]");
                }
                ToolRow {
                    name: tool.tool_name(),
                    available: is_command_available(command),
                    detail,
                }
            })
            .collect();
        print!("{}", ConsoleFormatter::format_rows("Configured tools:", &rows));
    }

    async fn discover(&self) {
        let runner = TokioCommandRunner::new();
        let rows: Vec<ToolRow> = discover_known_tools(&runner)
            .await
            .into_iter()
            .map(|tool| {
                let detail = match (&tool.version, &tool.path) {
                    (Some(version), Some(path)) => format!("{}  {}", version, path.display()),
                    (None, Some(path)) => path.display().to_string(),
                    _ => "not found".to_string(),
                };
                ToolRow {
                    name: tool.command.clone(),
                    available: tool.is_available(),
                    detail,
                }
            })
            .collect();
        print!("{}", ConsoleFormatter::format_rows("Known AI CLIs:", &rows));
    }
}

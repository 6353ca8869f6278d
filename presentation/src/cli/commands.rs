//! CLI command definitions

use askcli_domain::{ArgValue, InvocationRequest, ParserStrategy, SESSION_ID_KEY, StrategyError};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Help-text parser selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// `-x, --long  description` (commander.js, yargs, clap, argparse)
    Gnu,
    /// Go `flag` package: description on the following line
    Go,
    /// Patterns given with --option-pattern / --positional-pattern
    Custom,
}

/// CLI arguments for askcli
#[derive(Parser, Debug)]
#[command(name = "askcli")]
#[command(author, version, about = "Turn any CLI's --help into a callable tool")]
#[command(long_about = r#"
askcli reads a command's --help output, infers what it accepts, and builds
safe argument vectors from key/value requests.

Configuration files are loaded from (in priority order):
1. --config <path>               Explicit config file
2. ASKCLI_* environment          e.g. ASKCLI_EXECUTION__TIMEOUT_SECS=60
3. ./askcli.toml                 Project-level config
4. ~/.config/askcli/config.toml  Global config

Example:
  askcli inspect qwen
  askcli build opencode "explain this repo" -a model=gpt-5
  askcli run claude "What is 2+2?" --session latest
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a command's help text and show the inferred capabilities
    Inspect(InspectArgs),
    /// Print the argument vector for a request without running it
    Build(InvocationArgs),
    /// Build, screen and run a request, then print the response
    Run(RunArgs),
    /// Print JSON Schema tool descriptions for configured tools
    Schema {
        /// Only this command or tool name
        command: Option<String>,
    },
    /// List configured tools and whether they are installed
    List,
    /// Look for known AI CLIs on PATH
    Discover,
}

#[derive(Args, Debug)]
pub struct ParserArgs {
    /// Parser strategy (overrides the configured one)
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Option line regex (custom strategy): 1 = short, 2 = long, 3 = rest
    #[arg(long, value_name = "REGEX")]
    pub option_pattern: Option<String>,

    /// Positional line regex (custom strategy): 1 = name, 2 = description
    #[arg(long, value_name = "REGEX")]
    pub positional_pattern: Option<String>,
}

impl ParserArgs {
    /// The strategy selected on the command line, if any
    pub fn to_strategy(&self) -> Result<Option<ParserStrategy>, StrategyError> {
        let name = match self.strategy {
            Some(StrategyArg::Gnu) => "gnu",
            Some(StrategyArg::Go) => "go",
            Some(StrategyArg::Custom) => "custom",
            None => return Ok(None),
        };
        ParserStrategy::from_name(
            name,
            self.option_pattern.as_deref(),
            self.positional_pattern.as_deref(),
        )
        .map(Some)
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Command to inspect
    pub command: String,

    /// Read help text from a file instead of running the command
    #[arg(long, value_name = "PATH")]
    pub help_file: Option<PathBuf>,

    #[command(flatten)]
    pub parser: ParserArgs,

    /// Print the capability model as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct InvocationArgs {
    /// Command or configured tool name
    pub command: String,

    /// Prompt text
    pub prompt: Option<String>,

    /// Request argument; repeatable
    #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub args: Vec<(String, ArgValue)>,

    /// Session to continue ("latest" for the most recent one)
    #[arg(long, value_name = "ID")]
    pub session: Option<String>,

    /// Read help text from a file instead of running the command
    #[arg(long, value_name = "PATH")]
    pub help_file: Option<PathBuf>,

    #[command(flatten)]
    pub parser: ParserArgs,
}

impl InvocationArgs {
    /// Assemble the request; the prompt goes under `prompt_key` unless an
    /// explicit `-a` already set it.
    pub fn to_request(&self, prompt_key: &str) -> InvocationRequest {
        let mut request: InvocationRequest = self.args.iter().cloned().collect();
        if let Some(prompt) = &self.prompt
            && !request.contains(prompt_key)
        {
            request.insert(prompt_key, prompt.as_str());
        }
        if let Some(session) = &self.session {
            request.insert(SESSION_ID_KEY, session.as_str());
        }
        request
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub invocation: InvocationArgs,

    /// Timeout in seconds (overrides configuration)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Print the raw stdout instead of the extracted text
    #[arg(long)]
    pub raw: bool,
}

/// Parse `key=value`; the value is typed by [`ArgValue::parse_literal`].
pub fn parse_key_value(s: &str) -> Result<(String, ArgValue), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), ArgValue::parse_literal(value)))
}

//! Stateful line scanner turning `--help` output into a [`CapabilityModel`]

use super::inference::{extract_go_default, extract_hints, parse_default};
use super::strategy::{GO_FLAG, ParserStrategy};
use crate::capability::{
    CapabilityModel, CliArgument, CliOption, OptionType, Subcommand, ToolType,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

static DIVIDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^---+$").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static COLUMN_GAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());
static USAGE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+\s+\[.*?\]\s*$").unwrap());
static REPEATED_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Available Commands|Commands|Options|Arguments|Positionals|Flags|Global Flags):")
        .unwrap()
});
static FILE_EXTENSION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.[a-z]+$").unwrap());
static BRACKETS_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[<>\[\]]+$").unwrap());

/// Value type words printed after a flag by Go's `flag` package
const GO_TYPE_WORDS: &[(&str, OptionType)] = &[
    ("string", OptionType::String),
    ("value", OptionType::String),
    ("duration", OptionType::String),
    ("int", OptionType::Number),
    ("int64", OptionType::Number),
    ("uint", OptionType::Number),
    ("uint64", OptionType::Number),
    ("float", OptionType::Number),
    ("float64", OptionType::Number),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Description,
    Positionals,
    Options,
    Commands,
}

/// Section switch for a header line. Headers match the whole line exactly.
fn section_header(line: &str) -> Option<Section> {
    match line {
        "Commands:" | "Available Commands:" => Some(Section::Commands),
        "Positionals:" | "Arguments:" => Some(Section::Positionals),
        "Options:" | "Flags:" | "Global Flags:" => Some(Section::Options),
        _ => None,
    }
}

/// Parser for CLI help output.
///
/// Never fails: unrecognized lines are dropped and empty input yields the
/// minimal model. Output depends only on the inputs.
#[derive(Debug, Clone, Default)]
pub struct HelpParser {
    strategy: ParserStrategy,
}

impl HelpParser {
    pub fn new(strategy: ParserStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &ParserStrategy {
        &self.strategy
    }

    pub fn parse(&self, command: &str, help_text: &str) -> CapabilityModel {
        let mut scan = Scan::default();

        for line in help_text.lines() {
            if let Some(section) = section_header(line) {
                scan.flush_go_flag();
                if section == Section::Commands {
                    scan.has_commands_section = true;
                }
                scan.section = section;
                continue;
            }

            if line.trim().is_empty() || DIVIDER.is_match(line) {
                continue;
            }

            match scan.section {
                Section::Description => scan.description_line(line),
                Section::Positionals => match self.parse_positional(line) {
                    Some(argument) => scan.positionals.push(argument),
                    None => trace!(line, "dropped unparseable positional line"),
                },
                Section::Options => match self.strategy {
                    ParserStrategy::Go => scan.go_line(line),
                    _ => match self.parse_option(line) {
                        Some(option) => scan.push_option(option),
                        None => trace!(line, "dropped unparseable option line"),
                    },
                },
                Section::Commands => match parse_subcommand(line) {
                    Some(subcommand) => scan.subcommands.push(subcommand),
                    None => trace!(line, "skipped non-subcommand line"),
                },
            }
        }
        scan.flush_go_flag();

        let model = scan.into_model(command);
        debug!(
            command,
            strategy = self.strategy.name(),
            options = model.options.len(),
            subcommands = model.subcommands.len(),
            positional = model.argument.is_some(),
            "Parsed help text"
        );
        model
    }

    fn parse_positional(&self, line: &str) -> Option<CliArgument> {
        let caps = self.strategy.positional_pattern().captures(line)?;
        let name = caps.get(1)?.as_str();
        let description = caps.get(2)?.as_str().trim();
        if name.is_empty() || description.is_empty() {
            return None;
        }
        Some(CliArgument::new(name, description))
    }

    fn parse_option(&self, line: &str) -> Option<CliOption> {
        let caps = self.strategy.option_pattern().captures(line)?;
        let short = caps.get(1).map(|m| m.as_str());
        let long = caps.get(2)?.as_str();
        let rest = caps.get(3)?.as_str();
        build_option(short, long, rest)
    }
}

/// Parse help text with the default (GNU) strategy.
pub fn parse_help(command: &str, help_text: &str) -> CapabilityModel {
    HelpParser::default().parse(command, help_text)
}

fn build_option(short: Option<&str>, long: &str, rest: &str) -> Option<CliOption> {
    if rest.is_empty() {
        return None;
    }
    let hints = extract_hints(rest);
    if hints.description.is_empty() {
        return None;
    }

    let option_type = hints.resolve_type(long);
    let default_value = hints.resolve_default(option_type);

    Some(CliOption {
        name: long.strip_prefix("--").unwrap_or(long).to_string(),
        flag: long.to_string(),
        short_flag: short.map(str::to_string),
        option_type,
        description: hints.description,
        required: false,
        default_value,
        choices: hints.choices,
        deprecated: hints.deprecated,
    })
}

fn build_go_option(flag: &str, option_type: OptionType, text: &str) -> Option<CliOption> {
    let (text, go_default) = extract_go_default(text);
    let hints = extract_hints(&text);
    if hints.description.is_empty() {
        return None;
    }

    let default_value = go_default
        .or_else(|| hints.default_raw.clone())
        .map(|raw| parse_default(&raw, option_type));

    Some(CliOption {
        name: flag.trim_start_matches('-').to_string(),
        flag: flag.to_string(),
        short_flag: None,
        option_type,
        description: hints.description,
        required: false,
        default_value,
        choices: hints.choices,
        deprecated: hints.deprecated,
    })
}

fn go_type_word(word: &str) -> Option<OptionType> {
    GO_TYPE_WORDS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, ty)| *ty)
}

/// Subcommand line: `name   description`, or `base name   description`.
fn parse_subcommand(line: &str) -> Option<Subcommand> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with("---") || REPEATED_HEADER.is_match(trimmed) {
        return None;
    }
    if USAGE_SHAPE.is_match(trimmed) {
        return None;
    }

    let mut parts = COLUMN_GAP.splitn(trimmed, 2);
    let command_part = parts.next()?.trim();
    let description = parts.next()?.trim();
    if command_part.is_empty() || description.is_empty() {
        return None;
    }

    // Argument placeholders (`<file>`, `[opts]`) are not part of the name
    let name = command_part
        .split_whitespace()
        .rev()
        .find(|w| !w.starts_with('<') && !w.starts_with('['))?;

    if FILE_EXTENSION_NAME.is_match(name) || BRACKETS_ONLY.is_match(name) || name.starts_with('-')
    {
        return None;
    }

    Some(Subcommand {
        name: name.to_string(),
        description: description.to_string(),
        has_arguments: true,
    })
}

/// A Go flag line whose description is on the next line
#[derive(Debug)]
struct PendingGoFlag {
    flag: String,
    option_type: OptionType,
}

#[derive(Debug)]
struct Scan {
    section: Section,
    has_commands_section: bool,
    description_lines: Vec<String>,
    positionals: Vec<CliArgument>,
    options: Vec<CliOption>,
    subcommands: Vec<Subcommand>,
    pending_go: Option<PendingGoFlag>,
}

impl Default for Scan {
    fn default() -> Self {
        Self {
            section: Section::Description,
            has_commands_section: false,
            description_lines: Vec::new(),
            positionals: Vec::new(),
            options: Vec::new(),
            subcommands: Vec::new(),
            pending_go: None,
        }
    }
}

impl Scan {
    fn description_line(&mut self, line: &str) {
        if !line.starts_with(' ') && !line.starts_with('\t') {
            self.description_lines.push(line.trim().to_string());
        }
    }

    /// Same name as an earlier option: the later one replaces it in place.
    fn push_option(&mut self, option: CliOption) {
        match self.options.iter_mut().find(|o| o.name == option.name) {
            Some(existing) => {
                trace!(name = %option.name, "option name collision, keeping later flag");
                *existing = option;
            }
            None => self.options.push(option),
        }
    }

    fn go_line(&mut self, line: &str) {
        let flag_caps = if line.trim_start().starts_with("--") {
            None
        } else {
            GO_FLAG.captures(line)
        };

        let Some(caps) = flag_caps else {
            match self.pending_go.take() {
                Some(pending) => {
                    if let Some(option) =
                        build_go_option(&pending.flag, pending.option_type, line.trim())
                    {
                        self.push_option(option);
                    }
                }
                None => trace!(line, "dropped unparseable option line"),
            }
            return;
        };

        self.flush_go_flag();
        let Some(flag) = caps.get(1).map(|m| m.as_str().to_string()) else {
            return;
        };
        let trailing = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");

        if trailing.is_empty() {
            self.pending_go = Some(PendingGoFlag {
                flag,
                option_type: OptionType::Boolean,
            });
            return;
        }

        let (first, remainder) = match trailing.split_once(char::is_whitespace) {
            Some((first, remainder)) => (first, remainder.trim()),
            None => (trailing, ""),
        };

        match (go_type_word(first), remainder.is_empty()) {
            (Some(option_type), true) => {
                self.pending_go = Some(PendingGoFlag { flag, option_type });
            }
            (Some(option_type), false) => {
                if let Some(option) = build_go_option(&flag, option_type, remainder) {
                    self.push_option(option);
                }
            }
            // A lone custom placeholder word (`-config path`) still takes a value
            (None, true) => {
                self.pending_go = Some(PendingGoFlag {
                    flag,
                    option_type: OptionType::String,
                });
            }
            (None, false) => {
                if let Some(option) = build_go_option(&flag, OptionType::Boolean, trailing) {
                    self.push_option(option);
                }
            }
        }
    }

    fn flush_go_flag(&mut self) {
        if let Some(pending) = self.pending_go.take() {
            trace!(flag = %pending.flag, "dropped flag without description");
        }
    }

    fn into_model(self, command: &str) -> CapabilityModel {
        let description = self
            .description_lines
            .iter()
            .filter(|l| !l.starts_with("Usage:"))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        let description = WHITESPACE_RUN
            .replace_all(description.trim(), " ")
            .into_owned();

        if self.positionals.len() > 1 {
            debug!(
                command,
                count = self.positionals.len(),
                "Multiple positionals found, keeping the first"
            );
        }

        let mut model = CapabilityModel::new(command).with_description(description);
        model.tool_type = if self.has_commands_section {
            ToolType::WithSubcommands
        } else {
            ToolType::Simple
        };
        model.options = self.options;
        model.argument = self.positionals.into_iter().next();
        model.subcommands = self.subcommands;
        model
    }
}

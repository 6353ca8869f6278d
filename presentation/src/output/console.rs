//! Console output formatter for capability models and tool listings

use askcli_domain::{CapabilityModel, CliOption, InvocationVector, ToolType};
use colored::Colorize;

/// One row of a tool listing (`list`, `discover`)
#[derive(Debug, Clone)]
pub struct ToolRow {
    pub name: String,
    pub available: bool,
    /// Version, path or failure reason
    pub detail: String,
}

/// Formats askcli results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Human-readable rendering of a capability model
    pub fn format_model(model: &CapabilityModel) -> String {
        let mut output = String::new();

        let kind = match model.tool_type {
            ToolType::Simple => "simple",
            ToolType::WithSubcommands => "with subcommands",
        };
        output.push_str(&format!(
            "{} {} {}\n",
            model.tool_name.cyan().bold(),
            format!("({})", model.command).dimmed(),
            kind.dimmed()
        ));
        if let Some(version) = &model.version {
            output.push_str(&format!("{} {}\n", "Version:".cyan().bold(), version));
        }
        if !model.description.is_empty() {
            output.push_str(&format!("{}\n", model.description));
        }
        if let Some(system_prompt) = &model.system_prompt {
            output.push_str(&format!("{} {}\n", "System prompt:".cyan().bold(), system_prompt));
        }

        output.push_str(&Self::section_header("Prompt"));
        match &model.argument {
            Some(argument) => {
                let required = if argument.required { " (required)" } else { "" };
                output.push_str(&format!(
                    "  {}{}  {}\n",
                    argument.name.yellow().bold(),
                    required,
                    argument.description
                ));
            }
            None => output.push_str(&format!(
                "  {}  {}\n",
                model.prompt_key().yellow().bold(),
                "(no positional argument parsed)".dimmed()
            )),
        }

        if !model.options.is_empty() {
            output.push_str(&Self::section_header("Options"));
            let width = model
                .options
                .iter()
                .map(|o| Self::flag_column(o).chars().count())
                .max()
                .unwrap_or(0);
            for option in &model.options {
                output.push_str(&Self::format_option(option, width));
            }
        }

        if !model.subcommands.is_empty() {
            output.push_str(&Self::section_header("Subcommands"));
            for sub in &model.subcommands {
                output.push_str(&format!("  {}  {}\n", sub.name.yellow(), sub.description));
            }
        }

        output
    }

    /// Pretty JSON rendering of a capability model
    pub fn format_model_json(model: &CapabilityModel) -> String {
        serde_json::to_string_pretty(model).unwrap_or_else(|_| "{}".to_string())
    }

    /// Shell-quoted command line: `<command> <args...>`
    pub fn format_command_line(command: &str, vector: &InvocationVector) -> String {
        if vector.is_empty() {
            command.to_string()
        } else {
            format!("{} {}", command, vector)
        }
    }

    pub fn format_rows(title: &str, rows: &[ToolRow]) -> String {
        let mut output = format!("{}\n", title.cyan().bold());
        if rows.is_empty() {
            output.push_str(&format!("  {}\n", "(none)".dimmed()));
            return output;
        }
        let width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
        for row in rows {
            let mark = if row.available {
                "v".green()
            } else {
                "x".red()
            };
            output.push_str(&format!(
                "  {} {:width$}  {}\n",
                mark,
                row.name,
                row.detail.dimmed(),
                width = width
            ));
        }
        output
    }

    fn flag_column(option: &CliOption) -> String {
        let mut column = match &option.short_flag {
            Some(short) => format!("{}, {}", short, option.flag),
            None => format!("    {}", option.flag),
        };
        if option.option_type.takes_value() {
            column.push_str(&format!(" <{}>", option.option_type));
        }
        column
    }

    fn format_option(option: &CliOption, width: usize) -> String {
        let mut line = format!(
            "  {:width$}  {}",
            Self::flag_column(option),
            option.description,
            width = width
        );
        if !option.choices.is_empty() {
            line.push_str(&format!(" {}", format!("[choices: {}]", option.choices.join(", ")).dimmed()));
        }
        if let Some(default) = &option.default_value {
            line.push_str(&format!(" {}", format!("[default: {}]", default).dimmed()));
        }
        if option.required {
            line.push_str(&format!(" {}", "[required]".yellow()));
        }
        if option.deprecated {
            line.push_str(&format!(" {}", "[deprecated]".red()));
        }
        line.push('\n');
        line
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("{}:", title).cyan().bold())
    }
}

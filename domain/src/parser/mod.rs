//! Help-text parser
//!
//! Segments free-form `--help` output into description, positional, option
//! and command sections, and extracts a [`CapabilityModel`] from them.
//!
//! Recognition is pattern based and tolerant: a line that does not match is
//! dropped, never reported. Which patterns apply to option lines is chosen
//! by [`ParserStrategy`]:
//!
//! | Strategy | Option line | Typical source |
//! |----------|-------------|----------------|
//! | `Gnu` | `-m, --model  Model to use [string]` | commander.js, yargs, clap |
//! | `Go` | `-model string` + indented description | Go `flag` package |
//! | `Custom` | caller-supplied regex | anything else |
//!
//! Type, default and choice extraction lives in [`inference`].
//!
//! [`CapabilityModel`]: crate::capability::CapabilityModel

pub mod help_parser;
pub mod inference;
pub mod strategy;

pub use help_parser::{HelpParser, parse_help};
pub use inference::{OptionHints, extract_hints, infer_type, parse_choices, parse_default};
pub use strategy::{ParserStrategy, StrategyError};

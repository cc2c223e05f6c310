//! Line-oriented parsing of `--help` output.
//!
//! Help text is read in three independent passes over the same input:
//!
//! - [`usage`]: the `Usage:` line, tokenized into positional args;
//! - [`commands`]: two-space indented `name  description` rows;
//! - [`options`]: indented flag rows with an optional type word.
//!
//! [`parse_help_text`] runs all three and types the results through the
//! closed tables in `helpwrap_core::mapping`.

pub mod commands;
pub mod options;
pub mod usage;

use std::sync::LazyLock;

use helpwrap_core::mapping::TypeMapper;
use helpwrap_core::{InlineArg, OptionSpec, OrderedMap};
use regex::Regex;
use serde::Serialize;

use crate::error::ExtractError;

/// Regexes shared by the line parsers, compiled once.
pub(crate) struct HelpPatterns {
    pub usage_line: Regex,
    pub usage_token: Regex,
    pub command_row: Regex,
    pub option_row: Regex,
}

pub(crate) static PATTERNS: LazyLock<HelpPatterns> = LazyLock::new(|| HelpPatterns {
    usage_line: Regex::new(r"^Usage:\s*(.*)$").expect("static regex must compile"),
    usage_token: Regex::new(
        r"\[[^\[\]]*(?:\[[^\[\]]*\][^\[\]]*)*\]|\b[A-Z][A-Z0-9_]*(?:-[A-Z0-9_]+)*\b",
    )
    .expect("static regex must compile"),
    command_row: Regex::new(r"^ {2}([a-z][a-z0-9-]*)\*? {2,}(\S.*?)\s*$")
        .expect("static regex must compile"),
    option_row: Regex::new(
        r"^\s+(?:-[a-zA-Z0-9], )?(--[a-z0-9][a-z0-9-]*)(?: ([a-zA-Z][a-zA-Z0-9-]*))?\s{2,}(\S.*?)\s*$",
    )
    .expect("static regex must compile"),
});

/// Everything recovered from one help text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedHelp {
    /// Whether the first non-blank line was a `Usage:` line.
    #[serde(rename = "hasUsage")]
    pub has_usage: bool,
    /// Classified positional args, `Skip` tokens removed.
    #[serde(rename = "inlineArgs")]
    pub inline_args: OrderedMap<InlineArg>,
    /// Subcommand name to description.
    pub commands: OrderedMap<String>,
    /// Typed long flags in help-text order.
    #[serde(rename = "args")]
    pub options: OrderedMap<OptionSpec>,
    /// Wrapped description lines that were dropped.
    #[serde(rename = "droppedContinuations")]
    pub dropped_continuations: usize,
}

impl ParsedHelp {
    /// True when the text produced nothing to build a node from.
    pub fn is_empty(&self) -> bool {
        self.inline_args.is_empty() && self.commands.is_empty() && self.options.is_empty()
    }
}

/// Parses one help text without running anything.
///
/// `command` labels errors, e.g. `docker compose up`.
///
/// # Errors
///
/// Returns [`ExtractError::UnknownInlineArgToken`] or
/// [`ExtractError::UnknownOptionType`] when a token falls outside the closed
/// tables.
///
/// # Examples
///
/// ```
/// use helpwrap_core::mapping::TypeMapper;
/// use helpwrap_discovery::parse_help_text;
///
/// let text = "\nUsage:  docker run [OPTIONS] IMAGE [COMMAND] [ARG...]\n\n\
///             Options:\n  -d, --detach          Run container in background\n";
/// let parsed = parse_help_text("docker run", text, &TypeMapper::default()).unwrap();
/// assert_eq!(parsed.inline_args.keys().collect::<Vec<_>>(), ["IMAGE"]);
/// assert!(parsed.options.contains_key("--detach"));
/// ```
pub fn parse_help_text(
    command: &str,
    text: &str,
    mapper: &TypeMapper,
) -> Result<ParsedHelp, ExtractError> {
    let tokens = usage::usage_tokens(text);
    let has_usage = tokens.is_some();
    let inline_args = usage::classify_tokens(command, &tokens.unwrap_or_default())?;
    let commands = commands::parse_command_table(text);
    let table = options::parse_option_table(text);
    let options = options::type_options(command, &table, mapper)?;

    Ok(ParsedHelp {
        has_usage,
        inline_args,
        commands,
        options,
        dropped_continuations: table.dropped_continuations,
    })
}

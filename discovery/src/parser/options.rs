//! Flag table parsing.

use helpwrap_core::mapping::TypeMapper;
use helpwrap_core::{OptionSpec, OrderedMap};
use serde::Serialize;

use super::PATTERNS;
use crate::error::ExtractError;

/// An untyped flag row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawOption {
    /// Type word after the flag; empty for boolean flags.
    pub raw_type: String,
    pub description: String,
}

/// Result of scanning a help text for flag rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionTable {
    pub entries: OrderedMap<RawOption>,
    /// Indented lines directly following a flag row that were not flags.
    pub dropped_continuations: usize,
}

/// Collects flag rows keyed by long flag. Short aliases are discarded.
pub fn parse_option_table(text: &str) -> OptionTable {
    let mut table = OptionTable::default();
    let mut after_flag = false;

    for line in text.lines() {
        if let Some(caps) = PATTERNS.option_row.captures(line) {
            let raw_type = caps.get(2).map_or("", |m| m.as_str());
            table.entries.insert(
                caps[1].to_string(),
                RawOption {
                    raw_type: raw_type.to_string(),
                    description: caps[3].to_string(),
                },
            );
            after_flag = true;
            continue;
        }

        let continues = after_flag
            && line.starts_with(char::is_whitespace)
            && !line.trim().is_empty()
            && !line.trim_start().starts_with('-')
            && !PATTERNS.command_row.is_match(line);
        if continues {
            table.dropped_continuations += 1;
        } else {
            after_flag = false;
        }
    }
    table
}

/// Types every raw flag through the mapper.
pub fn type_options(
    command: &str,
    table: &OptionTable,
    mapper: &TypeMapper,
) -> Result<OrderedMap<OptionSpec>, ExtractError> {
    let mut options = OrderedMap::new();
    for (flag, raw) in table.entries.iter() {
        let kind = mapper
            .map(&raw.raw_type)
            .map_err(|_| ExtractError::UnknownOptionType {
                command: command.to_string(),
                flag: flag.to_string(),
                token: raw.raw_type.clone(),
            })?;
        options.insert(flag, OptionSpec::new(flag, &raw.description, kind));
    }
    Ok(options)
}

//! `Usage:` line tokenization and inline-arg classification.

use helpwrap_core::mapping::{MappingError, classify_inline_token};
use helpwrap_core::{InlineArg, InlineType, OrderedMap};
use tracing::debug;

use super::PATTERNS;
use crate::error::ExtractError;

/// Extracts positional tokens from the usage line.
///
/// The first non-blank line must start with `Usage:`; otherwise `None` is
/// returned. Tokens are bracket groups (one nesting level) or uppercase
/// words, in left-to-right order.
pub fn usage_tokens(text: &str) -> Option<Vec<String>> {
    let first = text.lines().find(|line| !line.trim().is_empty())?;
    let caps = PATTERNS.usage_line.captures(first.trim_start())?;
    let rest = caps.get(1).map_or("", |m| m.as_str());
    Some(
        PATTERNS
            .usage_token
            .find_iter(rest)
            .map(|m| m.as_str().to_string())
            .collect(),
    )
}

/// Classifies usage tokens into inline args.
///
/// `Skip` tokens are dropped. When two tokens fold to the same parameter
/// name, the earlier entry is removed and the later one appended.
pub fn classify_tokens(
    command: &str,
    tokens: &[String],
) -> Result<OrderedMap<InlineArg>, ExtractError> {
    let mut args = OrderedMap::new();
    for token in tokens {
        let semantic = classify_inline_token(token).map_err(|err| match err {
            MappingError::UnknownInlineArgToken(token) | MappingError::UnknownOptionType(token) => {
                ExtractError::UnknownInlineArgToken {
                    command: command.to_string(),
                    token,
                }
            }
        })?;
        if semantic == InlineType::Skip {
            continue;
        }

        let arg = InlineArg::new(token, semantic);
        let param = arg.param_name.clone();
        args.retain(|existing: &str, prior: &InlineArg| {
            let collides = existing != token.as_str() && prior.param_name == param;
            if collides {
                debug!(command, dropped = existing, kept = %token, "Inline arg name collision");
            }
            !collides
        });
        args.insert(token.clone(), arg);
    }
    Ok(args)
}

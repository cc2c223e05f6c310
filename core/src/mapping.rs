//! Closed vocabulary tables for usage tokens and flag types.
//!
//! Both tables are exact-text matches over the vocabulary the wrapped tool is
//! known to print. Anything outside them is an error: a new token means the
//! tool's vocabulary changed and the table must be extended explicitly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Encoding, InlineType, OptionType, TypeSpec};

/// A raw token fell outside a mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// Usage-line token with no entry in the inline table.
    #[error("unknown inline arg token: {0}")]
    UnknownInlineArgToken(String),
    /// Flag type word with no entry in the type table.
    #[error("unknown option type: {0:?}")]
    UnknownOptionType(String),
}

/// Rendering policy for flags the tool expects to see repeated.
///
/// `Repeated` emits one `--flag=value` per element. `Joined` reproduces the
/// historical comma-joined form (`--flag=a,b`) for callers that depend on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiValuePolicy {
    #[default]
    Repeated,
    Joined,
}

/// Classifies a usage-line token.
///
/// # Examples
///
/// ```
/// use helpwrap_core::{InlineType, mapping::classify_inline_token};
///
/// assert_eq!(classify_inline_token("[OPTIONS]").unwrap(), InlineType::Skip);
/// assert_eq!(classify_inline_token("IMAGE").unwrap(), InlineType::Scalar);
/// assert_eq!(classify_inline_token("[SERVICE...]").unwrap(), InlineType::StringList);
/// assert!(classify_inline_token("WIDGET").is_err());
/// ```
pub fn classify_inline_token(token: &str) -> Result<InlineType, MappingError> {
    let kind = match token {
        "[OPTIONS]" | "OPTIONS" | "COMMAND" | "[COMMAND]" | "[ARG...]" | "[ARGS...]"
        | "[ps OPTIONS]" => InlineType::Skip,
        "[SERVICE...]" | "[SERVICES...]" | "[SERVICES]" | "[NAME|ID...]" | "[CONTAINER...]"
        | "[IMAGE...]" | "[NETWORK...]" | "[VOLUME...]" | "[PLUGIN...]" | "[NODE...]"
        | "[SECRET...]" | "[CONFIG...]" | "[CONTEXT...]" | "[KEY=VALUE...]"
        | "[SERVICE=REPLICAS...]" => InlineType::StringList,
        "IMAGE" | "CONTAINER" | "PATH" | "URL" | "NAME" | "[:TAG|@DIGEST]" | "[:TAG]"
        | "[REPOSITORY[:TAG]]" | "TERM" | "SRC" | "DEST" | "ID" | "[PRIVATE_PORT[/PROTO]]"
        | "NEW" | "SOURCE" | "TARGET" | "SRC_PATH" | "DEST_PATH" | "SOURCE_IMAGE"
        | "TARGET_IMAGE" | "NETWORK" | "VOLUME" | "PLUGIN" | "PLUGIN-DATA-DIR" | "CONTEXT"
        | "NODE" | "SERVICE" | "SECRET" | "CONFIG" | "FILE" | "SERVER" | "[SERVER]"
        | "[SERVICE]" | "[NAME]" | "[VOLUME]" | "PRIVATE_PORT" => InlineType::Scalar,
        _ => return Err(MappingError::UnknownInlineArgToken(token.to_string())),
    };
    Ok(kind)
}

/// Maps flag type words to a semantic type and encoding.
///
/// This is the single place where flag serialization policy is decided.
///
/// # Examples
///
/// ```
/// use helpwrap_core::{Encoding, OptionType};
/// use helpwrap_core::mapping::{MultiValuePolicy, TypeMapper};
///
/// let mapper = TypeMapper::default();
/// let spec = mapper.map("").unwrap();
/// assert_eq!(spec.semantic, OptionType::Bool);
/// assert_eq!(spec.encoding, Encoding::Presence);
///
/// let legacy = TypeMapper::new(MultiValuePolicy::Joined);
/// assert_eq!(legacy.map("stringArray").unwrap().encoding, Encoding::JoinedList);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMapper {
    policy: MultiValuePolicy,
}

impl TypeMapper {
    pub fn new(policy: MultiValuePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MultiValuePolicy {
        self.policy
    }

    pub fn map(&self, raw: &str) -> Result<TypeSpec<OptionType>, MappingError> {
        let repeated = match self.policy {
            MultiValuePolicy::Repeated => Encoding::RepeatedList,
            MultiValuePolicy::Joined => Encoding::JoinedList,
        };
        let spec = match raw {
            "int" | "int64" | "uint" | "uint16" | "uint32" | "uint64" => {
                TypeSpec::new(OptionType::Int, Encoding::Scalar)
            }
            "" | "bool" => TypeSpec::new(OptionType::Bool, Encoding::Presence),
            "string" | "bytes" | "mount" | "network" | "scale" | "stringToString"
            | "ipNetSlice" | "duration" | "pref" | "command" | "gpu-request" | "external-ca"
            | "node-addr" => TypeSpec::new(OptionType::String, Encoding::Scalar),
            "decimal" | "float" => TypeSpec::new(OptionType::Float, Encoding::Scalar),
            "list" => TypeSpec::new(OptionType::StringList, Encoding::JoinedList),
            "ulimit" | "strings" | "stringArray" | "stringSlice" => {
                TypeSpec::new(OptionType::MultiValue, repeated)
            }
            "map" => TypeSpec::new(OptionType::MapEncoded, Encoding::JsonValue),
            "filter" => TypeSpec::new(OptionType::FilterList, repeated),
            _ => return Err(MappingError::UnknownOptionType(raw.to_string())),
        };
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_placeholders_are_skipped() {
        for token in [
            "[OPTIONS]",
            "COMMAND",
            "[COMMAND]",
            "[ARG...]",
            "[ARGS...]",
            "[ps OPTIONS]",
        ] {
            assert_eq!(classify_inline_token(token), Ok(InlineType::Skip), "{token}");
        }
    }

    #[test]
    fn test_inline_table_is_exact_text() {
        // Case and bracket variations are not normalised.
        assert!(classify_inline_token("image").is_err());
        assert!(classify_inline_token("[IMAGE]").is_err());
        assert_eq!(
            classify_inline_token("[WIDGET...]"),
            Err(MappingError::UnknownInlineArgToken("[WIDGET...]".into()))
        );
    }

    #[test]
    fn test_compose_port_and_scale_tokens() {
        assert_eq!(classify_inline_token("PRIVATE_PORT"), Ok(InlineType::Scalar));
        assert_eq!(
            classify_inline_token("[SERVICE=REPLICAS...]"),
            Ok(InlineType::StringList)
        );
    }

    #[test]
    fn test_type_table_covers_scalars() {
        let mapper = TypeMapper::default();
        assert_eq!(mapper.map("uint16").unwrap().semantic, OptionType::Int);
        assert_eq!(mapper.map("uint32").unwrap().semantic, OptionType::Int);
        assert_eq!(mapper.map("decimal").unwrap().semantic, OptionType::Float);
        assert_eq!(mapper.map("bytes").unwrap().semantic, OptionType::String);
        assert_eq!(mapper.map("duration").unwrap().semantic, OptionType::String);
        assert_eq!(mapper.map("bool").unwrap().encoding, Encoding::Presence);
    }

    #[test]
    fn test_list_keeps_joined_encoding() {
        let spec = TypeMapper::default().map("list").unwrap();
        assert_eq!(spec.semantic, OptionType::StringList);
        assert_eq!(spec.encoding, Encoding::JoinedList);
    }

    #[test]
    fn test_repeatable_types_follow_policy() {
        let repeated = TypeMapper::new(MultiValuePolicy::Repeated);
        let joined = TypeMapper::new(MultiValuePolicy::Joined);
        for raw in ["ulimit", "strings", "stringArray", "filter"] {
            assert_eq!(repeated.map(raw).unwrap().encoding, Encoding::RepeatedList);
            assert_eq!(joined.map(raw).unwrap().encoding, Encoding::JoinedList);
        }
        assert_eq!(
            repeated.map("filter").unwrap().semantic,
            OptionType::FilterList
        );
    }

    #[test]
    fn test_map_uses_json_encoding() {
        let spec = TypeMapper::default().map("map").unwrap();
        assert_eq!(spec.semantic, OptionType::MapEncoded);
        assert_eq!(spec.encoding, Encoding::JsonValue);
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        assert_eq!(
            TypeMapper::default().map("widget"),
            Err(MappingError::UnknownOptionType("widget".into()))
        );
    }
}

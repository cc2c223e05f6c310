//! Schema document validation.
//!
//! Validates structural invariants of a [`SchemaDocument`] before it is
//! persisted or handed to the code generator: names must be usable, flags
//! must be long flags, every encoding must be one its semantic type can be
//! rendered with, and groups must not nest beyond two levels.
//!
//! # Examples
//!
//! ```
//! use helpwrap_core::*;
//!
//! let mut doc = SchemaDocument::default();
//! doc.methods.insert("ps", CommandNode::new("List containers"));
//! assert!(validate_document(&doc).is_empty());
//!
//! // Invalid: a bool flag cannot be rendered as a joined list
//! let mut node = CommandNode::new("List containers");
//! node.options.insert(
//!     "--all",
//!     OptionSpec::new("--all", "Show all", TypeSpec::new(OptionType::Bool, Encoding::JoinedList)),
//! );
//! let mut bad = SchemaDocument::default();
//! bad.methods.insert("ps", node);
//! assert!(!validate_document(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::naming;
use crate::ordered::OrderedMap;
use crate::{CommandNode, Encoding, InlineType, OptionType, SchemaDocument};

/// Document validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Command or subcommand name is empty or contains whitespace.
    #[error("invalid command name: {0:?}")]
    InvalidCommandName(String),
    /// Option key does not look like `--long-flag`.
    #[error("invalid long flag format at {command}: {flag}")]
    InvalidLongFlag { command: String, flag: String },
    /// Option key and its `cliName` disagree.
    #[error("flag key {key} does not match cliName {cli_name} at {command}")]
    FlagKeyMismatch {
        command: String,
        key: String,
        cli_name: String,
    },
    /// A `Skip` token was persisted as a parameter.
    #[error("placeholder token {token} persisted at {command}")]
    PersistedSkip { command: String, token: String },
    /// Semantic type cannot be rendered with the recorded encoding.
    #[error("{name} at {command}: {semantic} cannot use {encoding} encoding")]
    EncodingMismatch {
        command: String,
        name: String,
        semantic: String,
        encoding: Encoding,
    },
    /// Parameter name is empty.
    #[error("empty parameter name for {name} at {command}")]
    EmptyParamName { command: String, name: String },
    /// Two parameters of one generated method share a name.
    #[error("duplicate parameter {param} at {command}")]
    DuplicateParam { command: String, param: String },
    /// Two sibling commands fold to the same method name.
    #[error("duplicate method {method} at {command}")]
    DuplicateMethod { command: String, method: String },
    /// A top-level group would be written over the root `mod.rs`.
    #[error("group name {0:?} is reserved for the root module")]
    ReservedGroupName(String),
    /// A subcommand has its own subcommands.
    #[error("group nested too deep at {0}")]
    GroupTooDeep(String),
}

/// Returns `true` if the encoding is a valid rendering of the semantic type.
pub fn option_encoding_allowed(semantic: OptionType, encoding: Encoding) -> bool {
    match semantic {
        OptionType::Int | OptionType::Float | OptionType::String => encoding == Encoding::Scalar,
        OptionType::Bool => encoding == Encoding::Presence,
        OptionType::StringList | OptionType::MultiValue | OptionType::FilterList => {
            matches!(encoding, Encoding::JoinedList | Encoding::RepeatedList)
        }
        OptionType::MapEncoded => encoding == Encoding::JsonValue,
    }
}

fn inline_encoding_allowed(semantic: InlineType, encoding: Encoding) -> bool {
    match semantic {
        InlineType::Scalar => encoding == Encoding::Scalar,
        InlineType::StringList => encoding == Encoding::RepeatedList,
        InlineType::Skip => false,
    }
}

/// Validates a whole schema document and returns every problem found.
pub fn validate_document(doc: &SchemaDocument) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for arg in &doc.args {
        if arg.kind.semantic == InlineType::Skip {
            errors.push(ValidationError::PersistedSkip {
                command: "<root>".to_string(),
                token: arg.cli_name.clone(),
            });
        }
    }

    check_method_names("<root>", &doc.methods, &mut errors);
    for (name, node) in doc.methods.iter() {
        if node.is_group() && naming::method_name(name) == "mod" {
            errors.push(ValidationError::ReservedGroupName(name.to_string()));
        }
        validate_node(name, name, node, 1, &mut errors);
    }

    errors
}

fn check_method_names(
    command: &str,
    commands: &OrderedMap<CommandNode>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for name in commands.keys() {
        let method = naming::method_name(name);
        if !method.is_empty() && !seen.insert(method.clone()) {
            errors.push(ValidationError::DuplicateMethod {
                command: command.to_string(),
                method,
            });
        }
    }
}

/// `name` is the node's own key; `path` labels errors (`compose up`).
fn validate_node(
    name: &str,
    path: &str,
    node: &CommandNode,
    depth: usize,
    errors: &mut Vec<ValidationError>,
) {
    if name.trim().is_empty() || name.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidCommandName(name.to_string()));
    }

    for (token, arg) in node.inline_args.iter() {
        if arg.kind.semantic == InlineType::Skip {
            errors.push(ValidationError::PersistedSkip {
                command: path.to_string(),
                token: token.to_string(),
            });
        } else if !inline_encoding_allowed(arg.kind.semantic, arg.kind.encoding) {
            errors.push(ValidationError::EncodingMismatch {
                command: path.to_string(),
                name: token.to_string(),
                semantic: arg.kind.semantic.to_string(),
                encoding: arg.kind.encoding,
            });
        }
        if arg.param_name.is_empty() {
            errors.push(ValidationError::EmptyParamName {
                command: path.to_string(),
                name: token.to_string(),
            });
        }
    }

    for (flag, spec) in node.options.iter() {
        if !is_long_flag(flag) {
            errors.push(ValidationError::InvalidLongFlag {
                command: path.to_string(),
                flag: flag.to_string(),
            });
        }
        if spec.cli_name != flag {
            errors.push(ValidationError::FlagKeyMismatch {
                command: path.to_string(),
                key: flag.to_string(),
                cli_name: spec.cli_name.clone(),
            });
        }
        if !option_encoding_allowed(spec.kind.semantic, spec.kind.encoding) {
            errors.push(ValidationError::EncodingMismatch {
                command: path.to_string(),
                name: flag.to_string(),
                semantic: spec.kind.semantic.to_string(),
                encoding: spec.kind.encoding,
            });
        }
        if spec.param_name.is_empty() {
            errors.push(ValidationError::EmptyParamName {
                command: path.to_string(),
                name: flag.to_string(),
            });
        }
    }

    let mut seen_params = HashSet::new();
    for param in naming::signature_params(node) {
        if !param.is_empty() && !seen_params.insert(param.clone()) {
            errors.push(ValidationError::DuplicateParam {
                command: path.to_string(),
                param,
            });
        }
    }

    if let Some(children) = &node.children {
        if depth >= 2 {
            errors.push(ValidationError::GroupTooDeep(path.to_string()));
            return;
        }
        check_method_names(path, children, errors);
        for (child_name, child) in children.iter() {
            let child_path = format!("{path} {child_name}");
            validate_node(child_name, &child_path, child, depth + 1, errors);
        }
    }
}

fn is_long_flag(flag: &str) -> bool {
    flag.len() > 2
        && flag.starts_with("--")
        && flag[2..]
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InlineArg, OptionSpec, OrderedMap, TypeSpec};

    fn flag(name: &str, semantic: OptionType, encoding: Encoding) -> OptionSpec {
        OptionSpec::new(name, "", TypeSpec::new(semantic, encoding))
    }

    #[test]
    fn test_valid_group_document() {
        let mut up = CommandNode::new("Create and start containers");
        up.inline_args.insert(
            "[SERVICE...]",
            InlineArg::new("[SERVICE...]", InlineType::StringList),
        );
        up.options.insert(
            "--detach",
            flag("--detach", OptionType::Bool, Encoding::Presence),
        );
        let mut children = OrderedMap::new();
        children.insert("up", up);
        let mut compose = CommandNode::new("Docker Compose");
        compose.children = Some(children);

        let mut doc = SchemaDocument::default();
        doc.methods.insert("compose", compose);
        assert!(validate_document(&doc).is_empty());
    }

    #[test]
    fn test_short_flag_key_rejected() {
        let mut node = CommandNode::new("");
        node.options
            .insert("-q", flag("-q", OptionType::Bool, Encoding::Presence));
        let mut doc = SchemaDocument::default();
        doc.methods.insert("ps", node);

        let errors = validate_document(&doc);
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ValidationError::InvalidLongFlag { .. }))
        );
    }

    #[test]
    fn test_duplicate_param_names_rejected() {
        let mut node = CommandNode::new("");
        node.options.insert(
            "--no-cache",
            flag("--no-cache", OptionType::Bool, Encoding::Presence),
        );
        let mut clash = flag("--no_cache", OptionType::Bool, Encoding::Presence);
        clash.cli_name = "--nocache".to_string();
        clash.param_name = "no_cache".to_string();
        node.options.insert("--nocache", clash);
        let mut doc = SchemaDocument::default();
        doc.methods.insert("build", node);

        let errors = validate_document(&doc);
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateParam {
                command: "build".into(),
                param: "no_cache".into(),
            }]
        );
    }

    #[test]
    fn test_whitespace_in_command_name_rejected() {
        let mut children = OrderedMap::new();
        children.insert("bad child", CommandNode::new(""));
        let mut compose = CommandNode::new("");
        compose.children = Some(children);

        let mut doc = SchemaDocument::default();
        doc.methods.insert("bad name", CommandNode::new(""));
        doc.methods.insert("compose", compose);
        assert_eq!(
            validate_document(&doc),
            vec![
                ValidationError::InvalidCommandName("bad name".into()),
                ValidationError::InvalidCommandName("bad child".into()),
            ]
        );
    }

    #[test]
    fn test_inline_args_take_part_in_duplicate_check() {
        let mut node = CommandNode::new("");
        node.inline_args
            .insert("CONTAINER", InlineArg::new("CONTAINER", InlineType::Scalar));
        node.inline_args.insert(
            "[CONTAINER...]",
            InlineArg::new("[CONTAINER...]", InlineType::StringList),
        );
        let mut doc = SchemaDocument::default();
        doc.methods.insert("logs", node);

        assert_eq!(
            validate_document(&doc),
            vec![ValidationError::DuplicateParam {
                command: "logs".into(),
                param: "container".into(),
            }]
        );
    }

    #[test]
    fn test_suffixed_option_clash_rejected() {
        let mut node = CommandNode::new("");
        node.inline_args
            .insert("CONTAINER", InlineArg::new("CONTAINER", InlineType::Scalar));
        node.options.insert(
            "--container",
            flag("--container", OptionType::String, Encoding::Scalar),
        );
        node.options.insert(
            "--container-flag",
            flag("--container-flag", OptionType::String, Encoding::Scalar),
        );
        let mut doc = SchemaDocument::default();
        doc.methods.insert("logs", node);

        assert_eq!(
            validate_document(&doc),
            vec![ValidationError::DuplicateParam {
                command: "logs".into(),
                param: "container_flag".into(),
            }]
        );
    }

    #[test]
    fn test_group_named_mod_rejected() {
        let mut children = OrderedMap::new();
        children.insert("ls", CommandNode::new(""));
        let mut group = CommandNode::new("");
        group.children = Some(children);

        let mut doc = SchemaDocument::default();
        doc.methods.insert("mod", group);
        assert_eq!(
            validate_document(&doc),
            vec![ValidationError::ReservedGroupName("mod".into())]
        );
    }

    #[test]
    fn test_sibling_methods_must_fold_apart() {
        let mut doc = SchemaDocument::default();
        doc.methods.insert("docker-init", CommandNode::new(""));
        doc.methods.insert("docker_init", CommandNode::new(""));
        assert_eq!(
            validate_document(&doc),
            vec![ValidationError::DuplicateMethod {
                command: "<root>".into(),
                method: "docker_init".into(),
            }]
        );
    }

    #[test]
    fn test_third_level_group_rejected() {
        let mut leaf_children = OrderedMap::new();
        leaf_children.insert("deep", CommandNode::new(""));
        let mut middle = CommandNode::new("");
        middle.children = Some(leaf_children);
        let mut top_children = OrderedMap::new();
        top_children.insert("middle", middle);
        let mut top = CommandNode::new("");
        top.children = Some(top_children);

        let mut doc = SchemaDocument::default();
        doc.methods.insert("top", top);
        assert_eq!(
            validate_document(&doc),
            vec![ValidationError::GroupTooDeep("top middle".into())]
        );
    }

    #[test]
    fn test_persisted_skip_token_rejected() {
        let mut doc = SchemaDocument::default();
        doc.args
            .push(InlineArg::new("[OPTIONS]", InlineType::Skip));
        assert!(matches!(
            validate_document(&doc).as_slice(),
            [ValidationError::PersistedSkip { .. }]
        ));
    }

    #[test]
    fn test_encoding_table() {
        assert!(option_encoding_allowed(OptionType::FilterList, Encoding::RepeatedList));
        assert!(option_encoding_allowed(OptionType::StringList, Encoding::JoinedList));
        assert!(!option_encoding_allowed(OptionType::Int, Encoding::Presence));
        assert!(!option_encoding_allowed(OptionType::MapEncoded, Encoding::Scalar));
    }
}

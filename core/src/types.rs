//! Schema type definitions.
//!
//! This module defines the intermediate representation shared by the
//! extraction pipeline and the code generator. The JSON shape produced by
//! these types is the contract between the two stages:
//!
//! ```text
//! {
//!   "args": [ InlineArg... ],
//!   "methods": {
//!     "<command>": {
//!       "description": "...",
//!       "args": { "<flag>": OptionSpec },
//!       "inlineArgs": { "<token>": InlineArg },
//!       "methods": { "<subcommand>": { ... } }
//!     }
//!   }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::naming;
use crate::ordered::OrderedMap;

/// How a positional token from a usage line is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InlineType {
    /// Placeholder such as `[OPTIONS]`; never becomes a parameter.
    Skip,
    /// Trailing `...` token; accepts any number of values.
    StringList,
    /// Single string value.
    Scalar,
}

/// Semantic value type of a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Int,
    Bool,
    Float,
    String,
    StringList,
    /// Key/value map rendered as one JSON-encoded value.
    MapEncoded,
    /// Repeated flag, one occurrence per element.
    MultiValue,
    /// Repeated `flag=key=value` occurrences.
    FilterList,
}

/// Rule used to render a typed value back into command-line syntax.
///
/// # Examples
///
/// ```
/// use helpwrap_core::Encoding;
///
/// let json = serde_json::to_string(&Encoding::JoinedList).unwrap();
/// assert_eq!(json, "\"joinedList\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Encoding {
    /// `--flag=value`
    Scalar,
    /// Bare `--flag` when the value is true.
    Presence,
    /// One `--flag=v1,v2,...` occurrence.
    JoinedList,
    /// One `--flag=vi` occurrence per element.
    RepeatedList,
    /// `--flag=<json>`
    JsonValue,
}

impl fmt::Display for InlineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{self:?}"))
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{self:?}"))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Scalar => "scalar",
            Self::Presence => "presence",
            Self::JoinedList => "joinedList",
            Self::RepeatedList => "repeatedList",
            Self::JsonValue => "jsonValue",
        };
        f.pad(label)
    }
}

/// Semantic type paired with the encoding used to render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpec<S> {
    pub semantic: S,
    pub encoding: Encoding,
}

impl<S> TypeSpec<S> {
    pub fn new(semantic: S, encoding: Encoding) -> Self {
        Self { semantic, encoding }
    }
}

/// A positional token extracted from a usage line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineArg {
    pub description: String,
    /// The literal token as it appeared, e.g. `[SERVICE...]`.
    pub cli_name: String,
    pub param_name: String,
    #[serde(rename = "type")]
    pub kind: TypeSpec<InlineType>,
}

impl InlineArg {
    /// Builds an inline arg for a classified token.
    ///
    /// # Examples
    ///
    /// ```
    /// use helpwrap_core::{InlineArg, InlineType};
    ///
    /// let arg = InlineArg::new("[NAME|ID...]", InlineType::StringList);
    /// assert_eq!(arg.param_name, "name_id");
    /// assert_eq!(arg.cli_name, "[NAME|ID...]");
    /// ```
    pub fn new(token: &str, semantic: InlineType) -> Self {
        let encoding = match semantic {
            InlineType::StringList => Encoding::RepeatedList,
            InlineType::Scalar | InlineType::Skip => Encoding::Scalar,
        };
        Self {
            description: token.to_string(),
            cli_name: token.to_string(),
            param_name: naming::param_name_for_token(token),
            kind: TypeSpec::new(semantic, encoding),
        }
    }
}

/// A named long flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionSpec {
    pub description: String,
    /// The long flag as passed on the command line, e.g. `--build-arg`.
    pub cli_name: String,
    pub param_name: String,
    #[serde(rename = "type")]
    pub kind: TypeSpec<OptionType>,
}

impl OptionSpec {
    /// Builds an option spec for a long flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use helpwrap_core::{Encoding, OptionSpec, OptionType, TypeSpec};
    ///
    /// let spec = OptionSpec::new(
    ///     "--build-arg",
    ///     "Set build-time variables",
    ///     TypeSpec::new(OptionType::MultiValue, Encoding::RepeatedList),
    /// );
    /// assert_eq!(spec.param_name, "build_arg");
    /// ```
    pub fn new(cli_name: &str, description: &str, kind: TypeSpec<OptionType>) -> Self {
        Self {
            description: description.to_string(),
            cli_name: cli_name.to_string(),
            param_name: naming::param_name_for_flag(cli_name),
            kind,
        }
    }
}

/// One command or subcommand. Its name is the key it is stored under.
///
/// A node is either a group (it has `children`) or a leaf.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandNode {
    pub description: String,
    #[serde(rename = "args", default)]
    pub options: OrderedMap<OptionSpec>,
    #[serde(rename = "inlineArgs", default)]
    pub inline_args: OrderedMap<InlineArg>,
    #[serde(rename = "methods", default, skip_serializing_if = "Option::is_none")]
    pub children: Option<OrderedMap<CommandNode>>,
}

impl CommandNode {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    /// Returns `true` when this node dispatches to subcommands.
    pub fn is_group(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    /// Iterates subcommands; empty for leaves.
    pub fn subcommands(&self) -> impl Iterator<Item = (&str, &CommandNode)> {
        self.children.iter().flat_map(|children| children.iter())
    }
}

/// Root of the persisted schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Inline args of the root tool itself.
    #[serde(default)]
    pub args: Vec<InlineArg>,
    /// Top-level commands.
    #[serde(default)]
    pub methods: OrderedMap<CommandNode>,
}

impl SchemaDocument {
    /// Finds a node by command path (`["compose", "up"]`).
    ///
    /// # Examples
    ///
    /// ```
    /// use helpwrap_core::{CommandNode, OrderedMap, SchemaDocument};
    ///
    /// let mut compose = CommandNode::new("Docker Compose");
    /// let mut children = OrderedMap::new();
    /// children.insert("up", CommandNode::new("Create and start containers"));
    /// compose.children = Some(children);
    ///
    /// let mut doc = SchemaDocument::default();
    /// doc.methods.insert("compose", compose);
    ///
    /// assert!(doc.find(&["compose", "up"]).is_some());
    /// assert!(doc.find(&["compose", "down"]).is_none());
    /// ```
    pub fn find(&self, path: &[&str]) -> Option<&CommandNode> {
        let (first, rest) = path.split_first()?;
        let mut node = self.methods.get(first)?;
        for name in rest {
            node = node.children.as_ref()?.get(name)?;
        }
        Some(node)
    }

    /// Serializes the document as pretty JSON with a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut raw = serde_json::to_string_pretty(self)?;
        raw.push('\n');
        Ok(raw)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

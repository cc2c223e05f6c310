//! Core schema types and shared primitives for help-text driven wrappers.
//!
//! This crate defines the intermediate representation that sits between the
//! extraction pipeline (`helpwrap-discovery`) and the code generator
//! (`helpwrap-codegen`):
//!
//! - [`SchemaDocument`]: root of the persisted schema: the tool's own inline
//!   args plus its top-level commands.
//! - [`CommandNode`]: a command or subcommand with options, inline args and
//!   (for groups) children.
//! - [`OptionSpec`] / [`InlineArg`]: a flag or a positional token with its
//!   semantic type and [`Encoding`].
//! - [`OrderedMap`]: the insertion-ordered map every schema map uses.
//!
//! The closed vocabulary tables live in [`mapping`], naming rules in
//! [`naming`], and [`runtime`] provides the `CommandLine`/`Runner` pair that
//! generated code links against.
//!
//! # Example
//!
//! ```
//! use helpwrap_core::*;
//!
//! let mapper = mapping::TypeMapper::default();
//! let mut run = CommandNode::new("Create and run a new container from an image");
//! run.inline_args.insert("IMAGE", InlineArg::new("IMAGE", InlineType::Scalar));
//! run.options.insert(
//!     "--detach",
//!     OptionSpec::new("--detach", "Run container in background", mapper.map("").unwrap()),
//! );
//!
//! let mut doc = SchemaDocument::default();
//! doc.methods.insert("run", run);
//!
//! assert!(validate_document(&doc).is_empty());
//! assert_eq!(doc.find(&["run"]).unwrap().options.len(), 1);
//! ```

mod config;
pub mod mapping;
pub mod naming;
mod ordered;
pub mod runtime;
mod types;
mod validate;

pub use config::{
    ConfigError, DEFAULT_TIMEOUT_MS, ExtractionConfig, GenerationConfig, HelpwrapConfig,
};
pub use mapping::{MappingError, MultiValuePolicy, TypeMapper};
pub use ordered::OrderedMap;
pub use types::*;
pub use validate::{ValidationError, option_encoding_allowed, validate_document};

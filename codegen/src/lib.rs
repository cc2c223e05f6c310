//! Schema-driven generation of typed command wrappers.
//!
//! The generator reads a [`SchemaDocument`] and emits Rust source: a root
//! module (`mod.rs`) with one method per top-level command, and one module
//! per group command holding its subcommands. Generated code depends only on
//! the runtime module named in [`GenerateOptions::runtime_path`].
//!
//! # Example
//!
//! ```
//! use helpwrap_codegen::{GenerateOptions, generate};
//! use helpwrap_core::{CommandNode, SchemaDocument};
//!
//! let mut doc = SchemaDocument::default();
//! doc.methods.insert("ps", CommandNode::new("List containers"));
//!
//! let files = generate(&doc, &GenerateOptions::default())?;
//! assert_eq!(files.len(), 1);
//! assert!(files[0].contents.contains("pub fn ps(&self) -> R::Handle"));
//! # Ok::<(), helpwrap_codegen::GenerateError>(())
//! ```

mod emit;
mod ident;

use std::path::{Path, PathBuf};

use helpwrap_core::{HelpwrapConfig, SchemaDocument, ValidationError, validate_document};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading a schema or writing generated code.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The schema file could not be read.
    #[error("failed to read schema {path}: {source}")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not a valid schema document.
    #[error("failed to parse schema {path}: {source}")]
    SchemaParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document violates a schema invariant.
    #[error("invalid schema: {}", join_errors(.0))]
    InvalidSchema(Vec<ValidationError>),

    /// Writing an output file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Naming inputs for the generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Program the generated command lines start with.
    pub program: String,
    /// Root struct name; group structs are prefixed with it.
    pub root_type: String,
    /// Module path providing `CommandLine` and `Runner`.
    pub runtime_path: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            program: "docker".to_string(),
            root_type: "Docker".to_string(),
            runtime_path: "helpwrap_core::runtime".to_string(),
        }
    }
}

impl GenerateOptions {
    pub fn from_config(config: &HelpwrapConfig) -> Self {
        Self {
            program: config.binary.clone(),
            root_type: config.root_type(),
            runtime_path: config.runtime_path(),
        }
    }
}

/// One emitted source file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Reads, parses and validates a schema document.
pub fn load_schema(path: &Path) -> Result<SchemaDocument, GenerateError> {
    let raw = std::fs::read_to_string(path).map_err(|source| GenerateError::SchemaRead {
        path: path.to_path_buf(),
        source,
    })?;
    let document =
        SchemaDocument::from_json(&raw).map_err(|source| GenerateError::SchemaParse {
            path: path.to_path_buf(),
            source,
        })?;
    let errors = validate_document(&document);
    if !errors.is_empty() {
        return Err(GenerateError::InvalidSchema(errors));
    }
    debug!(path = %path.display(), commands = document.methods.len(), "Loaded schema");
    Ok(document)
}

/// Generates `mod.rs` plus one module per group, in document order.
///
/// # Errors
///
/// Returns [`GenerateError::InvalidSchema`] if the document fails validation.
pub fn generate(
    document: &SchemaDocument,
    options: &GenerateOptions,
) -> Result<Vec<GeneratedFile>, GenerateError> {
    let errors = validate_document(document);
    if !errors.is_empty() {
        return Err(GenerateError::InvalidSchema(errors));
    }

    let mut files = vec![GeneratedFile {
        path: PathBuf::from("mod.rs"),
        contents: emit::emit_root(document, options),
    }];
    for (name, node) in document.methods.iter().filter(|(_, node)| node.is_group()) {
        debug!(group = name, subcommands = node.subcommands().count(), "Emitting group module");
        files.push(GeneratedFile {
            path: PathBuf::from(emit::module_file(name)),
            contents: emit::emit_group(name, node, options),
        });
    }
    Ok(files)
}

/// Writes generated files under `dir`, replacing existing ones.
pub fn write_files(dir: &Path, files: &[GeneratedFile]) -> Result<(), GenerateError> {
    std::fs::create_dir_all(dir).map_err(|source| GenerateError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    for file in files {
        let path = dir.join(&file.path);
        std::fs::write(&path, &file.contents).map_err(|source| GenerateError::Io {
            path: path.clone(),
            source,
        })?;
    }
    info!(dir = %dir.display(), files = files.len(), "Wrote generated modules");
    Ok(())
}

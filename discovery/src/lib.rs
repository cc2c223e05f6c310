//! Help-text scraping and schema extraction.
//!
//! This crate turns the `--help` output of a hierarchical CLI into a
//! [`SchemaDocument`]. It has two entry points:
//!
//! - [`parse_help_text`] parses one pre-captured help text without running
//!   anything.
//! - [`SchemaBuilder`] walks a whole command tree through a [`HelpSource`]
//!   (normally a [`ProcessScraper`]) and returns a validated document.
//!
//! # Example
//!
//! ```
//! use helpwrap_discovery::{ExtractError, HelpSource, SchemaBuilder, ScrapeError};
//!
//! struct Canned;
//!
//! impl HelpSource for Canned {
//!     fn help(&self, path: &[String]) -> Result<String, ScrapeError> {
//!         Ok(match path {
//!             [] => "\nUsage:  tool [OPTIONS] COMMAND\n\nCommands:\n  ps    List containers\n",
//!             _ => "\nUsage:  tool ps [OPTIONS]\n\nOptions:\n  -q, --quiet   Only display IDs\n",
//!         }
//!         .to_string())
//!     }
//!
//!     fn program(&self) -> &str {
//!         "tool"
//!     }
//! }
//!
//! let run = SchemaBuilder::new(&Canned).build()?;
//! assert!(run.document.find(&["ps"]).unwrap().options.contains_key("--quiet"));
//! # Ok::<(), ExtractError>(())
//! ```
//!
//! [`SchemaDocument`]: helpwrap_core::SchemaDocument

pub mod builder;
pub mod error;
pub mod parser;
pub mod report;
pub mod scraper;

use std::path::Path;

use helpwrap_core::SchemaDocument;
use tracing::info;

pub use builder::{ExtractionRun, SchemaBuilder};
pub use error::{ExtractError, ScrapeError};
pub use parser::{ParsedHelp, parse_help_text};
pub use report::{ExtractionWarning, WarningKind};
pub use scraper::{HelpSource, ProcessScraper};

/// Writes the document as pretty JSON, replacing any previous file.
///
/// Missing parent directories are created.
pub fn write_document(document: &SchemaDocument, path: &Path) -> Result<(), ExtractError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, document.to_json()?)?;
    info!(path = %path.display(), commands = document.methods.len(), "Wrote schema document");
    Ok(())
}

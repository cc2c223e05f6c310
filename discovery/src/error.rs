//! Error types for help scraping and schema extraction.
//!
//! Every variant names the command line it was raised for, so a failed run
//! tells the user which `--help` invocation and which token stopped it.

use std::io;
use std::process::ExitStatus;

use helpwrap_core::ValidationError;
use thiserror::Error;

/// Failure of one `--help` invocation.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The binary could not be started (missing, not executable).
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The process ran but exited unsuccessfully.
    #[error("`{command}` exited with {status}: {stderr}")]
    Exited {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The process did not finish within the configured timeout.
    #[error("`{command}` timed out after {timeout_ms} ms")]
    TimedOut { command: String, timeout_ms: u64 },

    /// Waiting on the child process failed.
    #[error("failed to wait for `{command}`: {source}")]
    Wait {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Errors that abort an extraction run.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A help invocation failed.
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// A usage-line token is missing from the inline table.
    #[error("unknown inline arg token {token} in usage line of `{command}`")]
    UnknownInlineArgToken { command: String, token: String },

    /// A flag type word is missing from the type table.
    #[error("unknown option type {token:?} for {flag} of `{command}`")]
    UnknownOptionType {
        command: String,
        flag: String,
        token: String,
    },

    /// Help text did not have the expected shape (strict mode only).
    #[error("malformed help text for `{command}`: {reason}")]
    MalformedHelpText { command: String, reason: String },

    /// The assembled document violates a schema invariant.
    #[error("schema validation failed: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),

    /// The worker pool for concurrent scrapes could not be created.
    #[error("failed to build scrape worker pool: {0}")]
    ThreadPool(String),

    /// Filesystem I/O failure while persisting the document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

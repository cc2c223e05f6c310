//! Structured warnings collected during one extraction run.

use serde::{Deserialize, Serialize};

/// Category of a non-fatal extraction problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Help text had no `Usage:` line as its first non-blank line.
    MissingUsage,
    /// Help text yielded no options, commands or inline args.
    EmptyHelp,
    /// Wrapped option description lines were dropped.
    DroppedContinuation,
    /// A subcommand lists its own subcommands; they were not scraped.
    DepthLimit,
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingUsage => write!(f, "missing_usage"),
            Self::EmptyHelp => write!(f, "empty_help"),
            Self::DroppedContinuation => write!(f, "dropped_continuation"),
            Self::DepthLimit => write!(f, "depth_limit"),
        }
    }
}

/// One warning, tied to the command line whose help produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionWarning {
    pub command: String,
    pub kind: WarningKind,
    pub detail: String,
}

impl ExtractionWarning {
    pub fn new(command: impl Into<String>, kind: WarningKind, detail: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            kind,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ExtractionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.command, self.kind, self.detail)
    }
}

/// Counts warnings per kind, in first-seen order.
pub fn summarize(warnings: &[ExtractionWarning]) -> Vec<(WarningKind, usize)> {
    let mut counts: Vec<(WarningKind, usize)> = Vec::new();
    for warning in warnings {
        match counts.iter_mut().find(|(kind, _)| *kind == warning.kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((warning.kind, 1)),
        }
    }
    counts
}

//! Schema assembly.
//!
//! Walks the command tree through a [`HelpSource`]: the root help, then each
//! top-level command, then each subcommand of a group. Subcommands of
//! subcommands are never scraped. Sibling scrapes can fan out on a rayon
//! pool; results are reassembled in help-text order so a parallel run
//! serializes byte-identically to a sequential one.

use std::time::Instant;

use helpwrap_core::mapping::TypeMapper;
use helpwrap_core::{CommandNode, ExtractionConfig, OrderedMap, SchemaDocument, validate_document};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::ExtractError;
use crate::parser::{ParsedHelp, parse_help_text};
use crate::report::{ExtractionWarning, WarningKind};
use crate::scraper::HelpSource;

/// A validated document plus the non-fatal problems met while building it.
#[derive(Debug, Clone)]
pub struct ExtractionRun {
    pub document: SchemaDocument,
    pub warnings: Vec<ExtractionWarning>,
}

type Built = (String, CommandNode, Vec<ExtractionWarning>);

/// Drives scraping and parsing for a whole command tree.
pub struct SchemaBuilder<'a, S: HelpSource> {
    source: &'a S,
    mapper: TypeMapper,
    jobs: usize,
    strict: bool,
}

impl<'a, S: HelpSource> SchemaBuilder<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            mapper: TypeMapper::default(),
            jobs: 1,
            strict: false,
        }
    }

    /// Applies `jobs`, `strict` and the multi-value policy from configuration.
    pub fn from_config(source: &'a S, config: &ExtractionConfig) -> Self {
        Self::new(source)
            .with_mapper(TypeMapper::new(config.multi_value))
            .with_jobs(config.jobs)
            .with_strict(config.strict)
    }

    pub fn with_mapper(mut self, mapper: TypeMapper) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Makes malformed help text fatal instead of a warning.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builds and validates the schema document.
    ///
    /// # Errors
    ///
    /// Any scrape failure, unknown token, strict-mode malformed help text or
    /// validation failure aborts the whole run.
    pub fn build(&self) -> Result<ExtractionRun, ExtractError> {
        let started = Instant::now();
        let run = if self.jobs > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()
                .map_err(|e| ExtractError::ThreadPool(e.to_string()))?;
            pool.install(|| self.assemble())?
        } else {
            self.assemble()?
        };

        info!(
            program = self.source.program(),
            commands = run.document.methods.len(),
            warnings = run.warnings.len(),
            jobs = self.jobs,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Extraction complete"
        );
        Ok(run)
    }

    fn assemble(&self) -> Result<ExtractionRun, ExtractError> {
        let mut warnings = Vec::new();
        let root = self.scrape(&[], &mut warnings)?;

        let entries: Vec<(String, String)> = root.commands.into_iter().collect();
        let built = self.map_ordered(entries, |(name, description)| {
            self.build_top(name, description)
        })?;

        let mut document = SchemaDocument {
            args: root.inline_args.into_iter().map(|(_, arg)| arg).collect(),
            methods: OrderedMap::new(),
        };
        for (name, node, node_warnings) in built {
            document.methods.insert(name, node);
            warnings.extend(node_warnings);
        }

        let errors = validate_document(&document);
        if !errors.is_empty() {
            return Err(ExtractError::Invalid(errors));
        }
        Ok(ExtractionRun { document, warnings })
    }

    fn build_top(&self, name: String, description: String) -> Result<Built, ExtractError> {
        let mut warnings = Vec::new();
        let parsed = self.scrape(std::slice::from_ref(&name), &mut warnings)?;
        let mut node = CommandNode {
            description,
            options: parsed.options,
            inline_args: parsed.inline_args,
            children: None,
        };

        if !parsed.commands.is_empty() {
            let entries: Vec<(String, String)> = parsed.commands.into_iter().collect();
            let built = self.map_ordered(entries, |(sub, description)| {
                self.build_sub(&name, sub, description)
            })?;
            let mut children = OrderedMap::new();
            for (sub, child, child_warnings) in built {
                children.insert(sub, child);
                warnings.extend(child_warnings);
            }
            node.children = Some(children);
        }
        Ok((name, node, warnings))
    }

    fn build_sub(&self, parent: &str, name: String, description: String) -> Result<Built, ExtractError> {
        let mut warnings = Vec::new();
        let path = [parent.to_string(), name.clone()];
        let parsed = self.scrape(&path, &mut warnings)?;

        if !parsed.commands.is_empty() {
            let label = self.label(&path);
            debug!(command = %label, nested = parsed.commands.len(), "Not descending past depth 2");
            warnings.push(ExtractionWarning::new(
                label,
                WarningKind::DepthLimit,
                format!("{} nested subcommands not scraped", parsed.commands.len()),
            ));
        }

        let node = CommandNode {
            description,
            options: parsed.options,
            inline_args: parsed.inline_args,
            children: None,
        };
        Ok((name, node, warnings))
    }

    fn scrape(
        &self,
        path: &[String],
        warnings: &mut Vec<ExtractionWarning>,
    ) -> Result<ParsedHelp, ExtractError> {
        let label = self.label(path);
        let text = self.source.help(path)?;
        let parsed = parse_help_text(&label, &text, &self.mapper)?;
        debug!(
            command = %label,
            options = parsed.options.len(),
            inline_args = parsed.inline_args.len(),
            commands = parsed.commands.len(),
            "Parsed help"
        );

        if !parsed.has_usage {
            self.degrade(
                &label,
                WarningKind::MissingUsage,
                "first non-blank line is not a Usage: line",
                warnings,
            )?;
        }
        if parsed.is_empty() {
            self.degrade(
                &label,
                WarningKind::EmptyHelp,
                "no options, commands or inline args found",
                warnings,
            )?;
        }
        if parsed.dropped_continuations > 0 {
            warnings.push(ExtractionWarning::new(
                label,
                WarningKind::DroppedContinuation,
                format!(
                    "{} wrapped description lines dropped",
                    parsed.dropped_continuations
                ),
            ));
        }
        Ok(parsed)
    }

    fn degrade(
        &self,
        label: &str,
        kind: WarningKind,
        reason: &str,
        warnings: &mut Vec<ExtractionWarning>,
    ) -> Result<(), ExtractError> {
        if self.strict {
            return Err(ExtractError::MalformedHelpText {
                command: label.to_string(),
                reason: reason.to_string(),
            });
        }
        warn!(command = %label, %kind, "{reason}");
        warnings.push(ExtractionWarning::new(label, kind, reason));
        Ok(())
    }

    fn map_ordered<T, F>(&self, items: Vec<T>, f: F) -> Result<Vec<Built>, ExtractError>
    where
        T: Send,
        F: Fn(T) -> Result<Built, ExtractError> + Sync + Send,
    {
        if self.jobs > 1 {
            items.into_par_iter().map(f).collect()
        } else {
            items.into_iter().map(f).collect()
        }
    }

    fn label(&self, path: &[String]) -> String {
        let mut parts = vec![self.source.program()];
        parts.extend(path.iter().map(String::as_str));
        parts.join(" ")
    }
}

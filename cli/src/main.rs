use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use helpwrap_codegen::{GenerateOptions, generate, load_schema, write_files};
use helpwrap_core::HelpwrapConfig;
use helpwrap_core::mapping::TypeMapper;
use helpwrap_discovery::report::summarize;
use helpwrap_discovery::{ProcessScraper, SchemaBuilder, parse_help_text, write_document};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "helpwrap", version)]
#[command(about = "Scrape CLI help output into a schema and generate typed wrappers")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scrape the tool's help output recursively and write the schema document.
    Metadata(MetadataArgs),
    /// Generate wrapper modules from a schema document.
    Classes(ClassesArgs),
    /// Parse one captured help text without executing anything.
    ParseFile(ParseFileArgs),
}

#[derive(Debug, Args)]
struct MetadataArgs {
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Executable to scrape.
    #[arg(long)]
    binary: Option<String>,
    /// Output path for the schema document.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Number of sibling scrapes run concurrently.
    #[arg(long)]
    jobs: Option<usize>,
    /// Timeout for one help invocation, in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Fail on help text without a usage line or without any entries.
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Args)]
struct ClassesArgs {
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Program the generated wrappers invoke.
    #[arg(long)]
    binary: Option<String>,
    /// Schema document to generate from.
    #[arg(long)]
    schema: Option<PathBuf>,
    /// Directory receiving the generated modules.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ParseFileArgs {
    /// Command path the help text belongs to (e.g. "docker compose up").
    #[arg(long)]
    command: String,
    /// File holding the captured help text.
    #[arg(long)]
    input: PathBuf,
    /// YAML configuration file (for the multi-value policy).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Metadata(args) => run_metadata(args),
        Command::Classes(args) => run_classes(args),
        Command::ParseFile(args) => run_parse_file(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<HelpwrapConfig, String> {
    match path {
        Some(path) => HelpwrapConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display())),
        None => Ok(HelpwrapConfig::default()),
    }
}

fn run_metadata(args: MetadataArgs) -> Result<(), String> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(binary) = args.binary {
        config.binary = binary;
    }
    if let Some(output) = args.output {
        config.schema_path = output;
    }
    if let Some(jobs) = args.jobs {
        config.extraction.jobs = jobs;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.extraction.timeout_ms = timeout_ms;
    }
    if args.strict {
        config.extraction.strict = true;
    }
    config.check().map_err(|err| err.to_string())?;

    let scraper = ProcessScraper::new(config.binary.clone())
        .with_timeout(Duration::from_millis(config.extraction.timeout_ms));
    let run = SchemaBuilder::from_config(&scraper, &config.extraction)
        .build()
        .map_err(|err| err.to_string())?;
    write_document(&run.document, &config.schema_path).map_err(|err| err.to_string())?;

    eprintln!(
        "Wrote {} commands to {}",
        run.document.methods.len(),
        config.schema_path.display()
    );
    if !run.warnings.is_empty() {
        eprintln!("\nWarnings:");
        for (kind, count) in summarize(&run.warnings) {
            eprintln!("  {kind}: {count}");
        }
        for warning in &run.warnings {
            tracing::debug!(%warning, "Extraction warning");
        }
    }
    Ok(())
}

fn run_classes(args: ClassesArgs) -> Result<(), String> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(binary) = args.binary {
        config.binary = binary;
    }
    if let Some(schema) = args.schema {
        config.schema_path = schema;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    config.check().map_err(|err| err.to_string())?;

    let document = load_schema(&config.schema_path).map_err(|err| err.to_string())?;
    let files = generate(&document, &GenerateOptions::from_config(&config))
        .map_err(|err| err.to_string())?;
    write_files(&config.output_dir, &files).map_err(|err| err.to_string())?;

    eprintln!(
        "Generated {} files in {}",
        files.len(),
        config.output_dir.display()
    );
    Ok(())
}

fn run_parse_file(args: ParseFileArgs) -> Result<(), String> {
    let config = load_config(args.config.as_deref())?;
    let help_text = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;

    let mapper = TypeMapper::new(config.extraction.multi_value);
    let parsed =
        parse_help_text(&args.command, &help_text, &mapper).map_err(|err| err.to_string())?;
    let json = serde_json::to_string_pretty(&parsed)
        .map_err(|err| format!("JSON serialization failed: {err}"))?;
    println!("{json}");
    Ok(())
}

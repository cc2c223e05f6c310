//! Offline help text parsing example.
//!
//! Parses a captured `docker compose up --help` page and prints the typed
//! inline args and options without running docker.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p helpwrap-discovery --example parse_help
//! ```

use helpwrap_core::mapping::TypeMapper;
use helpwrap_discovery::parse_help_text;

fn main() {
    let help_text = r#"
Usage:  docker compose up [OPTIONS] [SERVICE...]

Create and start containers

Options:
      --build                    Build images before starting containers
  -d, --detach                   Detached mode: Run containers in the background
      --pull string              Pull image before running
                                 ("always"|"missing"|"never")
  -t, --timeout int              Use this timeout in seconds for container shutdown
"#;

    let parsed = match parse_help_text("docker compose up", help_text, &TypeMapper::default()) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("Parsing failed: {err}");
            std::process::exit(1);
        }
    };

    println!("Inline args:");
    for arg in parsed.inline_args.values() {
        println!(
            "  {:<16} {} ({})",
            arg.cli_name, arg.kind.semantic, arg.kind.encoding
        );
    }

    println!("\nOptions:");
    for option in parsed.options.values() {
        println!(
            "  {:<16} {:<8} {:<12} {}",
            option.cli_name, option.kind.semantic, option.kind.encoding, option.description
        );
    }

    if parsed.dropped_continuations > 0 {
        println!(
            "\n{} wrapped description line(s) were dropped",
            parsed.dropped_continuations
        );
    }
}

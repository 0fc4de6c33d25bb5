//! # goctl-validate entry point
//!
//! Parses arguments, sets up tracing on stderr and runs one generation.
//! stdout carries only the summary (or the `--dump-schema` JSON).

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use apival_cli::generate::{normalize_go_style_flags, run_generate, GenerateArgs};

/// Generate Validate() methods for go-zero request types.
///
/// Scans the .api file and its imports for struct fields with validate
/// tags and writes internal/types/validate.go. With --translator it also
/// writes translator.go and, once, translator_custom.go.
#[derive(Parser, Debug)]
#[command(name = "goctl-validate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    generate: GenerateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_go_style_flags(std::env::args_os()));

    // RUST_LOG wins over -v.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "goctl-validate starting");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    match run_generate(&cli.generate, stdin.lock(), stdout.lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

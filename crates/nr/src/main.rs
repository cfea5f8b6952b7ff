//! nr CLI - Notion code block renderer.
//!
//! Provides commands for:
//! - `render`: Render a code block to HTML
//! - `copy`: Copy a code block's content to the system clipboard
//! - `languages`: List registered language keys

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CopyArgs, LanguagesArgs, RenderArgs};
use output::Output;

/// nr - Notion code block renderer.
#[derive(Parser)]
#[command(name = "nr", version, about)]
struct Cli {
    /// Enable verbose output (grammar registration and copy logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a code block to HTML.
    Render(RenderArgs),
    /// Copy a code block's content to the clipboard.
    Copy(CopyArgs),
    /// List registered language keys.
    Languages(LanguagesArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Copy(args) => args.execute(),
        Commands::Languages(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

//! docindex CLI - documentation page index.
//!
//! Provides commands for:
//! - `check`: Validate a page index and lint its redirects
//! - `resolve`: Resolve a URL path the way the router does
//! - `menu`: Print the flattened menu or the navigation tree
//! - `export`: Serialize the loaded index as JSON or YAML

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ExportArgs, MenuArgs, ResolveArgs};
use output::Output;

/// docindex - documentation page index.
#[derive(Parser)]
#[command(name = "docindex", version, about)]
struct Cli {
    /// Enable verbose output (load summary and redirect hops).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the page index and lint its redirects.
    Check(CheckArgs),
    /// Resolve a path, following redirects.
    Resolve(ResolveArgs),
    /// Print the menu.
    Menu(MenuArgs),
    /// Serialize the page index.
    Export(ExportArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(&output),
        Commands::Resolve(args) => args.execute(&output),
        Commands::Menu(args) => args.execute(&output),
        Commands::Export(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

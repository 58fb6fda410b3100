//! # ordo
//!
//! Ordo - Import statement ordering for scripts and Svelte components.
//!
//! ## Name Origin
//!
//! **Ordo** is Latin for "order" or "rank": every import takes its place in
//! the group it belongs to. This binary walks a project, loads
//! `ordo.config.json` and reorders imports the same way the host formatter
//! plugin does.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "ordo")]
#[command(about = "Import statement ordering for scripts and Svelte components", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reorder imports in script and Svelte files (default command)
    Sort(commands::sort::SortArgs),

    /// Print the JSON Schema of ordo.config.json
    Schema(commands::schema::SchemaArgs),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Sort(args)) => commands::sort::run(args),
        Some(Commands::Schema(args)) => commands::schema::run(args),
        None => commands::sort::run(commands::sort::SortArgs::default()),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();
}

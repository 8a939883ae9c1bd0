//! Canvas CLI
//!
//! Command-line host for the canvas board store. Each invocation opens the
//! board database, applies pending migrations, runs one operation and prints
//! its result as JSON on stdout.

use clap::{Parser, Subcommand};

mod commands;
mod config;

use config::CliConfig;

#[derive(Debug, Parser)]
#[command(name = "canvas")]
#[command(about = "Canvas - note board store", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: CliConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the board database and apply migrations
    Init,
    /// Post operations
    Post(commands::post::PostArgs),
    /// Snapshot operations
    Snapshot(commands::snapshot::SnapshotArgs),
}

fn main() {
    let cli = Cli::parse();

    canvas_core::logging_facility::init(cli.config.profile());

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli.config),
        Commands::Post(args) => commands::post::execute(args, &cli.config),
        Commands::Snapshot(args) => commands::snapshot::execute(args, &cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = if e.kind().is_client_error() { 1 } else { 2 };
        std::process::exit(code);
    }
}

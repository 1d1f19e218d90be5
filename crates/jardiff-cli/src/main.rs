//! jardiff CLI
//!
//! Command-line interface for comparing two component snapshots

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "jardiff")]
#[command(about = "jardiff - API differences between two component snapshots", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare two snapshots and render the differences
    Diff(commands::diff::DiffArgs),
    /// Check snapshots against the input contract without comparing them
    Validate(commands::validate::ValidateArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! Skills corpus CLI
//!
//! The command-line interface for maintaining the skills documentation
//! corpus: summary-count synchronization and corpus validation.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Sync { dry_run }) => {
            let cwd = std::env::current_dir()?;
            commands::run_sync(&cwd, dry_run)
        }
        Some(Commands::Validate { json }) => {
            let cwd = std::env::current_dir()?;
            commands::run_validate(&cwd, json)
        }
        None => {
            println!("{} Skills corpus CLI", "skills".green().bold());
            println!();
            println!("Run {} for available commands.", "skills --help".cyan());
            Ok(())
        }
    }
}

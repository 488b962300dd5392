//! multi CLI
//!
//! The command-line interface for synchronizing a multi-repository
//! workspace: cloning declared siblings, merging editor configuration
//! fragments, and driving branch operations across every repository.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands, SyncTarget};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        if std::env::args().any(|arg| arg == "-v" || arg == "--verbose") {
            eprintln!("{e:#?}");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

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
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} multi-repository workspace synchronizer", "multi".green().bold());
            println!();
            println!("Run {} for available commands.", "multi --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    let cwd = std::env::current_dir()?;
    match cmd {
        Commands::Sync { target: None } => commands::run_sync(&cwd),
        Commands::Sync {
            target: Some(SyncTarget::Rules),
        } => commands::run_sync_rules(&cwd),
        Commands::Sync {
            target: Some(SyncTarget::Vscode { artifact }),
        } => commands::run_sync_vscode(&cwd, artifact),
        Commands::SetBranch { name } => commands::run_set_branch(&cwd, &name),
        Commands::MergeBranch { source, target } => {
            commands::run_merge_branch(&cwd, &source, &target)
        }
    }
}

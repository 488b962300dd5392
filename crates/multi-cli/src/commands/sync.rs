//! Sync command implementations

use std::path::Path;

use colored::Colorize;

use multi_core::{WorkspaceContext, merge, sync};

use crate::cli::VscodeArtifact;
use crate::error::Result;

/// Run the full sync: clone missing repositories, import rules, merge
/// VS Code configurations.
pub fn run_sync(cwd: &Path) -> Result<()> {
    let ctx = WorkspaceContext::discover(cwd)?;

    println!(
        "{} Syncing workspace {}...",
        "=>".blue().bold(),
        ctx.layout.root_name().cyan()
    );

    sync::sync(&ctx)?;

    println!("{} Workspace synchronized.", "OK".green().bold());
    Ok(())
}

/// Import rule files only.
pub fn run_sync_rules(cwd: &Path) -> Result<()> {
    let ctx = WorkspaceContext::discover(cwd)?;

    println!("{} Importing rules...", "=>".blue().bold());
    sync::sync_rules(&ctx)?;
    println!("{} Rules imported.", "OK".green().bold());
    Ok(())
}

/// Merge VS Code configuration files, optionally a single artifact.
pub fn run_sync_vscode(cwd: &Path, artifact: Option<VscodeArtifact>) -> Result<()> {
    let ctx = WorkspaceContext::discover(cwd)?;

    match artifact {
        None => {
            println!("{} Merging VS Code configurations...", "=>".blue().bold());
            sync::sync_vscode(&ctx)?;
        }
        Some(VscodeArtifact::Launch) => {
            println!("{} Merging launch.json files...", "=>".blue().bold());
            merge::merge_launch(&ctx)?;
        }
        Some(VscodeArtifact::Tasks) => {
            println!("{} Merging tasks.json files...", "=>".blue().bold());
            merge::merge_tasks(&ctx)?;
        }
        Some(VscodeArtifact::Settings) => {
            println!("{} Merging settings.json files...", "=>".blue().bold());
            merge::merge_settings(&ctx)?;
        }
    }

    println!("{} VS Code configurations merged.", "OK".green().bold());
    Ok(())
}

//! Branch command implementations
//!
//! Both commands operate on the root repository and every non-skipped
//! declared repository, in manifest declaration order.

use std::path::Path;

use colored::Colorize;

use multi_core::WorkspaceContext;
use multi_git::MultiRepoBranchEngine;

use crate::error::Result;

fn engine_for(ctx: &WorkspaceContext) -> MultiRepoBranchEngine {
    MultiRepoBranchEngine::new(ctx.root.clone(), ctx.active_repo_paths())
}

/// Run the set-branch command.
pub fn run_set_branch(cwd: &Path, name: &str) -> Result<()> {
    let ctx = WorkspaceContext::discover(cwd)?;

    println!(
        "{} Switching all repositories to {}...",
        "=>".blue().bold(),
        name.cyan()
    );

    engine_for(&ctx).set_branch_everywhere(name)?;

    println!(
        "{} All repositories are now on {}.",
        "OK".green().bold(),
        name.cyan()
    );
    Ok(())
}

/// Run the merge-branch command.
pub fn run_merge_branch(cwd: &Path, source: &str, target: &str) -> Result<()> {
    let ctx = WorkspaceContext::discover(cwd)?;

    println!(
        "{} Merging {} into {} in all repositories...",
        "=>".blue().bold(),
        source.cyan(),
        target.cyan()
    );

    engine_for(&ctx).merge_branch_everywhere(source, target)?;

    println!(
        "{} Merged {} into {} everywhere.",
        "OK".green().bold(),
        source.cyan(),
        target.cyan()
    );
    Ok(())
}

//! Top-level sync orchestration
//!
//! Clones missing repositories, imports rules, and merges the VS Code
//! artifacts, strictly in manifest declaration order. Errors from any
//! mutating step propagate unrecovered; a half-synchronized workspace
//! must never be reported as success.

use multi_git::{GitRepo, MultiRepoBranchEngine};

use crate::context::WorkspaceContext;
use crate::{Result, ignore, merge, rules};

/// Clone every declared repository that is not yet present, then try to
/// put each fresh clone on the root repository's current branch.
pub fn clone_missing_repos(ctx: &WorkspaceContext) -> Result<()> {
    let root_repo = GitRepo::open(&ctx.root)?;
    let current_branch = root_repo.current_branch()?;
    tracing::info!(branch = %current_branch, "current root branch");

    for repo in &ctx.repos {
        if repo.local_path.exists() {
            tracing::debug!(repo = %repo.name, "already exists, skipping clone");
            continue;
        }

        tracing::info!(repo = %repo.name, url = %repo.url, "cloning");
        let cloned = multi_git::clone(&repo.url, &repo.local_path)?;

        if cloned.current_branch()? == current_branch {
            continue;
        }
        let result = if cloned.branch_exists_local(&current_branch)? {
            cloned.checkout(&current_branch)
        } else {
            cloned.checkout_remote_tracking(&current_branch)
        };
        match result {
            Ok(()) => {
                tracing::info!(repo = %repo.name, branch = %current_branch, "checked out root branch")
            }
            Err(e) => tracing::warn!(
                repo = %repo.name,
                branch = %current_branch,
                error = %e,
                "branch not found in clone, staying on default branch"
            ),
        }
    }

    let entries: Vec<String> = ctx.repos.iter().map(|repo| format!("{}/", repo.name)).collect();
    ignore::append_missing_lines(&ctx.layout.gitignore_path(), &entries)?;
    ignore::append_missing_lines(&ctx.layout.ignore_path(), &entries)?;

    Ok(())
}

/// Merge all three VS Code artifacts.
pub fn sync_vscode(ctx: &WorkspaceContext) -> Result<()> {
    merge::merge_launch(ctx)?;
    merge::merge_tasks(ctx)?;
    merge::merge_settings(ctx)?;
    Ok(())
}

/// Import rule fragments only.
pub fn sync_rules(ctx: &WorkspaceContext) -> Result<()> {
    rules::import_rules(ctx)?;
    Ok(())
}

/// Full orchestration: clone missing repositories, import rules, merge
/// VS Code configs, then warn when the constellation has drifted onto
/// different branches (advisory only).
pub fn sync(ctx: &WorkspaceContext) -> Result<()> {
    tracing::info!("syncing workspace");

    clone_missing_repos(ctx)?;
    sync_rules(ctx)?;
    sync_vscode(ctx)?;

    let engine = MultiRepoBranchEngine::new(ctx.root.clone(), ctx.active_repo_paths());
    match engine.check_all_on_same_branch() {
        Ok(true) => {}
        Ok(false) => tracing::warn!("repositories are not all on the same branch"),
        Err(e) => tracing::warn!(error = %e, "could not verify branch alignment"),
    }

    tracing::info!("sync complete");
    Ok(())
}

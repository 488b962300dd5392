//! Multi-repository branch engine
//!
//! Drives branch transitions across the root repository and every declared
//! member as one logical operation. The engine validates cleanliness
//! everywhere before touching anything; mid-sequence checkout or merge
//! failures halt immediately and leave already-processed repositories in
//! their new state (no rollback).

use multi_fs::NormalizedPath;

use crate::{Error, GitRepo, Result};

/// Orchestrates branch operations over root-first, declaration-ordered
/// repositories.
pub struct MultiRepoBranchEngine {
    root: NormalizedPath,
    members: Vec<NormalizedPath>,
}

impl MultiRepoBranchEngine {
    /// `members` must be in manifest declaration order; skipped
    /// repositories are excluded by the caller.
    pub fn new(root: NormalizedPath, members: Vec<NormalizedPath>) -> Self {
        Self { root, members }
    }

    /// Open root then members, in processing order.
    fn open_all(&self) -> Result<Vec<GitRepo>> {
        std::iter::once(&self.root)
            .chain(self.members.iter())
            .map(GitRepo::open)
            .collect()
    }

    /// Switch every repository to `branch`, creating it where necessary.
    ///
    /// Phase 1 verifies every working tree is clean; a single dirty
    /// repository aborts the whole operation before any checkout happens
    /// anywhere. Phase 2 then transitions each repository in order:
    /// existing local branch is checked out, a remote-only branch gets a
    /// local tracking branch, and an unknown branch is created from the
    /// repository's current HEAD.
    pub fn set_branch_everywhere(&self, branch: &str) -> Result<()> {
        let repos = self.open_all()?;

        for repo in &repos {
            if !repo.is_clean()? {
                return Err(Error::RepoNotClean {
                    path: repo.path().to_native(),
                });
            }
        }

        for repo in &repos {
            let exists_locally = repo.branch_exists_local(branch)?;
            let exists_remotely = !exists_locally && repo.branch_exists_remote(branch);

            if exists_locally {
                repo.checkout(branch)?;
            } else if exists_remotely {
                repo.checkout_remote_tracking(branch)?;
            } else {
                repo.checkout_new_branch(branch)?;
            }
            tracing::info!(repo = %repo.path(), branch, "switched branch");
        }

        Ok(())
    }

    /// Merge `source` into `target` in every repository.
    ///
    /// Both branches must exist (locally or remotely) in a repository
    /// before it is touched. A failed merge halts the remaining
    /// repositories; repositories already merged keep their state.
    pub fn merge_branch_everywhere(&self, source: &str, target: &str) -> Result<()> {
        let repos = self.open_all()?;

        for repo in &repos {
            for branch in [source, target] {
                if !repo.branch_exists_local(branch)? && !repo.branch_exists_remote(branch) {
                    return Err(Error::BranchNotFound {
                        name: branch.to_string(),
                        path: repo.path().to_native(),
                    });
                }
            }

            if repo.branch_exists_local(target)? {
                repo.checkout(target)?;
            } else {
                repo.checkout_remote_tracking(target)?;
            }

            repo.merge(source)?;
            tracing::info!(repo = %repo.path(), source, target, "merged branch");
        }

        Ok(())
    }

    /// Whether root and every member currently sit on the same branch.
    ///
    /// Advisory post-sync check, never a hard gate.
    pub fn check_all_on_same_branch(&self) -> Result<bool> {
        let repos = self.open_all()?;
        let mut branches = repos.iter().map(|repo| repo.current_branch());

        let first = match branches.next() {
            Some(branch) => branch?,
            None => return Ok(true),
        };
        for branch in branches {
            if branch? != first {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

//! git2-backed repository facade
//!
//! Every git capability the workspace needs goes through `GitRepo`, which
//! translates git2 failures into errors carrying the attempted action and
//! the repository path.

use git2::{BranchType, Direction, MergeOptions, Repository, build::CheckoutBuilder};

use multi_fs::NormalizedPath;

use crate::{Error, Result};

const DEFAULT_REMOTE: &str = "origin";

/// Branch facts for a single repository, derived on demand.
///
/// Never cached beyond the immediate check-then-act window; the engine
/// re-derives state for every operation.
#[derive(Debug, Clone)]
pub struct BranchState {
    pub current_branch: String,
    pub is_clean: bool,
    pub exists_locally: bool,
    pub exists_remotely: bool,
}

/// A single git repository (root or declared member).
pub struct GitRepo {
    path: NormalizedPath,
    inner: Repository,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo").field("path", &self.path).finish()
    }
}

impl GitRepo {
    /// Open an existing repository at `path`.
    pub fn open(path: &NormalizedPath) -> Result<Self> {
        if !path.join(".git").exists() {
            return Err(Error::NotARepository {
                path: path.to_native(),
            });
        }
        let inner = Repository::open(path.to_native())
            .map_err(|e| Error::operation("open repository", path.to_native(), &e))?;
        Ok(Self {
            path: path.clone(),
            inner,
        })
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    /// Whether the working tree has no staged, unstaged, or untracked
    /// changes (ignored files excluded), matching `git status --porcelain`.
    pub fn is_clean(&self) -> Result<bool> {
        let mut options = git2::StatusOptions::new();
        options.include_untracked(true).include_ignored(false);
        let statuses = self
            .inner
            .statuses(Some(&mut options))
            .map_err(|e| Error::operation("check working directory status", self.path.to_native(), &e))?;
        Ok(statuses.is_empty())
    }

    /// Current branch name; `HEAD` when detached.
    pub fn current_branch(&self) -> Result<String> {
        let head = self
            .inner
            .head()
            .map_err(|e| Error::operation("read HEAD", self.path.to_native(), &e))?;
        if head.is_branch() {
            Ok(head.shorthand().unwrap_or("HEAD").to_string())
        } else {
            Ok("HEAD".to_string())
        }
    }

    pub fn branch_exists_local(&self, name: &str) -> Result<bool> {
        match self.inner.find_branch(name, BranchType::Local) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(Error::operation(
                format!("check if branch '{name}' exists"),
                self.path.to_native(),
                &e,
            )),
        }
    }

    /// Whether `name` exists on the default remote.
    ///
    /// A failed lookup (no remote, no network) degrades to `false` with a
    /// warning rather than failing the surrounding operation.
    pub fn branch_exists_remote(&self, name: &str) -> bool {
        match self.list_remote_heads(name) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(
                    repo = %self.path,
                    error = %e,
                    "could not check remote branches, assuming branch doesn't exist remotely"
                );
                false
            }
        }
    }

    fn list_remote_heads(&self, name: &str) -> std::result::Result<bool, git2::Error> {
        let mut remote = self.inner.find_remote(DEFAULT_REMOTE)?;
        remote.connect(Direction::Fetch)?;
        let wanted = format!("refs/heads/{name}");
        let found = remote.list()?.iter().any(|head| head.name() == wanted);
        remote.disconnect()?;
        Ok(found)
    }

    /// Derive the full branch state for `name`.
    pub fn branch_state(&self, name: &str) -> Result<BranchState> {
        Ok(BranchState {
            current_branch: self.current_branch()?,
            is_clean: self.is_clean()?,
            exists_locally: self.branch_exists_local(name)?,
            exists_remotely: self.branch_exists_remote(name),
        })
    }

    /// Check out an existing local branch.
    pub fn checkout(&self, name: &str) -> Result<()> {
        let refname = format!("refs/heads/{name}");
        let action = || format!("checkout branch '{name}'");

        let object = self
            .inner
            .revparse_single(&refname)
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        self.inner
            .checkout_tree(&object, Some(CheckoutBuilder::new().safe()))
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        self.inner
            .set_head(&refname)
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        Ok(())
    }

    /// Create a new branch from the current HEAD and check it out.
    pub fn checkout_new_branch(&self, name: &str) -> Result<()> {
        let action = || format!("create and checkout branch '{name}'");

        let head_commit = self
            .inner
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        self.inner
            .branch(name, &head_commit, false)
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        self.inner
            .set_head(&format!("refs/heads/{name}"))
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        Ok(())
    }

    /// Create a local branch tracking the remote ref and check it out.
    ///
    /// Fetches the branch when no remote-tracking ref is present locally.
    pub fn checkout_remote_tracking(&self, name: &str) -> Result<()> {
        let action = || format!("checkout remote branch '{name}'");
        let remote_refname = format!("refs/remotes/{DEFAULT_REMOTE}/{name}");

        if self.inner.find_reference(&remote_refname).is_err() {
            let mut remote = self
                .inner
                .find_remote(DEFAULT_REMOTE)
                .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
            remote
                .fetch(&[name], None, None)
                .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        }

        let commit = self
            .inner
            .find_reference(&remote_refname)
            .and_then(|reference| reference.peel_to_commit())
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;

        let mut branch = self
            .inner
            .branch(name, &commit, false)
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        branch
            .set_upstream(Some(&format!("{DEFAULT_REMOTE}/{name}")))
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;

        self.checkout(name)
    }

    fn resolve_branch_commit(&self, name: &str) -> Result<git2::Commit<'_>> {
        if let Ok(branch) = self.inner.find_branch(name, BranchType::Local) {
            return branch.get().peel_to_commit().map_err(|e| {
                Error::operation(format!("resolve branch '{name}'"), self.path.to_native(), &e)
            });
        }
        let remote_refname = format!("refs/remotes/{DEFAULT_REMOTE}/{name}");
        self.inner
            .find_reference(&remote_refname)
            .and_then(|reference| reference.peel_to_commit())
            .map_err(|_| Error::BranchNotFound {
                name: name.to_string(),
                path: self.path.to_native(),
            })
    }

    /// Merge `source` into the currently checked-out branch.
    ///
    /// Fast-forwards when possible; otherwise creates a merge commit. A
    /// conflicting merge cleans up the in-progress state and fails.
    pub fn merge(&self, source: &str) -> Result<()> {
        let source_commit = self.resolve_branch_commit(source)?;
        let action = || format!("merge branch '{source}'");

        let annotated = self
            .inner
            .find_annotated_commit(source_commit.id())
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        let (analysis, _) = self
            .inner
            .merge_analysis(&[&annotated])
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;

        if analysis.is_up_to_date() {
            return Ok(());
        }

        if analysis.is_fast_forward() {
            let current = self.current_branch()?;
            let refname = format!("refs/heads/{current}");
            let mut reference = self
                .inner
                .find_reference(&refname)
                .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
            reference
                .set_target(
                    source_commit.id(),
                    &format!("merge {source}: fast-forward"),
                )
                .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
            self.inner
                .checkout_head(Some(CheckoutBuilder::default().force()))
                .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
            return Ok(());
        }

        let mut merge_opts = MergeOptions::new();
        self.inner
            .merge(&[&annotated], Some(&mut merge_opts), None)
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;

        let mut index = self
            .inner
            .index()
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        if index.has_conflicts() {
            let _ = self.inner.cleanup_state();
            return Err(Error::MergeConflict {
                path: self.path.to_native(),
                message: format!("merge of '{source}' resulted in conflicts"),
            });
        }

        let signature = self
            .inner
            .signature()
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        let tree_id = index
            .write_tree()
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        let tree = self
            .inner
            .find_tree(tree_id)
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        let head_commit = self
            .inner
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;

        self.inner
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                &format!("Merge branch '{source}'"),
                &tree,
                &[&head_commit, &source_commit],
            )
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;

        self.inner
            .cleanup_state()
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;

        Ok(())
    }

    /// Push a branch to the default remote.
    ///
    /// Pushes the current branch when `branch` is `None`; relies on git
    /// credential helpers for authentication.
    pub fn push(&self, branch: Option<&str>) -> Result<()> {
        let branch_name = match branch {
            Some(b) => b.to_string(),
            None => self.current_branch()?,
        };
        let action = || format!("push branch '{branch_name}'");

        let mut remote = self
            .inner
            .find_remote(DEFAULT_REMOTE)
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        let refspec = format!("refs/heads/{branch_name}:refs/heads/{branch_name}");
        remote
            .push(&[&refspec], None)
            .map_err(|e| Error::operation(action(), self.path.to_native(), &e))?;
        Ok(())
    }
}

/// Clone `url` into `dest`.
pub fn clone(url: &str, dest: &NormalizedPath) -> Result<GitRepo> {
    Repository::clone(url, dest.to_native())
        .map_err(|e| Error::operation(format!("clone {url}"), dest.to_native(), &e))?;
    GitRepo::open(dest)
}

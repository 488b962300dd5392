//! Per-invocation workspace context
//!
//! A single explicit value carrying the resolved root, loaded manifest,
//! artifact layout, and repository registry. Constructed once per
//! invocation and passed into every component, so multiple synthetic
//! workspaces can coexist in one process (no global state).

use std::path::Path;

use multi_fs::{NormalizedPath, WorkspaceLayout, discover_root};
use multi_meta::{Manifest, Repository, load_repositories};

use crate::Result;

#[derive(Debug)]
pub struct WorkspaceContext {
    pub root: NormalizedPath,
    pub layout: WorkspaceLayout,
    pub manifest: Manifest,
    pub repos: Vec<Repository>,
}

impl WorkspaceContext {
    /// Resolve the workspace starting from `start` (usually the cwd).
    pub fn discover(start: &Path) -> Result<Self> {
        let root = discover_root(start)?;
        Self::at_root(root)
    }

    /// Build a context for an already-known root directory.
    pub fn at_root(root: NormalizedPath) -> Result<Self> {
        let manifest = Manifest::load(&root)?;
        let repos = load_repositories(&root, &manifest)?;
        Ok(Self {
            layout: WorkspaceLayout::new(root.clone()),
            root,
            manifest,
            repos,
        })
    }

    /// Declared repositories that participate in merges and rule import,
    /// in manifest declaration order.
    pub fn active_repos(&self) -> impl Iterator<Item = &Repository> {
        self.repos.iter().filter(|repo| !repo.skip)
    }

    /// Local paths of the active repositories, for branch operations.
    pub fn active_repo_paths(&self) -> Vec<NormalizedPath> {
        self.active_repos()
            .map(|repo| repo.local_path.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_builds_full_context() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("multi.json"),
            r#"{"repos": [{"url": "acme/api"}, {"url": "acme/web", "options": {"skip": true}}]}"#,
        )
        .unwrap();
        let nested = temp.path().join("api");
        fs::create_dir_all(&nested).unwrap();

        let ctx = WorkspaceContext::discover(&nested).unwrap();
        assert_eq!(ctx.repos.len(), 2);
        let active: Vec<_> = ctx.active_repos().map(|r| r.name.as_str()).collect();
        assert_eq!(active, vec!["api"]);
        assert_eq!(ctx.active_repo_paths().len(), 1);
    }
}

//! Repository records materialized from the manifest

use multi_fs::NormalizedPath;

use crate::{Error, Manifest, Result};

/// Manifest files whose presence marks a repository as a Python project.
const PYTHON_MARKERS: [&str; 6] = [
    "pyproject.toml",
    "requirements.txt",
    "Pipfile",
    "setup.py",
    "environment.yml",
    "setup.cfg",
];

/// A declared member repository.
///
/// Constructed once per invocation from the manifest and immutable
/// afterwards; processing order is manifest declaration order.
#[derive(Debug, Clone)]
pub struct Repository {
    pub url: String,
    pub name: String,
    pub local_path: NormalizedPath,
    pub skip: bool,
    pub required_launch_configs: Vec<String>,
    pub required_tasks: Vec<String>,
}

impl Repository {
    fn from_entry(workspace_root: &NormalizedPath, entry: &crate::RepoEntry) -> Result<Self> {
        let name = entry
            .url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or(Error::MissingUrl)?
            .to_string();

        Ok(Self {
            url: entry.url.clone(),
            local_path: workspace_root.join(&name),
            skip: entry.options.skip,
            required_launch_configs: entry.options.required_launch_configs.clone(),
            required_tasks: entry.options.required_tasks.clone(),
            name,
        })
    }

    /// Whether the checked-out repository looks like a Python project.
    ///
    /// Derived from the working tree, so the answer can change after a
    /// clone; callers ask at the point of use.
    pub fn is_python_project(&self) -> bool {
        PYTHON_MARKERS
            .iter()
            .any(|marker| self.local_path.join(marker).exists())
    }
}

/// Materialize the declared repositories in manifest order.
///
/// Fails with `NoRepositories` when the manifest declares none; every
/// multi-repo operation is meaningless against an empty workspace.
pub fn load_repositories(
    workspace_root: &NormalizedPath,
    manifest: &Manifest,
) -> Result<Vec<Repository>> {
    let repos = manifest
        .repos
        .iter()
        .map(|entry| Repository::from_entry(workspace_root, entry))
        .collect::<Result<Vec<_>>>()?;

    if repos.is_empty() {
        return Err(Error::NoRepositories);
    }

    tracing::debug!(count = repos.len(), "loaded repository registry");
    Ok(repos)
}

//! Workspace manifest schema and loading
//!
//! The manifest anchors the workspace root and declares its member
//! repositories:
//!
//! ```json
//! {
//!   "repos": [
//!     { "url": "https://github.com/acme/api" },
//!     {
//!       "url": "https://github.com/acme/web",
//!       "options": { "requiredLaunchConfigs": ["Serve Web"] }
//!     }
//!   ],
//!   "vscode": { "skip_keys": ["workbench.colorCustomizations"] }
//! }
//! ```
//!
//! The same structure is accepted as `multi.toml`.

use serde::{Deserialize, Serialize};

use multi_fs::{NormalizedPath, io, root};

use crate::{Error, Result};

/// The workspace manifest (`multi.json` / `multi.toml`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Manifest {
    /// Declared member repositories, in workspace processing order.
    #[serde(default)]
    pub repos: Vec<RepoEntry>,
    /// VS Code merge behavior.
    #[serde(default)]
    pub vscode: VscodeSettings,
}

/// One declared repository.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepoEntry {
    /// Clone URL; the repository name is its last path segment.
    pub url: String,
    /// Per-repository options.
    #[serde(default)]
    pub options: RepoOptions,
}

/// Per-repository manifest options.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoOptions {
    /// Exclude this repository from merges and rule import.
    #[serde(default)]
    pub skip: bool,
    /// Launch configuration names that must join the master compound.
    #[serde(default)]
    pub required_launch_configs: Vec<String>,
    /// Task labels that must join the master task.
    #[serde(default)]
    pub required_tasks: Vec<String>,
}

/// Settings governing the VS Code config merge.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VscodeSettings {
    /// Keys dropped from every settings fragment before merging.
    #[serde(default = "default_skip_keys")]
    pub skip_keys: Vec<String>,
}

fn default_skip_keys() -> Vec<String> {
    vec!["workbench.colorCustomizations".to_string()]
}

impl Default for VscodeSettings {
    fn default() -> Self {
        Self {
            skip_keys: default_skip_keys(),
        }
    }
}

impl Manifest {
    /// Load the manifest from a workspace root directory.
    ///
    /// `multi.json` is preferred when both formats exist. A manifest that
    /// fails to parse is fatal; merging against a half-understood repo
    /// list is never acceptable.
    pub fn load(workspace_root: &NormalizedPath) -> Result<Self> {
        let path = root::manifest_path(workspace_root).ok_or_else(|| Error::ManifestNotFound {
            root: workspace_root.to_native(),
        })?;

        let content = io::read_text(&path)?;
        match path.extension() {
            Some("toml") => toml::from_str(&content).map_err(|e| Error::ManifestParse {
                path: path.to_native(),
                format: "TOML".into(),
                message: e.to_string(),
            }),
            _ => serde_json::from_str(&content).map_err(|e| Error::ManifestParse {
                path: path.to_native(),
                format: "JSON".into(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_json_manifest() {
        let manifest: Manifest =
            serde_json::from_str(r#"{"repos": [{"url": "https://github.com/acme/api"}]}"#).unwrap();

        assert_eq!(manifest.repos.len(), 1);
        assert_eq!(manifest.repos[0].url, "https://github.com/acme/api");
        assert!(!manifest.repos[0].options.skip);
        assert_eq!(
            manifest.vscode.skip_keys,
            vec!["workbench.colorCustomizations"]
        );
    }

    #[test]
    fn test_parse_repo_options() {
        let manifest: Manifest = serde_json::from_str(
            r#"{
                "repos": [{
                    "url": "https://github.com/acme/web",
                    "options": {
                        "skip": true,
                        "requiredLaunchConfigs": ["Serve Web"],
                        "requiredTasks": ["build"]
                    }
                }]
            }"#,
        )
        .unwrap();

        let options = &manifest.repos[0].options;
        assert!(options.skip);
        assert_eq!(options.required_launch_configs, vec!["Serve Web"]);
        assert_eq!(options.required_tasks, vec!["build"]);
    }

    #[test]
    fn test_parse_toml_manifest() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("multi.toml"),
            r#"
[[repos]]
url = "https://github.com/acme/api"

[vscode]
skip_keys = ["editor.fontSize"]
"#,
        )
        .unwrap();

        let manifest = Manifest::load(&NormalizedPath::new(temp.path())).unwrap();
        assert_eq!(manifest.repos[0].url, "https://github.com/acme/api");
        assert_eq!(manifest.vscode.skip_keys, vec!["editor.fontSize"]);
    }

    #[test]
    fn test_load_prefers_json_over_toml() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("multi.json"),
            r#"{"repos": [{"url": "a/from-json"}]}"#,
        )
        .unwrap();
        fs::write(temp.path().join("multi.toml"), "[[repos]]\nurl = \"a/from-toml\"\n").unwrap();

        let manifest = Manifest::load(&NormalizedPath::new(temp.path())).unwrap();
        assert_eq!(manifest.repos[0].url, "a/from-json");
    }

    #[test]
    fn test_malformed_manifest_is_fatal() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("multi.json"), "{not json").unwrap();

        let err = Manifest::load(&NormalizedPath::new(temp.path())).unwrap_err();
        assert!(matches!(err, Error::ManifestParse { .. }));
    }
}

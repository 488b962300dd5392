//! Derived artifact locations for a workspace root or member repository

use crate::NormalizedPath;

/// Artifact paths derived from a workspace root directory.
///
/// Member repositories share the same `.vscode` / `.cursor` conventions, so
/// the per-repository fragment locations are exposed as associated helpers
/// taking the repository directory.
#[derive(Debug, Clone)]
pub struct WorkspaceLayout {
    root: NormalizedPath,
}

impl WorkspaceLayout {
    pub fn new(root: NormalizedPath) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Last path segment of the root directory, used to name synthetic
    /// aggregate entries in merged artifacts.
    pub fn root_name(&self) -> &str {
        self.root.file_name().unwrap_or("workspace")
    }

    pub fn vscode_dir(&self) -> NormalizedPath {
        Self::vscode_dir_of(&self.root)
    }

    pub fn launch_path(&self) -> NormalizedPath {
        self.vscode_dir().join("launch.json")
    }

    pub fn tasks_path(&self) -> NormalizedPath {
        self.vscode_dir().join("tasks.json")
    }

    pub fn settings_path(&self) -> NormalizedPath {
        self.vscode_dir().join("settings.json")
    }

    pub fn shared_settings_path(&self) -> NormalizedPath {
        self.vscode_dir().join("settings.shared.json")
    }

    pub fn rules_dir(&self) -> NormalizedPath {
        Self::rules_dir_of(&self.root)
    }

    pub fn imported_rules_path(&self) -> NormalizedPath {
        self.root.join(".importedrules")
    }

    pub fn gitignore_path(&self) -> NormalizedPath {
        self.root.join(".gitignore")
    }

    pub fn ignore_path(&self) -> NormalizedPath {
        self.root.join(".ignore")
    }

    /// `.vscode` directory of any repository directory.
    pub fn vscode_dir_of(repo_dir: &NormalizedPath) -> NormalizedPath {
        repo_dir.join(".vscode")
    }

    /// `.cursor/rules` directory of any repository directory.
    pub fn rules_dir_of(repo_dir: &NormalizedPath) -> NormalizedPath {
        repo_dir.join(".cursor").join("rules")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_root_artifact_paths() {
        let layout = WorkspaceLayout::new(NormalizedPath::new("/ws/acme"));

        assert_eq!(layout.root_name(), "acme");
        assert_eq!(layout.launch_path().as_str(), "/ws/acme/.vscode/launch.json");
        assert_eq!(layout.tasks_path().as_str(), "/ws/acme/.vscode/tasks.json");
        assert_eq!(layout.settings_path().as_str(), "/ws/acme/.vscode/settings.json");
        assert_eq!(
            layout.shared_settings_path().as_str(),
            "/ws/acme/.vscode/settings.shared.json"
        );
        assert_eq!(layout.rules_dir().as_str(), "/ws/acme/.cursor/rules");
        assert_eq!(layout.imported_rules_path().as_str(), "/ws/acme/.importedrules");
    }

    #[test]
    fn test_member_fragment_paths() {
        let repo = NormalizedPath::new("/ws/acme/api");
        assert_eq!(WorkspaceLayout::vscode_dir_of(&repo).as_str(), "/ws/acme/api/.vscode");
        assert_eq!(
            WorkspaceLayout::rules_dir_of(&repo).as_str(),
            "/ws/acme/api/.cursor/rules"
        );
    }
}

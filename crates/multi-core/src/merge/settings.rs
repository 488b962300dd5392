//! Settings merger
//!
//! Merges every repository's `.vscode/settings.json` into the root file
//! in declaration order, then the root's `settings.shared.json` last so
//! shared values win scalar ties without erasing array contributions.
//! Python member repositories are added to the autocomplete search path.

use serde_json::{Map, Value};

use multi_fs::WorkspaceLayout;

use crate::context::WorkspaceContext;
use crate::merge::{document, engine};
use crate::Result;

const EXTRA_PATHS_KEY: &str = "python.autoComplete.extraPaths";

pub fn merge_settings(ctx: &WorkspaceContext) -> Result<()> {
    let destination = ctx.layout.settings_path();
    document::clear_destination(&destination)?;

    let skip_keys = &ctx.manifest.vscode.skip_keys;
    let mut merged = Value::Object(Map::new());

    for repo in ctx.active_repos() {
        let fragment_path = WorkspaceLayout::vscode_dir_of(&repo.local_path).join("settings.json");
        let fragment = document::read_fragment(&fragment_path);
        merged = engine::deep_merge(&merged, &fragment, Some(&repo.name), skip_keys);
    }

    let shared = document::read_fragment(&ctx.layout.shared_settings_path());
    merged = engine::deep_merge(&merged, &shared, None, skip_keys);

    let python_repos: Vec<String> = ctx
        .active_repos()
        .filter(|repo| repo.is_python_project())
        .map(|repo| repo.name.clone())
        .collect();
    if !python_repos.is_empty() {
        add_python_extra_paths(&mut merged, python_repos);
    }

    document::write_document(&destination, &merged)
}

fn add_python_extra_paths(merged: &mut Value, repo_names: Vec<String>) {
    let Some(root) = merged.as_object_mut() else {
        return;
    };
    let paths = root
        .entry(EXTRA_PATHS_KEY)
        .or_insert_with(|| Value::Array(Vec::new()));
    let Some(paths) = paths.as_array_mut() else {
        return;
    };

    for name in repo_names {
        let entry = Value::String(name);
        if !paths.contains(&entry) {
            paths.push(entry);
        }
    }
}

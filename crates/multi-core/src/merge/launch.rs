//! Launch-configuration merger
//!
//! Merges every repository's `.vscode/launch.json` into the root file,
//! injecting a repository-relative `cwd` default into each configuration
//! and synthesizing a master compound referencing every required
//! configuration.

use serde_json::{Map, Value, json};

use multi_fs::WorkspaceLayout;

use crate::context::WorkspaceContext;
use crate::merge::{document, engine, required};
use crate::Result;

pub fn merge_launch(ctx: &WorkspaceContext) -> Result<()> {
    let destination = ctx.layout.launch_path();
    document::clear_destination(&destination)?;

    let mut merged = Value::Object(Map::new());
    let mut manifest_required = Vec::new();

    for repo in ctx.active_repos() {
        let fragment_path = WorkspaceLayout::vscode_dir_of(&repo.local_path).join("launch.json");
        let fragment = document::read_fragment(&fragment_path);

        let defaults = json!({
            "configurations": {
                "*": {"cwd": engine::prefix_repo_to_path(engine::WORKSPACE_FOLDER_TOKEN, &repo.name)}
            }
        });
        let fragment = engine::apply_defaults(&fragment, &defaults);
        merged = engine::deep_merge(&merged, &fragment, Some(&repo.name), &[]);

        manifest_required.extend(repo.required_launch_configs.iter().cloned());
    }

    let required_configs = required::combine_required(
        required::required_launch_configs(&merged),
        manifest_required,
        &required::opted_out_launch_configs(&merged),
    );

    if !required_configs.is_empty() {
        let compound_name = required::title_case(ctx.layout.root_name());
        append_master_compound(&mut merged, &compound_name, required_configs);
    }

    document::write_document(&destination, &merged)
}

fn append_master_compound(merged: &mut Value, name: &str, configurations: Vec<String>) {
    let root = match merged.as_object_mut() {
        Some(map) => map,
        None => return,
    };
    let compounds = root
        .entry("compounds")
        .or_insert_with(|| Value::Array(Vec::new()));
    let Some(compounds) = compounds.as_array_mut() else {
        return;
    };

    required::rename_conflicting_items(compounds, "name", name);
    compounds.push(json!({
        "name": name,
        "configurations": configurations,
    }));
    tracing::info!(compound = name, "created master compound in launch.json");
}

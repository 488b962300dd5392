//! Tasks merger
//!
//! Merges every repository's `.vscode/tasks.json` into the root file,
//! injecting a working-directory default into each task and synthesizing
//! a master task that depends on every required task in parallel.

use serde_json::{Map, Value, json};

use multi_fs::WorkspaceLayout;

use crate::context::WorkspaceContext;
use crate::merge::{document, engine, required};
use crate::Result;

pub fn merge_tasks(ctx: &WorkspaceContext) -> Result<()> {
    let destination = ctx.layout.tasks_path();
    document::clear_destination(&destination)?;

    let mut merged = Value::Object(Map::new());
    let mut manifest_required = Vec::new();

    for repo in ctx.active_repos() {
        let fragment_path = WorkspaceLayout::vscode_dir_of(&repo.local_path).join("tasks.json");
        let fragment = document::read_fragment(&fragment_path);

        // The bare token is rewritten to the repository subdirectory by
        // the merge itself.
        let defaults = json!({
            "tasks": {"*": {"options": {"cwd": engine::WORKSPACE_FOLDER_TOKEN}}}
        });
        let fragment = engine::apply_defaults(&fragment, &defaults);
        merged = engine::deep_merge(&merged, &fragment, Some(&repo.name), &[]);

        manifest_required.extend(repo.required_tasks.iter().cloned());
    }

    let required_tasks = required::combine_required(
        required::required_task_labels(&merged),
        manifest_required,
        &required::opted_out_task_labels(&merged),
    );

    if !required_tasks.is_empty() {
        let label = format!(
            "All Required Tasks - {}",
            required::title_case(ctx.layout.root_name())
        );
        append_master_task(&mut merged, &label, required_tasks);
    }

    document::write_document(&destination, &merged)
}

fn append_master_task(merged: &mut Value, label: &str, depends_on: Vec<String>) {
    let root = match merged.as_object_mut() {
        Some(map) => map,
        None => return,
    };
    let tasks = root
        .entry("tasks")
        .or_insert_with(|| Value::Array(Vec::new()));
    let Some(tasks) = tasks.as_array_mut() else {
        return;
    };

    required::rename_conflicting_items(tasks, "label", label);
    tasks.push(json!({
        "label": label,
        "dependsOn": depends_on,
        "dependsOrder": "parallel",
        "problemMatcher": [],
    }));
    tracing::info!(task = label, "created master task in tasks.json");
}

//! Generic deep merge with path rewriting and default injection
//!
//! All configuration fragments are JSON-like trees (`serde_json::Value`
//! with order-preserving maps). The engine never mutates its inputs;
//! every operation returns a fresh tree, which keeps merge output
//! reproducible byte-for-byte for a fixed fragment set.

use serde_json::Value;

/// Placeholder token VS Code expands to the workspace root.
pub const WORKSPACE_FOLDER_TOKEN: &str = "${workspaceFolder}";

/// Insert `/repo_name` after the workspace-folder token in a path string.
///
/// Idempotent: a string already carrying the repository segment is
/// returned unchanged, so repeated merges never double-prefix.
pub fn prefix_repo_to_path(path: &str, repo_name: &str) -> String {
    let prefixed = format!("{WORKSPACE_FOLDER_TOKEN}/{repo_name}");
    if path.contains(&prefixed) {
        return path.to_string();
    }
    path.replace(WORKSPACE_FOLDER_TOKEN, &prefixed)
}

/// Recursively rewrite workspace-folder paths in a value for `repo_name`.
pub fn rewrite_workspace_paths(value: &Value, repo_name: &str) -> Value {
    match value {
        Value::String(s) if s.contains(WORKSPACE_FOLDER_TOKEN) => {
            Value::String(prefix_repo_to_path(s, repo_name))
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, val)| (key.clone(), rewrite_workspace_paths(val, repo_name)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| rewrite_workspace_paths(item, repo_name))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Merge `overlay` into `base`, producing a new tree.
///
/// When `repo_name` is given, workspace-folder paths in the overlay are
/// rewritten first. `skip_keys` are dropped from the overlay at every
/// nesting level. Objects merge recursively; arrays concatenate with
/// base order preserved and deep-equal duplicates dropped; anything else
/// is replaced by the overlay value.
pub fn deep_merge(
    base: &Value,
    overlay: &Value,
    repo_name: Option<&str>,
    skip_keys: &[String],
) -> Value {
    let effective = match repo_name {
        Some(name) => rewrite_workspace_paths(overlay, name),
        None => overlay.clone(),
    };
    merge_values(base, &effective, skip_keys)
}

fn merge_values(base: &Value, overlay: &Value, skip_keys: &[String]) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, value) in overlay_map {
                if skip_keys.iter().any(|skip| skip == key) {
                    continue;
                }
                let entry = match merged.get(key) {
                    Some(existing) => merge_values(existing, value, skip_keys),
                    None => value.clone(),
                };
                merged.insert(key.clone(), entry);
            }
            Value::Object(merged)
        }
        (Value::Array(base_items), Value::Array(overlay_items)) => {
            let mut merged = base_items.clone();
            for item in overlay_items {
                if !merged.contains(item) {
                    merged.push(item.clone());
                }
            }
            Value::Array(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Fill gaps in `target` from a defaults tree of the same shape.
///
/// A `"*"` key in a defaults object applies its sub-tree to every element
/// of the array found at that position in the target. Defaults never
/// overwrite an existing value.
pub fn apply_defaults(target: &Value, defaults: &Value) -> Value {
    match (target, defaults) {
        (Value::Object(target_map), Value::Object(defaults_map)) => {
            let mut result = target_map.clone();
            for (key, default_value) in defaults_map {
                let entry = match result.get(key) {
                    Some(existing) => apply_defaults(existing, default_value),
                    None => default_value.clone(),
                };
                result.insert(key.clone(), entry);
            }
            Value::Object(result)
        }
        (Value::Array(items), Value::Object(defaults_map)) => match defaults_map.get("*") {
            Some(item_spec) => Value::Array(
                items
                    .iter()
                    .map(|item| apply_defaults(item, item_spec))
                    .collect(),
            ),
            None => target.clone(),
        },
        _ => target.clone(),
    }
}

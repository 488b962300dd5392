//! Required-item aggregation shared by the launch and tasks mergers
//!
//! Items can be marked required either inline in a fragment
//! (`"required": true`) or through the workspace manifest's per-repo
//! lists. The aggregate entry referencing them is named after the
//! workspace root directory; an existing entry with that exact name is
//! renamed, never deleted.

use serde_json::Value;

/// Suffix applied when a user-authored item collides with the synthetic
/// aggregate name.
const RENAME_SUFFIX: &str = " (Original)";

fn is_required(item: &Value) -> bool {
    item.get("required").and_then(Value::as_bool).unwrap_or(false)
}

fn is_explicitly_not_required(item: &Value) -> bool {
    item.get("required").and_then(Value::as_bool) == Some(false)
}

fn names_with_explicit_opt_out(items: Option<&Vec<Value>>, name_key: &str) -> Vec<String> {
    items
        .into_iter()
        .flatten()
        .filter(|item| is_explicitly_not_required(item))
        .filter_map(|item| item.get(name_key).and_then(Value::as_str))
        .map(String::from)
        .collect()
}

/// Configuration names that explicitly opted out (`"required": false`).
///
/// An explicit opt-out vetoes manifest-driven inclusion by name; only an
/// explicit `true` on the item itself overrides it.
pub fn opted_out_launch_configs(launch: &Value) -> Vec<String> {
    names_with_explicit_opt_out(launch.get("configurations").and_then(Value::as_array), "name")
}

/// Task labels that explicitly opted out (`"required": false`).
pub fn opted_out_task_labels(tasks: &Value) -> Vec<String> {
    names_with_explicit_opt_out(tasks.get("tasks").and_then(Value::as_array), "label")
}

/// Launch-configuration names marked required in a merged launch tree:
/// members of required compounds first, then standalone required
/// configurations, in encounter order.
pub fn required_launch_configs(launch: &Value) -> Vec<String> {
    let mut names = Vec::new();

    if let Some(compounds) = launch.get("compounds").and_then(Value::as_array) {
        for compound in compounds {
            if !is_required(compound) {
                continue;
            }
            if let Some(configs) = compound.get("configurations").and_then(Value::as_array) {
                names.extend(configs.iter().filter_map(Value::as_str).map(String::from));
            }
        }
    }

    if let Some(configs) = launch.get("configurations").and_then(Value::as_array) {
        for config in configs {
            if is_required(config)
                && let Some(name) = config.get("name").and_then(Value::as_str)
            {
                names.push(name.to_string());
            }
        }
    }

    dedup_first_seen(names)
}

/// Task labels marked required in a merged tasks tree.
pub fn required_task_labels(tasks: &Value) -> Vec<String> {
    let mut labels = Vec::new();

    if let Some(items) = tasks.get("tasks").and_then(Value::as_array) {
        for task in items {
            if is_required(task)
                && let Some(label) = task.get("label").and_then(Value::as_str)
            {
                labels.push(label.to_string());
            }
        }
    }

    dedup_first_seen(labels)
}

/// Combine fragment-declared and manifest-declared required names.
///
/// Fragment encounter order takes precedence; manifest names follow in
/// repository declaration order; duplicates collapse to first occurrence.
/// Manifest names vetoed by an explicit `required: false` on the item
/// itself are dropped.
pub fn combine_required(
    from_json: Vec<String>,
    from_manifest: Vec<String>,
    opted_out: &[String],
) -> Vec<String> {
    let filtered_manifest = from_manifest
        .into_iter()
        .filter(|name| !opted_out.contains(name));
    dedup_first_seen(from_json.into_iter().chain(filtered_manifest).collect())
}

fn dedup_first_seen(items: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

/// Rename any existing collection item whose `name_key` equals
/// `reserved`, freeing the name for the synthetic aggregate.
///
/// A name already carrying the rename suffix is left alone, so repeated
/// merge runs can never grow a chain of suffixes.
pub fn rename_conflicting_items(items: &mut [Value], name_key: &str, reserved: &str) {
    for item in items.iter_mut() {
        let matches = item
            .get(name_key)
            .and_then(Value::as_str)
            .is_some_and(|name| name == reserved && !name.ends_with(RENAME_SUFFIX));
        if matches {
            let renamed = format!("{reserved}{RENAME_SUFFIX}");
            tracing::info!(from = reserved, to = %renamed, "renamed conflicting item");
            item[name_key] = Value::String(renamed);
        }
    }
}

/// Title-case a directory name the way the aggregate entries are named:
/// every letter that follows a non-letter is uppercased, the rest are
/// lowercased.
pub fn title_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_alphabetic = false;
    for ch in name.chars() {
        if ch.is_alphabetic() {
            if prev_alphabetic {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            result.push(ch);
            prev_alphabetic = false;
        }
    }
    result
}

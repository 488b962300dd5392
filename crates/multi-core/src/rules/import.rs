//! Rule import engine
//!
//! Aggregates repository-scoped rule fragments into the root rule
//! directory. Previously imported files are removed before every run, so
//! the operation is idempotent and self-cleaning; the set of written
//! filenames is tracked in `.importedrules`.

use std::collections::BTreeMap;
use std::fs;

use multi_fs::{NormalizedPath, WorkspaceLayout, io};

use crate::context::WorkspaceContext;
use crate::rules::rule::{self, Rule};
use crate::{Result, ignore};

/// Remove every file recorded by the previous import run.
///
/// Safe no-op when no tracking file exists.
fn cleanup_previous_imports(ctx: &WorkspaceContext) -> Result<()> {
    let tracking_path = ctx.layout.imported_rules_path();
    if !tracking_path.is_file() {
        return Ok(());
    }

    let rules_dir = ctx.layout.rules_dir();
    let content = io::read_text(&tracking_path)?;
    for name in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let rule_path = rules_dir.join(name);
        if rule_path.exists() {
            io::remove_if_exists(&rule_path)?;
            tracing::debug!(rule = name, "removed previously imported rule");
        }
    }

    io::remove_if_exists(&tracking_path)?;
    Ok(())
}

/// Collect rule fragments per filename across the active repositories.
///
/// Contributors are recorded in repository declaration order; directory
/// entries are sorted so the result never depends on filesystem
/// iteration order.
fn discover_fragments(ctx: &WorkspaceContext) -> Result<BTreeMap<String, Vec<(String, String)>>> {
    let mut fragments: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();

    for repo in ctx.active_repos() {
        let rules_dir = WorkspaceLayout::rules_dir_of(&repo.local_path);
        if !rules_dir.is_dir() {
            continue;
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(rules_dir.to_native())? {
            let entry = entry?;
            if entry.path().is_file()
                && let Some(name) = entry.file_name().to_str()
            {
                names.push(name.to_string());
            }
        }
        names.sort();

        for name in names {
            let content = io::read_text(&rules_dir.join(&name))?;
            fragments
                .entry(name)
                .or_default()
                .push((repo.name.clone(), content));
        }
    }

    Ok(fragments)
}

fn write_imported(
    rules_dir: &NormalizedPath,
    filename: &str,
    content: &str,
    imported: &mut Vec<String>,
) -> Result<()> {
    let destination = rules_dir.join(filename);
    // Cleanup ran first, so a surviving destination means the engine
    // itself is broken.
    assert!(
        !destination.exists(),
        "imported rule destination already exists: {destination}"
    );
    io::write_text(&destination, content)?;
    imported.push(filename.to_string());
    Ok(())
}

fn rescope_with_warning(filename: &str, repo_name: &str, content: &str) -> String {
    if Rule::parse(content).is_none() {
        tracing::warn!(
            rule = filename,
            repo = repo_name,
            "rule has no parseable frontmatter, importing unmodified"
        );
    }
    rule::rescope(content, repo_name)
}

fn suffixed_filename(filename: &str, repo_name: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{repo_name}.{ext}"),
        _ => format!("{filename}-{repo_name}"),
    }
}

/// Import every repository's rule fragments into the root rule directory.
///
/// Same-named fragments with identical content (modulo globs) are merged
/// into one file with a combined glob list; genuinely divergent fragments
/// are written per-repository under a suffixed name. Returns the imported
/// filenames.
pub fn import_rules(ctx: &WorkspaceContext) -> Result<Vec<String>> {
    cleanup_previous_imports(ctx)?;

    let rules_dir = ctx.layout.rules_dir();
    fs::create_dir_all(rules_dir.to_native())?;

    let fragments = discover_fragments(ctx)?;
    let mut imported = Vec::new();

    for (filename, contributors) in &fragments {
        match contributors.as_slice() {
            [(repo_name, content)] => {
                let rescoped = rescope_with_warning(filename, repo_name, content);
                write_imported(&rules_dir, filename, &rescoped, &mut imported)?;
                tracing::info!(rule = %filename, repo = %repo_name, "imported rule");
            }
            many => {
                if let Some(combined) = rule::combine_identical(many) {
                    write_imported(&rules_dir, filename, &combined, &mut imported)?;
                    tracing::info!(rule = %filename, "combined identical rule from multiple repos");
                } else {
                    for (repo_name, content) in many {
                        let rescoped = rescope_with_warning(filename, repo_name, content);
                        let suffixed = suffixed_filename(filename, repo_name);
                        write_imported(&rules_dir, &suffixed, &rescoped, &mut imported)?;
                        tracing::info!(
                            rule = %filename,
                            repo = %repo_name,
                            as_file = %suffixed,
                            "imported diverging rule under suffixed name"
                        );
                    }
                }
            }
        }
    }

    track_imported(ctx, &imported)?;
    Ok(imported)
}

/// Record the written filenames (sorted) and keep them out of the root
/// repository's version control.
fn track_imported(ctx: &WorkspaceContext, imported: &[String]) -> Result<()> {
    let mut sorted: Vec<&str> = imported.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let mut content = sorted.join("\n");
    content.push('\n');
    io::write_text(&ctx.layout.imported_rules_path(), &content)?;

    let mut ignore_entries = vec![".importedrules".to_string()];
    ignore_entries.extend(sorted.iter().map(|name| format!(".cursor/rules/{name}")));
    ignore::append_missing_lines(&ctx.layout.gitignore_path(), &ignore_entries)?;
    ignore::append_missing_lines(&ctx.layout.ignore_path(), &ignore_entries)?;

    Ok(())
}

//! Ignore-file bookkeeping
//!
//! `.gitignore` and `.ignore` are user-owned files: lines are only ever
//! appended, never deduplicated away or removed.

use multi_fs::{NormalizedPath, io};

use crate::Result;

/// Append each line not already present in the file, creating it when
/// missing. Returns the number of lines added.
pub fn append_missing_lines(path: &NormalizedPath, lines: &[String]) -> Result<usize> {
    let mut content = if path.is_file() {
        io::read_text(path)?
    } else {
        String::new()
    };

    let existing: Vec<String> = content.lines().map(|line| line.trim().to_string()).collect();
    let missing: Vec<&String> = lines
        .iter()
        .filter(|line| !existing.contains(&line.trim().to_string()))
        .collect();
    if missing.is_empty() {
        return Ok(0);
    }

    if !content.is_empty() && !content.ends_with('\n') {
        content.push('\n');
    }
    for line in &missing {
        content.push_str(line);
        content.push('\n');
    }

    io::write_text(path, &content)?;
    tracing::debug!(path = %path, added = missing.len(), "updated ignore file");
    Ok(missing.len())
}

//! Fragment reading and merged-document writing

use serde_json::{Map, Value};

use multi_fs::{NormalizedPath, io};

use crate::Result;

/// Read a per-repository configuration fragment.
///
/// A missing file and a malformed file are both treated as an empty
/// fragment; malformed JSON is logged as a warning but never blocks the
/// merge run.
pub fn read_fragment(path: &NormalizedPath) -> Value {
    if !path.is_file() {
        return Value::Object(Map::new());
    }
    let content = match io::read_text(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "could not read fragment, treating as empty");
            return Value::Object(Map::new());
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(path = %path, error = %e, "malformed JSON fragment, treating as empty");
            Value::Object(Map::new())
        }
    }
}

/// Delete the previous merge destination.
///
/// Runs before the merge reads any fragment, so a failed run can never
/// leave a stale artifact that looks current.
pub fn clear_destination(path: &NormalizedPath) -> Result<()> {
    io::remove_if_exists(path)?;
    Ok(())
}

/// Write a merged document as pretty-printed JSON with a trailing newline.
pub fn write_document(path: &NormalizedPath, document: &Value) -> Result<()> {
    let mut content = serde_json::to_string_pretty(document)?;
    content.push('\n');
    io::write_text(path, &content)?;
    tracing::info!(path = %path, "wrote merged document");
    Ok(())
}

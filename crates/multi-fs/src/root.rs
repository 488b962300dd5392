//! Workspace root discovery
//!
//! The workspace root is the first ancestor directory containing the
//! workspace manifest (`multi.json` or `multi.toml`). Every other path in
//! the system is derived from it.

use std::path::Path;

use crate::{Error, NormalizedPath, Result};

/// Manifest file names that anchor a workspace root, in preference order.
pub const MANIFEST_NAMES: [&str; 2] = ["multi.json", "multi.toml"];

/// Find the workspace root by walking upward from `start`.
///
/// Returns the first ancestor directory (including `start` itself) that
/// contains a workspace manifest.
pub fn discover_root(start: &Path) -> Result<NormalizedPath> {
    let canonical = dunce::canonicalize(start).map_err(|e| Error::io(start, e))?;
    let mut current = canonical.as_path();

    loop {
        for name in MANIFEST_NAMES {
            if current.join(name).is_file() {
                tracing::debug!(root = %current.display(), "workspace root found");
                return Ok(NormalizedPath::new(current));
            }
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => {
                return Err(Error::RootNotFound {
                    start: canonical.clone(),
                });
            }
        }
    }
}

/// Locate the manifest file inside a discovered root.
///
/// `multi.json` wins when both formats are present.
pub fn manifest_path(root: &NormalizedPath) -> Option<NormalizedPath> {
    MANIFEST_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

//! Workspace manifest and repository metadata for multi
//!
//! Loads the `multi.json` / `multi.toml` manifest and materializes the
//! declared sibling repositories as immutable `Repository` records.

pub mod error;
pub mod manifest;
pub mod repository;

pub use error::{Error, Result};
pub use manifest::{Manifest, RepoEntry, RepoOptions, VscodeSettings};
pub use repository::{Repository, load_repositories};

//! Filesystem abstraction for the multi workspace synchronizer
//!
//! Provides normalized path handling, atomic file I/O, workspace root
//! discovery, and the derived layout of per-repository and root-level
//! configuration artifacts.

pub mod error;
pub mod io;
pub mod layout;
pub mod path;
pub mod root;

pub use error::{Error, Result};
pub use layout::WorkspaceLayout;
pub use path::NormalizedPath;
pub use root::discover_root;

//! Command implementations

mod branch;
mod sync;

pub use branch::{run_merge_branch, run_set_branch};
pub use sync::{run_sync, run_sync_rules, run_sync_vscode};

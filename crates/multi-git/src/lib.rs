//! Git abstraction for the multi workspace synchronizer
//!
//! Wraps every git invocation behind a small facade with uniform error
//! translation, and drives branch transitions across the root repository
//! and all declared members as one logical operation.

pub mod engine;
pub mod error;
pub mod repo;

pub use engine::MultiRepoBranchEngine;
pub use error::{Error, Result};
pub use repo::{BranchState, GitRepo, clone};

//! Core orchestration for the multi workspace synchronizer
//!
//! Hosts the configuration merge engine, the artifact-specific mergers
//! (launch configurations, tasks, settings), the rule import engine,
//! ignore-file bookkeeping, and the top-level sync pipeline.

pub mod context;
pub mod error;
pub mod ignore;
pub mod merge;
pub mod rules;
pub mod sync;

pub use context::WorkspaceContext;
pub use error::{Error, Result};

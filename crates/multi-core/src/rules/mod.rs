//! Cursor rule fragments and the rule import engine

pub mod import;
pub mod rule;

pub use import::import_rules;
pub use rule::{Rule, RuleFrontmatter};

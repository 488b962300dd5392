//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// multi - Treat a constellation of Git repositories as one workspace
#[derive(Parser, Debug)]
#[command(name = "multi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Synchronize the workspace
    ///
    /// Without a subcommand, performs the complete sync: clones missing
    /// repositories, imports rules, and merges VS Code configurations.
    Sync {
        #[command(subcommand)]
        target: Option<SyncTarget>,
    },

    /// Create and switch to a branch in every repository
    ///
    /// All repositories must have clean working trees; a single dirty
    /// repository aborts before anything is switched.
    SetBranch {
        /// Name of the branch to create and switch to
        name: String,
    },

    /// Merge a source branch into a target branch in every repository
    MergeBranch {
        /// Branch to merge from
        source: String,
        /// Branch to merge into
        target: String,
    },
}

/// Partial sync targets
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum SyncTarget {
    /// Import rule files from all repositories
    Rules,

    /// Merge VS Code configuration files
    Vscode {
        #[command(subcommand)]
        artifact: Option<VscodeArtifact>,
    },
}

/// Individual VS Code artifacts
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum VscodeArtifact {
    /// Merge launch.json files
    Launch,
    /// Merge tasks.json files
    Tasks,
    /// Merge settings.json files
    Settings,
}

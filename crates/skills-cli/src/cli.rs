//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// Skills corpus maintenance - keep rule counts and references honest
#[derive(Parser, Debug)]
#[command(name = "skills")]
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
    /// Synchronize rule counts in README.md and CLAUDE.md
    ///
    /// Counts the rule files per category and rewrites the matching
    /// numeric fields in both summary documents. Missing documents and
    /// unmatched rows are reported and skipped.
    Sync {
        /// Preview changes without applying them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate referential integrity and rule frontmatter
    ///
    /// Checks that every rule file is registered in its SKILL.md, that
    /// every manifest link resolves, and that each rule's metadata
    /// block is well formed. Exits non-zero if any check fails.
    Validate {
        /// Output the report as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

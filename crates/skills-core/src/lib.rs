//! Core library for skills corpus maintenance
//!
//! The corpus is a tree of *skills* (categories), each with a `SKILL.md`
//! manifest and a `rules/` directory of Markdown rule files. This crate
//! provides:
//! - **layout**: path derivation and discovery over the corpus tree
//! - **frontmatter**: metadata-block checks for individual rule files
//! - **sync**: count synchronization for the two summary documents
//! - **validate**: referential integrity and frontmatter validation

mod error;
pub mod frontmatter;
pub mod layout;
pub mod sync;
pub mod validate;

pub use error::{Error, Result};
pub use layout::{CorpusLayout, CATEGORIES};
pub use sync::{CountSyncer, CountUpdate, SummaryDocument, SyncReport, UnmatchedPattern};
pub use validate::{CorpusValidator, ManifestCheck, ValidationReport, Violation};

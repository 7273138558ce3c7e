//! Summary-document count synchronization
//!
//! Two documents cache per-category rule counts:
//! - `README.md`: a table row per category, count in bold
//! - `CLAUDE.md`: a directory-tree line per category, count before the
//!   word "rules"
//!
//! Replacement is surgical: the pattern captures the literal text on
//! both sides of the digit span and only the digits change. Running
//! twice without filesystem changes is a no-op on the second run.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::layout::CATEGORIES;
use crate::{CorpusLayout, Error, Result};

/// Which summary document a pattern targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryDocument {
    /// README table row: `| [**Label**](skills/<cat>/SKILL.md) | **N** |`
    ReadmeTable,
    /// Agent-doc tree line: `<cat>/ ... # N rules`
    AgentTree,
}

impl SummaryDocument {
    /// Build the count pattern for one category
    ///
    /// Group 1 and 2 capture the surrounding literal text; the digit
    /// span between them is the only part replaced.
    fn count_pattern(self, category: &str) -> Result<Regex> {
        let escaped = regex::escape(category);
        let pattern = match self {
            Self::ReadmeTable => {
                format!(r"(\| \[.*?\]\(skills/{escaped}/SKILL\.md\) \| \*\*)\d+(\*\* \|)")
            }
            Self::AgentTree => format!(r"({escaped}/.*?# )\d+( rules)"),
        };
        Regex::new(&pattern).map_err(|source| Error::Pattern {
            category: category.to_string(),
            source,
        })
    }
}

/// A count replacement applied to a summary document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountUpdate {
    pub document: PathBuf,
    pub category: &'static str,
    pub count: usize,
}

/// A category whose expected row or line was not found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmatchedPattern {
    pub document: PathBuf,
    pub category: &'static str,
}

/// Everything a sync run did, skipped, or would do
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Replacements that changed a count
    pub updates: Vec<CountUpdate>,
    /// Categories whose pattern was absent from a document
    pub unmatched: Vec<UnmatchedPattern>,
    /// Summary documents that do not exist
    pub missing: Vec<PathBuf>,
    /// Documents rewritten (or pending under dry-run)
    pub written: Vec<PathBuf>,
}

impl SyncReport {
    /// True iff nothing needed to change
    pub fn up_to_date(&self) -> bool {
        self.written.is_empty()
    }
}

/// Rewrites summary-document counts from the live filesystem
pub struct CountSyncer {
    layout: CorpusLayout,
    dry_run: bool,
}

impl CountSyncer {
    pub fn new(layout: CorpusLayout, dry_run: bool) -> Self {
        Self { layout, dry_run }
    }

    /// Synchronize both summary documents
    ///
    /// The documents are handled independently: a missing README does
    /// not stop the agent document from being updated, and each is
    /// rewritten only when its content actually changed.
    pub fn sync(&self) -> Result<SyncReport> {
        let mut report = SyncReport::default();
        self.sync_document(
            &self.layout.readme_path(),
            SummaryDocument::ReadmeTable,
            &mut report,
        )?;
        self.sync_document(
            &self.layout.agent_doc_path(),
            SummaryDocument::AgentTree,
            &mut report,
        )?;
        Ok(report)
    }

    fn sync_document(
        &self,
        path: &Path,
        document: SummaryDocument,
        report: &mut SyncReport,
    ) -> Result<()> {
        if !path.exists() {
            report.missing.push(path.to_owned());
            return Ok(());
        }
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let mut updated = content.clone();
        for category in CATEGORIES {
            // Missing rules directory: skip the category entirely
            // rather than writing a zero count.
            let Some(count) = self.layout.rule_count(category)? else {
                continue;
            };

            let pattern = document.count_pattern(category)?;
            if !pattern.is_match(&updated) {
                report.unmatched.push(UnmatchedPattern {
                    document: path.to_owned(),
                    category,
                });
                continue;
            }

            let replaced = pattern
                .replace_all(&updated, |caps: &regex::Captures<'_>| {
                    format!("{}{}{}", &caps[1], count, &caps[2])
                })
                .into_owned();
            if replaced != updated {
                updated = replaced;
                report.updates.push(CountUpdate {
                    document: path.to_owned(),
                    category,
                    count,
                });
            }
        }

        if updated != content {
            tracing::debug!(path = %path.display(), dry_run = self.dry_run, "rewriting counts");
            if !self.dry_run {
                fs::write(path, updated).map_err(|e| Error::io(path, e))?;
            }
            report.written.push(path.to_owned());
        }
        Ok(())
    }
}

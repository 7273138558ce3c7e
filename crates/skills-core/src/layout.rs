//! Corpus layout and file discovery
//!
//! The corpus lives under a single root:
//!
//! ```text
//! skills/<category>/SKILL.md     # manifest with "(rules/<name>.md)" links
//! skills/<category>/rules/*.md   # rule files
//! README.md                      # summary table with per-category counts
//! CLAUDE.md                      # directory tree with "# <n> rules" markers
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// The known skill categories, in summary-document order.
pub const CATEGORIES: [&str; 4] = ["nextdns-api", "nextdns-cli", "nextdns-ui", "integrations"];

/// Manifest filename inside each category directory
pub const MANIFEST_NAME: &str = "SKILL.md";

/// Paths and discovery over a corpus rooted at a directory
#[derive(Debug, Clone)]
pub struct CorpusLayout {
    root: PathBuf,
}

impl CorpusLayout {
    /// Create a layout rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The corpus root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `skills/` directory holding all categories
    pub fn skills_dir(&self) -> PathBuf {
        self.root.join("skills")
    }

    /// Path to a category's `SKILL.md` manifest
    pub fn manifest_path(&self, category: &str) -> PathBuf {
        self.skills_dir().join(category).join(MANIFEST_NAME)
    }

    /// Path to a category's `rules/` directory
    pub fn rules_dir(&self, category: &str) -> PathBuf {
        self.skills_dir().join(category).join("rules")
    }

    /// Path to the README summary document
    pub fn readme_path(&self) -> PathBuf {
        self.root.join("README.md")
    }

    /// Path to the agent-instructions summary document
    pub fn agent_doc_path(&self) -> PathBuf {
        self.root.join("CLAUDE.md")
    }

    /// Count the rule files directly inside a category's `rules/` directory
    ///
    /// Non-recursive, `.md` extension only. Returns `None` when the
    /// directory does not exist, so a missing category contributes no
    /// update rather than a zero-count overwrite.
    pub fn rule_count(&self, category: &str) -> Result<Option<usize>> {
        let rules_dir = self.rules_dir(category);
        if !rules_dir.is_dir() {
            return Ok(None);
        }
        Ok(Some(self.rule_files_in(&rules_dir)?.len()))
    }

    /// List the `.md` files directly inside a directory, sorted by name
    pub fn rule_files_in(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|e| e == "md") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Find every `SKILL.md` manifest under `skills/`, at any depth
    ///
    /// Returns an empty list when the skills directory does not exist.
    pub fn find_manifests(&self) -> Result<Vec<PathBuf>> {
        let mut manifests = Vec::new();
        walk(&self.skills_dir(), &mut |path| {
            if path.file_name().is_some_and(|n| n == MANIFEST_NAME) {
                manifests.push(path.to_owned());
            }
        })?;
        manifests.sort();
        Ok(manifests)
    }

    /// Find every rule file under `skills/`: any `.md` file directly
    /// inside a directory named `rules`, at any depth
    pub fn find_rule_files(&self) -> Result<Vec<PathBuf>> {
        let mut rules = Vec::new();
        walk(&self.skills_dir(), &mut |path| {
            let in_rules_dir = path
                .parent()
                .and_then(Path::file_name)
                .is_some_and(|n| n == "rules");
            if in_rules_dir && path.extension().is_some_and(|e| e == "md") {
                rules.push(path.to_owned());
            }
        })?;
        rules.sort();
        Ok(rules)
    }
}

/// Depth-first walk calling `visit` for every file under `dir`
///
/// A nonexistent directory is treated as empty.
fn walk(dir: &Path, visit: &mut impl FnMut(&Path)) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, visit)?;
        } else {
            visit(&path);
        }
    }
    Ok(())
}

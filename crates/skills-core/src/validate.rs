//! Corpus validation
//!
//! Two independent check families, both always run in full:
//! - **referential integrity**: every rule file on disk is linked from
//!   its category manifest, and every manifest link resolves to a file
//! - **frontmatter**: every rule file has a well-formed metadata block
//!
//! Violations are collected, never raised; the report carries the
//! combined verdict.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::frontmatter;
use crate::{CorpusLayout, Error, Result};

/// Manifest link target: `[label](rules/<name>.md)`
static RULE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]\(rules/(.*?\.md)\)").unwrap());

/// A single corpus violation
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// A rule file exists on disk but its manifest has no link to it
    UnregisteredRule { manifest: PathBuf, rule: String },
    /// A manifest links a rule file that does not exist
    DanglingReference { manifest: PathBuf, target: PathBuf },
    /// Rule file does not begin with the metadata marker
    MissingFrontmatter { rule: PathBuf },
    /// Metadata block opened but never closed
    UnterminatedFrontmatter { rule: PathBuf },
    /// A required metadata field is absent
    MissingField { rule: PathBuf, field: String },
    /// `impact` value outside HIGH/MEDIUM/LOW
    InvalidImpact { rule: PathBuf, value: String },
    /// `type` value outside capability/efficiency
    InvalidType { rule: PathBuf, value: String },
    /// `tags` given as a quoted scalar instead of a list
    InvalidTags { rule: PathBuf },
    /// No descriptive content after the first heading
    MissingDescription { rule: PathBuf },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnregisteredRule { manifest, rule } => write!(
                f,
                "Rule '{}' exists but is not registered in {}",
                rule,
                manifest.display()
            ),
            Self::DanglingReference { manifest, target } => write!(
                f,
                "Rule referenced in {} does not exist: {}",
                manifest.display(),
                target.display()
            ),
            Self::MissingFrontmatter { rule } => {
                write!(f, "No frontmatter in {}", rule.display())
            }
            Self::UnterminatedFrontmatter { rule } => {
                write!(f, "Invalid frontmatter format in {}", rule.display())
            }
            Self::MissingField { rule, field } => {
                write!(f, "Missing field '{}' in {}", field, rule.display())
            }
            Self::InvalidImpact { rule, value } => write!(
                f,
                "Invalid impact '{}' in {} (must be HIGH, MEDIUM, or LOW)",
                value,
                rule.display()
            ),
            Self::InvalidType { rule, value } => write!(
                f,
                "Invalid type '{}' in {} (must be capability or efficiency)",
                value,
                rule.display()
            ),
            Self::InvalidTags { rule } => write!(
                f,
                "Invalid tags format in {}: tags must be a list, not a string",
                rule.display()
            ),
            Self::MissingDescription { rule } => {
                write!(f, "Missing description after H1 in {}", rule.display())
            }
        }
    }
}

/// Integrity results for one manifest
#[derive(Debug, Serialize)]
pub struct ManifestCheck {
    /// Path to the manifest file
    pub manifest: PathBuf,
    /// Category directory name owning the manifest
    pub skill: String,
    /// Rule files found on disk and linked from the manifest
    pub registered: Vec<String>,
    /// Manifest link targets that resolve to an existing file
    pub resolved: Vec<String>,
    /// Integrity violations for this manifest
    pub violations: Vec<Violation>,
}

/// Combined validation results for the whole corpus
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    /// Per-manifest integrity results
    pub manifests: Vec<ManifestCheck>,
    /// Frontmatter violations across all rule files
    pub frontmatter: Vec<Violation>,
    /// Number of rule files inspected for frontmatter
    pub rules_checked: usize,
}

impl ValidationReport {
    /// True iff the integrity checks found nothing
    pub fn integrity_passed(&self) -> bool {
        self.manifests.iter().all(|m| m.violations.is_empty())
    }

    /// True iff the frontmatter checks found nothing
    pub fn frontmatter_passed(&self) -> bool {
        self.frontmatter.is_empty()
    }

    /// True iff the whole corpus is clean
    pub fn passed(&self) -> bool {
        self.integrity_passed() && self.frontmatter_passed()
    }

    /// Total violation count across both check families
    pub fn violation_count(&self) -> usize {
        self.manifests
            .iter()
            .map(|m| m.violations.len())
            .sum::<usize>()
            + self.frontmatter.len()
    }
}

/// Read-only validator over a corpus layout
pub struct CorpusValidator {
    layout: CorpusLayout,
}

impl CorpusValidator {
    pub fn new(layout: CorpusLayout) -> Self {
        Self { layout }
    }

    /// Run both check families and return the combined report
    ///
    /// Neither family short-circuits the other; a broken manifest still
    /// gets its rule files frontmatter-checked and vice versa.
    pub fn validate(&self) -> Result<ValidationReport> {
        let manifests = self.check_integrity()?;
        let (frontmatter, rules_checked) = self.check_frontmatter()?;
        Ok(ValidationReport {
            manifests,
            frontmatter,
            rules_checked,
        })
    }

    /// Referential integrity for every manifest under the corpus
    pub fn check_integrity(&self) -> Result<Vec<ManifestCheck>> {
        let mut checks = Vec::new();
        for manifest in self.layout.find_manifests()? {
            checks.push(self.check_manifest(&manifest)?);
        }
        Ok(checks)
    }

    fn check_manifest(&self, manifest: &Path) -> Result<ManifestCheck> {
        let skill_dir = manifest.parent().unwrap_or(Path::new(""));
        let rules_dir = skill_dir.join("rules");
        let content = fs::read_to_string(manifest).map_err(|e| Error::io(manifest, e))?;

        let skill = skill_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::debug!(skill = %skill, "checking manifest");

        let mut check = ManifestCheck {
            manifest: manifest.to_owned(),
            skill,
            registered: Vec::new(),
            resolved: Vec::new(),
            violations: Vec::new(),
        };

        // Forward: every rule file on disk must appear as a manifest
        // link. Literal substring match on "(rules/<name>)", exactly as
        // contributors write the links.
        if rules_dir.is_dir() {
            for rule_file in self.layout.rule_files_in(&rules_dir)? {
                let name = rule_file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let stem = rule_file
                    .file_stem()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if content.contains(&format!("(rules/{name})")) {
                    check.registered.push(stem);
                } else {
                    check.violations.push(Violation::UnregisteredRule {
                        manifest: manifest.to_owned(),
                        rule: stem,
                    });
                }
            }
        }

        // Backward: every link target must exist on disk. Runs even
        // when the rules directory is absent, so each link is reported
        // as dangling.
        for caps in RULE_LINK.captures_iter(&content) {
            let target = rules_dir.join(&caps[1]);
            if target.exists() {
                check.resolved.push(caps[1].to_string());
            } else {
                check.violations.push(Violation::DanglingReference {
                    manifest: manifest.to_owned(),
                    target,
                });
            }
        }

        Ok(check)
    }

    /// Frontmatter checks for every rule file under the corpus
    ///
    /// Returns the violations and the number of files inspected.
    pub fn check_frontmatter(&self) -> Result<(Vec<Violation>, usize)> {
        let rule_files = self.layout.find_rule_files()?;
        let mut violations = Vec::new();
        for rule_file in &rule_files {
            let content = fs::read_to_string(rule_file).map_err(|e| Error::io(rule_file, e))?;
            violations.extend(frontmatter::check_rule(rule_file, &content));
        }
        Ok((violations, rule_files.len()))
    }
}

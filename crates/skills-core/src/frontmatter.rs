//! Rule file metadata-block checks
//!
//! Every rule file opens with a `---`-delimited metadata block of
//! `key: value` lines, followed by a top-level heading and a
//! description body. Checks are line-anchored key matches, not a
//! general YAML parse: only the fields and shapes below are enforced.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::validate::Violation;

/// Delimiter opening and closing the metadata block
pub const MARKER: &str = "---";

/// Fields every rule file must declare
pub const REQUIRED_FIELDS: [&str; 5] = ["title", "impact", "impactDescription", "type", "tags"];

/// Valid values for the `impact` field
pub const IMPACT_LEVELS: [&str; 3] = ["HIGH", "MEDIUM", "LOW"];

/// Valid values for the `type` field
pub const RULE_TYPES: [&str; 2] = ["capability", "efficiency"];

/// Line-anchored presence pattern per required field
static FIELD_LINES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    REQUIRED_FIELDS
        .iter()
        .map(|field| (*field, Regex::new(&format!(r"(?m)^{field}:")).unwrap()))
        .collect()
});

static IMPACT_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^impact:\s*(.*)").unwrap());

static TYPE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^type:\s*(.*)").unwrap());

/// A quoted scalar where a tag list is expected
static QUOTED_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^tags:\s*'(.*)'").unwrap());

static H1_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+.*").unwrap());

/// Check one rule file's metadata block and body structure
///
/// Returns every violation found; a file can accumulate several.
/// Checks after a missing or unterminated block are skipped since the
/// segments they inspect do not exist.
pub fn check_rule(path: &Path, content: &str) -> Vec<Violation> {
    let mut violations = Vec::new();

    if !content.starts_with(MARKER) {
        violations.push(Violation::MissingFrontmatter {
            rule: path.to_owned(),
        });
        return violations;
    }

    let segments: Vec<&str> = content.splitn(3, MARKER).collect();
    if segments.len() < 3 {
        violations.push(Violation::UnterminatedFrontmatter {
            rule: path.to_owned(),
        });
        return violations;
    }
    let frontmatter = segments[1];
    let body = segments[2];

    for (field, pattern) in FIELD_LINES.iter() {
        if !pattern.is_match(frontmatter) {
            violations.push(Violation::MissingField {
                rule: path.to_owned(),
                field: (*field).to_string(),
            });
        }
    }

    if let Some(caps) = IMPACT_LINE.captures(frontmatter) {
        let value = caps[1].trim();
        if !IMPACT_LEVELS.contains(&value) {
            violations.push(Violation::InvalidImpact {
                rule: path.to_owned(),
                value: value.to_string(),
            });
        }
    }

    if let Some(caps) = TYPE_LINE.captures(frontmatter) {
        let value = caps[1].trim();
        if !RULE_TYPES.contains(&value) {
            violations.push(Violation::InvalidType {
                rule: path.to_owned(),
                value: value.to_string(),
            });
        }
    }

    if QUOTED_TAGS.is_match(frontmatter) {
        violations.push(Violation::InvalidTags {
            rule: path.to_owned(),
        });
    }

    // A heading with nothing after it means the rule has no description.
    // A body with no heading at all is left to the author.
    let body = body.trim();
    if let Some(heading) = H1_LINE.find(body) {
        if body[heading.end()..].trim().is_empty() {
            violations.push(Violation::MissingDescription {
                rule: path.to_owned(),
            });
        }
    }

    violations
}

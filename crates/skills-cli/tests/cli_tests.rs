//! Integration tests for the skills binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the skills binary
fn skills_cmd() -> Command {
    Command::cargo_bin("skills").expect("Failed to find skills binary")
}

const VALID_RULE: &str = "---\n\
title: Sample\n\
impact: HIGH\n\
impactDescription: Big win\n\
type: capability\n\
tags:\n\
  - sample\n\
---\n\
# Sample\n\
\n\
A sample rule.\n";

fn create_skill(root: &Path, category: &str, rules: &[&str], links: &[&str]) {
    let skill_dir = root.join("skills").join(category);
    let rules_dir = skill_dir.join("rules");
    fs::create_dir_all(&rules_dir).unwrap();
    for rule in rules {
        fs::write(rules_dir.join(rule), VALID_RULE).unwrap();
    }
    let body: String = links
        .iter()
        .map(|r| format!("- [{r}](rules/{r})\n"))
        .collect();
    fs::write(skill_dir.join("SKILL.md"), format!("# {category}\n\n{body}")).unwrap();
}

// ============================================================================
// validate Command Tests
// ============================================================================

#[test]
fn test_validate_clean_corpus_exits_zero() {
    let temp = TempDir::new().unwrap();
    create_skill(temp.path(), "nextdns-api", &["a.md"], &["a.md"]);

    skills_cmd()
        .current_dir(temp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("All validations passed"));
}

#[test]
fn test_validate_dangling_reference_exits_nonzero() {
    let temp = TempDir::new().unwrap();
    create_skill(temp.path(), "nextdns-api", &["a.md"], &["a.md", "foo.md"]);

    skills_cmd()
        .current_dir(temp.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("foo.md"))
        .stdout(predicate::str::contains("does not exist"));
}

#[test]
fn test_validate_unregistered_rule_exits_nonzero() {
    let temp = TempDir::new().unwrap();
    create_skill(temp.path(), "nextdns-cli", &["a.md", "orphan.md"], &["a.md"]);

    skills_cmd()
        .current_dir(temp.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("orphan"))
        .stdout(predicate::str::contains("not registered"));
}

#[test]
fn test_validate_bad_frontmatter_exits_nonzero() {
    let temp = TempDir::new().unwrap();
    create_skill(temp.path(), "integrations", &["a.md"], &["a.md"]);
    let rule = temp.path().join("skills/integrations/rules/a.md");
    fs::write(&rule, VALID_RULE.replace("impact: HIGH", "impact: CRITICAL")).unwrap();

    skills_cmd()
        .current_dir(temp.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid impact 'CRITICAL'"));
}

#[test]
fn test_validate_json_output_parses() {
    let temp = TempDir::new().unwrap();
    create_skill(temp.path(), "nextdns-api", &["a.md"], &["a.md"]);

    let output = skills_cmd()
        .current_dir(temp.path())
        .args(["validate", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["rules_checked"], 1);
    assert!(report["frontmatter"].as_array().unwrap().is_empty());
}

// ============================================================================
// sync Command Tests
// ============================================================================

#[test]
fn test_sync_updates_counts() {
    let temp = TempDir::new().unwrap();
    create_skill(
        temp.path(),
        "integrations",
        &["a.md", "b.md", "c.md"],
        &["a.md", "b.md", "c.md"],
    );
    fs::write(
        temp.path().join("README.md"),
        "| [**Integrations**](skills/integrations/SKILL.md) | **2** |\n",
    )
    .unwrap();

    skills_cmd()
        .current_dir(temp.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("count set to 3"));

    let content = fs::read_to_string(temp.path().join("README.md")).unwrap();
    assert!(content.contains("**3**"));
}

#[test]
fn test_sync_missing_documents_still_succeeds() {
    let temp = TempDir::new().unwrap();
    create_skill(temp.path(), "nextdns-ui", &["a.md"], &["a.md"]);

    skills_cmd()
        .current_dir(temp.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("not found, skipped"));
}

#[test]
fn test_sync_dry_run_does_not_write() {
    let temp = TempDir::new().unwrap();
    create_skill(temp.path(), "integrations", &["a.md"], &["a.md"]);
    let readme = "| [**Integrations**](skills/integrations/SKILL.md) | **9** |\n";
    fs::write(temp.path().join("README.md"), readme).unwrap();

    skills_cmd()
        .current_dir(temp.path())
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would be updated"));

    let content = fs::read_to_string(temp.path().join("README.md")).unwrap();
    assert_eq!(content, readme);
}

#[test]
fn test_no_command_shows_hint() {
    skills_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("skills --help"));
}

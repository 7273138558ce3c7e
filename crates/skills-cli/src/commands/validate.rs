//! Validate command implementation
//!
//! Read-only: prints per-skill integrity results, then frontmatter
//! results, then a combined banner. Exit status is the contract: zero
//! iff every check passed.

use std::path::Path;

use colored::Colorize;

use skills_core::{CorpusLayout, CorpusValidator, ValidationReport};

use crate::error::{CliError, Result};

/// Run the validate command
pub fn run_validate(path: &Path, json: bool) -> Result<()> {
    let layout = CorpusLayout::new(path);
    let validator = CorpusValidator::new(layout);
    let report = validator.validate()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.passed() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "Validation failed with {} error(s)",
            report.violation_count()
        )))
    }
}

fn print_report(report: &ValidationReport) {
    println!("{} Checking referential integrity...", "=>".blue().bold());
    for check in &report.manifests {
        println!();
        println!("Skill: {}", check.skill.cyan().bold());
        for stem in &check.registered {
            println!("   {} {}", "+".green(), stem);
        }
        for target in &check.resolved {
            println!("   {} {}", "+".green(), target);
        }
        for violation in &check.violations {
            println!("   {} {}", "!".red(), violation);
        }
    }

    println!();
    println!(
        "{} Validating rule frontmatter ({} file(s))...",
        "=>".blue().bold(),
        report.rules_checked
    );
    for violation in &report.frontmatter {
        println!("   {} {}", "!".red(), violation);
    }

    println!();
    if report.passed() {
        println!("{} All validations passed.", "OK".green().bold());
    } else {
        println!(
            "{} Validation failed: {} error(s). Fix the issues above.",
            "ERROR".red().bold(),
            report.violation_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VALID_RULE: &str = "---\n\
title: Sample\n\
impact: LOW\n\
impactDescription: Minor\n\
type: capability\n\
tags:\n\
  - sample\n\
---\n\
# Sample\n\
\n\
A sample rule.\n";

    fn create_skill(dir: &Path, category: &str, rules: &[&str], links: &[&str]) {
        let skill_dir = dir.join("skills").join(category);
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

    #[test]
    fn test_validate_clean_corpus_ok() {
        let temp = TempDir::new().unwrap();
        create_skill(temp.path(), "nextdns-api", &["a.md"], &["a.md"]);

        assert!(run_validate(temp.path(), false).is_ok());
    }

    #[test]
    fn test_validate_dangling_reference_fails() {
        let temp = TempDir::new().unwrap();
        create_skill(temp.path(), "nextdns-api", &["a.md"], &["a.md", "foo.md"]);

        let result = run_validate(temp.path(), false);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("1 error(s)"));
    }

    #[test]
    fn test_validate_json_output_fails_with_violations() {
        let temp = TempDir::new().unwrap();
        create_skill(temp.path(), "nextdns-cli", &["orphan.md"], &[]);

        assert!(run_validate(temp.path(), true).is_err());
    }

    #[test]
    fn test_validate_empty_corpus_ok() {
        let temp = TempDir::new().unwrap();
        assert!(run_validate(temp.path(), false).is_ok());
    }
}

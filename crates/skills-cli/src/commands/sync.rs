//! Sync command implementation
//!
//! Rewrites the per-category rule counts cached in README.md and
//! CLAUDE.md from the live filesystem. Skipped targets never fail the
//! run; only real I/O errors do.

use std::path::Path;

use colored::Colorize;

use skills_core::{CorpusLayout, CountSyncer};

use crate::error::Result;

/// Run the sync command
pub fn run_sync(path: &Path, dry_run: bool) -> Result<()> {
    println!("{} Synchronizing rule counts...", "=>".blue().bold());

    let layout = CorpusLayout::new(path);
    let syncer = CountSyncer::new(layout, dry_run);
    let report = syncer.sync()?;

    for update in &report.updates {
        println!(
            "   {} {}: {} count set to {}",
            "+".green(),
            update.document.display().to_string().cyan(),
            update.category,
            update.count
        );
    }
    for unmatched in &report.unmatched {
        println!(
            "   {} Pattern for {} not found in {}",
            "-".yellow(),
            unmatched.category,
            unmatched.document.display()
        );
    }
    for missing in &report.missing {
        println!(
            "   {} {} not found, skipped",
            "-".yellow(),
            missing.display()
        );
    }

    if report.up_to_date() {
        println!("{} Counts already up to date. No changes needed.", "OK".green().bold());
    } else if dry_run {
        println!(
            "{} {} document(s) would be updated. Re-run without {} to apply.",
            "OK".green().bold(),
            report.written.len(),
            "--dry-run".cyan()
        );
    } else {
        for written in &report.written {
            println!("{} {} updated.", "OK".green().bold(), written.display());
        }
    }

    Ok(())
}

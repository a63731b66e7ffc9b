//! Commit chain verification command.

use anyhow::{bail, Result};
use console::style;
use std::path::Path;
use trk_core::Repository;

/// Verify the commit chain; fails when any issue is found.
pub fn run(root: &Path) -> Result<()> {
    let repo = Repository::open(root)?;
    let report = repo.verify();

    println!("{}", style("Verification Report:").bold());
    println!(
        "  Commits checked:    {}",
        style(report.commits_checked).cyan()
    );

    if !report.has_issues() {
        println!();
        println!(
            "{} {}",
            style("✓").green(),
            style(&report.summary()).green()
        );
        return Ok(());
    }

    println!(
        "  Issues found:       {}",
        style(report.issues.len()).red()
    );
    for issue in &report.issues {
        println!("    {} {}", style("×").red(), issue);
    }
    println!();
    println!("{}", style(&report.summary()).yellow().bold());

    bail!("commit history failed verification")
}

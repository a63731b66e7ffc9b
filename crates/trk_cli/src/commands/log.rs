//! Commit history display.

use anyhow::Result;
use console::style;
use std::path::Path;
use trk_core::{abbreviate, CommitRecord, Repository};

/// Print history newest first.
///
/// `limit` overrides `log.max_count` from the config.
pub fn run(root: &Path, limit: Option<usize>, oneline: bool) -> Result<()> {
    let repo = Repository::open(root)?;
    let limit = limit.or_else(|| repo.config().log.limit());

    let commits = repo.history(limit);
    if commits.is_empty() {
        println!("No commits yet");
        return Ok(());
    }

    let abbrev = repo.config().log.abbrev;
    for commit in &commits {
        if oneline {
            print_oneline(commit, abbrev);
        } else {
            print_medium(commit);
        }
    }

    Ok(())
}

fn print_medium(commit: &CommitRecord) {
    println!("{}", style(format!("commit {}", commit.commit_id)).yellow());
    println!("Date: {}", commit.commit_timestamp);
    println!();
    println!("    {}", commit.commit_message);
    println!();
}

fn print_oneline(commit: &CommitRecord, abbrev: usize) {
    let subject = commit.commit_message.lines().next().unwrap_or_default();
    println!(
        "{} {}",
        style(abbreviate(&commit.commit_id, abbrev)).yellow(),
        subject
    );
}

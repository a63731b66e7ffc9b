//! Stage files for the next commit.

use crate::resolve::resolve_paths;
use anyhow::Result;
use console::style;
use std::path::Path;
use tracing::debug;
use trk_core::{Repository, StageOutcome};

/// Expand `args` and stage every resulting file.
///
/// Unreadable files are reported as warnings; they never fail the command.
pub fn run(root: &Path, args: &[String]) -> Result<()> {
    let repo = Repository::open(root)?;

    let paths = resolve_paths(root, args);
    if paths.is_empty() {
        println!("No files to add.");
        return Ok(());
    }

    let report = repo.stage(&paths)?;

    for outcome in &report.outcomes {
        match outcome {
            StageOutcome::Added(path) => println!("Added: {}", path),
            StageOutcome::Updated(path) => println!("Updated: {}", path),
            StageOutcome::Skipped(path) => debug!(path = %path, "skipped metadata path"),
            StageOutcome::Warned { path, reason } => eprintln!(
                "{} could not read {}: {}",
                style("Warning:").yellow(),
                path,
                reason
            ),
        }
    }

    if report.is_empty() {
        println!("No files to add.");
    }

    Ok(())
}

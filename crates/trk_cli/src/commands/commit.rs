//! Commit command for snapshotting the staging area.

use anyhow::Result;
use std::path::Path;
use trk_core::Repository;

/// Commit everything staged with `message`.
pub fn run(root: &Path, message: &str) -> Result<()> {
    let repo = Repository::open(root)?;
    let record = repo.commit(message)?;

    println!("Committed {} files", record.files.len());
    println!("Commit ID: {}", record.commit_id);
    println!("Message: {}", record.commit_message);

    Ok(())
}

//! Staging area listing.

use anyhow::Result;
use console::style;
use std::path::Path;
use trk_core::{abbreviate, Repository};

pub fn run(root: &Path) -> Result<()> {
    let repo = Repository::open(root)?;
    let staged = repo.staged();

    if staged.is_empty() {
        println!("Nothing staged.");
        return Ok(());
    }

    let abbrev = repo.config().log.abbrev;
    println!("Changes to be committed:");
    for entry in &staged {
        println!(
            "  {}  {}",
            style(abbreviate(&entry.file_hash, abbrev)).dim(),
            style(&entry.file_path).green()
        );
    }

    Ok(())
}

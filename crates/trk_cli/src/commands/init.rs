//! Initialize a new trk repository.

use anyhow::{Context, Result};
use std::path::Path;
use trk_core::{Repository, TrkError, CONFIG_FILE, DOCUMENT_FILE};

/// Initialize a repository under `root`. Re-running on an existing one is not an error.
pub fn run(root: &Path) -> Result<()> {
    match Repository::init(root) {
        Ok(repo) => {
            let trk_dir = repo.trk_dir();
            println!("Repository initialized successfully");
            println!();
            println!(
                "  {}  - Staging area and commit history",
                trk_dir.join(DOCUMENT_FILE).display()
            );
            println!(
                "  {}    - Repository settings",
                trk_dir.join(CONFIG_FILE).display()
            );
            Ok(())
        }
        Err(TrkError::AlreadyInitialized(_)) => {
            println!("Repository already initialized");
            Ok(())
        }
        Err(e) => Err(e).context("Failed to initialize trk repository"),
    }
}

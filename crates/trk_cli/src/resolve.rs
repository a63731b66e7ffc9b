//! Expansion of `trk add` arguments into concrete file paths.
//!
//! Each argument is tried as a glob pattern first and used literally when it
//! matches nothing. Directories are walked down to regular files, skipping the
//! metadata directory. Paths that don't exist are passed through so the core
//! can report them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use trk_core::METADATA_DIR;
use walkdir::WalkDir;

/// Expands `args` relative to `root`, deduplicated in first-seen order.
pub fn resolve_paths(root: &Path, args: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut resolved = Vec::new();

    for arg in args {
        for path in expand_arg(root, arg) {
            if seen.insert(path.clone()) {
                resolved.push(path);
            }
        }
    }

    resolved
}

fn expand_arg(root: &Path, arg: &str) -> Vec<String> {
    let matches = glob_matches(root, arg);
    let candidates = if matches.is_empty() {
        vec![PathBuf::from(arg)]
    } else {
        matches
    };

    candidates
        .into_iter()
        .flat_map(|candidate| expand_dir(root, candidate))
        .filter_map(|path| match path.to_str() {
            Some(s) => Some(s.to_string()),
            None => {
                warn!(path = %path.display(), "skipping non UTF-8 path");
                None
            }
        })
        .collect()
}

fn glob_matches(root: &Path, arg: &str) -> Vec<PathBuf> {
    let pattern = root.join(arg);
    let Some(pattern) = pattern.to_str() else {
        return Vec::new();
    };

    match glob::glob(pattern) {
        Ok(paths) => paths
            .filter_map(|entry| entry.ok())
            .map(|path| relative_to(root, &path))
            .collect(),
        Err(e) => {
            debug!(pattern = arg, error = %e, "not a glob pattern, using literally");
            Vec::new()
        }
    }
}

/// Walks directories down to regular files; anything else is returned as is.
fn expand_dir(root: &Path, candidate: PathBuf) -> Vec<PathBuf> {
    let full = root.join(&candidate);
    if !full.is_dir() {
        return vec![candidate];
    }

    WalkDir::new(&full)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != METADATA_DIR)
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| relative_to(root, entry.path()))
        .collect()
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

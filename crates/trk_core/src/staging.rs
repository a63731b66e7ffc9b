//! Staging area management.

use crate::digest::hash_file;
use crate::types::{RepositoryDocument, StagingEntry};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Name of the metadata directory that staging never tracks.
pub const METADATA_DIR: &str = ".trk";

/// What happened to one path during a stage call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Path had no entry and was appended.
    Added(String),
    /// Path already had an entry, which was replaced at its original index.
    Updated(String),
    /// Path lies inside the metadata directory and was ignored.
    Skipped(String),
    /// File could not be hashed; the path was left out of the staging area.
    Warned {
        /// Path as supplied.
        path: String,
        /// Description of the I/O failure.
        reason: String,
    },
}

/// Per-path results of a stage call, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    /// Outcome for each distinct input path.
    pub outcomes: Vec<StageOutcome>,
}

impl StageReport {
    /// Number of paths that were added or updated.
    pub fn staged_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, StageOutcome::Added(_) | StageOutcome::Updated(_)))
            .count()
    }

    /// Returns `(path, reason)` for every path that could not be hashed.
    pub fn warnings(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                StageOutcome::Warned { path, reason } => Some((path.as_str(), reason.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Returns true if nothing was added or updated.
    pub fn is_empty(&self) -> bool {
        self.staged_count() == 0
    }
}

/// Stages `paths` into `doc.staging_area`.
///
/// Relative paths are hashed relative to `root` but recorded exactly as
/// supplied. Duplicate input paths are processed once, in first-seen order.
/// Unreadable files become [`StageOutcome::Warned`] and do not abort the batch.
pub fn stage<S: AsRef<str>>(
    doc: &mut RepositoryDocument,
    root: &Path,
    paths: &[S],
) -> StageReport {
    let mut report = StageReport::default();
    let mut seen = HashSet::new();
    let root = resolve(root);

    for path in paths.iter().map(AsRef::as_ref) {
        if !seen.insert(path) {
            continue;
        }

        if within_metadata_dir(&root, path) {
            debug!(path, "skipping path inside metadata directory");
            report.outcomes.push(StageOutcome::Skipped(path.to_string()));
            continue;
        }

        let digest = match hash_file(root.join(path)) {
            Ok(digest) => digest,
            Err(e) => {
                warn!(path, error = %e, "could not hash file, skipping");
                report.outcomes.push(StageOutcome::Warned {
                    path: path.to_string(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let entry = StagingEntry::new(path, digest.as_hex());
        report.outcomes.push(upsert(&mut doc.staging_area, entry));
    }

    report
}

/// Replaces the entry with the same path in place, or appends it.
fn upsert(staging_area: &mut Vec<StagingEntry>, entry: StagingEntry) -> StageOutcome {
    match staging_area
        .iter_mut()
        .find(|existing| existing.file_path == entry.file_path)
    {
        Some(existing) => {
            let path = entry.file_path.clone();
            *existing = entry;
            StageOutcome::Updated(path)
        }
        None => {
            let path = entry.file_path.clone();
            staging_area.push(entry);
            StageOutcome::Added(path)
        }
    }
}

/// Returns true if `path` is the metadata directory or lies beneath it.
///
/// `path` is resolved against `root` first, so absolute paths, `..` segments
/// and symlinked parents are all caught.
pub fn is_metadata_path(root: &Path, path: &str) -> bool {
    within_metadata_dir(&resolve(root), path)
}

/// `root` must already be resolved.
fn within_metadata_dir(root: &Path, path: &str) -> bool {
    resolve(&root.join(path)).starts_with(root.join(METADATA_DIR))
}

/// Canonical form of `path` when it exists, lexically normalized otherwise.
fn resolve(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| normalize(path))
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

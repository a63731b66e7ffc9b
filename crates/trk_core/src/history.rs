//! Reading and verifying commit history.

use crate::digest::{hash_commit, Digest};
use crate::types::{CommitRecord, RepositoryDocument};
use std::collections::HashSet;
use std::fmt;

/// Returns the commits newest first.
pub fn list_history(doc: &RepositoryDocument) -> Vec<&CommitRecord> {
    doc.commit_history.iter().rev().collect()
}

/// A single inconsistency found while walking the commit chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainIssue {
    /// The first commit names a parent.
    RootHasParent {
        /// Offending commit id.
        commit_id: String,
    },
    /// A commit's parent is not the commit stored right before it.
    BrokenLink {
        /// Offending commit id.
        commit_id: String,
        /// Parent the chain requires.
        expected: String,
        /// Parent the record names.
        actual: String,
    },
    /// The stored id differs from the hash of the record's fields.
    IdMismatch {
        /// Stored id.
        commit_id: String,
        /// Recomputed id.
        computed: String,
    },
    /// The same id appears more than once.
    DuplicateId {
        /// Repeated commit id.
        commit_id: String,
    },
    /// A file hash inside a commit is not a 40-hex digest.
    InvalidFileHash {
        /// Commit containing the entry.
        commit_id: String,
        /// Path of the entry.
        file_path: String,
    },
}

impl fmt::Display for ChainIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootHasParent { commit_id } => {
                write!(f, "root commit {} has a parent", commit_id)
            }
            Self::BrokenLink {
                commit_id,
                expected,
                actual,
            } => write!(
                f,
                "commit {} has parent {:?}, expected {:?}",
                commit_id, actual, expected
            ),
            Self::IdMismatch {
                commit_id,
                computed,
            } => write!(f, "commit {} hashes to {}", commit_id, computed),
            Self::DuplicateId { commit_id } => write!(f, "commit {} appears twice", commit_id),
            Self::InvalidFileHash {
                commit_id,
                file_path,
            } => write!(
                f,
                "commit {} has an invalid hash for {}",
                commit_id, file_path
            ),
        }
    }
}

/// Report from chain verification.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// Number of commits walked.
    pub commits_checked: usize,

    /// Everything that was wrong, in history order.
    pub issues: Vec<ChainIssue>,
}

impl VerifyReport {
    /// Returns true if any issues were found.
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Returns a summary message.
    pub fn summary(&self) -> String {
        if self.has_issues() {
            format!(
                "History has issues: {} problem(s) across {} commit(s)",
                self.issues.len(),
                self.commits_checked
            )
        } else {
            format!(
                "History is intact. {} commit(s) checked.",
                self.commits_checked
            )
        }
    }
}

/// Walks `commit_history` oldest first and checks every link and id.
pub fn verify_chain(doc: &RepositoryDocument) -> VerifyReport {
    let mut report = VerifyReport::default();
    let mut seen = HashSet::new();
    let mut expected_parent = "";

    for (index, record) in doc.commit_history.iter().enumerate() {
        report.commits_checked += 1;
        let id = record.commit_id.as_str();

        if record.parent_commit_id != expected_parent {
            report.issues.push(if index == 0 {
                ChainIssue::RootHasParent {
                    commit_id: id.to_string(),
                }
            } else {
                ChainIssue::BrokenLink {
                    commit_id: id.to_string(),
                    expected: expected_parent.to_string(),
                    actual: record.parent_commit_id.clone(),
                }
            });
        }

        let computed = hash_commit(
            &record.commit_timestamp,
            &record.commit_message,
            &record.parent_commit_id,
            &record.files,
        )
        .as_hex();
        if computed != id {
            report.issues.push(ChainIssue::IdMismatch {
                commit_id: id.to_string(),
                computed,
            });
        }

        if !seen.insert(id) {
            report.issues.push(ChainIssue::DuplicateId {
                commit_id: id.to_string(),
            });
        }

        for entry in &record.files {
            if Digest::from_hex(&entry.file_hash).is_err() {
                report.issues.push(ChainIssue::InvalidFileHash {
                    commit_id: id.to_string(),
                    file_path: entry.file_path.clone(),
                });
            }
        }

        expected_parent = id;
    }

    report
}

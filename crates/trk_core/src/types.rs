//! Core data types for trk.
//!
//! Field declaration order is lexicographic so the serialized document has
//! stable, sorted keys.

use serde::{Deserialize, Serialize};

/// The single persisted aggregate stored in `.trk/metadata.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDocument {
    /// Commit records, oldest first. Append-only.
    #[serde(default)]
    pub commit_history: Vec<CommitRecord>,

    /// Pending file changes, unique by `file_path`.
    #[serde(default)]
    pub staging_area: Vec<StagingEntry>,
}

impl RepositoryDocument {
    /// Returns the most recently appended commit, if any.
    pub fn last_commit(&self) -> Option<&CommitRecord> {
        self.commit_history.last()
    }

    /// Returns true when nothing is staged and no commit exists.
    pub fn is_empty(&self) -> bool {
        self.commit_history.is_empty() && self.staging_area.is_empty()
    }
}

/// A staged file: its path as supplied and the hash of its bytes when staged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StagingEntry {
    /// Lowercase hex SHA-1 of the raw file bytes.
    pub file_hash: String,

    /// Path as supplied by the caller (not canonicalized).
    pub file_path: String,
}

impl StagingEntry {
    /// Creates a new entry.
    pub fn new(file_path: impl Into<String>, file_hash: impl Into<String>) -> Self {
        Self {
            file_hash: file_hash.into(),
            file_path: file_path.into(),
        }
    }
}

/// An immutable snapshot of the staging area with its message and parent link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Lowercase hex digest derived from the other fields.
    pub commit_id: String,

    /// Free-text, non-empty message.
    pub commit_message: String,

    /// Local time in `YYYY-MM-DD HH:MM:SS` format.
    pub commit_timestamp: String,

    /// By-value copy of the staging area at commit time.
    #[serde(default)]
    pub files: Vec<StagingEntry>,

    /// Id of the previous commit, empty for the root commit.
    #[serde(default)]
    pub parent_commit_id: String,
}

impl CommitRecord {
    /// Returns true if this is the first commit in the history.
    pub fn is_root(&self) -> bool {
        self.parent_commit_id.is_empty()
    }
}

//! trk Core Library
//!
//! A minimal local change-tracking store, providing:
//! - SHA-1 content hashing of staged files
//! - A staging area with update-in-place semantics
//! - Commit records chained by parent id
//! - A single JSON metadata document with atomic writes
//!
//! # Quick Start
//!
//! ```
//! use trk_core::Repository;
//! use tempfile::TempDir;
//!
//! let tmp = TempDir::new().unwrap();
//! std::fs::write(tmp.path().join("notes.txt"), "hello").unwrap();
//!
//! let repo = Repository::init(tmp.path()).unwrap();
//! let report = repo.stage(&["notes.txt"]).unwrap();
//! assert_eq!(report.staged_count(), 1);
//!
//! let record = repo.commit("First commit").unwrap();
//! assert_eq!(record.parent_commit_id, "");
//! assert_eq!(repo.history(None)[0].commit_id, record.commit_id);
//! ```
//!
//! # Working on the document directly
//!
//! The pure pipeline functions operate on an in-memory
//! [`RepositoryDocument`] and never touch the disk:
//!
//! ```
//! use trk_core::{commit, list_history, RepositoryDocument, StagingEntry};
//!
//! let mut doc = RepositoryDocument::default();
//! doc.staging_area.push(StagingEntry::new("a.txt", "0".repeat(40)));
//!
//! let first = commit(&mut doc, "one", "2024-01-01 00:00:00").unwrap();
//! assert!(doc.staging_area.is_empty());
//! assert_eq!(list_history(&doc)[0].commit_id, first.commit_id);
//! ```

mod commit;
mod config;
mod digest;
mod document;
mod error;
mod history;
mod lock;
mod repo;
mod staging;
mod types;

pub use commit::{commit, format_timestamp, TIMESTAMP_FORMAT};
pub use config::{Config, LogConfig, StorageConfig, CONFIG_FILE};
pub use digest::{abbreviate, hash_bytes, hash_commit, hash_file, Digest};
pub use document::{decode, encode, DocumentStore, DOCUMENT_FILE};
pub use error::{Result, TrkError};
pub use history::{list_history, verify_chain, ChainIssue, VerifyReport};
pub use lock::{LockGuard, LOCK_FILE};
pub use repo::Repository;
pub use staging::{is_metadata_path, stage, StageOutcome, StageReport, METADATA_DIR};
pub use types::*;

use chrono::NaiveDateTime;

/// Time provider trait for testing.
///
/// Allows injecting a controlled clock so commit timestamps (and therefore
/// commit ids) are reproducible. Only used when set via
/// [`Repository::with_time_provider`].
pub trait TimeProvider: Send + Sync {
    /// Returns the current local time.
    fn now(&self) -> NaiveDateTime;
}

impl<F> TimeProvider for F
where
    F: Fn() -> NaiveDateTime + Send + Sync,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}

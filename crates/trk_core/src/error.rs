//! Error types for trk_core operations.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for trk_core operations.
#[derive(Error, Debug)]
pub enum TrkError {
    /// The `.trk` marker directory does not exist under the given root.
    #[error("not a trk repository: {}", .0.display())]
    NotInitialized(PathBuf),

    /// `init` was called on a directory that already holds a repository.
    #[error("repository already initialized in {}", .0.display())]
    AlreadyInitialized(PathBuf),

    /// Commit attempted with nothing staged.
    #[error("no files staged for commit")]
    EmptyStaging,

    /// Commit message is empty or whitespace only.
    #[error("commit message must not be empty")]
    EmptyMessage,

    /// The metadata document could not be written back.
    #[error("failed to write {}: {}", path.display(), source)]
    Persistence {
        /// Destination document path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Invalid hex string for Digest parsing.
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// Configuration error (loading, parsing, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Repository is locked by another process.
    #[error("repository locked by another process")]
    RepositoryLocked,

    /// Lock file is held by a live process.
    #[error("repository lock held by another process (PID: {pid})")]
    LockHeld {
        /// Process ID holding the lock
        pid: u32,
    },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrkError {
    /// Returns a user-friendly recovery suggestion for the error, if available.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NotInitialized(_) => Some("Run 'trk init' to create a repository here."),
            Self::EmptyStaging => Some("Stage files with 'trk add <path>...' before committing."),
            Self::EmptyMessage => Some("Pass a message with 'trk commit -m <message>'."),
            Self::LockHeld { .. } | Self::RepositoryLocked => {
                Some("Wait for the other process to finish, or manually remove .trk/LOCK if the process is dead.")
            }
            Self::Config(_) => Some("Fix or delete .trk/config.toml to fall back to defaults."),
            _ => None,
        }
    }
}

/// Convenience Result type for trk_core operations.
pub type Result<T> = std::result::Result<T, TrkError>;

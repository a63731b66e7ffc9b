//! Content hashing for staged files and commit records.

use crate::error::{Result, TrkError};
use crate::types::StagingEntry;
use sha1::{Digest as _, Sha1};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// A 20-byte SHA-1 hash identifying file contents or a commit.
///
/// # Examples
///
/// ```
/// use trk_core::Digest;
///
/// let id = Digest::from_bytes([0xab; 20]);
/// assert_eq!(id.as_hex().len(), 40);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest([u8; 20]);

impl Digest {
    /// The length of a Digest as a hex string.
    pub const HEX_LEN: usize = 40;

    /// Creates a Digest from raw bytes.
    #[inline]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns this Digest as a lowercase hex string of exactly 40 characters.
    pub fn as_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses a Digest from a hex string.
    ///
    /// # Errors
    ///
    /// Returns `TrkError::InvalidHex` if the string is not valid hex
    /// or is not exactly 40 characters long.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.len() != Self::HEX_LEN {
            return Err(TrkError::InvalidHex(format!(
                "expected {} hex chars, got {}",
                Self::HEX_LEN,
                s.len()
            )));
        }

        let bytes = hex::decode(s).map_err(|e| TrkError::InvalidHex(e.to_string()))?;

        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| TrkError::InvalidHex("invalid length".to_string()))?;

        Ok(Self(arr))
    }

    fn from_hasher(hasher: Sha1) -> Self {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hasher.finalize());
        Self(bytes)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({}...)", abbreviate(&self.as_hex(), 12))
    }
}

/// Returns the first `len` characters of a stored hex id.
///
/// Works on ids read back from the document, which are not guaranteed to be
/// well-formed hex.
///
/// ```
/// use trk_core::abbreviate;
///
/// assert_eq!(abbreviate("a9993e364706816aba3e25717850c26c9cd0d89d", 7), "a9993e3");
/// assert_eq!(abbreviate("abc", 7), "abc");
/// ```
pub fn abbreviate(hex: &str, len: usize) -> &str {
    match hex.char_indices().nth(len) {
        Some((end, _)) => &hex[..end],
        None => hex,
    }
}

/// Hashes the full byte content of the file at `path`.
///
/// The file is streamed, so large files are never held in memory.
///
/// # Errors
///
/// Returns the underlying I/O error if the file cannot be opened or read.
pub fn hash_file(path: impl AsRef<Path>) -> io::Result<Digest> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha1::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(Digest::from_hasher(hasher))
}

/// Hashes raw bytes.
pub fn hash_bytes(data: &[u8]) -> Digest {
    let mut hasher = Sha1::new();
    hasher.update(data);
    Digest::from_hasher(hasher)
}

/// Computes a commit id from its descriptive fields.
///
/// Feeds `timestamp`, `message`, `parent_id`, then `file_path` and `file_hash`
/// of every entry in stored order, with no separators.
pub fn hash_commit(
    timestamp: &str,
    message: &str,
    parent_id: &str,
    files: &[StagingEntry],
) -> Digest {
    let mut hasher = Sha1::new();
    hasher.update(timestamp.as_bytes());
    hasher.update(message.as_bytes());
    hasher.update(parent_id.as_bytes());
    for entry in files {
        hasher.update(entry.file_path.as_bytes());
        hasher.update(entry.file_hash.as_bytes());
    }
    Digest::from_hasher(hasher)
}

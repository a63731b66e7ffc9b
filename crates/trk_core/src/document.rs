//! Load/save of the repository metadata document.
//!
//! Reads are forgiving: a missing, empty or corrupt document decodes to the
//! empty document, and malformed entries are dropped one by one. Writes go
//! through a temp file + rename so the live document is never half-written.

use crate::error::{Result, TrkError};
use crate::types::{CommitRecord, RepositoryDocument, StagingEntry};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the metadata document inside the `.trk` directory.
pub const DOCUMENT_FILE: &str = "metadata.json";

/// Reads and writes one repository document.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
    sync: bool,
}

impl DocumentStore {
    /// Creates a store for the document at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sync: true,
        }
    }

    /// Enables or disables fsync of the temp file and parent directory on save.
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the document, substituting the empty document on any failure.
    pub fn load(&self) -> RepositoryDocument {
        match fs::read(&self.path) {
            Ok(bytes) => decode(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "document absent, using empty document");
                RepositoryDocument::default()
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read document, using empty document");
                RepositoryDocument::default()
            }
        }
    }

    /// Writes the document atomically.
    ///
    /// # Errors
    ///
    /// Returns `TrkError::Persistence` if serialization, the temp write, or the
    /// rename fails. The previous document stays in place in that case.
    pub fn save(&self, doc: &RepositoryDocument) -> Result<()> {
        let bytes = encode(doc).map_err(|e| self.persistence_error(e.into()))?;
        let tmp_path = self.tmp_path();

        if let Err(e) = self.write_and_rename(&tmp_path, &bytes) {
            let _ = fs::remove_file(&tmp_path);
            return Err(self.persistence_error(e));
        }

        debug!(
            path = %self.path.display(),
            staged = doc.staging_area.len(),
            commits = doc.commit_history.len(),
            "document saved"
        );
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_and_rename(&self, tmp_path: &Path, bytes: &[u8]) -> io::Result<()> {
        {
            let mut file = File::create(tmp_path)?;
            file.write_all(bytes)?;
            if self.sync {
                file.sync_all()?;
            }
        }

        fs::rename(tmp_path, &self.path)?;

        #[cfg(unix)]
        {
            if self.sync {
                if let Some(parent) = self.path.parent() {
                    if let Ok(dir_file) = File::open(parent) {
                        let _ = dir_file.sync_all();
                    }
                }
            }
        }

        Ok(())
    }

    fn persistence_error(&self, source: io::Error) -> TrkError {
        TrkError::Persistence {
            path: self.path.clone(),
            source,
        }
    }
}

/// Serializes a document as pretty-printed JSON with a trailing newline.
pub fn encode(doc: &RepositoryDocument) -> serde_json::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(doc)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decodes a document, recovering from whatever is malformed.
pub fn decode(bytes: &[u8]) -> RepositoryDocument {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return RepositoryDocument::default();
    }

    let root: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "document is not valid JSON, treating as empty");
            return RepositoryDocument::default();
        }
    };

    let Value::Object(fields) = root else {
        warn!("document root is not an object, treating as empty");
        return RepositoryDocument::default();
    };

    let staging_area = dedup_staging(decode_list::<StagingEntry>(&fields, "staging_area"));
    let commit_history = decode_list::<CommitRecord>(&fields, "commit_history");

    RepositoryDocument {
        commit_history,
        staging_area,
    }
}

fn decode_list<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Vec<T> {
    match fields.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match T::deserialize(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(field = key, index, error = %e, "dropping malformed entry");
                    None
                }
            })
            .collect(),
        Some(_) => {
            warn!(field = key, "field is not an array, ignoring it");
            Vec::new()
        }
    }
}

/// Keeps the first entry for every path.
fn dedup_staging(entries: Vec<StagingEntry>) -> Vec<StagingEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| {
            let fresh = seen.insert(entry.file_path.clone());
            if !fresh {
                warn!(path = %entry.file_path, "dropping duplicate staging entry");
            }
            fresh
        })
        .collect()
}

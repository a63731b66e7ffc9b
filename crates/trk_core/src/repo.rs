//! Repository handle providing the main trk API.

use crate::commit::{self, format_timestamp};
use crate::config::Config;
use crate::document::{DocumentStore, DOCUMENT_FILE};
use crate::error::{Result, TrkError};
use crate::history::{self, VerifyReport};
use crate::lock::LockGuard;
use crate::staging::{self, StageReport, METADATA_DIR};
use crate::types::{CommitRecord, RepositoryDocument, StagingEntry};
use crate::TimeProvider;
use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// trk repository handle.
///
/// Every operation is a full load-mutate-store cycle against
/// `.trk/metadata.json`; nothing is cached between calls.
pub struct Repository {
    /// Directory containing `.trk`.
    root: PathBuf,
    /// Settings read from `.trk/config.toml` when the handle was opened.
    config: Config,
    /// Codec for the metadata document.
    store: DocumentStore,
    /// Time provider for testing (None = use local system time).
    time_provider: Option<Arc<dyn TimeProvider>>,
}

impl Repository {
    /// Opens an existing repository rooted at `path`.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` if `.trk` doesn't exist, or `Config` if
    /// `.trk/config.toml` is unreadable.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use trk_core::Repository;
    ///
    /// let repo = Repository::open(".").unwrap();
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let trk_dir = root.join(METADATA_DIR);

        if !trk_dir.is_dir() {
            return Err(TrkError::NotInitialized(root));
        }

        let config = Config::load(&trk_dir)?;
        let store = DocumentStore::new(trk_dir.join(DOCUMENT_FILE)).with_sync(config.storage.fsync);

        Ok(Self {
            root,
            config,
            store,
            time_provider: None,
        })
    }

    /// Initializes a new repository.
    ///
    /// Creates `.trk`, an empty metadata document and a default config.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyInitialized` if `.trk` already exists, or an I/O error
    /// if the directory or files cannot be created.
    ///
    /// # Examples
    ///
    /// ```
    /// use trk_core::Repository;
    /// use tempfile::TempDir;
    ///
    /// let tmp = TempDir::new().unwrap();
    /// let repo = Repository::init(tmp.path()).unwrap();
    /// assert!(repo.history(None).is_empty());
    /// ```
    pub fn init(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let trk_dir = root.join(METADATA_DIR);

        if trk_dir.exists() {
            return Err(TrkError::AlreadyInitialized(root));
        }

        fs::create_dir_all(&trk_dir)?;

        let config = Config::default();
        config.save(&trk_dir)?;

        let store = DocumentStore::new(trk_dir.join(DOCUMENT_FILE)).with_sync(config.storage.fsync);
        store.save(&RepositoryDocument::default())?;

        info!(root = %root.display(), "initialized repository");

        Ok(Self {
            root,
            config,
            store,
            time_provider: None,
        })
    }

    /// Sets a custom time provider for commit timestamps.
    pub fn with_time_provider(mut self, provider: impl TimeProvider + 'static) -> Self {
        self.time_provider = Some(Arc::new(provider));
        self
    }

    /// Returns the `.trk` directory path.
    pub fn trk_dir(&self) -> PathBuf {
        self.root.join(METADATA_DIR)
    }

    /// Returns the configuration loaded at open time.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the metadata document codec.
    pub fn document_store(&self) -> &DocumentStore {
        &self.store
    }

    /// Loads the current document.
    pub fn load(&self) -> RepositoryDocument {
        self.store.load()
    }

    /// Stages files and persists the result.
    ///
    /// Paths are expected to be already expanded; relative paths are resolved
    /// against the repository root. The document is not rewritten when no path
    /// could be staged.
    ///
    /// # Errors
    ///
    /// Only lock and persistence failures are errors. Unreadable files are
    /// reported through [`StageReport::warnings`].
    pub fn stage<S: AsRef<str>>(&self, paths: &[S]) -> Result<StageReport> {
        let _lock = self.lock()?;

        let mut doc = self.store.load();
        let report = staging::stage(&mut doc, &self.root, paths);

        if report.is_empty() {
            debug!("nothing staged, document left untouched");
            return Ok(report);
        }

        self.store.save(&doc)?;
        Ok(report)
    }

    /// Commits the staging area with `message` and persists the result.
    ///
    /// # Errors
    ///
    /// - `EmptyMessage` if `message` is blank.
    /// - `EmptyStaging` if nothing is staged.
    /// - `Persistence` if the document cannot be written; the previous
    ///   document stays on disk.
    pub fn commit(&self, message: &str) -> Result<CommitRecord> {
        let _lock = self.lock()?;

        let mut doc = self.store.load();
        let timestamp = format_timestamp(self.now());
        let record = commit::commit(&mut doc, message, &timestamp)?;

        self.store.save(&doc)?;
        info!(commit_id = %record.commit_id, files = record.files.len(), "committed");
        Ok(record)
    }

    /// Returns commits newest first, at most `limit` of them.
    pub fn history(&self, limit: Option<usize>) -> Vec<CommitRecord> {
        let doc = self.store.load();
        history::list_history(&doc)
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// Returns the current staging area.
    pub fn staged(&self) -> Vec<StagingEntry> {
        self.store.load().staging_area
    }

    /// Checks the commit chain for broken links and tampered records.
    pub fn verify(&self) -> VerifyReport {
        history::verify_chain(&self.store.load())
    }

    fn now(&self) -> NaiveDateTime {
        match &self.time_provider {
            Some(provider) => provider.now(),
            None => Local::now().naive_local(),
        }
    }

    fn lock(&self) -> Result<Option<LockGuard>> {
        if !self.config.storage.lock {
            return Ok(None);
        }
        LockGuard::acquire(&self.trk_dir()).map(Some)
    }
}

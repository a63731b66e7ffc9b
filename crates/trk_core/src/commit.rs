//! Building commit records from the staging area.

use crate::digest::hash_commit;
use crate::error::{Result, TrkError};
use crate::types::{CommitRecord, RepositoryDocument};
use chrono::NaiveDateTime;
use std::mem;
use tracing::debug;

/// strftime format of `commit_timestamp`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a local time the way commit records store it.
pub fn format_timestamp(time: NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Snapshots the staging area into a new commit chained to the last one.
///
/// On success the record has been appended to `doc.commit_history` and the
/// staging area is empty. On error `doc` is left unchanged.
///
/// # Errors
///
/// - `TrkError::EmptyMessage` if `message` is blank.
/// - `TrkError::EmptyStaging` if nothing is staged.
pub fn commit(
    doc: &mut RepositoryDocument,
    message: &str,
    timestamp: &str,
) -> Result<CommitRecord> {
    if message.trim().is_empty() {
        return Err(TrkError::EmptyMessage);
    }
    if doc.staging_area.is_empty() {
        return Err(TrkError::EmptyStaging);
    }

    let parent_commit_id = doc
        .last_commit()
        .map(|c| c.commit_id.clone())
        .unwrap_or_default();

    let commit_id = hash_commit(timestamp, message, &parent_commit_id, &doc.staging_area);

    let record = CommitRecord {
        commit_id: commit_id.as_hex(),
        commit_message: message.to_string(),
        commit_timestamp: timestamp.to_string(),
        files: mem::take(&mut doc.staging_area),
        parent_commit_id,
    };

    debug!(
        commit_id = %record.commit_id,
        files = record.files.len(),
        "built commit record"
    );

    doc.commit_history.push(record.clone());
    Ok(record)
}

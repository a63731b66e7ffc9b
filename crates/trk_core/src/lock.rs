//! Advisory lock held around load-mutate-store cycles.

use crate::error::{Result, TrkError};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, warn};

/// File name of the lock inside the `.trk` directory.
pub const LOCK_FILE: &str = "LOCK";

/// Create attempts before giving up on a lock that keeps reappearing.
const MAX_ATTEMPTS: u32 = 3;

/// RAII guard for the repository lock.
///
/// The owner creates `.trk/LOCK`, takes an exclusive `flock` on it and only
/// then writes its PID. Dropping the guard removes the file.
#[derive(Debug)]
pub struct LockGuard {
    file: Option<File>,
    path: PathBuf,
}

/// Who appears to own an existing lock file.
enum Holder {
    /// A running process wrote its PID.
    Live(u32),
    /// Someone holds the `flock`, or the owner has not written its PID yet.
    Busy,
    /// Owner is gone. The contained handle holds the `flock` until removal.
    Stale { probe: File, pid: Option<u32> },
    /// File disappeared before it could be inspected.
    Vanished,
}

impl LockGuard {
    /// Acquires the lock in `trk_dir`.
    ///
    /// A lock left by a dead process is reclaimed. An empty lock file counts
    /// as held, since its owner may still be between create and PID write.
    ///
    /// # Errors
    ///
    /// - `TrkError::LockHeld` if a live process owns the lock.
    /// - `TrkError::RepositoryLocked` if the lock is busy for any other reason.
    pub fn acquire(trk_dir: &Path) -> Result<Self> {
        let path = trk_dir.join(LOCK_FILE);

        for attempt in 1..=MAX_ATTEMPTS {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return claim(file, &path),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
                Err(e) => return Err(TrkError::Io(e)),
            }

            match inspect(&path)? {
                Holder::Live(pid) => return Err(TrkError::LockHeld { pid }),
                Holder::Busy => return Err(TrkError::RepositoryLocked),
                Holder::Vanished => {}
                Holder::Stale { probe, pid } => {
                    warn!(?pid, attempt, "removing stale repository lock");
                    match fs::remove_file(&path) {
                        Ok(()) => {}
                        Err(e) if e.kind() == ErrorKind::NotFound => {}
                        Err(e) => return Err(TrkError::Io(e)),
                    }
                    drop(probe);
                }
            }
        }

        Err(TrkError::RepositoryLocked)
    }

    /// Returns the lock file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // Close before unlinking.
        drop(self.file.take());
        let _ = fs::remove_file(&self.path);
    }
}

/// Locks a freshly created lock file and stamps it with our PID.
///
/// On failure the guard is dropped, which removes the file again.
fn claim(file: File, path: &Path) -> Result<LockGuard> {
    let guard = LockGuard {
        file: Some(file),
        path: path.to_path_buf(),
    };

    if let Some(mut file) = guard.file.as_ref() {
        file.try_lock_exclusive()
            .map_err(|_| TrkError::RepositoryLocked)?;
        writeln!(file, "{}", process::id())?;
        file.flush()?;
    }

    debug!(path = %path.display(), "acquired repository lock");
    Ok(guard)
}

fn inspect(path: &Path) -> Result<Holder> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Holder::Vanished),
        Err(e) => return Err(TrkError::Io(e)),
    };

    let mut raw = Vec::new();
    file.read_to_end(&mut raw)?;
    let content = String::from_utf8_lossy(&raw);
    let content = content.trim();

    if content.is_empty() {
        return Ok(Holder::Busy);
    }

    let pid = content.parse::<u32>().ok();
    if let Some(pid) = pid.filter(|&pid| is_process_alive(pid)) {
        return Ok(Holder::Live(pid));
    }

    if file.try_lock_exclusive().is_err() {
        return Ok(Holder::Busy);
    }

    Ok(Holder::Stale { probe: file, pid })
}

/// Check if a process with the given PID is still alive.
#[cfg(target_os = "linux")]
fn is_process_alive(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

#[cfg(all(unix, not(target_os = "linux")))]
fn is_process_alive(pid: u32) -> bool {
    process::Command::new("kill")
        .args(["-0", &pid.to_string()])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(true)
}

// Without a liveness probe only an unlocked file with garbage content is reclaimed.
#[cfg(not(unix))]
fn is_process_alive(_pid: u32) -> bool {
    true
}

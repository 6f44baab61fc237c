// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-process job locks backed by exclusively-locked files.
//!
//! The operating system drops a file lock when its holder exits, so a
//! crashed run never leaves a job locked. Lock files themselves are reused
//! between runs and never deleted.

use crate::env;
use crate::error::LockError;
use fs2::FileExt;
use jobby_core::LockIdentity;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Attempts made before a lock counts as contended
pub const LOCK_ATTEMPTS: u32 = 5;

/// Holds the locks acquired by one process.
///
/// Bookkeeping is per instance: a fresh manager holds nothing and relies on
/// the filesystem lock alone for exclusion against other processes.
#[derive(Debug)]
pub struct LockManager {
    dir: PathBuf,
    attempts: u32,
    retry_delay: Duration,
    held: HashMap<LockIdentity, File>,
}

impl LockManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            attempts: LOCK_ATTEMPTS,
            retry_delay: Duration::from_micros(250),
            held: HashMap::new(),
        }
    }

    /// Manager configured from `JOBBY_LOCK_DIR` and `JOBBY_LOCK_RETRY_US`
    pub fn from_env() -> Self {
        Self::new(env::lock_dir()).with_retry_delay(env::lock_retry_delay())
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<identity>.lck`
    pub fn lock_path(&self, identity: &LockIdentity) -> PathBuf {
        self.dir.join(identity.file_name())
    }

    pub fn is_held(&self, identity: &LockIdentity) -> bool {
        self.held.contains_key(identity)
    }

    /// Take the lock for `identity` and record this process's pid in it.
    pub fn acquire(&mut self, identity: &LockIdentity) -> Result<(), LockError> {
        let path = self.lock_path(identity);
        if self.held.contains_key(identity) {
            return Err(LockError::AlreadyHeldLocally { path });
        }

        let existed = path.exists();
        // Never truncate before holding the lock: that would wipe the
        // running holder's pid.
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| {
                if existed {
                    LockError::CannotOpen {
                        path: path.clone(),
                        source,
                    }
                } else {
                    LockError::CannotCreate {
                        path: path.clone(),
                        source,
                    }
                }
            })?;

        let mut attempt = 1;
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => break,
                Err(e) if is_contended(&e) => {
                    if attempt >= self.attempts {
                        tracing::debug!(%identity, attempts = attempt, "lock contended");
                        return Err(LockError::Contended { path });
                    }
                    attempt += 1;
                    std::thread::sleep(self.retry_delay);
                }
                Err(source) => return Err(LockError::Io { path, source }),
            }
        }

        if let Err(source) = write_pid(&file) {
            let _ = file.unlock();
            return Err(LockError::Io { path, source });
        }
        tracing::debug!(%identity, path = %path.display(), "lock acquired");
        self.held.insert(identity.clone(), file);
        Ok(())
    }

    /// Clear the holder pid and drop the lock.
    pub fn release(&mut self, identity: &LockIdentity) -> Result<(), LockError> {
        let path = self.lock_path(identity);
        let Some(file) = self.held.remove(identity) else {
            return Err(LockError::NotHeld { path });
        };
        let truncated = file.set_len(0);
        let unlocked = file.unlock();
        truncated
            .and(unlocked)
            .map_err(|source| LockError::Io { path, source })?;
        tracing::debug!(%identity, "lock released");
        Ok(())
    }

    /// Seconds since the lock file was last written by a live holder.
    ///
    /// 0 when the file is missing, records no pid, or records a pid for
    /// which `is_alive` says no. The lock itself is left untouched.
    pub fn age_secs(&self, identity: &LockIdentity, is_alive: impl Fn(u32) -> bool) -> u64 {
        let path = self.lock_path(identity);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::debug!(path = %path.display(), error = %e, "lock file unreadable");
                }
                return 0;
            }
        };
        let Ok(pid) = content.trim().parse::<u32>() else {
            return 0;
        };
        if !is_alive(pid) {
            return 0;
        }
        std::fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .map(|age| age.as_secs())
            .unwrap_or(0)
    }
}

fn is_contended(err: &std::io::Error) -> bool {
    err.kind() == ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

fn write_pid(mut file: &File) -> std::io::Result<()> {
    file.set_len(0)?;
    write!(file, "{}", std::process::id())?;
    file.flush()
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;

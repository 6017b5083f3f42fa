//! Run lock management
//!
//! The host package registry has exactly one writer: an exclusive lock file
//! rejects a second concurrent provisioning run.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// How old a lock file can be before it's considered stale (2 hours)
const STALE_LOCK_AGE_SECS: u64 = 7200;

fn is_stale_lock(lock_path: &Path) -> bool {
    if let Ok(metadata) = std::fs::metadata(lock_path)
        && let Ok(modified) = metadata.modified()
        && let Ok(age) = std::time::SystemTime::now().duration_since(modified)
    {
        return age.as_secs() > STALE_LOCK_AGE_SECS;
    }
    false
}

/// Acquire the exclusive run lock. Returns a guard that releases the lock
/// when dropped.
pub fn acquire_run_lock(lock_path: &Path) -> Result<RunLock> {
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create lock directory: {}", parent.display()))?;
    }

    if lock_path.exists() && is_stale_lock(lock_path) {
        let _ = std::fs::remove_file(lock_path);
    }

    let lock_file = File::create(lock_path)
        .with_context(|| format!("failed to create lock file: {}", lock_path.display()))?;

    if lock_file.try_lock_exclusive().is_err() {
        drop(lock_file);
        return Err(anyhow::anyhow!(
            "another provisioning run is already in progress. \
             If this is incorrect, delete '{}'",
            lock_path.display()
        ));
    }

    Ok(RunLock {
        _file: lock_file,
        path: lock_path.to_path_buf(),
    })
}

/// RAII guard - releases the lock and deletes the lock file when dropped
#[derive(Debug)]
pub struct RunLock {
    _file: File,
    path: PathBuf,
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

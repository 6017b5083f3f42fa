//! Filesystem helpers

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Create the parent directory of `path` if it doesn't exist.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Move `dir` aside to a sibling named `<name>.backup.<unix-timestamp>`.
///
/// Returns the backup path. The original directory no longer exists
/// afterwards; its contents live intact under the backup.
pub fn backup_aside(dir: &Path) -> Result<PathBuf> {
    let name = dir
        .file_name()
        .with_context(|| format!("cannot back up path without a name: {}", dir.display()))?
        .to_string_lossy()
        .to_string();
    let parent = dir
        .parent()
        .with_context(|| format!("cannot back up path without a parent: {}", dir.display()))?;

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?
        .as_secs();

    // Timestamps have one-second resolution; probe for a free name in case
    // two backups land in the same second.
    let mut backup = parent.join(format!("{}.backup.{}", name, timestamp));
    let mut suffix = 0u32;
    while backup.exists() {
        suffix += 1;
        backup = parent.join(format!("{}.backup.{}.{}", name, timestamp, suffix));
    }

    std::fs::rename(dir, &backup).with_context(|| {
        format!(
            "failed to move {} aside to {}",
            dir.display(),
            backup.display()
        )
    })?;

    Ok(backup)
}

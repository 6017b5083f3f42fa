//! Host observation layer
//!
//! Presence checks go through [`HostProbe`] so steps never inspect the host
//! directly. The live implementation scans PATH, the filesystem, the snap
//! registry, and `/etc/shells`; tests substitute a scripted mock.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Read-only queries against the machine being provisioned.
pub trait HostProbe {
    /// Is an executable with this name reachable via PATH?
    fn command_on_path(&self, name: &str) -> bool;

    /// Does this file or directory exist?
    fn path_exists(&self, path: &Path) -> bool;

    /// Is a snap with exactly this name installed?
    fn snap_installed(&self, name: &str) -> Result<bool>;

    /// Is this shell path registered in the system shells file?
    fn login_shell_registered(&self, shell_path: &str) -> Result<bool>;
}

/// [`HostProbe`] backed by the real host.
pub struct LiveProbe {
    shells_file: PathBuf,
}

impl Default for LiveProbe {
    fn default() -> Self {
        Self {
            shells_file: PathBuf::from("/etc/shells"),
        }
    }
}

impl LiveProbe {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn with_shells_file(shells_file: PathBuf) -> Self {
        Self { shells_file }
    }
}

impl HostProbe for LiveProbe {
    fn command_on_path(&self, name: &str) -> bool {
        let Some(path) = std::env::var_os("PATH") else {
            return false;
        };
        std::env::split_paths(&path).any(|dir| dir.join(name).is_file())
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn snap_installed(&self, name: &str) -> Result<bool> {
        // `snap list <name>` exits 0 only for an exact installed name. This is
        // a per-entry membership query, so "code" never matches "code-insiders".
        let status = Command::new("snap")
            .args(["list", name])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .context("failed to run snap; is snapd installed?")?;
        Ok(status.success())
    }

    fn login_shell_registered(&self, shell_path: &str) -> Result<bool> {
        if !self.shells_file.exists() {
            return Ok(false);
        }
        let content = std::fs::read_to_string(&self.shells_file)
            .with_context(|| format!("failed to read {}", self.shells_file.display()))?;
        Ok(content.lines().any(|line| line.trim() == shell_path))
    }
}

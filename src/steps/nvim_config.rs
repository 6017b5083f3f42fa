//! Neovim configuration step
//!
//! Clones the personal nvim configuration into `~/.config/nvim`. A
//! pre-existing directory that isn't a clone of anything is moved aside to a
//! timestamped `nvim.backup.<ts>` sibling first; nothing is overwritten.

use crate::config::Config;
use crate::output;
use crate::probe::HostProbe;
use crate::step::{Presence, Step, StepContext};
use crate::util::{fsx, git};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub struct NvimConfig {
    url: String,
    dest: PathBuf,
}

impl NvimConfig {
    pub fn new(config: &Config, home: &Path) -> Self {
        Self {
            url: config.repos.nvim_config.clone(),
            dest: home.join(".config/nvim"),
        }
    }

    /// The backup-then-clone action, separated from the `Step` plumbing so
    /// the backup behavior is testable against a temp filesystem.
    pub fn install_into(url: &str, dest: &Path) -> Result<()> {
        if dest.exists() && !git::is_valid_repo(dest) {
            let backup = fsx::backup_aside(dest)?;
            output::info(&format!(
                "existing nvim config moved to {}",
                backup.display()
            ));
        }
        git::clone_into(url, dest)
    }
}

impl Step for NvimConfig {
    fn name(&self) -> &str {
        "nvim-config"
    }

    fn summary(&self) -> String {
        "Cloning nvim configuration".to_string()
    }

    fn check(&self, probe: &dyn HostProbe) -> Result<Presence> {
        // Only a directory that is already a clone counts as present; a plain
        // directory still needs the backup-then-clone action.
        if probe.path_exists(&self.dest.join(".git")) {
            Ok(Presence::Present("existing clone".to_string()))
        } else {
            Ok(Presence::Absent)
        }
    }

    fn apply(&self, _ctx: &StepContext) -> Result<()> {
        Self::install_into(&self.url, &self.dest)
    }
}

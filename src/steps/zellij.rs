//! Terminal multiplexer configuration step

use crate::config::Config;
use crate::probe::HostProbe;
use crate::step::{Presence, Step, StepContext};
use crate::util::git;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub struct ZellijConfig {
    url: String,
    dest: PathBuf,
}

impl ZellijConfig {
    pub fn new(config: &Config, home: &Path) -> Self {
        Self {
            url: config.repos.zellij_config.clone(),
            dest: home.join(".config/zellij"),
        }
    }
}

impl Step for ZellijConfig {
    fn name(&self) -> &str {
        "zellij-config"
    }

    fn summary(&self) -> String {
        "Cloning zellij configuration".to_string()
    }

    fn check(&self, probe: &dyn HostProbe) -> Result<Presence> {
        if probe.path_exists(&self.dest) {
            Ok(Presence::Present(format!("{} exists", self.dest.display())))
        } else {
            Ok(Presence::Absent)
        }
    }

    fn apply(&self, _ctx: &StepContext) -> Result<()> {
        git::clone_into(&self.url, &self.dest)
    }
}

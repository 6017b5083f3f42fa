//! System package steps (apt)
//!
//! Bulk update/upgrade and the base toolchain install. These steps are
//! unguarded: "already satisfied" has no meaning for a bulk upgrade, and apt
//! itself no-ops on packages that are current. The sequence runs one update
//! at the start and one at the end, like the original setup flow.

use crate::config::Config;
use crate::probe::HostProbe;
use crate::step::{Presence, Step, StepContext};
use crate::util::shell;
use anyhow::Result;

pub struct SystemUpdate {
    name: &'static str,
}

impl SystemUpdate {
    pub fn initial() -> Self {
        Self {
            name: "system-update",
        }
    }

    pub fn fin() -> Self {
        Self {
            name: "final-update",
        }
    }
}

impl Step for SystemUpdate {
    fn name(&self) -> &str {
        self.name
    }

    fn summary(&self) -> String {
        "Updating system packages".to_string()
    }

    fn check(&self, _probe: &dyn HostProbe) -> Result<Presence> {
        Ok(Presence::Absent)
    }

    fn apply(&self, _ctx: &StepContext) -> Result<()> {
        shell::run("sudo apt-get update")?;
        shell::run("sudo apt-get -y upgrade")?;
        Ok(())
    }
}

pub struct BasePackages {
    packages: Vec<String>,
}

impl BasePackages {
    pub fn new(config: &Config) -> Self {
        Self {
            packages: config.apt.base_packages.clone(),
        }
    }
}

impl Step for BasePackages {
    fn name(&self) -> &str {
        "base-packages"
    }

    fn summary(&self) -> String {
        format!("Installing base toolchain ({} packages)", self.packages.len())
    }

    fn check(&self, _probe: &dyn HostProbe) -> Result<Presence> {
        Ok(Presence::Absent)
    }

    fn apply(&self, _ctx: &StepContext) -> Result<()> {
        shell::run(&format!(
            "sudo apt-get -y install {}",
            self.packages.join(" ")
        ))
    }
}

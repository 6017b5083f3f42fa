//! Starship prompt step

use crate::config::STARSHIP_INSTALLER_URL;
use crate::probe::HostProbe;
use crate::step::{Presence, Step, StepContext};
use crate::util::{download, shell};
use anyhow::Result;

pub struct Starship;

impl Step for Starship {
    fn name(&self) -> &str {
        "starship"
    }

    fn summary(&self) -> String {
        "Installing starship prompt".to_string()
    }

    fn check(&self, probe: &dyn HostProbe) -> Result<Presence> {
        if probe.command_on_path("starship") {
            Ok(Presence::Present("starship on PATH".to_string()))
        } else {
            Ok(Presence::Absent)
        }
    }

    fn apply(&self, ctx: &StepContext) -> Result<()> {
        let installer = ctx.staging.join("starship-install.sh");
        download::fetch(STARSHIP_INSTALLER_URL, &installer)?;
        // The installer handles sudo for /usr/local/bin itself.
        shell::run(&format!("sh '{}' --yes", installer.display()))?;
        shell::run("starship --version")
    }
}

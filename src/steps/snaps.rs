//! Desktop application steps (snap)

use crate::config::SnapApp;
use crate::probe::HostProbe;
use crate::step::{Presence, Step, StepContext};
use crate::util::shell;
use anyhow::Result;

pub struct Snap {
    step_name: String,
    app: String,
    classic: bool,
}

impl Snap {
    pub fn new(app: &SnapApp) -> Self {
        Self {
            step_name: format!("snap:{}", app.name),
            app: app.name.clone(),
            classic: app.classic,
        }
    }
}

impl Step for Snap {
    fn name(&self) -> &str {
        &self.step_name
    }

    fn summary(&self) -> String {
        format!("Installing snap {}", self.app)
    }

    fn check(&self, probe: &dyn HostProbe) -> Result<Presence> {
        if probe.snap_installed(&self.app)? {
            Ok(Presence::Present("snap installed".to_string()))
        } else {
            Ok(Presence::Absent)
        }
    }

    fn apply(&self, _ctx: &StepContext) -> Result<()> {
        let classic = if self.classic { " --classic" } else { "" };
        shell::run(&format!("sudo snap install {}{}", self.app, classic))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_name_carries_app() {
        let step = Snap::new(&SnapApp {
            name: "discord".to_string(),
            classic: false,
        });
        assert_eq!(step.name(), "snap:discord");
        assert_eq!(step.summary(), "Installing snap discord");
    }
}

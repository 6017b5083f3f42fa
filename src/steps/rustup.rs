//! Rust toolchain step
//!
//! Installs via the rustup installer script, the upstream-supported path.
//! rustup pins its own toolchain selection; we only verify that rustc runs.

use crate::config::RUSTUP_INSTALLER_URL;
use crate::probe::HostProbe;
use crate::step::{Presence, Step, StepContext};
use crate::util::{download, shell};
use anyhow::Result;
use std::path::PathBuf;

pub struct Rustup {
    cargo_rustc: PathBuf,
}

impl Rustup {
    pub fn new(home: &std::path::Path) -> Self {
        Self {
            cargo_rustc: home.join(".cargo/bin/rustc"),
        }
    }
}

impl Step for Rustup {
    fn name(&self) -> &str {
        "rust"
    }

    fn summary(&self) -> String {
        "Installing Rust toolchain via rustup".to_string()
    }

    fn check(&self, probe: &dyn HostProbe) -> Result<Presence> {
        if probe.command_on_path("rustc") {
            return Ok(Presence::Present("rustc on PATH".to_string()));
        }
        // A fresh install isn't on PATH until the next login shell.
        if probe.path_exists(&self.cargo_rustc) {
            return Ok(Presence::Present("rustup toolchain present".to_string()));
        }
        Ok(Presence::Absent)
    }

    fn apply(&self, ctx: &StepContext) -> Result<()> {
        let installer = ctx.staging.join("rustup-init.sh");
        download::fetch(RUSTUP_INSTALLER_URL, &installer)?;
        shell::run(&format!("sh '{}' -y", installer.display()))?;
        // Verify in-session via the absolute path; PATH updates on next login.
        shell::run(&format!("'{}' --version", self.cargo_rustc.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::HostProbe;
    use anyhow::Result;
    use std::path::Path;

    struct FixedProbe {
        rustc_on_path: bool,
        cargo_dir_exists: bool,
    }

    impl HostProbe for FixedProbe {
        fn command_on_path(&self, name: &str) -> bool {
            name == "rustc" && self.rustc_on_path
        }
        fn path_exists(&self, _path: &Path) -> bool {
            self.cargo_dir_exists
        }
        fn snap_installed(&self, _name: &str) -> Result<bool> {
            Ok(false)
        }
        fn login_shell_registered(&self, _shell_path: &str) -> Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn test_check_present_via_path() {
        let step = Rustup::new(Path::new("/home/test"));
        let probe = FixedProbe {
            rustc_on_path: true,
            cargo_dir_exists: false,
        };
        assert!(matches!(
            step.check(&probe).unwrap(),
            Presence::Present(_)
        ));
    }

    #[test]
    fn test_check_present_via_cargo_home() {
        let step = Rustup::new(Path::new("/home/test"));
        let probe = FixedProbe {
            rustc_on_path: false,
            cargo_dir_exists: true,
        };
        assert!(matches!(
            step.check(&probe).unwrap(),
            Presence::Present(_)
        ));
    }

    #[test]
    fn test_check_absent() {
        let step = Rustup::new(Path::new("/home/test"));
        let probe = FixedProbe {
            rustc_on_path: false,
            cargo_dir_exists: false,
        };
        assert_eq!(step.check(&probe).unwrap(), Presence::Absent);
    }
}

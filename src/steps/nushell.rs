//! Nushell step
//!
//! Downloads the pinned release tarball and installs the `nu` binary to
//! /usr/local/bin. Registering nu as the login shell (append to /etc/shells,
//! chsh) is opt-in; most machines only want the binary.

use crate::config::Config;
use crate::probe::HostProbe;
use crate::step::{Presence, Step, StepContext};
use crate::util::{download, extract, shell};
use anyhow::Result;

const NU_BIN: &str = "/usr/local/bin/nu";

pub struct Nushell {
    version: String,
    url: String,
    sha256: Option<String>,
    archive_dir: String,
    register_login_shell: bool,
}

impl Nushell {
    pub fn new(config: &Config, register_login_shell: bool) -> Self {
        Self {
            version: config.pinned.nushell.clone(),
            url: config.nushell_url(),
            sha256: config.checksums.nushell.clone(),
            archive_dir: config.nushell_archive_dir(),
            register_login_shell,
        }
    }
}

impl Step for Nushell {
    fn name(&self) -> &str {
        "nushell"
    }

    fn summary(&self) -> String {
        format!("Installing Nushell {}", self.version)
    }

    fn check(&self, probe: &dyn HostProbe) -> Result<Presence> {
        if probe.command_on_path("nu") {
            Ok(Presence::Present("nu on PATH".to_string()))
        } else {
            Ok(Presence::Absent)
        }
    }

    fn apply(&self, ctx: &StepContext) -> Result<()> {
        let archive = ctx.staging.join(format!("nu-{}.tar.gz", self.version));
        download::fetch_verified(&self.url, &archive, self.sha256.as_deref())?;
        extract::extract(&archive, &ctx.staging)?;

        let nu = ctx.staging.join(&self.archive_dir).join("nu");
        shell::run(&format!(
            "sudo install -m 755 '{}' {}",
            nu.display(),
            NU_BIN
        ))?;

        if self.register_login_shell {
            if !ctx.probe.login_shell_registered(NU_BIN)? {
                shell::run(&format!("echo {} | sudo tee -a /etc/shells >/dev/null", NU_BIN))?;
            }
            shell::run(&format!("chsh -s {}", NU_BIN))?;
            crate::output::info("login shell changed to nu (takes effect next login)");
        }

        shell::run(&format!("{} --version", NU_BIN))
    }
}

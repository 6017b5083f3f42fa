//! Node runtime steps (fnm, pinned Node, pnpm)
//!
//! fnm is installed with `--skip-shell`; the node step then sources the fnm
//! environment in-session, so it works before any new login shell exists.

use crate::config::{Config, FNM_INSTALLER_URL};
use crate::probe::HostProbe;
use crate::step::{Presence, Step, StepContext};
use crate::util::{download, shell};
use anyhow::Result;
use std::path::{Path, PathBuf};

pub struct Fnm {
    install_dir: PathBuf,
}

impl Fnm {
    pub fn new(home: &Path) -> Self {
        Self {
            install_dir: home.join(".local/share/fnm"),
        }
    }
}

impl Step for Fnm {
    fn name(&self) -> &str {
        "fnm"
    }

    fn summary(&self) -> String {
        "Installing fnm (Node version manager)".to_string()
    }

    fn check(&self, probe: &dyn HostProbe) -> Result<Presence> {
        if probe.path_exists(&self.install_dir.join("fnm")) {
            Ok(Presence::Present(format!(
                "fnm binary in {}",
                self.install_dir.display()
            )))
        } else {
            Ok(Presence::Absent)
        }
    }

    fn apply(&self, ctx: &StepContext) -> Result<()> {
        let installer = ctx.staging.join("fnm-install.sh");
        download::fetch(FNM_INSTALLER_URL, &installer)?;
        shell::run(&format!(
            "sh '{}' --install-dir '{}' --skip-shell",
            installer.display(),
            self.install_dir.display()
        ))?;
        shell::run(&format!(
            "'{}' --version",
            self.install_dir.join("fnm").display()
        ))
    }
}

pub struct Node {
    version: String,
    fnm_dir: PathBuf,
}

impl Node {
    pub fn new(config: &Config, home: &Path) -> Self {
        Self {
            version: config.pinned.node.clone(),
            fnm_dir: home.join(".local/share/fnm"),
        }
    }
}

impl Step for Node {
    fn name(&self) -> &str {
        "node"
    }

    fn summary(&self) -> String {
        format!("Installing Node {} and pnpm", self.version)
    }

    fn check(&self, probe: &dyn HostProbe) -> Result<Presence> {
        // fnm keeps installed runtimes under node-versions/v<version>.
        let installed = self
            .fnm_dir
            .join("node-versions")
            .join(format!("v{}", self.version));
        if probe.path_exists(&installed) {
            Ok(Presence::Present(format!("Node v{} installed", self.version)))
        } else {
            Ok(Presence::Absent)
        }
    }

    fn apply(&self, _ctx: &StepContext) -> Result<()> {
        shell::run(&format!(
            r#"export PATH="{dir}:$PATH" \
               && eval "$(fnm env --shell bash)" \
               && fnm install {v} \
               && fnm default {v} \
               && fnm exec --using {v} npm install -g pnpm"#,
            dir = self.fnm_dir.display(),
            v = self.version
        ))
    }
}

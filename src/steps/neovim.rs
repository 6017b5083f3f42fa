//! Neovim step
//!
//! Extracts the pinned release into /opt/nvim and symlinks
//! /usr/local/bin/nvim into it. A leftover /opt/nvim from an interrupted
//! earlier run is replaced wholesale before the move.

use crate::config::Config;
use crate::probe::HostProbe;
use crate::step::{Presence, Step, StepContext};
use crate::util::{download, extract, shell};
use anyhow::Result;
use std::path::Path;

const NVIM_OPT: &str = "/opt/nvim";
const NVIM_LINK: &str = "/usr/local/bin/nvim";

/// Top-level directory inside the release tarball.
const ARCHIVE_DIR: &str = "nvim-linux64";

pub struct Neovim {
    version: String,
    url: String,
    sha256: Option<String>,
}

impl Neovim {
    pub fn new(config: &Config) -> Self {
        Self {
            version: config.pinned.neovim.clone(),
            url: config.neovim_url(),
            sha256: config.checksums.neovim.clone(),
        }
    }
}

impl Step for Neovim {
    fn name(&self) -> &str {
        "neovim"
    }

    fn summary(&self) -> String {
        format!("Installing Neovim {}", self.version)
    }

    fn check(&self, probe: &dyn HostProbe) -> Result<Presence> {
        if probe.path_exists(Path::new(NVIM_LINK)) {
            Ok(Presence::Present(format!("{} exists", NVIM_LINK)))
        } else {
            Ok(Presence::Absent)
        }
    }

    fn apply(&self, ctx: &StepContext) -> Result<()> {
        let archive = ctx.staging.join(format!("nvim-{}.tar.gz", self.version));
        download::fetch_verified(&self.url, &archive, self.sha256.as_deref())?;
        extract::extract(&archive, &ctx.staging)?;

        let extracted = ctx.staging.join(ARCHIVE_DIR);
        shell::run(&format!(
            "sudo rm -rf {dest} && sudo mv '{src}' {dest}",
            src = extracted.display(),
            dest = NVIM_OPT
        ))?;
        shell::run(&format!(
            "sudo ln -sfn {}/bin/nvim {}",
            NVIM_OPT, NVIM_LINK
        ))?;

        shell::run(&format!("{} --version", NVIM_LINK))
    }
}

//! Nerd font step
//!
//! Extracts the JetBrainsMono Nerd Fonts zip into the per-user fonts
//! directory and refreshes the fontconfig cache. The regular-weight TTF is
//! the presence marker.

use crate::config::Config;
use crate::probe::HostProbe;
use crate::step::{Presence, Step, StepContext};
use crate::util::{download, extract, shell};
use anyhow::{Result, ensure};
use std::path::{Path, PathBuf};

const MARKER_TTF: &str = "JetBrainsMonoNerdFont-Regular.ttf";

pub struct NerdFont {
    version: String,
    url: String,
    sha256: Option<String>,
    fonts_dir: PathBuf,
}

impl NerdFont {
    pub fn new(config: &Config, home: &Path) -> Self {
        Self {
            version: config.pinned.nerd_fonts.clone(),
            url: config.nerd_font_url(),
            sha256: config.checksums.nerd_fonts.clone(),
            fonts_dir: home.join(".local/share/fonts"),
        }
    }

    fn marker(&self) -> PathBuf {
        self.fonts_dir.join(MARKER_TTF)
    }
}

impl Step for NerdFont {
    fn name(&self) -> &str {
        "nerd-font"
    }

    fn summary(&self) -> String {
        format!("Installing JetBrainsMono Nerd Font {}", self.version)
    }

    fn check(&self, probe: &dyn HostProbe) -> Result<Presence> {
        if probe.path_exists(&self.marker()) {
            Ok(Presence::Present(format!("{} exists", MARKER_TTF)))
        } else {
            Ok(Presence::Absent)
        }
    }

    fn apply(&self, ctx: &StepContext) -> Result<()> {
        let archive = ctx.staging.join("JetBrainsMono.zip");
        download::fetch_verified(&self.url, &archive, self.sha256.as_deref())?;
        extract::extract(&archive, &self.fonts_dir)?;

        ensure!(
            self.marker().exists(),
            "font archive did not contain {}",
            MARKER_TTF
        );

        shell::run("fc-cache -f")
    }
}

//! Pinned versions, download targets, and the snap list
//!
//! Everything the sequence installs is pinned here. Built-in defaults cover a
//! stock setup; a TOML file (`--config`, or `~/.config/devinit/config.toml`)
//! overrides them. Versions are hard-coded rather than resolved dynamically so
//! two runs of the same binary provision the same machine.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Installer scripts piped to `sh`. These hosts publish no pinned archives;
/// the scripts themselves select the release.
pub const RUSTUP_INSTALLER_URL: &str = "https://sh.rustup.rs";
pub const STARSHIP_INSTALLER_URL: &str = "https://starship.rs/install.sh";
pub const FNM_INSTALLER_URL: &str = "https://fnm.vercel.app/install";

/// Release archive target. One OS family, one architecture.
pub const TARGET: &str = "x86_64-unknown-linux-gnu";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub pinned: Pinned,
    pub checksums: Checksums,
    pub repos: Repos,
    pub apt: Apt,
    pub snaps: Snaps,
}

/// Release versions hard-coded into the sequence.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Pinned {
    pub nushell: String,
    pub neovim: String,
    pub node: String,
    pub nerd_fonts: String,
}

impl Default for Pinned {
    fn default() -> Self {
        Self {
            nushell: "0.101.0".to_string(),
            neovim: "0.10.3".to_string(),
            node: "22.13.0".to_string(),
            nerd_fonts: "3.3.0".to_string(),
        }
    }
}

/// Optional SHA-256 digests for the pinned archives. Unset means the
/// download is trusted as fetched.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Checksums {
    pub nushell: Option<String>,
    pub neovim: Option<String>,
    pub nerd_fonts: Option<String>,
}

/// Personal configuration repositories cloned into `~/.config`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Repos {
    pub zellij_config: String,
    pub nvim_config: String,
}

impl Default for Repos {
    fn default() -> Self {
        Self {
            zellij_config: "https://github.com/mjp-dev/zellij-config.git".to_string(),
            nvim_config: "https://github.com/mjp-dev/nvim-config.git".to_string(),
        }
    }
}

/// Base toolchain installed in one bulk apt invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Apt {
    pub base_packages: Vec<String>,
}

impl Default for Apt {
    fn default() -> Self {
        Self {
            base_packages: [
                "build-essential",
                "curl",
                "git",
                "unzip",
                "pkg-config",
                "libssl-dev",
                "fontconfig",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Desktop applications installed through snap.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Snaps {
    pub apps: Vec<SnapApp>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapApp {
    pub name: String,
    /// Install with `--classic` confinement.
    #[serde(default)]
    pub classic: bool,
}

impl SnapApp {
    fn new(name: &str, classic: bool) -> Self {
        Self {
            name: name.to_string(),
            classic,
        }
    }
}

impl Default for Snaps {
    fn default() -> Self {
        Self {
            apps: vec![
                SnapApp::new("code", true),
                SnapApp::new("obsidian", true),
                SnapApp::new("discord", false),
                SnapApp::new("slack", false),
                SnapApp::new("spotify", false),
            ],
        }
    }
}

impl Config {
    /// Load configuration: an explicit path must exist and parse; otherwise
    /// the default location is used if present, else built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Config::default()),
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    pub fn nushell_url(&self) -> String {
        format!(
            "https://github.com/nushell/nushell/releases/download/{v}/nu-{v}-{TARGET}.tar.gz",
            v = self.pinned.nushell
        )
    }

    /// Name of the top-level directory inside the nushell tarball.
    pub fn nushell_archive_dir(&self) -> String {
        format!("nu-{}-{}", self.pinned.nushell, TARGET)
    }

    pub fn neovim_url(&self) -> String {
        format!(
            "https://github.com/neovim/neovim/releases/download/v{}/nvim-linux64.tar.gz",
            self.pinned.neovim
        )
    }

    pub fn nerd_font_url(&self) -> String {
        format!(
            "https://github.com/ryanoasis/nerd-fonts/releases/download/v{}/JetBrainsMono.zip",
            self.pinned.nerd_fonts
        )
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("devinit/config.toml"))
}

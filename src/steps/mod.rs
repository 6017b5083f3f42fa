//! The provisioning sequence
//!
//! A fixed, ordered list of steps, executed top to bottom. Ordering is
//! significant: later steps assume earlier ones put their binaries in place
//! (Node tooling runs with the fnm environment sourced in-session).

pub mod apt;
pub mod font;
pub mod neovim;
pub mod node;
pub mod nushell;
pub mod nvim_config;
pub mod report;
pub mod rustup;
pub mod snaps;
pub mod starship;
pub mod zellij;

use crate::config::Config;
use crate::step::Step;
use std::path::Path;

/// Knobs that change which steps run or what they do, fixed at invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Register nu as the login shell after installing it.
    pub set_login_shell: bool,
    /// Leave out the snap application steps (hosts without snapd).
    pub skip_snaps: bool,
}

/// Build the full step list in provisioning order.
pub fn sequence(config: &Config, home: &Path, opts: RunOptions) -> Vec<Box<dyn Step>> {
    let mut steps: Vec<Box<dyn Step>> = vec![
        Box::new(apt::SystemUpdate::initial()),
        Box::new(apt::BasePackages::new(config)),
        Box::new(rustup::Rustup::new(home)),
        Box::new(nushell::Nushell::new(config, opts.set_login_shell)),
        Box::new(zellij::ZellijConfig::new(config, home)),
        Box::new(neovim::Neovim::new(config)),
        Box::new(font::NerdFont::new(config, home)),
        Box::new(starship::Starship),
        Box::new(nvim_config::NvimConfig::new(config, home)),
        Box::new(node::Fnm::new(home)),
        Box::new(node::Node::new(config, home)),
    ];

    if !opts.skip_snaps {
        for app in &config.snaps.apps {
            steps.push(Box::new(snaps::Snap::new(app)));
        }
    }

    steps.push(Box::new(apt::SystemUpdate::fin()));
    steps
}

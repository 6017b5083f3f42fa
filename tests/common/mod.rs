//! Shared test fixtures
//!
//! `MockHost` is a scripted [`HostProbe`]: tests declare which commands,
//! paths, snaps, and login shells exist, and step checks observe exactly
//! that. No test here touches the real machine.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use anyhow::Result;
use devinit::probe::HostProbe;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Default)]
pub struct MockHost {
    commands: HashSet<String>,
    paths: HashSet<PathBuf>,
    snaps: HashSet<String>,
    shells: HashSet<String>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command(mut self, name: &str) -> Self {
        self.commands.insert(name.to_string());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(path.into());
        self
    }

    pub fn with_snap(mut self, name: &str) -> Self {
        self.snaps.insert(name.to_string());
        self
    }

    pub fn with_login_shell(mut self, path: &str) -> Self {
        self.shells.insert(path.to_string());
        self
    }
}

impl HostProbe for MockHost {
    fn command_on_path(&self, name: &str) -> bool {
        self.commands.contains(name)
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    fn snap_installed(&self, name: &str) -> Result<bool> {
        Ok(self.snaps.contains(name))
    }

    fn login_shell_registered(&self, shell_path: &str) -> Result<bool> {
        Ok(self.shells.contains(shell_path))
    }
}

/// A mock host where every guarded target in the default sequence exists.
pub fn fully_provisioned_host(home: &Path) -> MockHost {
    MockHost::new()
        .with_command("rustc")
        .with_command("nu")
        .with_command("starship")
        .with_path("/usr/local/bin/nvim")
        .with_path(home.join(".config/zellij"))
        .with_path(home.join(".config/nvim/.git"))
        .with_path(home.join(".local/share/fonts/JetBrainsMonoNerdFont-Regular.ttf"))
        .with_path(home.join(".local/share/fnm/fnm"))
        .with_path(home.join(".local/share/fnm/node-versions/v22.13.0"))
        .with_snap("code")
        .with_snap("obsidian")
        .with_snap("discord")
        .with_snap("slack")
        .with_snap("spotify")
}

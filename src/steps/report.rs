//! Version report
//!
//! Printed after a fully successful run (and on demand via `devinit
//! versions`). Tools installed this session may not be on PATH until the
//! next login shell, so each entry falls back to its absolute install
//! location, and a tool that still can't be found renders as "not found"
//! rather than failing.

use crate::output;
use crate::util::shell;
use std::path::Path;

pub fn print_versions(home: &Path) {
    output::action("Installed tool versions");

    let fnm_dir = home.join(".local/share/fnm");
    let fnm_env = format!(
        r#"export PATH="{}:$PATH" && eval "$(fnm env --shell bash)""#,
        fnm_dir.display()
    );

    let entries: Vec<(&str, String)> = vec![
        (
            "rustc",
            format!(
                "rustc --version 2>/dev/null || '{}' --version",
                home.join(".cargo/bin/rustc").display()
            ),
        ),
        ("nu", "/usr/local/bin/nu --version".to_string()),
        ("nvim", "/usr/local/bin/nvim --version".to_string()),
        ("starship", "starship --version".to_string()),
        (
            "fnm",
            format!("'{}' --version", fnm_dir.join("fnm").display()),
        ),
        ("node", format!("{} && node --version", fnm_env)),
        ("pnpm", format!("{} && pnpm --version", fnm_env)),
    ];

    for (label, cmd) in entries {
        match shell::capture(&cmd) {
            Ok(out) => {
                let first_line = out.lines().next().unwrap_or("").trim().to_string();
                output::info(&format!("{:<10} {}", label, first_line));
            }
            Err(_) => output::info(&format!("{:<10} not found", label)),
        }
    }
}

//! Shell execution helpers
//!
//! Steps invoke external collaborators (apt, snap, installer scripts, chsh,
//! fc-cache) through `sh -c`, inheriting stdio so their output streams to the
//! terminal. A non-zero exit is an error; there is no retry.

use anyhow::{Result, bail};
use std::process::{Command, Stdio};

/// Run a shell command, failing on non-zero exit.
///
/// Child stdout and stderr are inherited so tool output streams through.
pub fn run(cmd: &str) -> Result<()> {
    let status = Command::new("sh")
        .args(["-c", cmd])
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .stdin(Stdio::null())
        .status()
        .map_err(|e| anyhow::anyhow!("command failed to start: {}", e))?;

    if !status.success() {
        bail!(
            "command failed with exit code: {:?}\n  command: {}",
            status.code(),
            cmd
        );
    }

    Ok(())
}

/// Run a shell command and return its stdout.
pub fn capture(cmd: &str) -> Result<String> {
    let output = Command::new("sh")
        .args(["-c", cmd])
        .output()
        .map_err(|e| anyhow::anyhow!("command failed to start: {}", e))?;

    if !output.status.success() {
        bail!(
            "command failed with exit code: {:?}\n  command: {}",
            output.status.code(),
            cmd
        );
    }

    String::from_utf8(output.stdout).map_err(|e| anyhow::anyhow!("invalid utf8 output: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_success() {
        assert!(run("true").is_ok());
    }

    #[test]
    fn test_run_failure_carries_command() {
        let err = run("false").unwrap_err();
        assert!(err.to_string().contains("false"));
    }

    #[test]
    fn test_capture() {
        let out = capture("echo hello").unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[test]
    fn test_capture_failure() {
        assert!(capture("exit 1").is_err());
    }
}

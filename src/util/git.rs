//! Git clone helpers
//!
//! Configuration repositories are cloned shallowly into an explicit
//! destination. A destination that already holds a valid clone is left
//! alone; a corrupt one is removed and re-cloned.

use crate::output;
use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::{Command, Stdio};

/// Only network URL schemes are accepted; bare local paths are not clone
/// targets for this tool.
fn validate_url(url: &str) -> Result<()> {
    if url.starts_with("https://")
        || url.starts_with("http://")
        || url.starts_with("git@")
        || url.starts_with("ssh://")
    {
        Ok(())
    } else {
        bail!(
            "unsupported git URL scheme: {}\n\
             only https://, http://, ssh://, and git@ URLs are supported",
            url
        )
    }
}

/// Does `dir` hold a clone with a resolvable HEAD?
pub fn is_valid_repo(dir: &Path) -> bool {
    if !dir.join(".git").exists() {
        return false;
    }
    Command::new("git")
        .args(["-C", &dir.to_string_lossy(), "rev-parse", "HEAD"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Shallow-clone `url` into `dest` (the repository directory itself, not a
/// parent). An existing valid clone is kept; a corrupt one is re-cloned.
pub fn clone_into(url: &str, dest: &Path) -> Result<()> {
    validate_url(url)?;

    if dest.join(".git").exists() {
        if is_valid_repo(dest) {
            output::detail(&format!("git: {} already cloned", dest.display()));
            return Ok(());
        }
        output::warning(&format!(
            "git: {} exists but is invalid, re-cloning",
            dest.display()
        ));
        let _ = std::fs::remove_dir_all(dest);
    }

    output::detail(&format!("git clone {}", url));

    let dest_str = dest
        .to_str()
        .context("destination path contains invalid UTF-8")?;

    let output = Command::new("git")
        .args(["clone", "--depth", "1", url, dest_str])
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .with_context(|| "failed to run git")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git clone failed for {}\nDetails: {}", url, stderr.trim());
    }

    output::detail(&format!("cloned {} to {}", url, dest.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_url_https() {
        assert!(validate_url("https://github.com/user/repo.git").is_ok());
    }

    #[test]
    fn test_validate_url_ssh() {
        assert!(validate_url("git@github.com:user/repo.git").is_ok());
        assert!(validate_url("ssh://git@github.com/user/repo.git").is_ok());
    }

    #[test]
    fn test_validate_url_file_rejected() {
        assert!(validate_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_validate_url_bare_path_rejected() {
        assert!(validate_url("/local/path/to/repo").is_err());
    }

    #[test]
    fn test_is_valid_repo_plain_dir() {
        let dir = TempDir::new().unwrap();
        assert!(!is_valid_repo(dir.path()));
    }

    #[test]
    fn test_is_valid_repo_fake_git_dir() {
        // A .git directory with no objects has no resolvable HEAD.
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(!is_valid_repo(dir.path()));
    }

    #[test]
    fn test_clone_into_rejects_local_path() {
        let dir = TempDir::new().unwrap();
        let err = clone_into(
            &dir.path().to_string_lossy(),
            &dir.path().join("clone"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported git URL scheme"));
    }
}

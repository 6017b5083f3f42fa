//! Download helpers
//!
//! Streams a URL to disk with a progress bar. Pinned archives can carry a
//! SHA-256 digest; when present, a mismatch fails the download.

use crate::output;
use crate::util::fsx;
use anyhow::{Context, Result, bail};
use sha2::{Digest, Sha256};
use std::io::{Read, Write};
use std::path::Path;

/// Download `url` to `dest`, returning the number of bytes written.
pub fn fetch(url: &str, dest: &Path) -> Result<u64> {
    fetch_verified(url, dest, None)
}

/// Download `url` to `dest` and, when a digest is given, verify it.
pub fn fetch_verified(url: &str, dest: &Path, sha256: Option<&str>) -> Result<u64> {
    fsx::ensure_parent_dir(dest)?;

    let filename = dest
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "download".to_string());

    let response = ureq::get(url)
        .call()
        .with_context(|| format!("download failed: {}", url))?;

    let pb = match response
        .header("content-length")
        .and_then(|s| s.parse().ok())
    {
        Some(len) => output::download_progress(len),
        None => output::spinner(&format!("downloading {}", filename)),
    };

    let mut file = std::fs::File::create(dest)
        .with_context(|| format!("cannot create file: {}", dest.display()))?;

    let mut reader = response.into_reader();
    let mut buffer = [0u8; 8192];
    let mut total_bytes = 0u64;
    let mut hasher = Sha256::new();

    loop {
        let bytes_read = reader.read(&mut buffer).context("read error")?;
        if bytes_read == 0 {
            break;
        }

        file.write_all(&buffer[..bytes_read])
            .with_context(|| format!("write error: {}", dest.display()))?;
        hasher.update(&buffer[..bytes_read]);

        total_bytes += bytes_read as u64;
        pb.set_position(total_bytes);
    }

    pb.finish_and_clear();

    if let Some(expected) = sha256 {
        let actual = hex::encode(hasher.finalize());
        if !actual.eq_ignore_ascii_case(expected.trim()) {
            let _ = std::fs::remove_file(dest);
            bail!(
                "sha256 mismatch for {}\n  expected: {}\n  actual:   {}",
                filename,
                expected.trim(),
                actual
            );
        }
        output::detail(&format!("verified sha256 of {}", filename));
    }

    output::detail(&format!("downloaded {} ({} bytes)", filename, total_bytes));
    Ok(total_bytes)
}

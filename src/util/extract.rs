//! Native archive extraction
//!
//! Handles the three formats the pinned artifacts ship as: tar.gz (nushell,
//! neovim), tar.xz, and zip (nerd fonts). No external tar/unzip needed.
//!
//! Tar entries are validated before unpacking: absolute paths, `..`
//! components, symlinked path components, and link targets escaping the
//! destination are all rejected.

use crate::output;
use anyhow::{Context as _, Result, bail};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    TarGz,
    TarXz,
    Zip,
}

fn detect_format(archive: &Path) -> Option<Format> {
    let name = archive.file_name()?.to_string_lossy().to_lowercase();
    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        Some(Format::TarGz)
    } else if name.ends_with(".tar.xz") || name.ends_with(".txz") {
        Some(Format::TarXz)
    } else if name.ends_with(".zip") {
        Some(Format::Zip)
    } else {
        None
    }
}

/// Extract an archive into `dest`, creating it if needed. Format is detected
/// from the filename extension.
pub fn extract(archive: &Path, dest: &Path) -> Result<()> {
    let format = detect_format(archive)
        .with_context(|| format!("cannot detect archive format: {}", archive.display()))?;

    std::fs::create_dir_all(dest)
        .with_context(|| format!("cannot create destination: {}", dest.display()))?;

    let filename = archive
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "archive".to_string());

    let pb = output::spinner(&format!("extracting {}", filename));
    let result = match format {
        Format::TarGz => {
            let reader = open_buffered(archive)?;
            unpack_tar(flate2::read::GzDecoder::new(reader), dest)
        }
        Format::TarXz => {
            let reader = open_buffered(archive)?;
            unpack_tar(xz2::read::XzDecoder::new(reader), dest)
        }
        Format::Zip => unpack_zip(archive, dest),
    };
    pb.finish_and_clear();

    result?;
    output::detail(&format!("extracted {} to {}", filename, dest.display()));
    Ok(())
}

fn open_buffered(archive: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(archive).with_context(|| format!("cannot open {}", archive.display()))?;
    Ok(BufReader::new(file))
}

fn unpack_tar<R: Read>(reader: R, dest: &Path) -> Result<()> {
    let mut archive = tar::Archive::new(reader);

    for entry in archive.entries().context("tar read error")? {
        let mut entry = entry.context("tar entry error")?;

        let path = entry.path().context("tar path error")?.into_owned();

        // Reject paths that could land outside the destination.
        if path.is_absolute() || path.components().any(|c| c == Component::ParentDir) {
            bail!("tar contains unsafe path: {}", path.display());
        }

        // Some archives carry a "." entry; treat it as a no-op.
        if path.as_os_str().is_empty() || path == Path::new(".") {
            continue;
        }

        let full_path = dest.join(&path);

        // Writing through a symlinked component could escape dest even when
        // the entry path itself is syntactically safe.
        reject_symlinked_components(dest, &full_path)?;

        let entry_type = entry.header().entry_type();
        if entry_type == tar::EntryType::Symlink || entry_type == tar::EntryType::Link {
            let link_name = entry
                .link_name()
                .context("tar link_name error")?
                .with_context(|| format!("tar link without target: {}", path.display()))?;
            let link_parent = full_path.parent().unwrap_or(dest);
            reject_escaping_link_target(dest, link_parent, &link_name)?;
        }

        if let Some(parent) = full_path.parent() {
            if parent.starts_with(dest) {
                reject_symlinked_components(dest, parent)?;
            }
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create directory {}", parent.display()))?;
        }

        entry
            .unpack(&full_path)
            .with_context(|| format!("unpack error for {}", path.display()))?;
    }

    Ok(())
}

fn unpack_zip(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive_path)
        .with_context(|| format!("cannot open {}", archive_path.display()))?;
    let mut archive = zip::ZipArchive::new(file).context("zip read error")?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).context("zip entry error")?;

        // enclosed_name() already rejects traversal; skip anything unsafe.
        let Some(rel) = file.enclosed_name() else {
            continue;
        };
        let outpath = dest.join(rel);

        if file.is_dir() {
            std::fs::create_dir_all(&outpath)
                .with_context(|| format!("cannot create directory {}", outpath.display()))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create directory {}", parent.display()))?;
        }

        let mut outfile = File::create(&outpath)
            .with_context(|| format!("cannot create {}", outpath.display()))?;
        std::io::copy(&mut file, &mut outfile)
            .with_context(|| format!("write error for {}", outpath.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode)).ok();
            }
        }
    }

    Ok(())
}

/// Lexically normalize a path (no filesystem access). Used to validate link
/// targets without following symlinks.
fn normalize_lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut has_root = false;

    for c in path.components() {
        match c {
            Component::Prefix(p) => {
                out.clear();
                out.push(p.as_os_str());
                has_root = true;
            }
            Component::RootDir => {
                out.push(Component::RootDir.as_os_str());
                has_root = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = out
                    .components()
                    .next_back()
                    .is_some_and(|last| matches!(last, Component::Normal(_)));
                if popped {
                    out.pop();
                } else if !has_root {
                    out.push("..");
                }
            }
            Component::Normal(seg) => out.push(seg),
        }
    }

    out
}

fn reject_symlinked_components(dest: &Path, full_path: &Path) -> Result<()> {
    let rel = full_path
        .strip_prefix(dest)
        .with_context(|| format!("tar path outside destination: {}", full_path.display()))?;

    let mut cur = dest.to_path_buf();
    for comp in rel.components() {
        cur.push(comp);
        if let Ok(md) = std::fs::symlink_metadata(&cur)
            && md.file_type().is_symlink()
        {
            bail!(
                "tar extraction blocked: symlink in path component: {}",
                cur.display()
            );
        }
    }

    Ok(())
}

fn reject_escaping_link_target(dest: &Path, link_parent: &Path, link_name: &Path) -> Result<()> {
    if link_name.is_absolute()
        || link_name
            .components()
            .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
    {
        bail!(
            "tar contains unsafe link target (absolute): {}",
            link_name.display()
        );
    }

    let candidate = normalize_lexical(&link_parent.join(link_name));
    let norm_dest = normalize_lexical(dest);
    if candidate.strip_prefix(&norm_dest).is_err() {
        bail!(
            "tar contains unsafe link target (escapes dest): {} -> {}",
            link_parent.display(),
            link_name.display()
        );
    }

    Ok(())
}

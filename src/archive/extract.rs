//! Archive extraction.
//!
//! Extractors unpack into an existing destination directory, keep the
//! archive's internal layout, and restore unix permission bits where the
//! archive records them. Entries whose path would land outside the
//! destination are skipped.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tar::Archive;
use zip::ZipArchive;

use super::ArchiveFormat;

/// Extract `archive_path` into `destination` using the given format.
pub fn extract(format: ArchiveFormat, archive_path: &Path, destination: &Path) -> Result<()> {
    tracing::debug!(
        "Extracting {} archive {:?} into {:?}",
        format,
        archive_path,
        destination
    );

    match format {
        ArchiveFormat::TarGz => extract_tar_gz(archive_path, destination),
        ArchiveFormat::Zip => extract_zip(archive_path, destination),
    }
}

fn extract_tar_gz(archive_path: &Path, destination: &Path) -> Result<()> {
    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open archive {:?}", archive_path))?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive.set_preserve_permissions(true);
    archive
        .unpack(destination)
        .with_context(|| format!("Failed to unpack tar.gz archive {:?}", archive_path))
}

fn extract_zip(archive_path: &Path, destination: &Path) -> Result<()> {
    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open archive {:?}", archive_path))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Failed to read zip archive {:?}", archive_path))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .with_context(|| format!("Failed to read zip entry #{}", i))?;

        let outpath = match entry.enclosed_name() {
            Some(path) => destination.join(path),
            None => {
                tracing::warn!("Skipping zip entry with unsafe path: {}", entry.name());
                continue;
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&outpath)
                .with_context(|| format!("Failed to create {:?}", outpath))?;
            io::copy(&mut entry, &mut outfile)
                .with_context(|| format!("Failed to write {:?}", outpath))?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))?;
            }
        }
    }

    Ok(())
}

//! Platform artifact fetching.
//!
//! Populates `<cache root>/<platform>/` from the manifest's artifact:
//! create the directory, download into a temporary file inside it, extract,
//! remove the temporary file. A failure at any point after the directory is
//! created removes the directory again, so its presence always means a
//! complete extraction.

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use indicatif::HumanBytes;

use crate::archive;
use crate::cache::CacheRoot;
use crate::config::{ResolvedArtifact, RuntimeManifest};
use crate::error::{Result, RuntimeCacheError};
use crate::platform::Platform;
use crate::ui::UserInterface;

use super::HttpFetcher;

/// What [`ArtifactFetcher::ensure`] did for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The platform directory already existed; nothing was downloaded.
    Cached,
    /// The artifact was downloaded and extracted.
    Fetched {
        /// Size of the downloaded archive.
        bytes: u64,
    },
}

/// Downloads and unpacks platform artifacts listed in a manifest.
pub struct ArtifactFetcher<'a> {
    manifest: &'a RuntimeManifest,
    http: &'a HttpFetcher,
}

impl<'a> ArtifactFetcher<'a> {
    /// Create a fetcher for the artifacts of `manifest`.
    pub fn new(manifest: &'a RuntimeManifest, http: &'a HttpFetcher) -> Self {
        Self { manifest, http }
    }

    /// Make sure `platform` is present under `cache`.
    ///
    /// The platform is resolved against the manifest first, so an unknown
    /// platform fails before any network access. An existing platform
    /// directory is a cache hit and is returned as-is.
    pub fn ensure(
        &self,
        cache: &CacheRoot,
        platform: Platform,
        ui: &mut dyn UserInterface,
    ) -> Result<EnsureOutcome> {
        let artifact = self.manifest.resolve(platform)?;
        let dir = cache.platform_dir(platform);

        if dir.exists() {
            tracing::debug!("{} already present at {:?}", platform, dir);
            return Ok(EnsureOutcome::Cached);
        }

        fs::create_dir(&dir)?;
        let guard = PartialDir::new(&dir);

        let bytes = self.download_and_extract(&artifact, &dir, ui)?;

        guard.commit();
        Ok(EnsureOutcome::Fetched { bytes })
    }

    fn download_and_extract(
        &self,
        artifact: &ResolvedArtifact,
        dir: &Path,
        ui: &mut dyn UserInterface,
    ) -> Result<u64> {
        let platform = artifact.platform;
        let mut download = tempfile::Builder::new()
            .prefix("download")
            .suffix(".tmp")
            .tempfile_in(dir)?;

        let label = format!("Downloading {} for platform {}", self.manifest.name, platform);
        let mut progress = ui.start_download(&label);

        let transfer = {
            let mut writer = BufWriter::new(download.as_file_mut());
            self.http
                .download(&artifact.url, &mut writer, progress.as_mut())
        };
        let bytes = match transfer {
            Ok(bytes) => {
                progress.finish_success(&format!(
                    "Downloaded {} ({})",
                    platform,
                    HumanBytes(bytes)
                ));
                bytes
            }
            Err(e) => {
                progress.finish_error(&format!("Download failed for {}", platform));
                return Err(RuntimeCacheError::Transfer {
                    platform,
                    url: artifact.url.clone(),
                    message: format!("{:#}", e),
                });
            }
        };

        archive::extract(artifact.format, download.path(), dir).map_err(|e| {
            RuntimeCacheError::Extraction {
                platform,
                message: format!("{:#}", e),
            }
        })?;

        download.close()?;
        tracing::debug!("Extracted {} into {:?}", platform, dir);
        Ok(bytes)
    }
}

/// Removes a freshly created platform directory unless committed.
struct PartialDir {
    path: PathBuf,
    committed: bool,
}

impl PartialDir {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PartialDir {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.path) {
            tracing::warn!("Failed to clean up partial download at {:?}: {}", self.path, e);
        } else {
            tracing::debug!("Removed partial download at {:?}", self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::extract::fixtures;
    use crate::archive::ArchiveFormat;
    use crate::config::ArtifactSource;
    use crate::ui::MockUI;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    fn manifest_for(server: &MockServer) -> RuntimeManifest {
        RuntimeManifest::new("Test Runtime", "1.0.0")
            .with_platform(
                Platform::Linux,
                ArtifactSource::new(server.url("/rt-linux.tar.gz")),
            )
            .with_platform(
                Platform::Windows,
                ArtifactSource::new(server.url("/rt-win.zip")),
            )
    }

    fn cache_in(temp: &TempDir) -> CacheRoot {
        let cache = CacheRoot::new(temp.path().join("cache"));
        fs::create_dir_all(cache.path()).unwrap();
        cache
    }

    fn tmp_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().is_some_and(|e| e == "tmp"))
            .collect()
    }

    #[test]
    fn fetches_and_extracts_tar_gz() {
        let server = MockServer::start();
        let archive = fixtures::tar_gz(&[
            ("dotnet", "host", 0o755),
            ("shared/Microsoft.NETCore.App/1.0.0/System.Runtime.dll", "dll", 0o644),
        ]);
        let mock = server.mock(|when, then| {
            when.method(GET).path("/rt-linux.tar.gz");
            then.status(200).body(archive.clone());
        });

        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        let manifest = manifest_for(&server);
        let http = HttpFetcher::new().unwrap();
        let mut ui = MockUI::new();

        let outcome = ArtifactFetcher::new(&manifest, &http)
            .ensure(&cache, Platform::Linux, &mut ui)
            .unwrap();

        mock.assert_calls(1);
        assert_eq!(
            outcome,
            EnsureOutcome::Fetched {
                bytes: archive.len() as u64
            }
        );
        let dir = cache.platform_dir(Platform::Linux);
        assert_eq!(fs::read(dir.join("dotnet")).unwrap(), b"host");
        assert!(dir
            .join("shared/Microsoft.NETCore.App/1.0.0/System.Runtime.dll")
            .is_file());
        assert!(tmp_files(&dir).is_empty());
        let download = &ui.downloads()[0];
        assert_eq!(download.label, "Downloading Test Runtime for platform linux");
        assert_eq!(
            download.finished,
            Some(Ok(format!("Downloaded linux ({} B)", archive.len())))
        );
    }

    #[test]
    fn fetches_and_extracts_zip() {
        let server = MockServer::start();
        let archive = fixtures::zip(&[("dotnet.exe", "MZ", 0o644), ("host/fxr/hostfxr.dll", "f", 0o644)]);
        server.mock(|when, then| {
            when.method(GET).path("/rt-win.zip");
            then.status(200).body(archive.clone());
        });

        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        let manifest = manifest_for(&server);
        let http = HttpFetcher::new().unwrap();
        let mut ui = MockUI::new();

        ArtifactFetcher::new(&manifest, &http)
            .ensure(&cache, Platform::Windows, &mut ui)
            .unwrap();

        let dir = cache.platform_dir(Platform::Windows);
        assert_eq!(fs::read(dir.join("dotnet.exe")).unwrap(), b"MZ");
        assert!(dir.join("host/fxr/hostfxr.dll").is_file());
        assert!(tmp_files(&dir).is_empty());
    }

    #[test]
    fn existing_directory_is_a_cache_hit() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/rt-linux.tar.gz");
            then.status(200).body("unused");
        });

        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        let dir = cache.platform_dir(Platform::Linux);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("marker"), "keep").unwrap();
        let manifest = manifest_for(&server);
        let http = HttpFetcher::new().unwrap();
        let mut ui = MockUI::new();

        let outcome = ArtifactFetcher::new(&manifest, &http)
            .ensure(&cache, Platform::Linux, &mut ui)
            .unwrap();

        assert_eq!(outcome, EnsureOutcome::Cached);
        mock.assert_calls(0);
        assert!(ui.downloads().is_empty());
        assert_eq!(fs::read_to_string(dir.join("marker")).unwrap(), "keep");
    }

    #[test]
    fn unconfigured_platform_fails_before_network() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.any_request();
            then.status(200);
        });

        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        let manifest = manifest_for(&server);
        let http = HttpFetcher::new().unwrap();
        let mut ui = MockUI::new();

        let err = ArtifactFetcher::new(&manifest, &http)
            .ensure(&cache, Platform::Mac, &mut ui)
            .unwrap_err();

        assert!(matches!(
            err,
            RuntimeCacheError::PlatformNotConfigured {
                platform: Platform::Mac
            }
        ));
        mock.assert_calls(0);
        assert!(!cache.has_platform(Platform::Mac));
    }

    #[test]
    fn unsupported_format_fails_before_network() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.any_request();
            then.status(200);
        });

        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        let manifest = manifest_for(&server).with_platform(
            Platform::Mac,
            ArtifactSource::new(server.url("/rt-osx.pkg")),
        );
        let http = HttpFetcher::new().unwrap();
        let mut ui = MockUI::new();

        let err = ArtifactFetcher::new(&manifest, &http)
            .ensure(&cache, Platform::Mac, &mut ui)
            .unwrap_err();

        assert!(matches!(err, RuntimeCacheError::UnsupportedArchive { .. }));
        mock.assert_calls(0);
        assert!(!cache.has_platform(Platform::Mac));
    }

    #[test]
    fn transfer_failure_leaves_nothing_behind() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rt-linux.tar.gz");
            then.status(404);
        });

        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        let manifest = manifest_for(&server);
        let http = HttpFetcher::new().unwrap();
        let mut ui = MockUI::new();

        let err = ArtifactFetcher::new(&manifest, &http)
            .ensure(&cache, Platform::Linux, &mut ui)
            .unwrap_err();

        assert!(matches!(
            err,
            RuntimeCacheError::Transfer {
                platform: Platform::Linux,
                ..
            }
        ));
        assert!(err.to_string().contains("404"));
        assert!(!cache.has_platform(Platform::Linux));
        assert!(matches!(ui.downloads()[0].finished, Some(Err(_))));
    }

    #[test]
    fn corrupt_archive_leaves_nothing_behind() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/rt-win.zip");
            then.status(200).body("this is not a zip file");
        });

        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        let manifest = manifest_for(&server);
        let http = HttpFetcher::new().unwrap();
        let mut ui = MockUI::new();

        let err = ArtifactFetcher::new(&manifest, &http)
            .ensure(&cache, Platform::Windows, &mut ui)
            .unwrap_err();

        assert!(matches!(
            err,
            RuntimeCacheError::Extraction {
                platform: Platform::Windows,
                ..
            }
        ));
        assert!(!cache.has_platform(Platform::Windows));
        assert_eq!(fs::read_dir(cache.path()).unwrap().count(), 0);
    }

    #[test]
    fn explicit_format_is_used() {
        let server = MockServer::start();
        let archive = fixtures::tar_gz(&[("lib.so", "so", 0o644)]);
        server.mock(|when, then| {
            when.method(GET).path("/download");
            then.status(200).body(archive.clone());
        });

        let temp = TempDir::new().unwrap();
        let cache = cache_in(&temp);
        let manifest = RuntimeManifest::new("rt", "1.0.0").with_platform(
            Platform::Mac,
            ArtifactSource::new(server.url("/download")).with_format(ArchiveFormat::TarGz),
        );
        let http = HttpFetcher::new().unwrap();
        let mut ui = MockUI::new();

        ArtifactFetcher::new(&manifest, &http)
            .ensure(&cache, Platform::Mac, &mut ui)
            .unwrap();

        assert!(cache.platform_dir(Platform::Mac).join("lib.so").is_file());
    }
}

//! Cache root layout.

use std::io;
use std::path::{Path, PathBuf};

use super::marker::{read_marker, MARKER_FILE};
use crate::platform::Platform;

/// The on-disk cache: a version marker plus one directory per platform.
#[derive(Debug, Clone)]
pub struct CacheRoot {
    /// Root directory for cache.
    root: PathBuf,
}

impl CacheRoot {
    /// Create a handle for the cache at `root`. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the cache root directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Whether the cache root exists on disk.
    pub fn exists(&self) -> bool {
        self.root.exists()
    }

    /// Path of the version marker.
    pub fn marker_path(&self) -> PathBuf {
        self.root.join(MARKER_FILE)
    }

    /// Version recorded in the marker, or `None` if there is no marker.
    pub fn recorded_version(&self) -> io::Result<Option<String>> {
        read_marker(&self.marker_path())
    }

    /// Directory holding the extracted artifact for `platform`.
    pub fn platform_dir(&self, platform: Platform) -> PathBuf {
        self.root.join(platform.as_str())
    }

    /// Whether `platform` is present. Presence is the only completeness check.
    pub fn has_platform(&self, platform: Platform) -> bool {
        self.platform_dir(platform).exists()
    }

    /// Platforms whose directories are present, in [`Platform::ALL`] order.
    pub fn installed_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| self.platform_dir(*p).is_dir())
            .collect()
    }
}

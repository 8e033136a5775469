//! Runtime manifest schema.
//!
//! A manifest pins exactly one runtime: its name, the version the cache must
//! hold, where the cache lives, and which archive to fetch for each platform.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::archive::ArchiveFormat;
use crate::error::{Result, RuntimeCacheError};
use crate::platform::Platform;

/// Root structure of a runtime manifest file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeManifest {
    /// Display name of the runtime.
    #[serde(default = "default_name")]
    pub name: String,

    /// Version the cache must hold. Compared as an exact string.
    pub version: String,

    /// Cache root, relative to the working directory unless absolute.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// Artifact per platform.
    #[serde(default)]
    pub platforms: BTreeMap<Platform, ArtifactSource>,
}

fn default_name() -> String {
    "runtime".to_string()
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("Dependencies").join("runtime")
}

/// Where to download one platform's artifact from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSource {
    /// Download URL.
    pub url: String,

    /// Container format; inferred from the URL suffix when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ArchiveFormat>,
}

impl ArtifactSource {
    /// Create a source whose format is inferred from the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format: None,
        }
    }

    /// Set an explicit format.
    pub fn with_format(mut self, format: ArchiveFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// The explicit format, or the one implied by the URL suffix.
    pub fn resolved_format(&self) -> Option<ArchiveFormat> {
        self.format.or_else(|| ArchiveFormat::from_url(&self.url))
    }
}

/// A platform artifact with its format decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub platform: Platform,
    pub url: String,
    pub format: ArchiveFormat,
}

impl RuntimeManifest {
    /// Create a manifest with no platforms.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            cache_dir: default_cache_dir(),
            platforms: BTreeMap::new(),
        }
    }

    /// Set the cache directory.
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Add or replace a platform artifact.
    pub fn with_platform(mut self, platform: Platform, source: ArtifactSource) -> Self {
        self.platforms.insert(platform, source);
        self
    }

    /// Look up the artifact for a platform.
    ///
    /// Fails with a configuration error if the platform has no entry or its
    /// format cannot be determined. Never touches the network.
    pub fn resolve(&self, platform: Platform) -> Result<ResolvedArtifact> {
        let source = self
            .platforms
            .get(&platform)
            .ok_or(RuntimeCacheError::PlatformNotConfigured { platform })?;

        let format =
            source
                .resolved_format()
                .ok_or_else(|| RuntimeCacheError::UnsupportedArchive {
                    platform,
                    url: source.url.clone(),
                })?;

        Ok(ResolvedArtifact {
            platform,
            url: source.url.clone(),
            format,
        })
    }
}

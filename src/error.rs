//! Error types for runtime cache operations.
//!
//! This module defines [`RuntimeCacheError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `RuntimeCacheError` for failures the caller must tell apart
//!   (configuration, cache invalidation, transfer, extraction)
//! - Use `anyhow::Error` (via `RuntimeCacheError::Other`) for unexpected errors
//! - Every message names the platform and the failing stage where one applies

use std::path::PathBuf;
use thiserror::Error;

use crate::platform::Platform;

/// Core error type for runtime cache operations.
#[derive(Debug, Error)]
pub enum RuntimeCacheError {
    /// Platform token is not one of the known identifiers.
    #[error("Unknown platform '{token}' (expected one of: {expected})")]
    UnknownPlatform { token: String, expected: String },

    /// Platform is known but the manifest has no artifact for it.
    #[error("No artifact configured for platform '{platform}'")]
    PlatformNotConfigured { platform: Platform },

    /// Artifact URL does not map to a supported archive format.
    #[error("Unsupported archive format for platform '{platform}': {url}")]
    UnsupportedArchive { platform: Platform, url: String },

    /// Manifest file not found at the given location.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Manifest file could not be parsed.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// Manifest parsed but its contents are invalid.
    #[error("Invalid manifest: {message}")]
    ManifestValidation { message: String },

    /// Existing cache directory could not be removed.
    #[error("Failed to invalidate cache at {path}: {source}")]
    CacheInvalidation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Download failed (connection error or non-success status).
    #[error("Download failed for platform '{platform}' from {url}: {message}")]
    Transfer {
        platform: Platform,
        url: String,
        message: String,
    },

    /// Archive is corrupt or could not be unpacked.
    #[error("Extraction failed for platform '{platform}': {message}")]
    Extraction { platform: Platform, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Stage of a run in which an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Configuration,
    Invalidation,
    Download,
    Extract,
    Other,
}

impl Stage {
    /// Short label used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Configuration => "configuration",
            Stage::Invalidation => "cache invalidation",
            Stage::Download => "download",
            Stage::Extract => "extract",
            Stage::Other => "io",
        }
    }
}

impl RuntimeCacheError {
    /// The stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::UnknownPlatform { .. }
            | Self::PlatformNotConfigured { .. }
            | Self::UnsupportedArchive { .. }
            | Self::ManifestNotFound { .. }
            | Self::ManifestParse { .. }
            | Self::ManifestValidation { .. } => Stage::Configuration,
            Self::CacheInvalidation { .. } => Stage::Invalidation,
            Self::Transfer { .. } => Stage::Download,
            Self::Extraction { .. } => Stage::Extract,
            Self::Io(_) | Self::Other(_) => Stage::Other,
        }
    }

    /// Whether this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        self.stage() == Stage::Configuration
    }

    /// Whether the error aborts the whole run rather than one platform.
    pub fn aborts_run(&self) -> bool {
        matches!(self.stage(), Stage::Configuration | Stage::Invalidation)
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        if self.is_configuration() {
            2
        } else {
            1
        }
    }
}

/// Result type alias for runtime cache operations.
pub type Result<T> = std::result::Result<T, RuntimeCacheError>;

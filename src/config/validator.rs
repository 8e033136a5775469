//! Manifest validation rules.
//!
//! - The version must be a non-empty single-line token
//! - At least one platform must be configured
//! - Every URL must be non-empty and map to a supported archive format

use crate::config::schema::RuntimeManifest;
use crate::error::{Result, RuntimeCacheError};

/// A single problem found in a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: &'static str,
    /// Human-readable error message
    pub message: String,
}

/// Validate a manifest and return all errors.
pub fn validate_manifest(manifest: &RuntimeManifest) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let version = manifest.version.trim();
    if version.is_empty() {
        errors.push(ValidationError {
            rule: "empty-version",
            message: "Manifest version must not be empty".to_string(),
        });
    } else if manifest.version.chars().any(char::is_whitespace) {
        errors.push(ValidationError {
            rule: "version-whitespace",
            message: format!(
                "Manifest version '{}' must not contain whitespace or line breaks",
                manifest.version.escape_debug()
            ),
        });
    }

    if manifest.platforms.is_empty() {
        errors.push(ValidationError {
            rule: "no-platforms",
            message: "Manifest must configure at least one platform".to_string(),
        });
    }

    for (platform, source) in &manifest.platforms {
        if source.url.trim().is_empty() {
            errors.push(ValidationError {
                rule: "empty-url",
                message: format!("Platform '{}' has an empty url", platform),
            });
        } else if source.resolved_format().is_none() {
            errors.push(ValidationError {
                rule: "unknown-format",
                message: format!(
                    "Platform '{}' url '{}' is not a .tar.gz or .zip archive; set 'format' explicitly",
                    platform, source.url
                ),
            });
        }
    }

    errors
}

/// Validate a manifest, returning the first-class error on failure.
pub fn validate(manifest: &RuntimeManifest) -> Result<()> {
    let errors = validate_manifest(manifest);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(RuntimeCacheError::ManifestValidation {
            message: messages.join("; "),
        })
    }
}

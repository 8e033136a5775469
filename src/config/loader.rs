//! Manifest loading.
//!
//! The manifest pinned by this release is embedded in the binary. A manifest
//! file given on the command line replaces it wholesale; there is no merging.

use crate::config::schema::RuntimeManifest;
use crate::config::validator::validate;
use crate::error::{Result, RuntimeCacheError};
use std::fs;
use std::path::Path;

/// Source text of the built-in manifest.
pub const BUILTIN_MANIFEST: &str = include_str!("../../manifests/dotnet-runtime.yml");

/// Parse and validate the built-in manifest.
pub fn builtin_manifest() -> Result<RuntimeManifest> {
    let manifest = parse_manifest(BUILTIN_MANIFEST, Path::new("<builtin>"))?;
    validate(&manifest)?;
    Ok(manifest)
}

/// Load a single manifest file.
///
/// # Errors
///
/// Returns `ManifestNotFound` if the file doesn't exist.
/// Returns `ManifestParse` if the YAML is invalid.
pub fn load_manifest_file(path: &Path) -> Result<RuntimeManifest> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RuntimeCacheError::ManifestNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RuntimeCacheError::Io(e)
        }
    })?;

    parse_manifest(&content, path)
}

/// Parse YAML content into a manifest.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_manifest(content: &str, source_path: &Path) -> Result<RuntimeManifest> {
    serde_yaml::from_str(content).map_err(|e| RuntimeCacheError::ManifestParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the manifest file at `path` if given, otherwise the built-in one.
///
/// The result is always validated.
pub fn load_manifest(path: Option<&Path>) -> Result<RuntimeManifest> {
    match path {
        Some(path) => {
            tracing::debug!("Loading manifest from {:?}", path);
            let manifest = load_manifest_file(path)?;
            validate(&manifest)?;
            Ok(manifest)
        }
        None => builtin_manifest(),
    }
}

//! Runtime manifest loading and validation.
//!
//! - Schema definitions in [`schema`]
//! - Built-in manifest and file loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use runtime_cache::config::{parse_manifest, validate};
//! use runtime_cache::platform::Platform;
//! use std::path::Path;
//!
//! let yaml = r#"
//! name: Example Runtime
//! version: "1.2.3"
//! cache_dir: deps/example
//! platforms:
//!   linux:
//!     url: https://example.com/example-1.2.3-linux.tar.gz
//! "#;
//!
//! let manifest = parse_manifest(yaml, Path::new("example.yml")).unwrap();
//! validate(&manifest).unwrap();
//! assert!(manifest.resolve(Platform::Linux).is_ok());
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    builtin_manifest, load_manifest, load_manifest_file, parse_manifest, BUILTIN_MANIFEST,
};
pub use schema::{ArtifactSource, ResolvedArtifact, RuntimeManifest};
pub use validator::{validate, validate_manifest, ValidationError};

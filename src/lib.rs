//! runtime-cache - Version-gated local cache for platform runtime archives.
//!
//! Keeps one named runtime (by default the .NET Core Runtime) unpacked on
//! disk for a set of target platforms. A `VERSION` marker in the cache root
//! records which version the cache holds; when it differs from the wanted
//! version the whole cache is discarded, and any requested platform that is
//! missing is downloaded and extracted again.
//!
//! # Modules
//!
//! - [`archive`] - Archive formats and extraction
//! - [`cache`] - Cache root layout, version marker and invalidation
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Runtime manifest loading and validation
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - HTTP downloads and per-platform population
//! - [`platform`] - Platform identifiers
//! - [`runner`] - Update orchestration
//! - [`ui`] - Status output and download progress
//!
//! # Example
//!
//! ```
//! use runtime_cache::cache::{CacheRoot, CacheTracker, ReconcileOutcome};
//!
//! let temp = tempfile::tempdir().unwrap();
//! let cache = CacheRoot::new(temp.path().join("dotnet"));
//!
//! let outcome = CacheTracker::new(&cache).reconcile("3.1.0").unwrap();
//! assert_eq!(outcome, ReconcileOutcome::Fresh);
//! assert_eq!(cache.recorded_version().unwrap().as_deref(), Some("3.1.0"));
//! ```

pub mod archive;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod platform;
pub mod runner;
pub mod ui;

pub use error::{Result, RuntimeCacheError};

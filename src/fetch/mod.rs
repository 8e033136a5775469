//! Artifact download and unpacking.
//!
//! [`HttpFetcher`] streams a URL to a writer; [`ArtifactFetcher`] uses it
//! to populate one platform directory of the cache.

pub mod artifact;
pub mod http;

pub use artifact::{ArtifactFetcher, EnsureOutcome};
pub use http::HttpFetcher;

//! Runtime cache state.
//!
//! The cache root holds a `VERSION` marker and one directory per platform.
//! [`CacheTracker`] compares the marker with the desired version and wipes
//! the whole root on any mismatch before new artifacts are fetched.

pub mod marker;
pub mod store;
pub mod tracker;

pub use marker::{read_marker, write_marker, MARKER_FILE};
pub use store::CacheRoot;
pub use tracker::{CacheTracker, ReconcileOutcome};

//! Cache update orchestration.

pub mod update;

pub use update::{PlatformResult, RunOptions, RunReport, UpdateRunner};

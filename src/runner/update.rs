//! Cache update orchestration.
//!
//! An update run resolves every requested platform against the manifest,
//! reconciles the cache root with the manifest version, then ensures each
//! platform in request order.

use std::time::{Duration, Instant};

use crate::cache::{CacheRoot, CacheTracker, ReconcileOutcome};
use crate::config::RuntimeManifest;
use crate::error::{Result, RuntimeCacheError};
use crate::fetch::{ArtifactFetcher, EnsureOutcome, HttpFetcher};
use crate::platform::Platform;
use crate::ui::UserInterface;

/// Options for an update run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Continue with the remaining platforms after a download or
    /// extraction failure.
    pub keep_going: bool,
}

/// Result for a single platform.
#[derive(Debug)]
pub struct PlatformResult {
    /// Platform this result is for.
    pub platform: Platform,
    /// What `ensure` did, or why it failed.
    pub outcome: std::result::Result<EnsureOutcome, RuntimeCacheError>,
}

impl PlatformResult {
    /// Whether the platform ended up present in the cache.
    pub fn success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Result of an update run.
#[derive(Debug)]
pub struct RunReport {
    /// What reconcile did to the cache root.
    pub reconcile: ReconcileOutcome,
    /// Per-platform results, in the order they were processed.
    pub platforms: Vec<PlatformResult>,
    /// Platforms not attempted because an earlier one failed.
    pub not_attempted: Vec<Platform>,
    /// Total duration.
    pub duration: Duration,
}

impl RunReport {
    /// Whether every requested platform is present.
    pub fn success(&self) -> bool {
        self.not_attempted.is_empty() && self.platforms.iter().all(PlatformResult::success)
    }

    /// Failed platform results.
    pub fn failures(&self) -> impl Iterator<Item = &PlatformResult> {
        self.platforms.iter().filter(|r| !r.success())
    }

    /// Number of platforms downloaded during this run.
    pub fn fetched(&self) -> usize {
        self.platforms
            .iter()
            .filter(|r| matches!(r.outcome, Ok(EnsureOutcome::Fetched { .. })))
            .count()
    }

    /// Number of platforms that were already cached.
    pub fn cached(&self) -> usize {
        self.platforms
            .iter()
            .filter(|r| matches!(r.outcome, Ok(EnsureOutcome::Cached)))
            .count()
    }
}

/// Runs one update of a cache root against a manifest.
pub struct UpdateRunner<'a> {
    manifest: &'a RuntimeManifest,
    http: &'a HttpFetcher,
}

impl<'a> UpdateRunner<'a> {
    /// Create a new update runner.
    pub fn new(manifest: &'a RuntimeManifest, http: &'a HttpFetcher) -> Self {
        Self { manifest, http }
    }

    /// Reconcile `cache` and make sure each of `platforms` is present.
    ///
    /// Every platform is resolved before the cache is touched, so a
    /// configuration problem leaves the cache as it was. Configuration and
    /// invalidation errors abort the run; download and extraction failures
    /// are recorded in the report.
    pub fn run(
        &self,
        cache: &CacheRoot,
        platforms: &[Platform],
        options: &RunOptions,
        ui: &mut dyn UserInterface,
    ) -> Result<RunReport> {
        let start = Instant::now();

        for platform in platforms {
            self.manifest.resolve(*platform)?;
        }

        let reconcile = CacheTracker::new(cache).reconcile(&self.manifest.version)?;
        if reconcile.invalidated() {
            ui.message(&format!(
                "Cached {} out of date or missing, downloading new one",
                self.manifest.name
            ));
        }

        let fetcher = ArtifactFetcher::new(self.manifest, self.http);
        let mut results = Vec::with_capacity(platforms.len());
        let mut not_attempted = Vec::new();

        for (index, platform) in platforms.iter().copied().enumerate() {
            let outcome = match fetcher.ensure(cache, platform, ui) {
                Err(e) if e.aborts_run() => return Err(e),
                other => other,
            };

            let failed = outcome.is_err();
            if let Err(e) = &outcome {
                tracing::debug!("{} failed at {}: {}", platform, e.stage().label(), e);
            }
            results.push(PlatformResult { platform, outcome });

            if failed && !options.keep_going {
                not_attempted.extend_from_slice(&platforms[index + 1..]);
                break;
            }
        }

        Ok(RunReport {
            reconcile,
            platforms: results,
            not_attempted,
            duration: start.elapsed(),
        })
    }
}

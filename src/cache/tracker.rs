//! Version-gated cache invalidation.

use std::fs;

use super::marker::write_marker;
use super::CacheRoot;
use crate::error::{Result, RuntimeCacheError};

/// What [`CacheTracker::reconcile`] found and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// No cache existed; it was created.
    Fresh,
    /// The marker already held the desired version; nothing was deleted.
    Current,
    /// The cache held another version (or no marker) and was deleted.
    Invalidated {
        /// Version recorded before deletion, `None` if the marker was missing.
        previous: Option<String>,
    },
}

impl ReconcileOutcome {
    /// Whether the cache was deleted.
    pub fn invalidated(&self) -> bool {
        matches!(self, Self::Invalidated { .. })
    }
}

/// Keeps the cache root's contents in step with a desired version.
pub struct CacheTracker<'a> {
    cache: &'a CacheRoot,
}

impl<'a> CacheTracker<'a> {
    /// Create a new tracker for a cache root.
    pub fn new(cache: &'a CacheRoot) -> Self {
        Self { cache }
    }

    /// Bring the cache root in line with `desired`.
    ///
    /// If the recorded version differs and the root exists, the whole root is
    /// deleted first. The root is then created if needed and the marker is
    /// rewritten with `desired`, even when nothing changed.
    ///
    /// `desired` is trimmed before comparing and writing, since the marker is
    /// read back trimmed.
    ///
    /// # Errors
    ///
    /// Returns `CacheInvalidation` if the stale root cannot be removed. The
    /// marker is left untouched in that case.
    pub fn reconcile(&self, desired: &str) -> Result<ReconcileOutcome> {
        let desired = desired.trim();
        let root = self.cache.path();
        let recorded = self.cache.recorded_version()?;
        let matches = recorded.as_deref() == Some(desired);

        let outcome = if matches {
            ReconcileOutcome::Current
        } else if self.cache.exists() {
            tracing::info!(
                "Cache at {:?} holds {:?}, want {:?}; removing it",
                root,
                recorded,
                desired
            );
            fs::remove_dir_all(root).map_err(|source| RuntimeCacheError::CacheInvalidation {
                path: root.to_path_buf(),
                source,
            })?;
            ReconcileOutcome::Invalidated { previous: recorded }
        } else {
            ReconcileOutcome::Fresh
        };

        fs::create_dir_all(root)?;
        write_marker(root, desired)?;
        tracing::debug!("Cache at {:?} reconciled: {:?}", root, outcome);

        Ok(outcome)
    }
}

//! Revocation sweeper for periodic maintenance of the revocation set
//!
//! A revoked token that has also expired fails validation on its own, so its
//! revocation entry can be dropped once a grace period has passed. This keeps
//! the set from growing without bound under sustained invalidations.

use ag_shared::config::RevocationConfig;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::repositories::RevocationStore;

/// Configuration for the revocation sweeper
#[derive(Debug, Clone)]
pub struct RevocationCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// How long after a token's expiry its entry is kept
    pub grace_period: Duration,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for RevocationCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            grace_period: Duration::hours(1),
            enabled: true,
        }
    }
}

impl From<&RevocationConfig> for RevocationCleanupConfig {
    fn from(config: &RevocationConfig) -> Self {
        let grace_seconds = config.grace_period_seconds.clamp(0, i64::MAX / 1000);
        Self {
            interval_seconds: config.interval_seconds,
            grace_period: Duration::seconds(grace_seconds),
            enabled: config.enabled,
        }
    }
}

/// Service removing expired entries from the revocation set
pub struct RevocationCleanupService<R: RevocationStore + 'static> {
    store: R,
    config: RevocationCleanupConfig,
}

impl<R: RevocationStore + 'static> RevocationCleanupService<R> {
    /// Create a new cleanup service over a handle to the shared store
    pub fn new(store: R, config: RevocationCleanupConfig) -> Self {
        Self { store, config }
    }

    /// Run a single cleanup cycle now
    pub fn run_cleanup(&self) -> CleanupResult {
        self.run_cleanup_at(Utc::now())
    }

    /// Run a single cleanup cycle as of `now`
    ///
    /// Entries whose token expired before `now - grace_period` are removed.
    /// A negative grace period counts as zero, so unexpired tokens stay revoked.
    pub fn run_cleanup_at(&self, now: DateTime<Utc>) -> CleanupResult {
        if !self.config.enabled {
            return CleanupResult::default();
        }

        let grace_period = self.config.grace_period.max(Duration::zero());
        let removed = match now.checked_sub_signed(grace_period) {
            Some(cutoff) => self.store.remove_expired(cutoff),
            None => 0,
        };
        let result = CleanupResult {
            revoked_entries_removed: removed,
            remaining_entries: self.store.len(),
        };

        info!(
            "Revocation cleanup completed - Removed: {}, Remaining: {}",
            result.revoked_entries_removed, result.remaining_entries
        );
        result
    }

    /// Start the cleanup service as a background task
    ///
    /// Must be called from within a tokio runtime. Returns `None` when the
    /// service is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Revocation cleanup service is disabled");
            return None;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Revocation cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;
                self.run_cleanup();
            }
        }))
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of revocation entries removed
    pub revoked_entries_removed: usize,
    /// Number of entries left in the set
    pub remaining_entries: usize,
}

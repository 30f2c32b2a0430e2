//! Revocation store trait defining the interface for the revocation set.

use chrono::{DateTime, Utc};

/// Store of tokens invalidated before their natural expiry
///
/// Entries are keyed by the SHA-256 digest of the token string and remember
/// when that token expires, so they can be swept once the token could no
/// longer validate anyway.
///
/// Implementations must be safe for concurrent `contains` and `insert` calls
/// from many request handlers; an insert must never be lost.
pub trait RevocationStore: Send + Sync {
    /// Whether the digest has been revoked
    fn contains(&self, token_hash: &str) -> bool;

    /// Record a revoked digest
    ///
    /// # Returns
    /// * `true` - the digest was not present before this call
    /// * `false` - the digest was already revoked (the entry is left untouched)
    fn insert(&self, token_hash: String, expires_at: DateTime<Utc>) -> bool;

    /// Drop entries whose token expired before `cutoff`
    ///
    /// # Returns
    /// Number of entries removed
    fn remove_expired(&self, cutoff: DateTime<Utc>) -> usize;

    /// Number of revoked entries currently held
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

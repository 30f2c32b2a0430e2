//! In-memory revocation store

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::store::RevocationStore;

/// Lock-protected, process-local revocation set
///
/// `Clone` creates another handle to the same shared set, so the token
/// service and the cleanup service can hold the same store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRevocationStore {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemoryRevocationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

// A poisoned lock still guards a consistent map: every write is a single
// insert or retain call.
impl RevocationStore for InMemoryRevocationStore {
    fn contains(&self, token_hash: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(token_hash)
    }

    fn insert(&self, token_hash: String, expires_at: DateTime<Utc>) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.contains_key(&token_hash) {
            return false;
        }
        entries.insert(token_hash, expires_at);
        true
    }

    fn remove_expired(&self, cutoff: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at >= cutoff);
        before - entries.len()
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

//! In-memory call registry.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::warn;

use super::types::CallAttempt;

/// Insert-only map from call id to [`CallAttempt`], scoped to the process.
///
/// Entries are never updated or evicted.
#[derive(Debug, Default)]
pub struct CallRegistry {
    calls: RwLock<HashMap<String, CallAttempt>>,
}

impl CallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attempt. An existing entry under the same id is kept.
    pub async fn insert(&self, attempt: CallAttempt) {
        let mut calls = self.calls.write().await;
        match calls.entry(attempt.call_id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(attempt);
            }
            Entry::Occupied(_) => {
                warn!("Call id {} already registered, keeping first entry", attempt.call_id);
            }
        }
    }

    pub async fn get(&self, call_id: &str) -> Option<CallAttempt> {
        self.calls.read().await.get(call_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.calls.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.calls.read().await.is_empty()
    }
}

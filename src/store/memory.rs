//! Memory Store Module
//!
//! In-process key-value store with TTL expiry, used when no Redis URL is
//! configured and as the store under test.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::store::{KeyValueStore, SharedClock, StoreEntry, SystemClock};

// == Memory Store ==
/// HashMap-backed store. Clones share the same entries.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// Key-value storage
    entries: Arc<RwLock<HashMap<String, StoreEntry>>>,
    /// Time source for expiry
    clock: SharedClock,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store driven by `clock`.
    pub fn with_clock(clock: SharedClock) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    // == Length ==
    /// Returns the number of entries held, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<()> {
        if ttl_seconds == Some(0) {
            return Err(Error::Protocol(
                "invalid expire time in 'set' command".to_string(),
            ));
        }
        let entry = StoreEntry::new(value.to_string(), ttl_seconds, self.clock.now_ms());
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = self.clock.now_ms();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }

        // Expired: drop it unless a writer replaced it in the meantime
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool> {
        let now = self.clock.now_ms();
        let mut entries = self.entries.write().await;
        if ttl_seconds == 0 {
            // A zero TTL deletes the key outright
            return Ok(entries.remove(key).is_some_and(|entry| !entry.is_expired(now)));
        }
        match entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now) => {
                entry.expire(ttl_seconds, now);
                Ok(true)
            }
            Some(_) => {
                entries.remove(key);
                Ok(false)
            }
            None => Ok(false),
        }
    }
}

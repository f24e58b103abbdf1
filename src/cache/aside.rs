//! Cache-Aside Module
//!
//! The hit/miss decision shared by the HTTP middleware and plain callers.

use std::future::Future;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{codec, CacheStats};
use crate::store::SharedStore;

// == Cache Aside ==
/// Consults the store before producing a value and writes produced values back.
///
/// Store failures never reach the caller: a failed read counts as a miss and
/// a failed write is logged while the produced value is still returned.
/// Concurrent misses for one key all run the producer.
#[derive(Clone)]
pub struct CacheAside {
    store: SharedStore,
    ttl_seconds: u64,
    stats: Arc<RwLock<CacheStats>>,
}

impl CacheAside {
    /// Creates a cache layer over `store` writing entries with `ttl_seconds`.
    pub fn new(store: SharedStore, ttl_seconds: u64) -> Self {
        Self {
            store,
            ttl_seconds,
            stats: Arc::new(RwLock::new(CacheStats::new())),
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Returns a snapshot of the counters.
    pub async fn stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }

    // == Lookup ==
    /// Reads and decodes the entry under `key`.
    ///
    /// Returns None on a miss, a store failure or an undecodable value.
    pub async fn lookup<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let found = match self.read(key).await {
            Some(raw) => match codec::decode(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key = %key, error = %e, "cached value is not decodable, treating as miss");
                    self.stats.write().await.record_read_error();
                    None
                }
            },
            None => None,
        };
        self.record_outcome(found.is_some()).await;
        found
    }

    /// Reads the JSON text stored under `key` without re-encoding it.
    ///
    /// Returns None on a miss, a store failure or a value that is not JSON.
    pub async fn lookup_json(&self, key: &str) -> Option<String> {
        let found = match self.read(key).await {
            Some(raw) => match codec::json_text(raw.as_bytes()) {
                Ok(_) => Some(raw),
                Err(e) => {
                    warn!(key = %key, error = %e, "cached value is not JSON, treating as miss");
                    self.stats.write().await.record_read_error();
                    None
                }
            },
            None => None,
        };
        self.record_outcome(found.is_some()).await;
        found
    }

    // == Populate ==
    /// Encodes `value` and stores it under `key` with the configured TTL.
    pub async fn populate<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match codec::encode(value) {
            Ok(encoded) => self.write(key, &encoded).await,
            Err(e) => {
                warn!(key = %key, error = %e, "produced value is not encodable, not caching");
                self.stats.write().await.record_write_error();
            }
        }
    }

    /// Stores already-encoded JSON text under `key` with the configured TTL.
    pub async fn populate_json(&self, key: &str, text: &str) {
        self.write(key, text).await;
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key).await {
            Ok(found) => found,
            Err(e) => {
                warn!(key = %key, error = %e, "cache read failed, treating as miss");
                self.stats.write().await.record_read_error();
                None
            }
        }
    }

    async fn write(&self, key: &str, text: &str) {
        match self.store.set(key, text, Some(self.ttl_seconds)).await {
            Ok(()) => {
                debug!(key = %key, ttl = self.ttl_seconds, "stored produced value");
                self.stats.write().await.record_store();
            }
            Err(e) => {
                warn!(key = %key, error = %e, "cache write failed, serving uncached value");
                self.stats.write().await.record_write_error();
            }
        }
    }

    async fn record_outcome(&self, hit: bool) {
        let mut stats = self.stats.write().await;
        if hit {
            stats.record_hit();
        } else {
            stats.record_miss();
        }
    }

    // == Fetch ==
    /// Returns the cached value for `key`, or runs `producer` and caches its output.
    pub async fn fetch<T, F, Fut>(&self, key: &str, producer: F) -> T
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if let Some(cached) = self.lookup(key).await {
            debug!(key = %key, outcome = "hit", "serving cached value");
            return cached;
        }

        debug!(key = %key, outcome = "miss", "invoking producer");
        let value = producer().await;
        self.populate(key, &value).await;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::store::{KeyValueStore, ManualClock, MemoryStore};
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Report {
        title: String,
        rows: Vec<u32>,
    }

    /// Store whose every call fails.
    struct DownStore;

    #[async_trait]
    impl KeyValueStore for DownStore {
        async fn set(&self, _key: &str, _value: &str, _ttl: Option<u64>) -> Result<()> {
            Err(Error::Connectivity("connection refused".to_string()))
        }

        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Connectivity("connection refused".to_string()))
        }

        async fn expire(&self, _key: &str, _ttl: u64) -> Result<bool> {
            Err(Error::Protocol("unexpected reply".to_string()))
        }
    }

    fn report() -> Report {
        Report {
            title: "daily".to_string(),
            rows: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn test_fetch_runs_producer_once_within_ttl() {
        let cache = CacheAside::new(Arc::new(MemoryStore::new()), 3600);
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let produce = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            report()
        };

        for _ in 0..3 {
            let value = cache.fetch("report", produce).await;
            assert_eq!(value, report());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats().await;
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.stores, 1);
    }

    #[tokio::test]
    async fn test_fetch_reruns_producer_after_ttl() {
        let clock = Arc::new(ManualClock::new(0));
        let cache = CacheAside::new(Arc::new(MemoryStore::with_clock(clock.clone())), 60);
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let produce = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            report()
        };

        cache.fetch("report", produce).await;
        clock.advance(Duration::from_secs(61));
        cache.fetch("report", produce).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_survives_store_outage() {
        let cache = CacheAside::new(Arc::new(DownStore), 3600);

        let value = cache.fetch("report", || async { report() }).await;

        assert_eq!(value, report());
        let stats = cache.stats().await;
        assert_eq!(stats.read_errors, 1);
        assert_eq!(stats.write_errors, 1);
        assert_eq!(stats.stores, 0);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss_and_gets_overwritten() {
        let store = Arc::new(MemoryStore::new());
        store.set("report", "{truncated", None).await.unwrap();
        let cache = CacheAside::new(store.clone(), 3600);

        let value = cache.fetch("report", || async { report() }).await;
        assert_eq!(value, report());

        let raw = store.get("report").await.unwrap().unwrap();
        assert_eq!(codec::decode::<Report>(&raw).unwrap(), report());
        assert_eq!(cache.stats().await.read_errors, 1);
    }
}

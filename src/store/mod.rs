//! Store Module
//!
//! Key-value client adapter: a small async trait over set/get/expire with
//! an in-process implementation and a Redis implementation.

mod clock;
mod entry;
mod memory;
mod redis;


use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::tasks::spawn_cleanup_task;

// Re-export public types
pub use self::redis::RedisStore;
pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use entry::StoreEntry;
pub use memory::MemoryStore;

// == Key-Value Store ==
/// Contract every store adapter fulfils.
///
/// Failures come back as [`crate::error::Error::Connectivity`] or
/// [`crate::error::Error::Protocol`]; adapters never retry.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Stores `value` under `key`, expiring after `ttl_seconds` when given.
    ///
    /// Without a TTL any previous expiry on the key is cleared.
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> Result<()>;

    /// Returns the current value, or `None` if missing or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Sets or refreshes the TTL of an existing key.
    ///
    /// Returns false when the key does not exist.
    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool>;
}

/// Store handle passed down to the cache layer and handlers.
pub type SharedStore = Arc<dyn KeyValueStore>;

// == Open ==
/// Builds the store selected by `config`.
///
/// With `REDIS_URL` set this connects to Redis. Otherwise it creates a
/// memory store and starts its expiry sweeper, whose handle is returned so
/// the caller can abort it on shutdown.
pub async fn open(config: &Config) -> Result<(SharedStore, Option<JoinHandle<()>>)> {
    match &config.redis_url {
        Some(url) => {
            let store = RedisStore::connect(url, Duration::from_secs(config.store_timeout)).await?;
            Ok((Arc::new(store), None))
        }
        None => {
            info!("No REDIS_URL set, using in-process memory store");
            let store = MemoryStore::new();
            let cleanup = spawn_cleanup_task(store.clone(), config.cleanup_interval);
            Ok((Arc::new(store), Some(cleanup)))
        }
    }
}

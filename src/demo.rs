//! String demo
//!
//! Stores a name, gives it a ten second expiry and reads it back.

use tracing::info;

use crate::error::Result;
use crate::store::KeyValueStore;

pub const DEMO_KEY: &str = "name";
pub const DEMO_VALUE: &str = "John Doe";
pub const DEMO_TTL_SECONDS: u64 = 10;

/// Runs set, expire and get against `store` and returns what was read back.
pub async fn run_string_demo(store: &dyn KeyValueStore) -> Result<Option<String>> {
    store.set(DEMO_KEY, DEMO_VALUE, None).await?;

    let existed = store.expire(DEMO_KEY, DEMO_TTL_SECONDS).await?;
    info!(key = DEMO_KEY, existed, "expires in {} seconds", DEMO_TTL_SECONDS);

    store.get(DEMO_KEY).await
}

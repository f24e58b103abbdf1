//! Cache Module
//!
//! Cache-aside on top of the key-value store: look up, produce on miss,
//! write back with a TTL.

mod aside;
pub mod codec;
mod middleware;
mod stats;

// Re-export public types
pub use aside::CacheAside;
pub use middleware::{cache_aside_layer, cache_key};
pub use stats::CacheStats;

// == Public Constants ==
/// Largest response body the middleware buffers for caching
pub const MAX_CACHED_BODY_BYTES: usize = 1024 * 1024; // 1 MB

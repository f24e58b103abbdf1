//! Configuration Module
//!
//! Handles loading store and server settings from environment variables.

use std::env;

/// Default TTL in seconds for cached response bodies.
pub const DEFAULT_CACHE_TTL: u64 = 3600;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL; the in-process memory store is used when unset
    pub redis_url: Option<String>,
    /// TTL in seconds applied to cached response bodies
    pub cache_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Memory store expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Upper bound in seconds for a single store command
    pub store_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis connection URL (default: unset, memory store)
    /// - `CACHE_TTL` - Cached body TTL in seconds, must be positive (default: 3600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    /// - `STORE_TIMEOUT` - Store command timeout in seconds (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.trim().is_empty()),
            cache_ttl: parse_var("CACHE_TTL")
                .filter(|ttl| *ttl > 0)
                .unwrap_or(defaults.cache_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            store_timeout: parse_var("STORE_TIMEOUT").unwrap_or(defaults.store_timeout),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            cache_ttl: DEFAULT_CACHE_TTL,
            server_port: 3000,
            cleanup_interval: 1,
            store_timeout: 5,
        }
    }
}

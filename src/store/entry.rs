//! Store Entry Module
//!
//! Defines a single stored value together with its expiry deadline.

// == Store Entry ==
/// Represents a single stored value with optional expiry.
#[derive(Debug, Clone)]
pub struct StoreEntry {
    /// The stored value
    pub value: String,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl StoreEntry {
    // == Constructor ==
    /// Creates a new entry written at `now_ms` with optional TTL.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl_seconds` - Optional TTL in seconds
    /// * `now_ms` - Current time in Unix milliseconds
    pub fn new(value: String, ttl_seconds: Option<u64>, now_ms: u64) -> Self {
        Self {
            value,
            expires_at: ttl_seconds.map(|ttl| deadline(now_ms, ttl)),
        }
    }

    // == Expire ==
    /// Replaces the expiry with `ttl_seconds` from `now_ms`.
    pub fn expire(&mut self, ttl_seconds: u64, now_ms: u64) {
        self.expires_at = Some(deadline(now_ms, ttl_seconds));
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry stays readable up to and including its deadline and is
    /// expired strictly after it.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms > expires,
            None => false,
        }
    }
}

fn deadline(now_ms: u64, ttl_seconds: u64) -> u64 {
    now_ms.saturating_add(ttl_seconds.saturating_mul(1000))
}

//! Error types for the store adapter and cache layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Error Enum ==
/// Unified error type for store calls and cache payload encoding.
#[derive(Error, Debug)]
pub enum Error {
    /// The key-value store could not be reached or timed out
    #[error("Store unreachable: {0}")]
    Connectivity(String),

    /// The key-value store answered with something unexpected
    #[error("Store protocol error: {0}")]
    Protocol(String),

    /// A cached body could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Returns true when the failure is a reachability problem rather than a bad reply.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Error::Connectivity(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

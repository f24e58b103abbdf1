//! Simulated database
//!
//! Stands in for the expensive producer behind the cached route and counts
//! how often it is queried.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::models::DataResponse;

/// Message returned by every query.
pub const DATABASE_MESSAGE: &str = "Hello, this data is from the database!";

// == Database ==
/// Simulated data source that records how many queries it has served.
#[derive(Debug, Default)]
pub struct Database {
    queries: AtomicU64,
}

impl Database {
    /// Creates a database with no queries served yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the query behind `/api/data`.
    pub async fn fetch_data(&self) -> DataResponse {
        let query = self.queries.fetch_add(1, Ordering::SeqCst) + 1;
        info!(query, "Fetching data from database");
        DataResponse::new(DATABASE_MESSAGE)
    }

    /// Number of queries served so far.
    pub fn queries(&self) -> u64 {
        self.queries.load(Ordering::SeqCst)
    }
}

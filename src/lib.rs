//! Cache Aside - key-value store adapter and HTTP response caching
//!
//! Provides a set/get/expire store contract with memory and Redis backends,
//! and an Axum middleware that serves JSON responses from the store.

pub mod api;
pub mod cache;
pub mod config;
pub mod demo;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::CacheAside;
pub use config::Config;
pub use error::{Error, Result};
pub use store::{KeyValueStore, SharedStore};
pub use tasks::spawn_cleanup_task;

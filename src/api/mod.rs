//! API Module
//!
//! HTTP handlers and routing.
//!
//! # Endpoints
//! - `GET /api/data` - Cached database-backed data
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod database;
pub mod handlers;
pub mod routes;

pub use database::Database;
pub use handlers::*;
pub use routes::create_router;

//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: Removes expired memory store entries at configured intervals

mod cleanup;

pub use cleanup::spawn_cleanup_task;

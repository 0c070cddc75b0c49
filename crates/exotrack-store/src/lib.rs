//! Redis-backed stores for the ExoTrack job engine.
//!
//! This crate provides:
//! - `JobStore`: durable key/value store of job records
//! - `ResultStore`: binary result artifacts keyed by job id
//! - `DatasetStore`: read-only iteration over planet records
//! - `RedisStore`: Redis implementation of all three
//! - `MemoryStore`: in-memory implementation for tests and local runs

pub mod client;
pub mod dataset;
pub mod error;
pub mod jobs;
pub mod memory;
pub mod results;

pub use client::{RedisStore, StoreConfig};
pub use dataset::DatasetStore;
pub use error::{StoreError, StoreResult};
pub use jobs::JobStore;
pub use memory::MemoryStore;
pub use results::ResultStore;

//! Durable FIFO work queue of job ids.
//!
//! This crate provides:
//! - `WorkQueue`: the queue contract used by submission and workers
//! - `RedisWorkQueue`: Redis list implementation
//! - `MemoryWorkQueue`: in-memory implementation for tests

pub mod error;
pub mod memory;
pub mod queue;

pub use error::{QueueError, QueueResult};
pub use memory::MemoryWorkQueue;
pub use queue::{QueueConfig, RedisWorkQueue, WorkQueue};

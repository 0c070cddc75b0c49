//! Aggregation worker pool.
//!
//! Workers dequeue job ids, scan the planet dataset, build a histogram
//! of the selected field over the job's discovery-year window, render it
//! as a PNG artifact, and drive the job record to a terminal status.

pub mod config;
pub mod error;
pub mod executor;
pub mod histogram;
pub mod pipeline;

pub use config::{RunMode, WorkerConfig};
pub use error::{WorkerError, WorkerResult};
pub use executor::{Worker, WorkerPool};
pub use histogram::{bucket_count_for, Histogram};
pub use pipeline::{process_job, ProcessingContext};

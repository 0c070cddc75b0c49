//! Job API surface consumed by the HTTP/CLI glue layer.
//!
//! This crate provides:
//! - `SubmissionService`: validate a request, persist the job record,
//!   enqueue the id
//! - `QueryService`: list jobs, fetch a job, fetch a result artifact

pub mod error;
pub mod query;
pub mod submit;

pub use error::{ApiError, ApiResult};
pub use query::{QueryService, ResultFetch};
pub use submit::{SubmissionService, SubmitRequest};

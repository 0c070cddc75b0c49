//! Shared data models for the ExoTrack backend.
//!
//! This crate provides Serde-serializable types for:
//! - Job records and their lifecycle status
//! - Aggregation keys and their dataset field mapping
//! - Planet records from the read-only dataset

pub mod job;
pub mod organize;
pub mod planet;

// Re-export common types
pub use job::{JobId, JobRecord, JobStatus, RESULT_CONTENT_TYPE};
pub use organize::{DatasetField, OrganizeBy, ParseOrganizeByError};
pub use planet::PlanetRecord;

//! Job record and lifecycle status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::organize::OrganizeBy;

/// Content type of a rendered result artifact.
pub const RESULT_CONTENT_TYPE: &str = "image/png";

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Job lifecycle status.
///
/// Transitions are strictly forward: `submitted -> in_progress ->
/// {completed | failed}`. No transition is defined out of a terminal
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job is persisted and queued, waiting for a worker
    #[default]
    Submitted,
    /// Job has been claimed by a worker and is being processed
    InProgress,
    /// Job completed successfully; a result artifact exists
    Completed,
    /// Job failed during processing; no artifact was produced
    Failed,
}

impl JobStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Submitted => "submitted",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no more transitions expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted job record.
///
/// Created exactly once at submission time and only ever updated in
/// place: `status` (and the accompanying `updated_at` timestamp) are the
/// only mutable fields. The id, year window, and aggregation key never
/// change for the lifetime of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Unique job identifier, generated at submission
    pub id: JobId,
    /// Current lifecycle status
    pub status: JobStatus,
    /// Inclusive lower bound of the discovery-year window
    pub start_date: i64,
    /// Inclusive upper bound of the discovery-year window
    pub end_date: i64,
    /// Which dataset field drives the aggregation
    #[serde(default)]
    pub organize_by: OrganizeBy,
    /// When the job was submitted
    pub created_at: DateTime<Utc>,
    /// When the status last changed
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// Create a new record with a fresh id and `submitted` status.
    pub fn new(start_date: i64, end_date: i64, organize_by: OrganizeBy) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            status: JobStatus::Submitted,
            start_date,
            end_date,
            organize_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Update the status and bump the updated_at timestamp.
    pub fn set_status(&mut self, status: JobStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Check whether a discovery year falls inside the job's window.
    ///
    /// The window is inclusive on both ends. `start_date > end_date` is
    /// permitted and simply matches nothing.
    pub fn year_in_window(&self, year: i64) -> bool {
        year >= self.start_date && year <= self.end_date
    }
}

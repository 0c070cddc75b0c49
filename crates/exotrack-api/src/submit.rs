//! Job submission service.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use exotrack_models::{JobRecord, OrganizeBy};
use exotrack_queue::WorkQueue;
use exotrack_store::JobStore;

use crate::error::{ApiError, ApiResult};

/// A raw submission as received from the glue layer.
///
/// Fields arrive as strings so that validation errors stay here rather
/// than in the transport layer's deserializer.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub organize_by: Option<String>,
}

impl SubmitRequest {
    pub fn new(
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        organize_by: Option<&str>,
    ) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            organize_by: organize_by.map(String::from),
        }
    }
}

/// Validates submissions, persists job records, and enqueues their ids.
pub struct SubmissionService {
    jobs: Arc<dyn JobStore>,
    queue: Arc<dyn WorkQueue>,
}

impl SubmissionService {
    /// Create a new submission service over injected clients.
    pub fn new(jobs: Arc<dyn JobStore>, queue: Arc<dyn WorkQueue>) -> Self {
        Self { jobs, queue }
    }

    /// Submit a new job.
    ///
    /// On success the record exists in the job store (status
    /// `submitted`) before its id is enqueued, so a worker can never
    /// observe a queued id without a backing record. On validation
    /// failure nothing is written anywhere.
    ///
    /// `start_date > end_date` is deliberately not rejected; such a job
    /// aggregates over an empty window.
    pub async fn submit(&self, request: SubmitRequest) -> ApiResult<JobRecord> {
        let start_date: i64 = request
            .start_date
            .trim()
            .parse()
            .map_err(|_| ApiError::validation(format!("start_date is not an integer: {:?}", request.start_date)))?;
        let end_date: i64 = request
            .end_date
            .trim()
            .parse()
            .map_err(|_| ApiError::validation(format!("end_date is not an integer: {:?}", request.end_date)))?;

        let organize_by = match request.organize_by.as_deref() {
            Some(raw) => raw
                .parse::<OrganizeBy>()
                .map_err(|e| ApiError::validation(e.to_string()))?,
            None => OrganizeBy::default(),
        };

        let record = JobRecord::new(start_date, end_date, organize_by);

        // Record first, then queue entry; the worker relies on this order.
        self.jobs.put(&record).await?;
        self.queue.enqueue(&record.id).await?;

        info!(
            "Submitted job {} (window {}..={}, organize_by {})",
            record.id, record.start_date, record.end_date, record.organize_by
        );

        Ok(record)
    }
}

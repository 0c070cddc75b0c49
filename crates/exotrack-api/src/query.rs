//! Read-only query service.

use std::sync::Arc;

use exotrack_models::{JobId, JobRecord, JobStatus, RESULT_CONTENT_TYPE};
use exotrack_store::{JobStore, ResultStore, StoreError};

use crate::error::{ApiError, ApiResult};

/// A fetched result artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultFetch {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Read-only accessors over job records and result artifacts.
pub struct QueryService {
    jobs: Arc<dyn JobStore>,
    results: Arc<dyn ResultStore>,
}

impl QueryService {
    /// Create a new query service over injected clients.
    pub fn new(jobs: Arc<dyn JobStore>, results: Arc<dyn ResultStore>) -> Self {
        Self { jobs, results }
    }

    /// List the ids of all known jobs. Ordering is unspecified.
    pub async fn list_jobs(&self) -> ApiResult<Vec<JobId>> {
        Ok(self.jobs.list_ids().await?)
    }

    /// Fetch a job record by id.
    pub async fn get_job(&self, id: &JobId) -> ApiResult<JobRecord> {
        self.jobs
            .get(id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("no job with id {}", id)))
    }

    /// Fetch the rendered result for a completed job.
    ///
    /// Returns `NotFound` for unknown ids and `NotReady` while the job
    /// has not reached `completed`. A completed job with no stored
    /// artifact is a store inconsistency and surfaces as a store error.
    pub async fn get_result(&self, id: &JobId) -> ApiResult<ResultFetch> {
        let record = self.get_job(id).await?;

        if record.status != JobStatus::Completed {
            return Err(ApiError::not_ready(format!(
                "job {} has status {}",
                id, record.status
            )));
        }

        let bytes = self
            .results
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found(format!("result artifact for job {}", id)))?;

        Ok(ResultFetch {
            bytes,
            content_type: RESULT_CONTENT_TYPE,
        })
    }
}

//! API error types.

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Submission rejected before any side effect
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested job id has no record
    #[error("Not found: {0}")]
    NotFound(String),

    /// Job exists but has not completed yet
    #[error("Not ready: {0}")]
    NotReady(String),

    #[error("Store error: {0}")]
    Store(#[from] exotrack_store::StoreError),

    #[error("Queue error: {0}")]
    Queue(#[from] exotrack_queue::QueueError),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }
}

//! Job record store.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use exotrack_models::{JobId, JobRecord};

use crate::client::RedisStore;
use crate::error::StoreResult;

/// Durable key/value store of job records.
///
/// `put` always overwrites the full record; there are no partial-field
/// updates. Status changes are read-modify-write sequences performed by
/// a single writer per job: the submission service writes the initial
/// record, and only the worker that dequeued an id transitions that
/// id's status afterwards.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Overwrite the record for its id.
    async fn put(&self, record: &JobRecord) -> StoreResult<()>;

    /// Fetch the current record, or `None` if the id is unknown.
    async fn get(&self, id: &JobId) -> StoreResult<Option<JobRecord>>;

    /// List the ids of all stored records. Ordering is unspecified.
    async fn list_ids(&self) -> StoreResult<Vec<JobId>>;
}

#[async_trait]
impl JobStore for RedisStore {
    async fn put(&self, record: &JobRecord) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let payload = serde_json::to_string(record)?;
        conn.set::<_, _, ()>(self.job_key(record.id.as_str()), payload)
            .await?;
        debug!("Stored job record {}", record.id);
        Ok(())
    }

    async fn get(&self, id: &JobId) -> StoreResult<Option<JobRecord>> {
        let mut conn = self.connection().await?;
        let payload: Option<String> = conn.get(self.job_key(id.as_str())).await?;
        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn list_ids(&self) -> StoreResult<Vec<JobId>> {
        let keys = self.scan_keys(&self.job_pattern()).await?;
        Ok(keys
            .into_iter()
            .filter_map(|key| key.rsplit(':').next().map(JobId::from))
            .collect())
    }
}

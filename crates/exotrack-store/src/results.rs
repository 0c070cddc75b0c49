//! Result artifact store.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use exotrack_models::JobId;

use crate::client::RedisStore;
use crate::error::StoreResult;

/// Binary result artifacts keyed by job id.
///
/// An artifact is written at most once per job, immediately before the
/// job's status is set to `completed`. A repeated `put` for the same id
/// silently overwrites.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Store the artifact for a job.
    async fn put(&self, id: &JobId, bytes: Vec<u8>) -> StoreResult<()>;

    /// Fetch the artifact, or `None` if no artifact exists for the id.
    async fn get(&self, id: &JobId) -> StoreResult<Option<Vec<u8>>>;
}

#[async_trait]
impl ResultStore for RedisStore {
    async fn put(&self, id: &JobId, bytes: Vec<u8>) -> StoreResult<()> {
        let mut conn = self.connection().await?;
        let size = bytes.len();
        conn.set::<_, _, ()>(self.result_key(id.as_str()), bytes)
            .await?;
        debug!("Stored result artifact for job {} ({} bytes)", id, size);
        Ok(())
    }

    async fn get(&self, id: &JobId) -> StoreResult<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        let bytes: Option<Vec<u8>> = conn.get(self.result_key(id.as_str())).await?;
        Ok(bytes)
    }
}

//! Work queue over a Redis list.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use exotrack_models::JobId;

use crate::error::QueueResult;

/// FIFO channel of pending job ids.
///
/// Delivery is at-most-once: an id is popped exactly once and is not
/// redelivered if the consumer crashes before finishing. That is an
/// explicit policy choice, not an oversight; stronger guarantees would
/// need an acknowledgment/visibility-timeout scheme on top.
#[async_trait]
pub trait WorkQueue: Send + Sync {
    /// Append a job id to the tail of the queue.
    async fn enqueue(&self, id: &JobId) -> QueueResult<()>;

    /// Remove and return the oldest id, or `None` without blocking.
    async fn try_dequeue(&self) -> QueueResult<Option<JobId>>;

    /// Current number of pending ids.
    async fn len(&self) -> QueueResult<u64>;
}

/// Queue configuration.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Redis URL
    pub redis_url: String,
    /// List key holding pending job ids
    pub queue_key: String,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            queue_key: "exotrack:queue".to_string(),
        }
    }
}

impl QueueConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            queue_key: std::env::var("QUEUE_KEY").unwrap_or_else(|_| "exotrack:queue".to_string()),
        }
    }
}

/// Redis list implementation of the work queue.
pub struct RedisWorkQueue {
    client: redis::Client,
    config: QueueConfig,
}

impl RedisWorkQueue {
    /// Create a new queue client.
    pub fn new(config: QueueConfig) -> QueueResult<Self> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> QueueResult<Self> {
        Self::new(QueueConfig::from_env())
    }
}

#[async_trait]
impl WorkQueue for RedisWorkQueue {
    async fn enqueue(&self, id: &JobId) -> QueueResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.rpush::<_, _, ()>(&self.config.queue_key, id.as_str())
            .await?;
        debug!("Enqueued job {}", id);
        Ok(())
    }

    async fn try_dequeue(&self) -> QueueResult<Option<JobId>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let id: Option<String> = conn.lpop(&self.config.queue_key, None).await?;
        Ok(id.map(JobId::from))
    }

    async fn len(&self) -> QueueResult<u64> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let len: u64 = conn.llen(&self.config.queue_key).await?;
        Ok(len)
    }
}

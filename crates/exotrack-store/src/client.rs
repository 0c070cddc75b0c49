//! Redis store client.

use redis::aio::MultiplexedConnection;

use crate::error::StoreResult;

/// Configuration for the Redis store client.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Redis URL
    pub redis_url: String,
    /// Key namespace prefix
    pub namespace: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            namespace: "exotrack".to_string(),
        }
    }
}

impl StoreConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            redis_url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            namespace: std::env::var("STORE_NAMESPACE").unwrap_or_else(|_| "exotrack".to_string()),
        }
    }
}

/// Redis-backed store client.
///
/// A single client serves the job store, the result store, and the
/// read-only dataset store; the three live under distinct key prefixes
/// of the shared namespace. Constructed once at process startup and
/// passed to each component.
#[derive(Clone)]
pub struct RedisStore {
    client: redis::Client,
    config: StoreConfig,
}

impl RedisStore {
    /// Create a new store client.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let client = redis::Client::open(config.redis_url.as_str())?;
        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> StoreResult<Self> {
        Self::new(StoreConfig::from_env())
    }

    pub(crate) async fn connection(&self) -> StoreResult<MultiplexedConnection> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }

    pub(crate) fn job_key(&self, id: &str) -> String {
        format!("{}:job:{}", self.config.namespace, id)
    }

    pub(crate) fn job_pattern(&self) -> String {
        format!("{}:job:*", self.config.namespace)
    }

    pub(crate) fn result_key(&self, id: &str) -> String {
        format!("{}:result:{}", self.config.namespace, id)
    }

    pub(crate) fn planet_pattern(&self) -> String {
        format!("{}:planet:*", self.config.namespace)
    }

    /// Collect all keys matching a pattern via cursor-based SCAN.
    pub(crate) async fn scan_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.connection().await?;
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(200)
                .query_async(&mut conn)
                .await?;

            keys.extend(batch);
            cursor = next;
            if cursor == 0 {
                break;
            }
        }

        Ok(keys)
    }
}

//! Read-only dataset store.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::warn;

use exotrack_models::PlanetRecord;

use crate::client::RedisStore;
use crate::error::StoreResult;

/// Read-only iteration over the planet dataset.
///
/// The dataset is ingested and owned by an external process; this core
/// never writes to it.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Scan the entire dataset.
    ///
    /// Records that fail to parse are skipped with a warning; the scan
    /// does not abort.
    async fn scan(&self) -> StoreResult<Vec<PlanetRecord>>;
}

#[async_trait]
impl DatasetStore for RedisStore {
    async fn scan(&self) -> StoreResult<Vec<PlanetRecord>> {
        let keys = self.scan_keys(&self.planet_pattern()).await?;
        let mut conn = self.connection().await?;
        let mut records = Vec::with_capacity(keys.len());

        for key in keys {
            let payload: Option<String> = conn.get(&key).await?;
            let Some(json) = payload else {
                // Key expired between SCAN and GET
                continue;
            };
            match serde_json::from_str::<PlanetRecord>(&json) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping malformed planet record {}: {}", key, e),
            }
        }

        Ok(records)
    }
}

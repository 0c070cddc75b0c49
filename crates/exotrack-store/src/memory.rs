//! In-memory store backend.
//!
//! Implements the same traits as `RedisStore` over process-local maps,
//! for unit tests and local development without a Redis instance.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use exotrack_models::{JobId, JobRecord, PlanetRecord};

use crate::dataset::DatasetStore;
use crate::error::StoreResult;
use crate::jobs::JobStore;
use crate::results::ResultStore;

/// In-memory implementation of the job, result, and dataset stores.
#[derive(Default, Clone)]
pub struct MemoryStore {
    jobs: Arc<RwLock<HashMap<String, JobRecord>>>,
    results: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    planets: Arc<RwLock<Vec<PlanetRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the dataset with planet records.
    pub async fn load_planets(&self, records: Vec<PlanetRecord>) {
        let mut planets = self.planets.write().await;
        planets.extend(records);
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn put(&self, record: &JobRecord) -> StoreResult<()> {
        let mut jobs = self.jobs.write().await;
        jobs.insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    async fn get(&self, id: &JobId) -> StoreResult<Option<JobRecord>> {
        let jobs = self.jobs.read().await;
        Ok(jobs.get(id.as_str()).cloned())
    }

    async fn list_ids(&self) -> StoreResult<Vec<JobId>> {
        let jobs = self.jobs.read().await;
        Ok(jobs.keys().cloned().map(JobId::from).collect())
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn put(&self, id: &JobId, bytes: Vec<u8>) -> StoreResult<()> {
        let mut results = self.results.write().await;
        results.insert(id.as_str().to_string(), bytes);
        Ok(())
    }

    async fn get(&self, id: &JobId) -> StoreResult<Option<Vec<u8>>> {
        let results = self.results.read().await;
        Ok(results.get(id.as_str()).cloned())
    }
}

#[async_trait]
impl DatasetStore for MemoryStore {
    async fn scan(&self) -> StoreResult<Vec<PlanetRecord>> {
        let planets = self.planets.read().await;
        Ok(planets.clone())
    }
}

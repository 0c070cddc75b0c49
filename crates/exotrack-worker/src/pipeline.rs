//! Per-job aggregation pipeline.

use std::sync::Arc;

use tracing::{error, info, warn};

use exotrack_models::{JobId, JobRecord, JobStatus};
use exotrack_store::{DatasetStore, JobStore, ResultStore};

use crate::error::WorkerResult;
use crate::histogram::{bucket_count_for, Histogram};

/// Injected store clients shared by all workers of a pool.
pub struct ProcessingContext {
    pub jobs: Arc<dyn JobStore>,
    pub results: Arc<dyn ResultStore>,
    pub dataset: Arc<dyn DatasetStore>,
}

impl ProcessingContext {
    pub fn new(
        jobs: Arc<dyn JobStore>,
        results: Arc<dyn ResultStore>,
        dataset: Arc<dyn DatasetStore>,
    ) -> Self {
        Self {
            jobs,
            results,
            dataset,
        }
    }
}

/// Process a single dequeued job id.
///
/// The worker that dequeued the id is the only writer of that record's
/// status from here on. A missing record (queue and store diverged) is
/// logged and skipped, never retried. Any pipeline error drives the
/// record to `failed` with no artifact; the artifact is written
/// immediately before the `completed` transition and at most once.
pub async fn process_job(ctx: &ProcessingContext, job_id: &JobId) -> WorkerResult<()> {
    let Some(mut record) = ctx.jobs.get(job_id).await? else {
        warn!("Dequeued job {} has no backing record; skipping", job_id);
        return Ok(());
    };

    record.set_status(JobStatus::InProgress);
    ctx.jobs.put(&record).await?;

    match run_pipeline(ctx, &record).await {
        Ok(collected) => {
            record.set_status(JobStatus::Completed);
            ctx.jobs.put(&record).await?;
            info!(
                "Job {} completed ({} values aggregated by {})",
                record.id,
                collected,
                record.organize_by.field().label()
            );
            Ok(())
        }
        Err(e) => {
            error!("Job {} failed: {}", record.id, e);
            record.set_status(JobStatus::Failed);
            if let Err(put_err) = ctx.jobs.put(&record).await {
                warn!("Could not mark job {} as failed: {}", record.id, put_err);
            }
            Err(e)
        }
    }
}

/// Scan, aggregate, render, and store the artifact for one job.
/// Returns the number of values collected.
async fn run_pipeline(ctx: &ProcessingContext, record: &JobRecord) -> WorkerResult<usize> {
    let field = record.organize_by.field();

    let planets = ctx.dataset.scan().await?;
    let mut values = Vec::new();
    for planet in &planets {
        let Some(year) = planet.discovery_year() else {
            continue;
        };
        if !record.year_in_window(year) {
            continue;
        }
        // Per-record misses are skipped; the scan never aborts
        if let Some(value) = planet.numeric_field(field) {
            values.push(value);
        }
    }

    let bucket_count = bucket_count_for(field, record.start_date, record.end_date);
    let histogram = Histogram::build(&values, bucket_count);
    let png = histogram.render_png()?;

    ctx.results.put(&record.id, png).await?;
    Ok(values.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    use exotrack_models::{OrganizeBy, PlanetRecord};
    use exotrack_store::{MemoryStore, StoreError, StoreResult};

    fn planet(name: &str, year: i64, mass: Option<f64>) -> PlanetRecord {
        let mut value = json!({ "pl_name": name, "disc_year": year });
        if let Some(m) = mass {
            value["pl_masse"] = json!(m);
        }
        serde_json::from_value(value).unwrap()
    }

    async fn context_with_planets(planets: Vec<PlanetRecord>) -> (ProcessingContext, MemoryStore) {
        let store = MemoryStore::new();
        store.load_planets(planets).await;
        let ctx = ProcessingContext::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        );
        (ctx, store)
    }

    #[tokio::test]
    async fn mass_aggregation_completes_with_artifact() {
        let (ctx, store) = context_with_planets(vec![
            planet("a", 2012, Some(3.2)),
            planet("b", 2015, Some(5.0)),
            planet("c", 2019, None),    // missing mass: skipped, no abort
            planet("d", 1999, Some(9.9)), // outside window
        ])
        .await;

        let record = JobRecord::new(2010, 2020, OrganizeBy::Mass);
        JobStore::put(&store, &record).await.unwrap();

        process_job(&ctx, &record.id).await.unwrap();

        let updated = JobStore::get(&store, &record.id).await.unwrap().unwrap();
        assert_eq!(updated.status, JobStatus::Completed);

        let artifact = ResultStore::get(&store, &record.id).await.unwrap().unwrap();
        assert!(!artifact.is_empty());
    }

    #[tokio::test]
    async fn missing_record_is_skipped_silently() {
        let (ctx, store) = context_with_planets(vec![]).await;
        let phantom = JobId::new();

        process_job(&ctx, &phantom).await.unwrap();

        assert!(JobStore::get(&store, &phantom).await.unwrap().is_none());
        assert!(ResultStore::get(&store, &phantom).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn artifact_write_failure_marks_job_failed() {
        struct FailingResults;

        #[async_trait]
        impl ResultStore for FailingResults {
            async fn put(&self, _id: &JobId, _bytes: Vec<u8>) -> StoreResult<()> {
                Err(StoreError::config_error("result backend offline"))
            }

            async fn get(&self, _id: &JobId) -> StoreResult<Option<Vec<u8>>> {
                Ok(None)
            }
        }

        let store = MemoryStore::new();
        store.load_planets(vec![planet("a", 2012, Some(3.2))]).await;
        let ctx = ProcessingContext::new(
            Arc::new(store.clone()),
            Arc::new(FailingResults),
            Arc::new(store.clone()),
        );

        let record = JobRecord::new(2010, 2020, OrganizeBy::Mass);
        JobStore::put(&store, &record).await.unwrap();

        assert!(process_job(&ctx, &record.id).await.is_err());

        let updated = JobStore::get(&store, &record.id).await.unwrap().unwrap();
        assert_eq!(updated.status, JobStatus::Failed);
        assert!(ResultStore::get(&store, &record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn year_grouping_with_empty_window_still_completes() {
        let (ctx, store) = context_with_planets(vec![planet("a", 2005, Some(1.0))]).await;

        // Inverted window matches nothing but is still a valid job
        let record = JobRecord::new(2020, 2010, OrganizeBy::None);
        JobStore::put(&store, &record).await.unwrap();

        process_job(&ctx, &record.id).await.unwrap();

        let updated = JobStore::get(&store, &record.id).await.unwrap().unwrap();
        assert_eq!(updated.status, JobStatus::Completed);
        assert!(ResultStore::get(&store, &record.id)
            .await
            .unwrap()
            .is_some());
    }
}

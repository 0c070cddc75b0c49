//! Worker pool executor.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};

use exotrack_queue::WorkQueue;

use crate::config::{RunMode, WorkerConfig};
use crate::error::WorkerResult;
use crate::pipeline::{process_job, ProcessingContext};

/// A single worker loop.
///
/// Dequeues one id at a time and runs the pipeline to completion before
/// taking the next. Distinct workers process distinct ids; the queue
/// pops each id exactly once, so the same job is never claimed twice.
pub struct Worker {
    name: String,
    ctx: Arc<ProcessingContext>,
    queue: Arc<dyn WorkQueue>,
    config: WorkerConfig,
    shutdown: watch::Receiver<bool>,
}

impl Worker {
    pub fn new(
        name: impl Into<String>,
        ctx: Arc<ProcessingContext>,
        queue: Arc<dyn WorkQueue>,
        config: WorkerConfig,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            name: name.into(),
            ctx,
            queue,
            config,
            shutdown,
        }
    }

    /// Run until the queue drains (drain mode), shutdown is signalled,
    /// or indefinitely (standing mode).
    pub async fn run(mut self) {
        info!("Worker {} started ({:?} mode)", self.name, self.config.run_mode);

        loop {
            if *self.shutdown.borrow() {
                break;
            }

            match self.queue.try_dequeue().await {
                Ok(Some(job_id)) => {
                    // Pipeline failures are terminal job state, not worker errors
                    if let Err(e) = process_job(&self.ctx, &job_id).await {
                        error!("Worker {}: job {} ended in error: {}", self.name, job_id, e);
                    }
                }
                Ok(None) => match self.config.run_mode {
                    RunMode::Drain => {
                        info!("Worker {}: queue drained, stopping", self.name);
                        break;
                    }
                    RunMode::Standing => {
                        tokio::select! {
                            changed = self.shutdown.changed() => {
                                // A dropped sender means no shutdown can
                                // ever arrive; stop instead of spinning
                                if changed.is_err() {
                                    break;
                                }
                            }
                            _ = tokio::time::sleep(self.config.poll_interval) => {}
                        }
                    }
                },
                Err(e) => {
                    error!("Worker {}: dequeue failed: {}", self.name, e);
                    tokio::time::sleep(self.config.poll_interval).await;
                }
            }
        }

        info!("Worker {} stopped", self.name);
    }
}

/// A pool of independent worker loops sharing the same injected clients.
pub struct WorkerPool {
    config: WorkerConfig,
    ctx: Arc<ProcessingContext>,
    queue: Arc<dyn WorkQueue>,
}

impl WorkerPool {
    pub fn new(config: WorkerConfig, ctx: ProcessingContext, queue: Arc<dyn WorkQueue>) -> Self {
        Self {
            config,
            ctx: Arc::new(ctx),
            queue,
        }
    }

    /// Spawn all workers and wait for them to finish.
    pub async fn run(&self, shutdown: watch::Receiver<bool>) -> WorkerResult<()> {
        info!("Starting worker pool with {} workers", self.config.worker_count);

        let mut handles = Vec::with_capacity(self.config.worker_count);
        for i in 0..self.config.worker_count {
            let worker = Worker::new(
                format!("worker-{}", i + 1),
                Arc::clone(&self.ctx),
                Arc::clone(&self.queue),
                self.config.clone(),
                shutdown.clone(),
            );
            handles.push(tokio::spawn(worker.run()));
        }

        for handle in handles {
            handle.await.ok();
        }

        info!("Worker pool stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use exotrack_models::{JobRecord, JobStatus, OrganizeBy, PlanetRecord};
    use exotrack_queue::MemoryWorkQueue;
    use exotrack_store::{JobStore, MemoryStore};

    fn drain_config(workers: usize) -> WorkerConfig {
        WorkerConfig {
            worker_count: workers,
            poll_interval: Duration::from_millis(10),
            run_mode: RunMode::Drain,
        }
    }

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        let planet: PlanetRecord = serde_json::from_value(serde_json::json!({
            "pl_name": "Kepler-452 b", "disc_year": 2015, "pl_masse": 5.0
        }))
        .unwrap();
        store.load_planets(vec![planet]).await;
        store
    }

    #[tokio::test]
    async fn drain_mode_processes_queue_and_stops() {
        let store = seeded_store().await;
        let queue = Arc::new(MemoryWorkQueue::new());

        let mut ids = Vec::new();
        for _ in 0..3 {
            let record = JobRecord::new(2010, 2020, OrganizeBy::Mass);
            JobStore::put(&store, &record).await.unwrap();
            queue.enqueue(&record.id).await.unwrap();
            ids.push(record.id);
        }

        let ctx = ProcessingContext::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        );
        let pool = WorkerPool::new(drain_config(2), ctx, queue.clone());

        let (_tx, rx) = watch::channel(false);
        pool.run(rx).await.unwrap();

        assert_eq!(queue.len().await.unwrap(), 0);
        for id in &ids {
            let record = JobStore::get(&store, id).await.unwrap().unwrap();
            assert_eq!(record.status, JobStatus::Completed);
        }
    }

    #[tokio::test]
    async fn standing_mode_stops_on_shutdown() {
        let store = seeded_store().await;
        let queue = Arc::new(MemoryWorkQueue::new());
        let ctx = ProcessingContext::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        );
        let config = WorkerConfig {
            run_mode: RunMode::Standing,
            ..drain_config(1)
        };
        let pool = WorkerPool::new(config, ctx, queue);

        let (tx, rx) = watch::channel(false);
        let run = tokio::spawn(async move { pool.run(rx).await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), run)
            .await
            .expect("pool should stop after shutdown")
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn standing_mode_stops_when_shutdown_sender_is_dropped() {
        let store = seeded_store().await;
        let queue = Arc::new(MemoryWorkQueue::new());
        let ctx = ProcessingContext::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        );
        let config = WorkerConfig {
            run_mode: RunMode::Standing,
            ..drain_config(1)
        };
        let pool = WorkerPool::new(config, ctx, queue);

        let (tx, rx) = watch::channel(false);
        drop(tx);

        tokio::time::timeout(Duration::from_secs(1), pool.run(rx))
            .await
            .expect("pool should stop once the sender is gone")
            .unwrap();
    }
}

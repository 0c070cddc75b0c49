//! End-to-end job lifecycle over the in-memory backends.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use exotrack_api::{ApiError, QueryService, SubmissionService, SubmitRequest};
use exotrack_models::{JobStatus, PlanetRecord};
use exotrack_queue::{MemoryWorkQueue, WorkQueue};
use exotrack_store::MemoryStore;
use exotrack_worker::{ProcessingContext, RunMode, WorkerConfig, WorkerPool};

fn planet(name: &str, year: i64, mass: f64) -> PlanetRecord {
    serde_json::from_value(serde_json::json!({
        "pl_name": name,
        "disc_year": year,
        "pl_masse": mass,
        "pl_rade": mass / 2.0,
        "pl_orbper": mass * 10.0,
    }))
    .unwrap()
}

struct Harness {
    store: MemoryStore,
    queue: Arc<MemoryWorkQueue>,
    submission: SubmissionService,
    query: QueryService,
}

impl Harness {
    async fn new(planets: Vec<PlanetRecord>) -> Self {
        let store = MemoryStore::new();
        store.load_planets(planets).await;
        let queue = Arc::new(MemoryWorkQueue::new());

        let submission = SubmissionService::new(Arc::new(store.clone()), queue.clone());
        let query = QueryService::new(Arc::new(store.clone()), Arc::new(store.clone()));

        Self {
            store,
            queue,
            submission,
            query,
        }
    }

    async fn drain(&self) {
        let ctx = ProcessingContext::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
        );
        let config = WorkerConfig {
            worker_count: 1,
            poll_interval: Duration::from_millis(10),
            run_mode: RunMode::Drain,
        };
        let (_tx, rx) = watch::channel(false);
        WorkerPool::new(config, ctx, self.queue.clone())
            .run(rx)
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn submitted_job_completes_and_yields_png() {
    let harness = Harness::new(vec![
        planet("a", 2011, 3.0),
        planet("b", 2014, 7.5),
        planet("c", 2001, 1.0),
    ])
    .await;

    let record = harness
        .submission
        .submit(SubmitRequest::new("2010", "2020", Some("Mass")))
        .await
        .unwrap();

    // Before any worker runs: status is submitted and the result is pending
    let fetched = harness.query.get_job(&record.id).await.unwrap();
    assert_eq!(fetched.status, JobStatus::Submitted);
    assert!(matches!(
        harness.query.get_result(&record.id).await.unwrap_err(),
        ApiError::NotReady(_)
    ));

    harness.drain().await;

    let done = harness.query.get_job(&record.id).await.unwrap();
    assert_eq!(done.status, JobStatus::Completed);

    let result = harness.query.get_result(&record.id).await.unwrap();
    assert_eq!(result.content_type, "image/png");
    assert_eq!(&result.bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);

    assert_eq!(harness.queue.len().await.unwrap(), 0);
}

#[tokio::test]
async fn extreme_year_window_still_reaches_a_terminal_status() {
    let harness = Harness::new(vec![planet("a", 2011, 3.0)]).await;

    // Dates only need to parse as integers; the window itself is
    // unvalidated, so the full i64 range is a legal submission.
    let record = harness
        .submission
        .submit(SubmitRequest::new(
            i64::MIN.to_string(),
            i64::MAX.to_string(),
            None,
        ))
        .await
        .unwrap();

    harness.drain().await;

    let done = harness.query.get_job(&record.id).await.unwrap();
    assert_eq!(done.status, JobStatus::Completed);
    let result = harness.query.get_result(&record.id).await.unwrap();
    assert!(!result.bytes.is_empty());
}

#[tokio::test]
async fn rejected_submission_leaves_no_trace() {
    let harness = Harness::new(vec![planet("a", 2011, 3.0)]).await;

    let err = harness
        .submission
        .submit(SubmitRequest::new("2010", "2020", Some("InvalidKey")))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    assert!(harness.query.list_jobs().await.unwrap().is_empty());
    assert_eq!(harness.queue.len().await.unwrap(), 0);
}

#[tokio::test]
async fn jobs_process_in_submission_order() {
    let harness = Harness::new(vec![planet("a", 2011, 3.0)]).await;

    let first = harness
        .submission
        .submit(SubmitRequest::new("2010", "2020", None))
        .await
        .unwrap();
    let second = harness
        .submission
        .submit(SubmitRequest::new("2000", "2005", None))
        .await
        .unwrap();

    assert_eq!(harness.queue.try_dequeue().await.unwrap(), Some(first.id));
    assert_eq!(harness.queue.try_dequeue().await.unwrap(), Some(second.id));
}

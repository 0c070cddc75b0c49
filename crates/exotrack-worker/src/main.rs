//! Aggregation worker binary.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use exotrack_queue::RedisWorkQueue;
use exotrack_store::RedisStore;
use exotrack_worker::{ProcessingContext, WorkerConfig, WorkerPool};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("exotrack=info".parse().expect("valid directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting exotrack-worker");

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    let store = match RedisStore::from_env() {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to create store client: {}", e);
            std::process::exit(1);
        }
    };

    let queue = match RedisWorkQueue::from_env() {
        Ok(q) => Arc::new(q),
        Err(e) => {
            error!("Failed to create work queue: {}", e);
            std::process::exit(1);
        }
    };

    let ctx = ProcessingContext::new(store.clone(), store.clone(), store);
    let pool = WorkerPool::new(config, ctx, queue);

    // Signal shutdown to every worker on ctrl-c
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        shutdown_tx.send(true).ok();
    });

    if let Err(e) = pool.run(shutdown_rx).await {
        error!("Worker pool error: {}", e);
        std::process::exit(1);
    }

    info!("Worker shutdown complete");
}

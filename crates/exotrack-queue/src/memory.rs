//! In-memory work queue for tests and local runs.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use exotrack_models::JobId;

use crate::error::QueueResult;
use crate::queue::WorkQueue;

/// In-memory FIFO implementation of the work queue.
#[derive(Default, Clone)]
pub struct MemoryWorkQueue {
    pending: Arc<Mutex<VecDeque<JobId>>>,
}

impl MemoryWorkQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkQueue for MemoryWorkQueue {
    async fn enqueue(&self, id: &JobId) -> QueueResult<()> {
        let mut pending = self.pending.lock().await;
        pending.push_back(id.clone());
        Ok(())
    }

    async fn try_dequeue(&self) -> QueueResult<Option<JobId>> {
        let mut pending = self.pending.lock().await;
        Ok(pending.pop_front())
    }

    async fn len(&self) -> QueueResult<u64> {
        let pending = self.pending.lock().await;
        Ok(pending.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dequeues_in_fifo_order() {
        let queue = MemoryWorkQueue::new();
        let first = JobId::new();
        let second = JobId::new();

        queue.enqueue(&first).await.unwrap();
        queue.enqueue(&second).await.unwrap();
        assert_eq!(queue.len().await.unwrap(), 2);

        assert_eq!(queue.try_dequeue().await.unwrap(), Some(first));
        assert_eq!(queue.try_dequeue().await.unwrap(), Some(second));
        assert_eq!(queue.try_dequeue().await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_queue_signals_without_blocking() {
        let queue = MemoryWorkQueue::new();
        assert_eq!(queue.try_dequeue().await.unwrap(), None);
        assert_eq!(queue.len().await.unwrap(), 0);
    }
}

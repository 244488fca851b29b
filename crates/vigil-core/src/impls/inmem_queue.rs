//! In-memory notification queue, for development and tests.
//!
//! Records every delivered batch for inspection and can be told to reject
//! the next N sends (or queue resolution altogether) to exercise the
//! dispatch-failure paths.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::ports::{NotifyQueue, QueueEntry, QueueError, QueueHandle};

use crate::app::dispatcher::MAX_BATCH_SIZE;

#[derive(Default)]
struct QueueState {
    batches: Vec<Vec<QueueEntry>>,
    fail_next_sends: usize,
    reject_resolve: bool,
}

pub struct InMemoryNotifyQueue {
    state: Mutex<QueueState>,
}

impl InMemoryNotifyQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
        }
    }

    /// Every batch delivered so far, in send order.
    pub async fn sent_batches(&self) -> Vec<Vec<QueueEntry>> {
        self.state.lock().await.batches.clone()
    }

    /// Make the next `n` sends fail with an operation error.
    pub async fn fail_next_sends(&self, n: usize) {
        self.state.lock().await.fail_next_sends = n;
    }

    /// Make `resolve` fail with a not-found error.
    pub async fn reject_resolve(&self, reject: bool) {
        self.state.lock().await.reject_resolve = reject;
    }
}

impl Default for InMemoryNotifyQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotifyQueue for InMemoryNotifyQueue {
    async fn resolve(&self, name: &str) -> Result<QueueHandle, QueueError> {
        let state = self.state.lock().await;
        if state.reject_resolve {
            return Err(QueueError::NotFound(name.to_string()));
        }
        Ok(QueueHandle::new(name))
    }

    async fn send_batch(
        &self,
        handle: &QueueHandle,
        entries: &[QueueEntry],
    ) -> Result<(), QueueError> {
        // The real transport rejects oversized batches; mirror that here so
        // a dispatcher bug surfaces in tests instead of in production.
        if entries.len() > MAX_BATCH_SIZE {
            return Err(QueueError::OperationFailed(format!(
                "batch of {} exceeds transport limit of {MAX_BATCH_SIZE}",
                entries.len()
            )));
        }

        let mut state = self.state.lock().await;
        if state.fail_next_sends > 0 {
            state.fail_next_sends -= 1;
            return Err(QueueError::OperationFailed(format!(
                "injected failure sending to {}",
                handle.name()
            )));
        }

        state.batches.push(entries.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JobId;
    use ulid::Ulid;

    fn entries(n: usize) -> Vec<QueueEntry> {
        (0..n)
            .map(|_| QueueEntry::new(JobId::from_ulid(Ulid::new())))
            .collect()
    }

    #[tokio::test]
    async fn batches_are_recorded_in_send_order() {
        let queue = InMemoryNotifyQueue::new();
        let handle = queue.resolve("check-verdicts-test").await.unwrap();

        queue.send_batch(&handle, &entries(2)).await.unwrap();
        queue.send_batch(&handle, &entries(3)).await.unwrap();

        let batches = queue.sent_batches().await;
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].len(), 2);
        assert_eq!(batches[1].len(), 3);
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected() {
        let queue = InMemoryNotifyQueue::new();
        let handle = queue.resolve("check-verdicts-test").await.unwrap();

        let result = queue.send_batch(&handle, &entries(11)).await;
        assert!(matches!(result, Err(QueueError::OperationFailed(_))));
        assert!(queue.sent_batches().await.is_empty());
    }

    #[tokio::test]
    async fn injected_failures_burn_off() {
        let queue = InMemoryNotifyQueue::new();
        let handle = queue.resolve("check-verdicts-test").await.unwrap();
        queue.fail_next_sends(1).await;

        assert!(queue.send_batch(&handle, &entries(1)).await.is_err());
        assert!(queue.send_batch(&handle, &entries(1)).await.is_ok());
        assert_eq!(queue.sent_batches().await.len(), 1);
    }

    #[tokio::test]
    async fn rejected_resolve_reports_not_found() {
        let queue = InMemoryNotifyQueue::new();
        queue.reject_resolve(true).await;

        let result = queue.resolve("check-verdicts-test").await;
        assert!(matches!(result, Err(QueueError::NotFound(_))));
    }
}

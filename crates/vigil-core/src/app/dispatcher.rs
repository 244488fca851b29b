//! Notification dispatch for newly-decided jobs.
//!
//! Splits job ids into fixed-size batches and submits each as one request.
//! No retry within a cycle: a failed batch is logged with its job ids and
//! left un-notified. Notification is a side effect of a decided verdict,
//! never a precondition for it, so nothing here propagates back into the
//! cycle result.

use std::sync::Arc;

use crate::domain::JobId;
use crate::ports::{NotifyQueue, QueueEntry};

/// Hard ceiling imposed by the downstream transport.
pub const MAX_BATCH_SIZE: usize = 10;

pub struct NotificationDispatcher {
    queue: Arc<dyn NotifyQueue>,
    queue_name: String,
}

impl NotificationDispatcher {
    pub fn new(queue: Arc<dyn NotifyQueue>, queue_name: impl Into<String>) -> Self {
        Self {
            queue,
            queue_name: queue_name.into(),
        }
    }

    /// Dispatch one entry per job id, in batches of at most
    /// [`MAX_BATCH_SIZE`]. Returns the number of entries actually sent
    /// (callers only use it for the cycle summary).
    pub async fn dispatch(&self, job_ids: &[JobId]) -> usize {
        if job_ids.is_empty() {
            return 0;
        }

        let handle = match self.queue.resolve(&self.queue_name).await {
            Ok(handle) => handle,
            Err(error) => {
                tracing::error!(
                    queue = %self.queue_name,
                    %error,
                    job_ids = ?job_ids,
                    "could not resolve notification queue, jobs left un-notified"
                );
                return 0;
            }
        };

        let mut sent = 0;
        for chunk in job_ids.chunks(MAX_BATCH_SIZE) {
            let entries: Vec<QueueEntry> = chunk.iter().map(|&id| QueueEntry::new(id)).collect();

            match self.queue.send_batch(&handle, &entries).await {
                Ok(()) => {
                    sent += entries.len();
                    tracing::info!(queue = %self.queue_name, count = entries.len(), "notification batch sent");
                }
                Err(error) => {
                    // Left un-notified on purpose: no re-queue, no retry.
                    tracing::error!(
                        queue = %self.queue_name,
                        %error,
                        job_ids = ?chunk,
                        "notification batch failed"
                    );
                }
            }
        }
        sent
    }
}

//! NotifyQueue port: the downstream notification sink.
//!
//! Entries carry the job id only; consumers re-read anything else they need
//! from the store. Delivery is at-least-once at the queue layer and carries
//! no idempotency key — downstream dedup, if any, is the consumer's
//! concern.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::JobId;

/// One notification payload: `{ "job_id": ... }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub job_id: JobId,
}

impl QueueEntry {
    pub fn new(job_id: JobId) -> Self {
        Self { job_id }
    }
}

/// Resolved handle to a named queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueHandle {
    name: String,
}

impl QueueHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue not found: {0}")]
    NotFound(String),

    #[error("queue operation failed: {0}")]
    OperationFailed(String),
}

/// NotifyQueue delivers fixed-size notification batches.
#[async_trait]
pub trait NotifyQueue: Send + Sync {
    /// Resolve a queue name (already environment-rendered) to a handle.
    async fn resolve(&self, name: &str) -> Result<QueueHandle, QueueError>;

    /// Submit one batch as a single request. The transport caps batches at
    /// ten entries; the dispatcher chunks accordingly before calling this.
    async fn send_batch(
        &self,
        handle: &QueueHandle,
        entries: &[QueueEntry],
    ) -> Result<(), QueueError>;
}

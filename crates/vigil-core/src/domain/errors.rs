//! Error taxonomy for the monitor.
//!
//! - `Validation`: a terminal write was attempted on a task that is no
//!   longer PENDING. Never retried; the caller falls back to its own
//!   terminal path.
//! - `Store`: a read/write against the job/task store failed. The current
//!   cycle step aborts; the next scheduled cycle re-derives everything from
//!   current state (self-healing by re-execution, not by retry loops).
//!
//! Dispatch failures are deliberately absent here: a failed notification
//! batch is logged and swallowed by the dispatcher (see `ports::notify_queue::QueueError`),
//! it never propagates into the cycle result.

use thiserror::Error;

use super::ids::TaskId;
use super::status::TaskStatus;

#[derive(Debug, Error)]
pub enum VigilError {
    #[error("task {task_id} is not pending (current status: {current:?})")]
    Validation {
        task_id: TaskId,
        current: TaskStatus,
    },

    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    #[error("store operation failed: {0}")]
    Store(String),
}

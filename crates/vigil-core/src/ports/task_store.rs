//! TaskStore port: the relational store's task and finding tables.
//!
//! Two kinds of writers go through here:
//! - single-task terminal writes via the write guard (`load_task` +
//!   `write_result`, optimistic check-then-write);
//! - the monitor's timeout sweep via `bulk_update_status`, a filtered set
//!   operation guarded by `expected` so it never clobbers a task that
//!   completed in the race window.

use async_trait::async_trait;

use crate::domain::{FindingRecord, JobId, TaskId, TaskRecord, TaskStatus, VigilError};

#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Distinct (job id, task status) pairs for the given jobs.
    /// Callers reduce over the de-duplicated bag per job.
    async fn fetch_task_statuses(
        &self,
        job_ids: &[JobId],
    ) -> Result<Vec<(JobId, TaskStatus)>, VigilError>;

    /// Load a single task record, if it exists.
    async fn load_task(&self, task_id: TaskId) -> Result<Option<TaskRecord>, VigilError>;

    /// Commit a task's terminal status, message, and attached findings in
    /// one write. Validation (current status must be PENDING) is the write
    /// guard's job, not the store's.
    async fn write_result(
        &self,
        task_id: TaskId,
        status: TaskStatus,
        message: Option<String>,
        findings: Vec<FindingRecord>,
    ) -> Result<(), VigilError>;

    /// Set `to` on every task of the given jobs whose current status equals
    /// `expected`. Returns the number of rows updated.
    async fn bulk_update_status(
        &self,
        job_ids: &[JobId],
        expected: TaskStatus,
        to: TaskStatus,
    ) -> Result<u64, VigilError>;
}

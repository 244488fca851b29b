//! Task write guard: at most one terminal write per task.
//!
//! Every check execution calls `settle` before writing its result; the
//! monitor's timeout sweep goes through the store's filtered bulk update
//! instead (same invariant, set-sized operation).
//!
//! The check-then-write is optimistic: no row lock is held across the
//! check. Fine for single-writer-per-task workloads; if concurrent writers
//! per task become a reality, move the condition into the store as a
//! compare-and-swap update.

use std::sync::Arc;

use crate::domain::{FindingRecord, TaskId, TaskStatus, VigilError};
use crate::ports::TaskStore;

pub struct TaskWriteGuard {
    tasks: Arc<dyn TaskStore>,
}

impl TaskWriteGuard {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    /// Settle a task: verify it exists and is still PENDING, then commit the
    /// terminal status, message, and findings in one write.
    ///
    /// Rejections perform no write:
    /// - the task does not exist -> `TaskNotFound`;
    /// - the task already has a terminal status -> `Validation`;
    /// - `status` itself is PENDING -> `Validation` (a settle must land on a
    ///   terminal value).
    pub async fn settle(
        &self,
        task_id: TaskId,
        status: TaskStatus,
        message: Option<String>,
        findings: Vec<FindingRecord>,
    ) -> Result<(), VigilError> {
        if !status.is_terminal() {
            tracing::warn!(%task_id, ?status, "rejected settle with non-terminal status");
            return Err(VigilError::Validation {
                task_id,
                current: status,
            });
        }

        let record = self
            .tasks
            .load_task(task_id)
            .await?
            .ok_or(VigilError::TaskNotFound(task_id))?;

        if record.status != TaskStatus::Pending {
            tracing::warn!(
                %task_id,
                current = ?record.status,
                attempted = ?status,
                "rejected duplicate terminal write"
            );
            return Err(VigilError::Validation {
                task_id,
                current: record.status,
            });
        }

        self.tasks
            .write_result(task_id, status, message, findings)
            .await?;

        tracing::debug!(%task_id, ?status, "task settled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CheckId, FindingId, JobId, JobRecord, TaskRecord};
    use crate::impls::memory::InMemoryMonitorStore;
    use chrono::Utc;
    use ulid::Ulid;

    async fn store_with_one_pending_task() -> (Arc<InMemoryMonitorStore>, TaskId) {
        let store = Arc::new(InMemoryMonitorStore::new());
        let job_id = JobId::from_ulid(Ulid::new());
        let task_id = TaskId::from_ulid(Ulid::new());

        store
            .insert_job(JobRecord::new(job_id, "rev-1", Utc::now()))
            .await;
        store
            .insert_task(TaskRecord::new(task_id, job_id, CheckId::new("row_count.v1")))
            .await;

        (store, task_id)
    }

    #[tokio::test]
    async fn first_terminal_write_wins() {
        let (store, task_id) = store_with_one_pending_task().await;
        let guard = TaskWriteGuard::new(store.clone());

        guard
            .settle(task_id, TaskStatus::Success, Some("ok".to_string()), vec![])
            .await
            .unwrap();

        assert_eq!(store.task_status(task_id).await, Some(TaskStatus::Success));
    }

    #[tokio::test]
    async fn second_write_is_rejected_and_does_not_overwrite() {
        let (store, task_id) = store_with_one_pending_task().await;
        let guard = TaskWriteGuard::new(store.clone());

        guard
            .settle(task_id, TaskStatus::Failed, None, vec![])
            .await
            .unwrap();

        let err = guard
            .settle(task_id, TaskStatus::Success, None, vec![])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            VigilError::Validation {
                current: TaskStatus::Failed,
                ..
            }
        ));
        assert_eq!(store.task_status(task_id).await, Some(TaskStatus::Failed));
    }

    #[tokio::test]
    async fn settling_a_missing_task_is_rejected() {
        let (store, _) = store_with_one_pending_task().await;
        let guard = TaskWriteGuard::new(store);

        let unknown = TaskId::from_ulid(Ulid::new());
        let err = guard
            .settle(unknown, TaskStatus::Success, None, vec![])
            .await
            .unwrap_err();

        assert!(matches!(err, VigilError::TaskNotFound(id) if id == unknown));
    }

    #[tokio::test]
    async fn settling_back_to_pending_is_rejected() {
        let (store, task_id) = store_with_one_pending_task().await;
        let guard = TaskWriteGuard::new(store.clone());

        let err = guard
            .settle(task_id, TaskStatus::Pending, None, vec![])
            .await
            .unwrap_err();

        assert!(matches!(err, VigilError::Validation { .. }));
        assert_eq!(store.task_status(task_id).await, Some(TaskStatus::Pending));
    }

    #[tokio::test]
    async fn findings_land_with_the_winning_write() {
        let (store, task_id) = store_with_one_pending_task().await;
        let guard = TaskWriteGuard::new(store.clone());

        let finding = FindingRecord::new(
            FindingId::from_ulid(Ulid::new()),
            task_id,
            Some("orders.amount".to_string()),
            serde_json::json!({"null_ratio": 0.31}),
        );

        guard
            .settle(
                task_id,
                TaskStatus::Failed,
                Some("null ratio above threshold".to_string()),
                vec![finding],
            )
            .await
            .unwrap();

        let findings = store.findings_for(task_id).await;
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].subject.as_deref(), Some("orders.amount"));
    }
}

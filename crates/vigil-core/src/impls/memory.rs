//! In-memory job/task store, for development and tests.
//!
//! One `tokio::sync::Mutex` guards the whole state, so every bulk write is
//! naturally all-or-nothing: either the lock holder applies the entire
//! batch or (on validation) nothing. That mirrors the transactional
//! contract a relational implementation provides at the store boundary.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    FindingRecord, JobId, JobRecord, JobStatus, TaskId, TaskRecord, TaskStatus, VigilError,
};
use crate::ports::{JobStore, TaskStore};

/// In-memory store state.
#[derive(Default)]
struct MonitorState {
    /// All job records (single source of truth for jobs).
    jobs: HashMap<JobId, JobRecord>,

    /// All task records (single source of truth for tasks).
    tasks: HashMap<TaskId, TaskRecord>,

    /// Findings keyed by owning task.
    findings: HashMap<TaskId, Vec<FindingRecord>>,

    /// Number of bulk job-status writes applied (test observability).
    job_writes: usize,

    /// Pending injected failures for job-status writes (failure injection
    /// for tests).
    fail_next_job_writes: usize,
}

pub struct InMemoryMonitorStore {
    state: Arc<Mutex<MonitorState>>,
}

impl InMemoryMonitorStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MonitorState::default())),
        }
    }

    /// Seed a job record (job initiation is external to the monitor).
    pub async fn insert_job(&self, job: JobRecord) {
        let mut state = self.state.lock().await;
        state.jobs.insert(job.job_id, job);
    }

    /// Seed a task record.
    pub async fn insert_task(&self, task: TaskRecord) {
        let mut state = self.state.lock().await;
        state.tasks.insert(task.task_id, task);
    }

    pub async fn job_status(&self, job_id: JobId) -> Option<JobStatus> {
        let state = self.state.lock().await;
        state.jobs.get(&job_id).map(|job| job.status)
    }

    pub async fn task_status(&self, task_id: TaskId) -> Option<TaskStatus> {
        let state = self.state.lock().await;
        state.tasks.get(&task_id).map(|task| task.status)
    }

    pub async fn task_statuses_of_job(&self, job_id: JobId) -> Vec<TaskStatus> {
        let state = self.state.lock().await;
        state
            .tasks
            .values()
            .filter(|task| task.job_id == job_id)
            .map(|task| task.status)
            .collect()
    }

    pub async fn findings_for(&self, task_id: TaskId) -> Vec<FindingRecord> {
        let state = self.state.lock().await;
        state.findings.get(&task_id).cloned().unwrap_or_default()
    }

    /// Number of bulk job-status writes applied so far.
    pub async fn job_write_count(&self) -> usize {
        let state = self.state.lock().await;
        state.job_writes
    }

    /// Make the next `n` bulk job-status writes fail with a store error.
    pub async fn fail_next_job_writes(&self, n: usize) {
        let mut state = self.state.lock().await;
        state.fail_next_job_writes = n;
    }

    /// Flip every PENDING task of a job to SUCCESS, bypassing the guard.
    /// Test helper for simulating a check that wins a race window.
    pub async fn complete_pending_tasks(&self, job_id: JobId) {
        let mut state = self.state.lock().await;
        for task in state.tasks.values_mut() {
            if task.job_id == job_id && task.status == TaskStatus::Pending {
                task.status = TaskStatus::Success;
            }
        }
    }
}

impl Default for InMemoryMonitorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobStore for InMemoryMonitorStore {
    async fn fetch_jobs_by_status(
        &self,
        status: JobStatus,
    ) -> Result<Vec<JobRecord>, VigilError> {
        let state = self.state.lock().await;
        let mut jobs: Vec<JobRecord> = state
            .jobs
            .values()
            .filter(|job| job.status == status)
            .cloned()
            .collect();
        jobs.sort_by_key(|job| job.job_id);
        Ok(jobs)
    }

    async fn bulk_update_status(
        &self,
        updates: &[(JobId, JobStatus)],
    ) -> Result<(), VigilError> {
        let mut state = self.state.lock().await;

        if state.fail_next_job_writes > 0 {
            state.fail_next_job_writes -= 1;
            return Err(VigilError::Store(
                "injected failure writing job statuses".to_string(),
            ));
        }

        // Validate first so the batch applies entirely or not at all.
        for (job_id, _) in updates {
            if !state.jobs.contains_key(job_id) {
                return Err(VigilError::Store(format!("unknown job {job_id}")));
            }
        }

        for &(job_id, status) in updates {
            if let Some(job) = state.jobs.get_mut(&job_id) {
                job.status = status;
            }
        }
        state.job_writes += 1;
        Ok(())
    }
}

#[async_trait]
impl TaskStore for InMemoryMonitorStore {
    async fn fetch_task_statuses(
        &self,
        job_ids: &[JobId],
    ) -> Result<Vec<(JobId, TaskStatus)>, VigilError> {
        let state = self.state.lock().await;

        // Distinct (job id, status) pairs, like a SELECT DISTINCT would give.
        let distinct: std::collections::HashSet<(JobId, TaskStatus)> = state
            .tasks
            .values()
            .filter(|task| job_ids.contains(&task.job_id))
            .map(|task| (task.job_id, task.status))
            .collect();
        let mut pairs: Vec<(JobId, TaskStatus)> = distinct.into_iter().collect();
        pairs.sort_by_key(|&(job_id, _)| job_id);
        Ok(pairs)
    }

    async fn load_task(&self, task_id: TaskId) -> Result<Option<TaskRecord>, VigilError> {
        let state = self.state.lock().await;
        Ok(state.tasks.get(&task_id).cloned())
    }

    async fn write_result(
        &self,
        task_id: TaskId,
        status: TaskStatus,
        message: Option<String>,
        findings: Vec<FindingRecord>,
    ) -> Result<(), VigilError> {
        let mut state = self.state.lock().await;
        let task = state
            .tasks
            .get_mut(&task_id)
            .ok_or(VigilError::TaskNotFound(task_id))?;

        task.status = status;
        task.message = message;
        if !findings.is_empty() {
            state.findings.entry(task_id).or_default().extend(findings);
        }
        Ok(())
    }

    async fn bulk_update_status(
        &self,
        job_ids: &[JobId],
        expected: TaskStatus,
        to: TaskStatus,
    ) -> Result<u64, VigilError> {
        let mut state = self.state.lock().await;
        let mut updated = 0;
        for task in state.tasks.values_mut() {
            if job_ids.contains(&task.job_id) && task.status == expected {
                task.status = to;
                updated += 1;
            }
        }
        Ok(updated)
    }
}

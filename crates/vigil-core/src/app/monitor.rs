//! Monitor cycle: one fetch -> classify -> reduce -> merge -> persist ->
//! notify -> sweep pass over pending jobs.
//!
//! Designed to run as a single scheduled, non-overlapping pass; this module
//! takes no lock itself. Within a pass everything up to the job write is
//! sequential, the single `now` snapshot taken at the top is used for every
//! classification, and both store writes are single bulk operations.
//!
//! Failure handling is per step: a store failure aborts the remainder of
//! the pass (the bulk job write is all-or-nothing, so nothing is half
//! committed), while dispatch failures are logged inside the dispatcher and
//! never unwind the persisted verdicts. Correctness over time comes from
//! re-execution: the next cycle re-reads whatever is still PENDING.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::domain::{JobId, JobStatus, TaskStatus, TimeoutPolicy, VigilError, verdict};
use crate::ports::{Clock, JobStore, TaskStore};

use super::dispatcher::NotificationDispatcher;

/// Counts from one pass, for logging and the demo driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Jobs found in PENDING at the start of the pass.
    pub pending_jobs: usize,

    /// Jobs forced to TIMEOUT by age.
    pub timed_out_jobs: usize,

    /// Active jobs whose task bag reduced to a verdict.
    pub decided_jobs: usize,

    /// Notification entries handed to the queue.
    pub notified_jobs: usize,

    /// PENDING tasks swept to TIMEOUT under expired jobs.
    pub swept_tasks: u64,
}

pub struct MonitorCycle {
    jobs: Arc<dyn JobStore>,
    tasks: Arc<dyn TaskStore>,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
    timeout: TimeoutPolicy,
}

impl MonitorCycle {
    pub fn new(
        jobs: Arc<dyn JobStore>,
        tasks: Arc<dyn TaskStore>,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
        timeout: TimeoutPolicy,
    ) -> Self {
        Self {
            jobs,
            tasks,
            dispatcher,
            clock,
            timeout,
        }
    }

    /// Run one pass. Idempotent: with no intervening task changes a second
    /// pass finds no PENDING jobs to decide and performs zero writes and
    /// zero notifications.
    pub async fn run_once(&self) -> Result<CycleSummary, VigilError> {
        // One snapshot for the whole pass.
        let now = self.clock.now();

        let pending = self.jobs.fetch_jobs_by_status(JobStatus::Pending).await?;
        let pending_count = pending.len();

        let (timed_out, active): (Vec<_>, Vec<_>) = pending
            .into_iter()
            .partition(|job| self.timeout.is_expired(job.created_at, now));

        // Reduce the active jobs from their de-duplicated task bags.
        // Jobs whose bag yields no decision are left untouched.
        let mut verdicts: BTreeMap<JobId, JobStatus> = BTreeMap::new();
        let mut notify: Vec<JobId> = Vec::new();

        let active_ids: Vec<JobId> = active.iter().map(|job| job.job_id).collect();
        if !active_ids.is_empty() {
            let pairs = self.tasks.fetch_task_statuses(&active_ids).await?;

            let mut bags: BTreeMap<JobId, HashSet<TaskStatus>> = BTreeMap::new();
            for (job_id, status) in pairs {
                bags.entry(job_id).or_default().insert(status);
            }

            for (job_id, bag) in &bags {
                if let Some(verdict) = verdict::reduce(bag) {
                    tracing::debug!(%job_id, ?verdict, "job decided");
                    verdicts.insert(*job_id, verdict.as_job_status());
                    if verdict.notifies() {
                        notify.push(*job_id);
                    }
                }
            }
        }
        let decided_count = verdicts.len();

        // Merge in the forced timeouts. Inserting last means a timeout wins
        // should a job ever appear on both sides (it cannot, the partition
        // above is exclusive).
        for job in &timed_out {
            tracing::warn!(
                job_id = %job.job_id,
                created_at = %job.created_at,
                "job exceeded deadline, forcing TIMEOUT"
            );
            verdicts.insert(job.job_id, JobStatus::Timeout);
        }

        // One all-or-nothing status write for the whole merge.
        if !verdicts.is_empty() {
            let updates: Vec<(JobId, JobStatus)> =
                verdicts.iter().map(|(&id, &status)| (id, status)).collect();
            self.jobs.bulk_update_status(&updates).await?;
        }

        // Only verdicts decided in this pass qualify; jobs already sitting
        // at SUCCEEDED from an earlier pass were not fetched at all.
        let notified = self.dispatcher.dispatch(&notify).await;

        // Sweep: any task still PENDING under an expired job goes to
        // TIMEOUT. The `expected` filter keeps a task that completed in the
        // race window since the fetch untouched.
        let timed_out_ids: Vec<JobId> = timed_out.iter().map(|job| job.job_id).collect();
        let swept = if timed_out_ids.is_empty() {
            0
        } else {
            self.tasks
                .bulk_update_status(&timed_out_ids, TaskStatus::Pending, TaskStatus::Timeout)
                .await?
        };

        let summary = CycleSummary {
            pending_jobs: pending_count,
            timed_out_jobs: timed_out_ids.len(),
            decided_jobs: decided_count,
            notified_jobs: notified,
            swept_tasks: swept,
        };
        tracing::info!(
            pending = summary.pending_jobs,
            timed_out = summary.timed_out_jobs,
            decided = summary.decided_jobs,
            notified = summary.notified_jobs,
            swept = summary.swept_tasks,
            "monitor cycle complete"
        );
        Ok(summary)
    }
}

//! Demo driver: wires the in-memory adapters, simulates check executions,
//! and plays the scheduler's role by driving monitor cycles.
//!
//! Production deployments schedule `MonitorCycle::run_once` externally
//! (cron, a queue trigger, ...); this binary exists so the whole pipeline
//! can be watched locally end to end.

use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use tracing_subscriber::EnvFilter;

use vigil_core::app::{MonitorConfig, MonitorCycle, NotificationDispatcher, TaskWriteGuard};
use vigil_core::domain::{CheckId, FindingRecord, JobRecord, TaskRecord, TaskStatus, VigilError};
use vigil_core::impls::{InMemoryMonitorStore, InMemoryNotifyQueue};
use vigil_core::ports::{Clock, FixedClock, IdGenerator, SystemClock, UlidGenerator};

#[tokio::main]
async fn main() -> Result<(), VigilError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = MonitorConfig::from_env();
    tracing::info!(
        timeout_hours = config.timeout_hours,
        queue = %config.queue_name(),
        "starting vigil demo"
    );

    let store = Arc::new(InMemoryMonitorStore::new());
    let queue = Arc::new(InMemoryNotifyQueue::new());
    // Frozen clock so the timeout scenario does not need a 12 hour wait.
    let clock = Arc::new(FixedClock::new(SystemClock.now()));
    let ids = UlidGenerator::new(SystemClock);

    let guard = TaskWriteGuard::new(store.clone());
    let cycle = MonitorCycle::new(
        store.clone(),
        store.clone(),
        NotificationDispatcher::new(queue.clone(), config.queue_name()),
        clock.clone(),
        config.timeout_policy(),
    );

    // Job initiation (normally external): three revisions, two checks each.
    let mut seeded = Vec::new();
    for revision in ["rev-100", "rev-101", "rev-102"] {
        let job_id = ids.generate_job_id();
        store
            .insert_job(JobRecord::new(job_id, revision, clock.now()))
            .await;

        let mut task_ids = Vec::new();
        for check in ["row_count.v1", "null_ratio.v1"] {
            let task_id = ids.generate_task_id();
            store
                .insert_task(TaskRecord::new(task_id, job_id, CheckId::new(check)))
                .await;
            task_ids.push(task_id);
        }
        seeded.push((revision, job_id, task_ids));
    }

    // Simulated check executions reporting through the write guard.
    let (_, _job_a, tasks_a) = &seeded[0];
    guard
        .settle(tasks_a[0], TaskStatus::Success, None, vec![])
        .await?;
    guard
        .settle(tasks_a[1], TaskStatus::Success, None, vec![])
        .await?;

    let (_, _job_b, tasks_b) = &seeded[1];
    guard
        .settle(tasks_b[0], TaskStatus::Success, None, vec![])
        .await?;
    guard
        .settle(
            tasks_b[1],
            TaskStatus::Failed,
            Some("null ratio 0.31 above threshold 0.05".to_string()),
            vec![FindingRecord::new(
                ids.generate_finding_id(),
                tasks_b[1],
                Some("orders.amount".to_string()),
                serde_json::json!({"null_ratio": 0.31, "threshold": 0.05}),
            )],
        )
        .await?;

    // A late duplicate write loses the guard race and changes nothing.
    if let Err(error) = guard
        .settle(tasks_b[1], TaskStatus::Success, None, vec![])
        .await
    {
        tracing::info!(%error, "duplicate write rejected as expected");
    }

    // rev-102 finishes one check and leaves the other one hanging.
    let (_, _job_c, tasks_c) = &seeded[2];
    guard
        .settle(tasks_c[0], TaskStatus::Success, None, vec![])
        .await?;

    // First pass: rev-100 succeeds, rev-101 succeeds with errors, rev-102
    // stays pending.
    let summary = cycle.run_once().await?;
    tracing::info!(?summary, "first pass");

    tokio::time::sleep(Duration::from_millis(200)).await;

    // 13 hours later the hanging job crosses the 12 hour deadline.
    clock.advance(ChronoDuration::hours(13));
    let summary = cycle.run_once().await?;
    tracing::info!(?summary, "second pass");

    for (revision, job_id, _) in &seeded {
        let status = store.job_status(*job_id).await;
        tracing::info!(revision, %job_id, ?status, "final job status");
    }
    for (index, batch) in queue.sent_batches().await.iter().enumerate() {
        let payload = serde_json::to_string(batch)
            .unwrap_or_else(|_| "<unserializable>".to_string());
        tracing::info!(batch = index, %payload, "notification batch delivered");
    }

    Ok(())
}

//! Task and finding records.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{FindingId, JobId, TaskId};
use super::status::TaskStatus;

/// Identifier of a check definition ("row_count.v1", "null_ratio.v2", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckId(String);

impl CheckId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task record: one (subject, check) execution unit belonging to exactly
/// one job.
///
/// Design:
/// - Created in bulk at job initiation with status PENDING.
/// - Mutated exactly once, by whichever actor wins the write-guard race.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task_id: TaskId,
    pub job_id: JobId,
    pub check_id: CheckId,
    pub status: TaskStatus,

    /// Free-text message written together with the terminal status.
    pub message: Option<String>,
}

impl TaskRecord {
    /// Create a new pending task for a job.
    pub fn new(task_id: TaskId, job_id: JobId, check_id: CheckId) -> Self {
        Self {
            task_id,
            job_id,
            check_id,
            status: TaskStatus::Pending,
            message: None,
        }
    }
}

/// Detail record attached to a task by a check execution.
///
/// Findings carry no status of their own and are immutable once the owning
/// task reached a terminal status (the write guard only accepts them
/// together with the single terminal write).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingRecord {
    pub finding_id: FindingId,
    pub task_id: TaskId,

    /// Optional auxiliary subject identifier (table, column, partition, ...).
    pub subject: Option<String>,

    /// Check-specific detail payload; kept flexible as JSON.
    pub detail: serde_json::Value,
}

impl FindingRecord {
    pub fn new(
        finding_id: FindingId,
        task_id: TaskId,
        subject: Option<String>,
        detail: serde_json::Value,
    ) -> Self {
        Self {
            finding_id,
            task_id,
            subject,
            detail,
        }
    }
}

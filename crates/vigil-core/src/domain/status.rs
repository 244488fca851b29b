//! Task and job status enumerations.
//!
//! Both sets are closed: a new status value is a compile-time decision point
//! (exhaustive matches in the reducer and the stores), never a
//! silently-ignored string. Serialized SCREAMING_SNAKE_CASE to match the
//! store/queue wire contract: PENDING / SUCCESS / FAILED / ...

use serde::{Deserialize, Serialize};

/// Status of a single task.
///
/// Transitions: PENDING -> exactly one terminal value, written once by
/// whichever actor wins the write-guard race (a check execution, or the
/// monitor's timeout sweep).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Created at job initiation, result not yet written.
    Pending,

    /// Check ran and wrote its result.
    Success,

    /// Check ran and failed.
    Failed,

    /// Swept by the monitor after the job deadline passed.
    Timeout,

    /// Placeholder result for checks that are configured but not executed.
    DummySuccess,

    /// Check invocation could not be delivered and landed on the DLQ.
    SentToDlq,
}

impl TaskStatus {
    /// Is this a terminal status (no further transitions)?
    pub fn is_terminal(self) -> bool {
        !matches!(self, TaskStatus::Pending)
    }
}

/// Status of a job.
///
/// Derived, never set by a check directly: PENDING until the monitor reduces
/// the task bag (or the deadline passes), then one of the verdict statuses.
/// The report statuses are written by the downstream report renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Succeeded,
    SucceededWithErrors,
    Failed,
    Timeout,
    ReportGenerated,
    ReportGenerationFailed,
}

impl JobStatus {
    /// Is this a status the monitor will never re-evaluate?
    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::Pending)
    }
}

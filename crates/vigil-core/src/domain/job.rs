//! Job record: one quality-evaluation run for a dataset revision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::JobId;
use super::status::JobStatus;

/// Job record.
///
/// Design:
/// - The status is derived by the monitor from the task bag plus age; no
///   check execution writes it directly.
/// - `created_at` is wall-clock time: rows outlive the process, and the
///   timeout classification compares against a clock snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: JobId,

    /// Opaque display name ("nightly revision 2024-11-03", etc.).
    pub display_name: String,

    pub status: JobStatus,

    pub created_at: DateTime<Utc>,
}

impl JobRecord {
    /// Create a new pending job.
    pub fn new(job_id: JobId, display_name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            job_id,
            display_name: display_name.into(),
            status: JobStatus::Pending,
            created_at,
        }
    }
}

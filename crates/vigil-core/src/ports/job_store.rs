//! JobStore port: the relational store's job table, seen as a capability.
//!
//! Design principles:
//! - Reads return owned records, never live row handles; the monitor
//!   transforms ids and verdicts in memory and writes once.
//! - `bulk_update_status` is all-or-nothing at the store boundary: a merged
//!   verdict batch is never partially committed.

use async_trait::async_trait;

use crate::domain::{JobId, JobRecord, JobStatus, VigilError};

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Fetch every job currently in the given status.
    async fn fetch_jobs_by_status(&self, status: JobStatus)
    -> Result<Vec<JobRecord>, VigilError>;

    /// Persist the given id -> status assignments as one atomic write.
    /// Touches the status column only.
    async fn bulk_update_status(
        &self,
        updates: &[(JobId, JobStatus)],
    ) -> Result<(), VigilError>;
}

//! Domain model: ids, statuses, records, and the pure reduction rules.
//!
//! Nothing in this module performs I/O. The verdict reducer and the timeout
//! policy in particular are total, deterministic functions so they can be
//! tested exhaustively without a store or a clock.

pub mod deadline;
pub mod errors;
pub mod ids;
pub mod job;
pub mod status;
pub mod task;
pub mod verdict;

pub use deadline::{DEFAULT_TIMEOUT_HOURS, TimeoutPolicy};
pub use errors::VigilError;
pub use ids::{FindingId, JobId, TaskId};
pub use job::JobRecord;
pub use status::{JobStatus, TaskStatus};
pub use task::{CheckId, FindingRecord, TaskRecord};
pub use verdict::{Verdict, reduce};

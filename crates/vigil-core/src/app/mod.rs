//! Application layer: orchestration built on the ports.
//!
//! - **MonitorCycle**: one fetch -> classify -> reduce -> merge -> persist
//!   -> notify -> sweep pass.
//! - **TaskWriteGuard**: the single-terminal-write contract for tasks.
//! - **NotificationDispatcher**: batched delivery of decided job ids.
//! - **MonitorConfig**: deadline and queue-name configuration.

pub mod config;
pub mod dispatcher;
pub mod guard;
pub mod monitor;

pub use self::config::MonitorConfig;
pub use self::dispatcher::{MAX_BATCH_SIZE, NotificationDispatcher};
pub use self::guard::TaskWriteGuard;
pub use self::monitor::{CycleSummary, MonitorCycle};

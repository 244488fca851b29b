//! vigil-core
//!
//! Status-aggregation and timeout monitoring for batched quality-check
//! runs: many asynchronously completing check executions per job, one
//! authoritative verdict per job, batched notification of completed jobs.
//!
//! # Module map
//! - **domain**: pure model — ids, statuses, records, the verdict reducer
//!   and the deadline classifier.
//! - **ports**: abstraction layer — `JobStore`, `TaskStore`, `NotifyQueue`,
//!   `Clock`, `IdGenerator`.
//! - **app**: orchestration — `MonitorCycle`, `TaskWriteGuard`,
//!   `NotificationDispatcher`, `MonitorConfig`.
//! - **impls**: in-memory adapters for development and tests.
//!
//! The checks themselves, the relational store, and report rendering are
//! external collaborators reached only through the ports.

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

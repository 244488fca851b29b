//! Ports: the abstraction layer between the monitor and its collaborators.
//!
//! Each trait is the seam to an external system (relational store, message
//! queue, wall clock) and hides the implementation detail. The application
//! layer depends on these capabilities only, never on a concrete
//! connection, which is what lets the reducer and classifier run with zero
//! I/O under test.

pub mod clock;
pub mod id_generator;
pub mod job_store;
pub mod notify_queue;
pub mod task_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::job_store::JobStore;
pub use self::notify_queue::{NotifyQueue, QueueEntry, QueueError, QueueHandle};
pub use self::task_store::TaskStore;

//! Adapter implementations of the ports (in-memory, for development and
//! tests). Production deployments plug a relational store and a real queue
//! transport into the same traits.

pub mod inmem_queue;
pub mod memory;

pub use self::inmem_queue::InMemoryNotifyQueue;
pub use self::memory::InMemoryMonitorStore;

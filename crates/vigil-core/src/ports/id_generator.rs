//! IdGenerator port: minting job/task/finding ids.
//!
//! Job initiation itself happens outside the monitor, but the demo driver
//! and test fixtures need to create records, and ids must come from one
//! place so they stay ULID-sortable. The generator takes a `Clock` so the
//! timestamp half of the ULID is as testable as everything else.

use ulid::Ulid;

use crate::domain::ids::{FindingId, JobId, TaskId};
use crate::ports::Clock;

/// IdGenerator mints ids usable across distributed writers.
pub trait IdGenerator: Send + Sync {
    fn generate_job_id(&self) -> JobId;
    fn generate_task_id(&self) -> TaskId;
    fn generate_finding_id(&self) -> FindingId;
}

/// ULID-based generator: clock millis for the timestamp part, `rand` for
/// the entropy part.
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next_ulid(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_job_id(&self) -> JobId {
        JobId::from(self.next_ulid())
    }

    fn generate_task_id(&self) -> TaskId {
        TaskId::from(self.next_ulid())
    }

    fn generate_finding_id(&self) -> FindingId {
        FindingId::from(self.next_ulid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{FixedClock, SystemClock};
    use chrono::{TimeZone, Utc};

    #[test]
    fn generated_ids_are_unique() {
        let id_gen = UlidGenerator::new(SystemClock);

        let id1 = id_gen.generate_job_id();
        let id2 = id_gen.generate_job_id();

        assert_ne!(id1, id2);
    }

    #[test]
    fn fixed_clock_pins_the_timestamp_half() {
        let fixed_time = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let id_gen = UlidGenerator::new(FixedClock::new(fixed_time));

        let id1 = id_gen.generate_task_id();
        let id2 = id_gen.generate_task_id();

        // Random halves differ, timestamp halves match the clock.
        assert_ne!(id1, id2);
        assert_eq!(
            id1.as_ulid().timestamp_ms(),
            fixed_time.timestamp_millis() as u64
        );
        assert_eq!(id1.as_ulid().timestamp_ms(), id2.as_ulid().timestamp_ms());
    }
}

//! Age-based timeout classification for pending jobs.
//!
//! Pure: "now" is an explicit parameter, so the classifier is deterministic
//! under test. The monitor takes one clock snapshot per cycle and uses it
//! for every job in that pass.

use chrono::{DateTime, Duration, Utc};

/// Default deadline for a pending job.
pub const DEFAULT_TIMEOUT_HOURS: i64 = 12;

/// Timeout policy: how old a pending job may get before it is forced to
/// TIMEOUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutPolicy {
    timeout: Duration,
}

impl TimeoutPolicy {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_hours(hours: i64) -> Self {
        Self::new(Duration::hours(hours))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Strict comparison: a job created exactly `timeout` ago is NOT yet
    /// expired; it must be strictly older.
    pub fn is_expired(&self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        created_at < now - self.timeout
    }
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self::from_hours(DEFAULT_TIMEOUT_HOURS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_twelve_hours() {
        assert_eq!(TimeoutPolicy::default().timeout(), Duration::hours(12));
    }

    #[test]
    fn exactly_at_the_deadline_is_not_expired() {
        let policy = TimeoutPolicy::from_hours(12);
        let now = Utc::now();
        assert!(!policy.is_expired(now - Duration::hours(12), now));
    }

    #[test]
    fn one_second_past_the_deadline_is_expired() {
        let policy = TimeoutPolicy::from_hours(12);
        let now = Utc::now();
        let created = now - Duration::hours(12) - Duration::seconds(1);
        assert!(policy.is_expired(created, now));
    }

    #[test]
    fn fresh_job_is_not_expired() {
        let policy = TimeoutPolicy::default();
        let now = Utc::now();
        assert!(!policy.is_expired(now - Duration::hours(1), now));
    }
}

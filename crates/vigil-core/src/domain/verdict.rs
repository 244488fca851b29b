//! Verdict reduction: a bag of task statuses collapses to one job verdict.
//!
//! This is a pure, total function over de-duplicated status sets — order and
//! multiplicity of tasks are irrelevant, and no I/O happens here. The monitor
//! feeds it distinct (job, status) pairs and bulk-writes the result, keeping
//! reduction logic fully decoupled from persistence.

use std::collections::HashSet;

use super::status::{JobStatus, TaskStatus};

/// The job-level outcome derived from a task bag.
///
/// PENDING and TIMEOUT are never emitted here: an undecided job stays
/// untouched (`reduce` returns `None`) and timeouts are forced by the
/// deadline classifier, not by reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Every check passed (or the run carried a dummy placeholder result).
    Succeeded,

    /// At least one check passed and at least one failed, timed out, or
    /// landed on the DLQ.
    SucceededWithErrors,

    /// No check passed.
    Failed,
}

impl Verdict {
    /// The job status this verdict persists as.
    pub fn as_job_status(self) -> JobStatus {
        match self {
            Verdict::Succeeded => JobStatus::Succeeded,
            Verdict::SucceededWithErrors => JobStatus::SucceededWithErrors,
            Verdict::Failed => JobStatus::Failed,
        }
    }

    /// Does this verdict trigger a downstream notification?
    pub fn notifies(self) -> bool {
        matches!(self, Verdict::Succeeded | Verdict::SucceededWithErrors)
    }
}

/// Reduce a de-duplicated bag of task statuses to a verdict.
///
/// First match wins:
/// 1. Any PENDING (or an empty bag) -> no decision, the job is in flight.
/// 2. SUCCESS together with FAILED / TIMEOUT / SENT_TO_DLQ -> SucceededWithErrors.
/// 3. All SUCCESS, or DUMMY_SUCCESS present -> Succeeded.
/// 4. Otherwise -> Failed.
///
/// Note: rule 3 lets DUMMY_SUCCESS force Succeeded even when failures are
/// present in the same bag (rule 2 only fires on a real SUCCESS). This
/// precedence is intentional and pinned by tests.
pub fn reduce(statuses: &HashSet<TaskStatus>) -> Option<Verdict> {
    if statuses.is_empty() || statuses.contains(&TaskStatus::Pending) {
        return None;
    }

    let has_success = statuses.contains(&TaskStatus::Success);
    let has_error = statuses.iter().any(|s| {
        matches!(
            s,
            TaskStatus::Failed | TaskStatus::Timeout | TaskStatus::SentToDlq
        )
    });

    if has_success && has_error {
        Some(Verdict::SucceededWithErrors)
    } else if statuses.iter().all(|&s| s == TaskStatus::Success)
        || statuses.contains(&TaskStatus::DummySuccess)
    {
        Some(Verdict::Succeeded)
    } else {
        Some(Verdict::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bag(statuses: &[TaskStatus]) -> HashSet<TaskStatus> {
        statuses.iter().copied().collect()
    }

    #[test]
    fn pending_in_bag_means_no_decision() {
        assert_eq!(reduce(&bag(&[TaskStatus::Pending, TaskStatus::Success])), None);
    }

    #[test]
    fn empty_bag_means_no_decision() {
        assert_eq!(reduce(&HashSet::new()), None);
    }

    #[rstest]
    #[case::failed(TaskStatus::Failed)]
    #[case::timeout(TaskStatus::Timeout)]
    #[case::sent_to_dlq(TaskStatus::SentToDlq)]
    fn success_mixed_with_errors_is_succeeded_with_errors(#[case] error: TaskStatus) {
        assert_eq!(
            reduce(&bag(&[TaskStatus::Success, error])),
            Some(Verdict::SucceededWithErrors)
        );
    }

    #[test]
    fn all_success_is_succeeded() {
        assert_eq!(reduce(&bag(&[TaskStatus::Success])), Some(Verdict::Succeeded));
    }

    #[test]
    fn all_failed_is_failed() {
        assert_eq!(reduce(&bag(&[TaskStatus::Failed])), Some(Verdict::Failed));
    }

    #[rstest]
    #[case::no_success(&[TaskStatus::Timeout, TaskStatus::SentToDlq])]
    #[case::only_dlq(&[TaskStatus::SentToDlq])]
    fn no_success_at_all_is_failed(#[case] statuses: &[TaskStatus]) {
        assert_eq!(reduce(&bag(statuses)), Some(Verdict::Failed));
    }

    // Pins the observed precedence: DUMMY_SUCCESS beats co-present failures
    // because rule 2 requires a real SUCCESS. Changing this is a deliberate
    // behavior change, not a refactor.
    #[rstest]
    #[case::with_failed(&[TaskStatus::DummySuccess, TaskStatus::Failed])]
    #[case::with_timeout(&[TaskStatus::DummySuccess, TaskStatus::Timeout])]
    #[case::alone(&[TaskStatus::DummySuccess])]
    fn dummy_success_forces_succeeded(#[case] statuses: &[TaskStatus]) {
        assert_eq!(reduce(&bag(statuses)), Some(Verdict::Succeeded));
    }

    #[test]
    fn dummy_success_next_to_real_success_and_error_stays_with_errors() {
        assert_eq!(
            reduce(&bag(&[
                TaskStatus::DummySuccess,
                TaskStatus::Success,
                TaskStatus::Failed
            ])),
            Some(Verdict::SucceededWithErrors)
        );
    }

    #[test]
    fn only_succeeded_verdicts_notify() {
        assert!(Verdict::Succeeded.notifies());
        assert!(Verdict::SucceededWithErrors.notifies());
        assert!(!Verdict::Failed.notifies());
    }

    #[test]
    fn verdict_maps_to_job_status() {
        assert_eq!(Verdict::Succeeded.as_job_status(), JobStatus::Succeeded);
        assert_eq!(
            Verdict::SucceededWithErrors.as_job_status(),
            JobStatus::SucceededWithErrors
        );
        assert_eq!(Verdict::Failed.as_job_status(), JobStatus::Failed);
    }
}

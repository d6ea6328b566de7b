//! Deferred grading behind a fixed "checking..." delay.
//!
//! The delay only postpones when a result becomes available. The submission
//! is snapshotted when the check is requested, and dropping the
//! [`PendingCheck`] aborts the timer so nothing completes after the view that
//! requested it is gone.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::AssessmentError;
use crate::grader::{grade_text, validate_submission, ExerciseAttempt};
use crate::model::{AssessmentResult, ExerciseSpec};

/// A graded snapshot, ready to be applied to the attempt it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub submitted_text: String,
    pub result: AssessmentResult,
}

impl CheckOutcome {
    /// Record this outcome on `attempt`.
    pub fn apply_to<'a>(
        self,
        attempt: &'a mut ExerciseAttempt,
    ) -> Result<&'a AssessmentResult, AssessmentError> {
        attempt.apply(self.submitted_text, self.result)
    }
}

/// A check waiting for its delay to elapse. Aborted on drop.
#[derive(Debug)]
pub struct PendingCheck {
    handle: JoinHandle<CheckOutcome>,
}

impl PendingCheck {
    /// Wait for the delay and the grade. `None` if the check was aborted.
    pub async fn wait(mut self) -> Option<CheckOutcome> {
        (&mut self.handle).await.ok()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Abandon the check.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for PendingCheck {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Validate the attempt now and grade a snapshot of it after `delay`.
///
/// Must be called from within a Tokio runtime. The attempt itself is not
/// touched; apply the outcome once it arrives.
pub fn schedule_check(
    attempt: &ExerciseAttempt,
    spec: &ExerciseSpec,
    min_len: usize,
    delay: Duration,
) -> Result<PendingCheck, AssessmentError> {
    if attempt.checked() {
        return Err(AssessmentError::PostSubmissionMutation);
    }
    validate_submission(attempt.submitted_text(), min_len)?;

    let submitted_text = attempt.submitted_text().to_string();
    let spec = spec.clone();
    tracing::debug!(delay_ms = delay.as_millis() as u64, "scheduling exercise check");

    let handle = tokio::spawn(async move {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let result = grade_text(&submitted_text, &spec);
        CheckOutcome {
            submitted_text,
            result,
        }
    });

    Ok(PendingCheck { handle })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grader::MIN_SUBMISSION_LEN;

    const HELLO: &str = "HELLO: PROC OPTIONS(MAIN); PUT SKIP LIST('HI'); END HELLO;";

    fn attempt_with(text: &str) -> ExerciseAttempt {
        let mut attempt = ExerciseAttempt::new();
        attempt.set_text(text).unwrap();
        attempt
    }

    #[tokio::test(start_paused = true)]
    async fn result_arrives_after_delay() {
        let spec = ExerciseSpec::new(HELLO);
        let mut attempt = attempt_with(HELLO);
        let delay = Duration::from_millis(800);

        let start = tokio::time::Instant::now();
        let pending = schedule_check(&attempt, &spec, MIN_SUBMISSION_LEN, delay).unwrap();
        assert!(!attempt.checked());

        let outcome = pending.wait().await.unwrap();
        assert!(start.elapsed() >= delay);
        let result = outcome.apply_to(&mut attempt).unwrap();
        assert!(result.passed);
        assert!(attempt.checked());
    }

    #[tokio::test(start_paused = true)]
    async fn grades_the_snapshot_taken_at_request_time() {
        let spec = ExerciseSpec::new(HELLO);
        let mut attempt = attempt_with(HELLO);
        let pending =
            schedule_check(&attempt, &spec, MIN_SUBMISSION_LEN, Duration::from_secs(1)).unwrap();

        attempt.set_text("edited while checking").unwrap();
        let outcome = pending.wait().await.unwrap();
        assert_eq!(outcome.submitted_text, HELLO);
        outcome.apply_to(&mut attempt).unwrap();
        assert_eq!(attempt.submitted_text(), HELLO);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_check_never_completes() {
        let spec = ExerciseSpec::new(HELLO);
        let attempt = attempt_with(HELLO);
        let pending =
            schedule_check(&attempt, &spec, MIN_SUBMISSION_LEN, Duration::from_secs(1)).unwrap();
        let abort = pending.handle.abort_handle();

        pending.cancel();
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(abort.is_finished());
        assert!(!attempt.checked());
    }

    #[tokio::test]
    async fn short_submission_rejected_up_front() {
        let spec = ExerciseSpec::new(HELLO);
        let attempt = attempt_with("END;");
        let err = schedule_check(&attempt, &spec, MIN_SUBMISSION_LEN, Duration::ZERO).unwrap_err();
        assert!(matches!(err, AssessmentError::InvalidSubmission { len: 4, .. }));
    }

    #[tokio::test]
    async fn checked_attempt_cannot_be_rescheduled() {
        let spec = ExerciseSpec::new(HELLO);
        let mut attempt = attempt_with(HELLO);
        attempt.check(&spec, MIN_SUBMISSION_LEN).unwrap();
        let err = schedule_check(&attempt, &spec, MIN_SUBMISSION_LEN, Duration::ZERO).unwrap_err();
        assert_eq!(err, AssessmentError::PostSubmissionMutation);
    }

    #[tokio::test]
    async fn zero_delay_completes() {
        let spec = ExerciseSpec::new(HELLO);
        let attempt = attempt_with("hello: proc; end hello;");
        let outcome = schedule_check(&attempt, &spec, MIN_SUBMISSION_LEN, Duration::ZERO)
            .unwrap()
            .wait()
            .await
            .unwrap();
        assert!(outcome.result.similarity_percent > 0);
    }
}

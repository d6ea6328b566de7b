//! Exercise grading.
//!
//! Grading is a text heuristic, not a compiler: a submission passes when it
//! shares enough keywords with the reference solution and contains every
//! required structural token.

use serde::Serialize;

use crate::error::AssessmentError;
use crate::model::{AssessmentResult, ExerciseSpec, Feedback, FeedbackKind};
use crate::normalize::normalize;
use crate::similarity::similarity;

/// Submissions shorter than this (after trimming) are rejected before grading.
pub const MIN_SUBMISSION_LEN: usize = 10;

/// Grade an attempt's current text against an exercise.
pub fn grade(attempt: &ExerciseAttempt, spec: &ExerciseSpec) -> AssessmentResult {
    grade_text(&attempt.submitted_text, spec)
}

/// Grade raw submission text against an exercise.
///
/// Always returns a result; length preconditions belong to the caller.
pub fn grade_text(submitted: &str, spec: &ExerciseSpec) -> AssessmentResult {
    let similarity_percent = similarity(submitted, &spec.reference_solution);
    let normalized = normalize(submitted);

    let mut feedback =
        Vec::with_capacity(spec.required_tokens.len() + spec.recommended_tokens.len());
    let mut required_present = true;

    for token in &spec.required_tokens {
        let token = token.to_uppercase();
        if normalized.contains(&token) {
            feedback.push(Feedback {
                kind: FeedbackKind::Correct,
                message: format!("`{token}` found"),
            });
        } else {
            required_present = false;
            feedback.push(Feedback {
                kind: FeedbackKind::Incorrect,
                message: format!("Missing required `{token}`"),
            });
        }
    }

    for token in &spec.recommended_tokens {
        let token = token.to_uppercase();
        if normalized.contains(&token) {
            feedback.push(Feedback {
                kind: FeedbackKind::Correct,
                message: format!("`{token}` found"),
            });
        } else {
            feedback.push(Feedback {
                kind: FeedbackKind::Warning,
                message: format!("`{token}` not found; consider adding it"),
            });
        }
    }

    let passed = similarity_percent >= spec.pass_threshold && required_present;
    tracing::debug!(similarity_percent, passed, "graded exercise submission");

    AssessmentResult {
        passed,
        similarity_percent,
        feedback,
    }
}

/// Check the length precondition for grading.
pub fn validate_submission(text: &str, min_len: usize) -> Result<(), AssessmentError> {
    let len = text.trim().chars().count();
    if len < min_len {
        return Err(AssessmentError::InvalidSubmission { len, min: min_len });
    }
    Ok(())
}

/// One learner's work on an exercise during a single chapter visit.
///
/// Once checked, the attempt is frozen until `reset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExerciseAttempt {
    submitted_text: String,
    result: Option<AssessmentResult>,
}

impl ExerciseAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submitted_text(&self) -> &str {
        &self.submitted_text
    }

    pub fn checked(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    /// Replace the submission text. Rejected once the attempt is checked.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), AssessmentError> {
        if self.checked() {
            return Err(AssessmentError::PostSubmissionMutation);
        }
        self.submitted_text = text.into();
        Ok(())
    }

    /// Validate, grade, and record the result.
    pub fn check(
        &mut self,
        spec: &ExerciseSpec,
        min_len: usize,
    ) -> Result<&AssessmentResult, AssessmentError> {
        if self.checked() {
            return Err(AssessmentError::PostSubmissionMutation);
        }
        validate_submission(&self.submitted_text, min_len)?;
        let result = grade(self, spec);
        Ok(&*self.result.insert(result))
    }

    /// Record a result graded elsewhere (see [`crate::checking`]).
    ///
    /// The attempt's text becomes the snapshot that was actually graded.
    pub fn apply(
        &mut self,
        submitted_text: String,
        result: AssessmentResult,
    ) -> Result<&AssessmentResult, AssessmentError> {
        if self.checked() {
            return Err(AssessmentError::PostSubmissionMutation);
        }
        self.submitted_text = submitted_text;
        Ok(&*self.result.insert(result))
    }

    /// Clear text and result.
    pub fn reset(&mut self) {
        self.submitted_text.clear();
        self.result = None;
    }
}

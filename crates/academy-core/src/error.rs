//! Assessment error types.
//!
//! Every variant describes a rejected operation. A rejection never applies
//! partial state: the attempt or quiz looks exactly as it did before the call.

use thiserror::Error;

/// Errors returned by exercise attempts, the quiz engine, and the navigator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// The submission is shorter than the minimum length and was not graded.
    #[error("submission too short: {len} characters, at least {min} required")]
    InvalidSubmission { len: usize, min: usize },

    /// Submit was attempted before every question had an answer.
    #[error("quiz incomplete: {answered} of {total} questions answered")]
    IncompleteQuiz { answered: usize, total: usize },

    /// A selection or re-grade was attempted after submission.
    #[error("attempt already submitted; reset to try again")]
    PostSubmissionMutation,

    /// The quiz has no questions, so there is nothing to submit.
    #[error("quiz has no questions")]
    EmptyQuiz,

    /// The question id is not part of this quiz.
    #[error("unknown question id: {0}")]
    UnknownQuestion(u32),

    /// The option index is outside the question's option list.
    #[error("option {index} out of range for question {question_id} ({options} options)")]
    OptionOutOfRange {
        question_id: u32,
        index: usize,
        options: usize,
    },

    /// Results can only be shown or hidden once the quiz is submitted.
    #[error("quiz not submitted yet")]
    NotSubmitted,

    /// The requested chapter part is not offered by the course layout.
    #[error("chapter {chapter} has no part '{part}'")]
    PartUnavailable { chapter: usize, part: String },

    /// The chapter index is outside the course layout.
    #[error("chapter {0} does not exist")]
    UnknownChapter(usize),
}

impl AssessmentError {
    /// Returns `true` for rejections a UI handles by disabling a control
    /// rather than surfacing a message.
    pub fn is_control_state(&self) -> bool {
        matches!(
            self,
            AssessmentError::IncompleteQuiz { .. }
                | AssessmentError::PostSubmissionMutation
                | AssessmentError::NotSubmitted
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_include_counts() {
        let err = AssessmentError::IncompleteQuiz {
            answered: 2,
            total: 3,
        };
        assert_eq!(err.to_string(), "quiz incomplete: 2 of 3 questions answered");

        let err = AssessmentError::InvalidSubmission { len: 4, min: 10 };
        assert!(err.to_string().contains("at least 10"));
    }

    #[test]
    fn control_state_classification() {
        assert!(AssessmentError::PostSubmissionMutation.is_control_state());
        assert!(AssessmentError::NotSubmitted.is_control_state());
        assert!(!AssessmentError::UnknownQuestion(7).is_control_state());
        assert!(!AssessmentError::InvalidSubmission { len: 0, min: 10 }.is_control_state());
    }
}

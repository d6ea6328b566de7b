//! Multiple-choice quiz engine.
//!
//! A quiz moves from unstarted (no selections) through in progress to
//! submitted. Submission freezes selections and computes the score; `reset`
//! is the only way back.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::error::AssessmentError;
use crate::model::Question;
use crate::similarity::percent;

/// Scores at or above this are framed as a good result. Presentational only.
pub const GOOD_SCORE_THRESHOLD: u8 = 70;

/// One learner's pass through a quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuizAttempt {
    /// Question id to chosen option index.
    pub selections: BTreeMap<u32, usize>,
    pub submitted: bool,
    /// Present iff `submitted`.
    pub score: Option<u8>,
    pub results_visible: bool,
}

/// Where the attempt is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    Unstarted,
    InProgress,
    Submitted { results_visible: bool },
}

/// How an option is shown once results are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionMark {
    Correct,
    Incorrect,
}

/// A quiz and the current attempt at it.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    questions: Vec<Question>,
    attempt: QuizAttempt,
}

impl QuizEngine {
    /// Questions repeating an earlier id are dropped.
    pub fn new(mut questions: Vec<Question>) -> Self {
        let mut seen = HashSet::new();
        questions.retain(|q| {
            let fresh = seen.insert(q.id);
            if !fresh {
                tracing::warn!(question_id = q.id, "dropping duplicate quiz question");
            }
            fresh
        });
        Self {
            questions,
            attempt: QuizAttempt::default(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn attempt(&self) -> &QuizAttempt {
        &self.attempt
    }

    pub fn state(&self) -> QuizState {
        if self.attempt.submitted {
            QuizState::Submitted {
                results_visible: self.attempt.results_visible,
            }
        } else if self.attempt.selections.is_empty() {
            QuizState::Unstarted
        } else {
            QuizState::InProgress
        }
    }

    /// Whether every question has a selection, i.e. submit is enabled.
    pub fn can_submit(&self) -> bool {
        !self.attempt.submitted
            && !self.questions.is_empty()
            && self.attempt.selections.len() == self.questions.len()
    }

    fn question(&self, question_id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == question_id)
    }

    /// Record (or replace) the chosen option for a question.
    pub fn select_answer(
        &mut self,
        question_id: u32,
        option_index: usize,
    ) -> Result<(), AssessmentError> {
        if self.attempt.submitted {
            return Err(AssessmentError::PostSubmissionMutation);
        }
        let question = self
            .question(question_id)
            .ok_or(AssessmentError::UnknownQuestion(question_id))?;
        if option_index >= question.options.len() {
            return Err(AssessmentError::OptionOutOfRange {
                question_id,
                index: option_index,
                options: question.options.len(),
            });
        }
        self.attempt.selections.insert(question_id, option_index);
        Ok(())
    }

    /// Freeze the selections and compute the score.
    pub fn submit(&mut self) -> Result<u8, AssessmentError> {
        if self.attempt.submitted {
            return Err(AssessmentError::PostSubmissionMutation);
        }
        if self.questions.is_empty() {
            return Err(AssessmentError::EmptyQuiz);
        }
        let total = self.questions.len();
        let answered = self.attempt.selections.len();
        if answered != total {
            return Err(AssessmentError::IncompleteQuiz { answered, total });
        }

        let correct = self
            .questions
            .iter()
            .filter(|q| self.attempt.selections.get(&q.id) == Some(&q.correct_index))
            .count();
        let score = percent(correct, total);

        self.attempt.submitted = true;
        self.attempt.score = Some(score);
        self.attempt.results_visible = true;
        tracing::debug!(correct, total, score, "quiz submitted");
        Ok(score)
    }

    /// Show or hide results. Returns the new visibility.
    pub fn toggle_results_visibility(&mut self) -> Result<bool, AssessmentError> {
        if !self.attempt.submitted {
            return Err(AssessmentError::NotSubmitted);
        }
        self.attempt.results_visible = !self.attempt.results_visible;
        Ok(self.attempt.results_visible)
    }

    /// Discard the attempt and start over.
    pub fn reset(&mut self) {
        self.attempt = QuizAttempt::default();
    }

    /// Mark for one option, or `None` while results are hidden or the option
    /// is neither correct nor the learner's wrong pick.
    pub fn option_mark(&self, question_id: u32, option_index: usize) -> Option<OptionMark> {
        if !(self.attempt.submitted && self.attempt.results_visible) {
            return None;
        }
        let question = self.question(question_id)?;
        if option_index == question.correct_index {
            Some(OptionMark::Correct)
        } else if self.attempt.selections.get(&question_id) == Some(&option_index) {
            Some(OptionMark::Incorrect)
        } else {
            None
        }
    }

    /// Whether the submitted score is framed as good. `None` before submit.
    pub fn is_good_score(&self) -> Option<bool> {
        self.attempt.score.map(|s| s >= GOOD_SCORE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32, correct_index: usize) -> Question {
        Question {
            id,
            prompt: format!("Question {id}"),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_index,
        }
    }

    fn three_question_quiz() -> QuizEngine {
        QuizEngine::new(vec![question(1, 3), question(2, 3), question(3, 3)])
    }

    #[test]
    fn all_correct_scores_100() {
        let mut quiz = three_question_quiz();
        for id in 1..=3 {
            quiz.select_answer(id, 3).unwrap();
        }
        assert_eq!(quiz.submit(), Ok(100));
        assert_eq!(quiz.attempt().score, Some(100));
        assert_eq!(quiz.state(), QuizState::Submitted { results_visible: true });
        assert_eq!(quiz.is_good_score(), Some(true));
    }

    #[test]
    fn one_wrong_scores_67() {
        let mut quiz = three_question_quiz();
        quiz.select_answer(1, 3).unwrap();
        quiz.select_answer(2, 0).unwrap();
        quiz.select_answer(3, 3).unwrap();
        assert_eq!(quiz.submit(), Ok(67));
        assert_eq!(quiz.is_good_score(), Some(false));
    }

    #[test]
    fn incomplete_submit_is_rejected() {
        let mut quiz = three_question_quiz();
        quiz.select_answer(1, 3).unwrap();
        quiz.select_answer(2, 3).unwrap();
        let before = quiz.attempt().clone();
        assert_eq!(
            quiz.submit(),
            Err(AssessmentError::IncompleteQuiz {
                answered: 2,
                total: 3
            })
        );
        assert!(!quiz.attempt().submitted);
        assert_eq!(quiz.attempt(), &before);
        assert!(!quiz.can_submit());
    }

    #[test]
    fn reset_after_submit_clears_everything() {
        let mut quiz = three_question_quiz();
        for id in 1..=3 {
            quiz.select_answer(id, 1).unwrap();
        }
        quiz.submit().unwrap();
        quiz.reset();
        assert!(quiz.attempt().selections.is_empty());
        assert!(!quiz.attempt().submitted);
        assert!(!quiz.attempt().results_visible);
        assert_eq!(quiz.attempt().score, None);
        assert_eq!(quiz.state(), QuizState::Unstarted);
    }

    #[test]
    fn select_after_submit_is_a_no_op() {
        let mut quiz = three_question_quiz();
        for id in 1..=3 {
            quiz.select_answer(id, 3).unwrap();
        }
        quiz.submit().unwrap();
        let snapshot = quiz.attempt().clone();
        assert_eq!(
            quiz.select_answer(2, 0),
            Err(AssessmentError::PostSubmissionMutation)
        );
        assert_eq!(quiz.submit(), Err(AssessmentError::PostSubmissionMutation));
        assert_eq!(quiz.attempt(), &snapshot);
    }

    #[test]
    fn selection_overwrites_previous_choice() {
        let mut quiz = three_question_quiz();
        assert_eq!(quiz.state(), QuizState::Unstarted);
        quiz.select_answer(1, 0).unwrap();
        quiz.select_answer(1, 2).unwrap();
        assert_eq!(quiz.state(), QuizState::InProgress);
        assert_eq!(quiz.attempt().selections.len(), 1);
        assert_eq!(quiz.attempt().selections[&1], 2);
    }

    #[test]
    fn unknown_question_and_bad_option_rejected() {
        let mut quiz = three_question_quiz();
        assert_eq!(quiz.select_answer(9, 0), Err(AssessmentError::UnknownQuestion(9)));
        assert_eq!(
            quiz.select_answer(1, 4),
            Err(AssessmentError::OptionOutOfRange {
                question_id: 1,
                index: 4,
                options: 4
            })
        );
        assert!(quiz.attempt().selections.is_empty());
    }

    #[test]
    fn duplicate_question_ids_do_not_block_submit() {
        let mut quiz = QuizEngine::new(vec![question(1, 0), question(2, 1), question(1, 2)]);
        assert_eq!(quiz.questions().len(), 2);
        assert_eq!(quiz.questions()[0].correct_index, 0);
        quiz.select_answer(1, 0).unwrap();
        quiz.select_answer(2, 1).unwrap();
        assert!(quiz.can_submit());
        assert_eq!(quiz.submit().unwrap(), 100);
    }

    #[test]
    fn empty_quiz_cannot_be_submitted() {
        let mut quiz = QuizEngine::new(vec![]);
        assert_eq!(quiz.submit(), Err(AssessmentError::EmptyQuiz));
        assert!(!quiz.can_submit());
    }

    #[test]
    fn toggle_requires_submission() {
        let mut quiz = three_question_quiz();
        assert_eq!(
            quiz.toggle_results_visibility(),
            Err(AssessmentError::NotSubmitted)
        );
        for id in 1..=3 {
            quiz.select_answer(id, 3).unwrap();
        }
        quiz.submit().unwrap();
        assert_eq!(quiz.toggle_results_visibility(), Ok(false));
        assert_eq!(quiz.state(), QuizState::Submitted { results_visible: false });
        assert_eq!(quiz.attempt().score, Some(100));
        assert_eq!(quiz.toggle_results_visibility(), Ok(true));
    }

    #[test]
    fn option_marks_follow_visibility() {
        let mut quiz = three_question_quiz();
        quiz.select_answer(1, 0).unwrap();
        quiz.select_answer(2, 3).unwrap();
        quiz.select_answer(3, 3).unwrap();
        assert_eq!(quiz.option_mark(1, 3), None);

        quiz.submit().unwrap();
        assert_eq!(quiz.option_mark(1, 3), Some(OptionMark::Correct));
        assert_eq!(quiz.option_mark(1, 0), Some(OptionMark::Incorrect));
        assert_eq!(quiz.option_mark(1, 1), None);
        assert_eq!(quiz.option_mark(2, 3), Some(OptionMark::Correct));
        assert_eq!(quiz.option_mark(2, 0), None);

        quiz.toggle_results_visibility().unwrap();
        assert_eq!(quiz.option_mark(1, 3), None);
    }
}

//! Course navigation state.
//!
//! A [`CourseSession`] tracks which chapter is expanded and which part is
//! being visited. Every part visit starts from fresh attempt state; leaving or
//! switching parts discards it.

use std::sync::Arc;

use crate::catalog;
use crate::error::AssessmentError;
use crate::grader::ExerciseAttempt;
use crate::model::{ChapterContent, ChapterOutline, Course, ExerciseSpec, Part};
use crate::quiz::QuizEngine;
use crate::traits::ContentSource;

/// What the learner is doing in the visited part.
#[derive(Debug, Clone)]
pub enum PartState {
    Theory,
    Exercise {
        spec: ExerciseSpec,
        attempt: ExerciseAttempt,
    },
    Quiz(QuizEngine),
}

/// The chapter part currently on screen.
#[derive(Debug, Clone)]
pub struct PartVisit {
    pub chapter: usize,
    pub part: Part,
    pub content: ChapterContent,
    pub state: PartState,
}

/// Navigation state for one open course.
pub struct CourseSession {
    source: Arc<dyn ContentSource>,
    course: Course,
    layout: Vec<ChapterOutline>,
    open_chapter: Option<usize>,
    visit: Option<PartVisit>,
}

impl CourseSession {
    pub fn new(source: Arc<dyn ContentSource>, course: Course) -> Self {
        let layout = catalog::chapter_layout(&course);
        Self {
            source,
            course,
            layout,
            open_chapter: None,
            visit: None,
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn layout(&self) -> &[ChapterOutline] {
        &self.layout
    }

    pub fn open_chapter(&self) -> Option<usize> {
        self.open_chapter
    }

    /// Expand a chapter, or collapse it if it is already expanded.
    pub fn toggle_chapter(&mut self, chapter: usize) -> Result<Option<usize>, AssessmentError> {
        if chapter >= self.layout.len() {
            return Err(AssessmentError::UnknownChapter(chapter));
        }
        self.open_chapter = if self.open_chapter == Some(chapter) {
            None
        } else {
            Some(chapter)
        };
        Ok(self.open_chapter)
    }

    /// Visit a chapter part with fresh attempt state.
    ///
    /// The previous visit, including any unsubmitted work, is discarded.
    pub fn open_part(&mut self, chapter: usize, part: Part) -> Result<&mut PartVisit, AssessmentError> {
        let outline = self
            .layout
            .get(chapter)
            .ok_or(AssessmentError::UnknownChapter(chapter))?;
        if !outline.parts.contains(&part) {
            return Err(AssessmentError::PartUnavailable {
                chapter,
                part: part.to_string(),
            });
        }

        let content = self
            .source
            .chapter_content(&self.course.id, chapter)
            .unwrap_or_else(|| ChapterContent {
                title: outline.title.clone(),
                ..Default::default()
            });

        let state = match part {
            Part::Theory => PartState::Theory,
            Part::Exercise => {
                let spec = content.exercise.clone().ok_or_else(|| {
                    AssessmentError::PartUnavailable {
                        chapter,
                        part: part.to_string(),
                    }
                })?;
                PartState::Exercise {
                    spec,
                    attempt: ExerciseAttempt::new(),
                }
            }
            Part::FinalQuiz => PartState::Quiz(QuizEngine::new(content.quiz.clone())),
        };

        tracing::debug!(course = %self.course.id, chapter, %part, "opening part");
        self.open_chapter = Some(chapter);
        Ok(self.visit.insert(PartVisit {
            chapter,
            part,
            content,
            state,
        }))
    }

    pub fn visit(&self) -> Option<&PartVisit> {
        self.visit.as_ref()
    }

    pub fn visit_mut(&mut self) -> Option<&mut PartVisit> {
        self.visit.as_mut()
    }

    /// The exercise being visited, if any.
    pub fn exercise_mut(&mut self) -> Option<(&ExerciseSpec, &mut ExerciseAttempt)> {
        match &mut self.visit.as_mut()?.state {
            PartState::Exercise { spec, attempt } => Some((&*spec, attempt)),
            _ => None,
        }
    }

    /// The quiz being visited, if any.
    pub fn quiz_mut(&mut self) -> Option<&mut QuizEngine> {
        match &mut self.visit.as_mut()?.state {
            PartState::Quiz(quiz) => Some(quiz),
            _ => None,
        }
    }

    /// Leave the current part, discarding its attempt.
    pub fn leave(&mut self) -> Option<PartVisit> {
        self.visit.take()
    }
}

//! Core data model types for Mainframe Academy.
//!
//! These are the types every other module works with: courses and their
//! chapter layout, chapter content, exercises, quiz questions, and the
//! assessment results handed back to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default similarity percentage an exercise submission must reach.
pub const DEFAULT_PASS_THRESHOLD: u8 = 70;

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Stable identifier (e.g. "pl1-basics").
    pub id: String,
    /// Display title.
    pub title: String,
    /// Simple courses have a single overview chapter without exercises.
    #[serde(default)]
    pub simple: bool,
}

/// One part of a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Theory,
    Exercise,
    FinalQuiz,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Theory => write!(f, "Theory"),
            Part::Exercise => write!(f, "Exercise"),
            Part::FinalQuiz => write!(f, "Final Quiz"),
        }
    }
}

impl FromStr for Part {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], " ").trim() {
            "theory" => Ok(Part::Theory),
            "exercise" => Ok(Part::Exercise),
            "final quiz" | "quiz" => Ok(Part::FinalQuiz),
            other => Err(format!("unknown part: {other}")),
        }
    }
}

/// Title and parts of one chapter in a course layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterOutline {
    pub title: String,
    pub parts: Vec<Part>,
}

/// A multiple-choice question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique within its quiz.
    pub id: u32,
    pub prompt: String,
    /// At least two options.
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_index: usize,
}

/// A coding exercise and how submissions to it are graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSpec {
    /// Task shown to the learner.
    #[serde(default)]
    pub prompt: String,
    /// The model answer submissions are compared against.
    pub reference_solution: String,
    /// Substrings that must appear in the normalized submission.
    #[serde(default = "default_required_tokens")]
    pub required_tokens: Vec<String>,
    /// Substrings whose absence only produces a warning.
    #[serde(default = "default_recommended_tokens")]
    pub recommended_tokens: Vec<String>,
    /// Minimum similarity percentage for a pass.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: u8,
}

impl ExerciseSpec {
    /// An exercise with the default PL/I checklist and threshold.
    pub fn new(reference_solution: impl Into<String>) -> Self {
        Self {
            prompt: String::new(),
            reference_solution: reference_solution.into(),
            required_tokens: default_required_tokens(),
            recommended_tokens: default_recommended_tokens(),
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        }
    }
}

pub(crate) fn default_required_tokens() -> Vec<String> {
    vec!["PROC".to_string(), "END".to_string()]
}

pub(crate) fn default_recommended_tokens() -> Vec<String> {
    vec!["MAIN".to_string()]
}

fn default_pass_threshold() -> u8 {
    DEFAULT_PASS_THRESHOLD
}

/// Classification of a single feedback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Correct,
    Incorrect,
    Warning,
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackKind::Correct => write!(f, "correct"),
            FeedbackKind::Incorrect => write!(f, "incorrect"),
            FeedbackKind::Warning => write!(f, "warning"),
        }
    }
}

/// One line of grading feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

/// The outcome of grading one exercise submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub passed: bool,
    /// 0 to 100.
    pub similarity_percent: u8,
    /// In checklist order.
    pub feedback: Vec<Feedback>,
}

/// A link shown below a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Everything a chapter offers, as supplied by a content source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub theory: String,
    #[serde(default)]
    pub exercise: Option<ExerciseSpec>,
    #[serde(default)]
    pub quiz: Vec<Question>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// A course together with the content of each of its chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseContent {
    pub course: Course,
    #[serde(default)]
    pub chapters: Vec<ChapterContent>,
}

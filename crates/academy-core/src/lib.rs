//! academy-core: answer assessment engine and course navigation.
//!
//! Normalizes and scores exercise submissions against reference solutions,
//! runs the multiple-choice quiz state machine, and loads the course content
//! both are built from.

pub mod catalog;
pub mod checking;
pub mod config;
pub mod error;
pub mod grader;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod quiz;
pub mod session;
pub mod similarity;
pub mod store;
pub mod traits;

pub use error::AssessmentError;
pub use grader::{grade, grade_text, ExerciseAttempt};
pub use normalize::normalize;
pub use quiz::{QuizAttempt, QuizEngine};
pub use similarity::similarity;

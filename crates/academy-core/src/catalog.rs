//! Built-in course catalog and chapter layouts.

use crate::model::{ChapterOutline, Course, Part};

const COURSES: &[(&str, &str, bool)] = &[
    ("pl1-origins", "Discover the origins and evolution of PL/I.", true),
    ("cics-evolution", "Learn how CICS began and evolved.", true),
    ("setup-guide", "Setup Guide PL/I & CICS", false),
    ("pl1-basics", "PL/I Basics", false),
    ("cics-basics", "CICS Basics", false),
    ("pl1-cics-basic", "PL/I With CICS Basic", false),
    ("pl1-cics-advanced", "PL/I With CICS Advanced", false),
    ("master-integration", "Master PL/I and CICS integration.", false),
];

/// All courses, in display order.
pub fn courses() -> Vec<Course> {
    COURSES
        .iter()
        .map(|&(id, title, simple)| Course {
            id: id.to_string(),
            title: title.to_string(),
            simple,
        })
        .collect()
}

/// Look up a built-in course by id.
pub fn find_course(id: &str) -> Option<Course> {
    courses().into_iter().find(|c| c.id == id)
}

/// Chapter layout for a course.
///
/// Simple courses get one overview chapter with theory and a quiz; the rest
/// get three chapters of theory, exercise, and quiz.
pub fn chapter_layout(course: &Course) -> Vec<ChapterOutline> {
    if course.simple {
        return vec![ChapterOutline {
            title: "Overview".to_string(),
            parts: vec![Part::Theory, Part::FinalQuiz],
        }];
    }
    ["Introduction", "Core Concepts", "Advanced Topics"]
        .into_iter()
        .map(|title| ChapterOutline {
            title: title.to_string(),
            parts: vec![Part::Theory, Part::Exercise, Part::FinalQuiz],
        })
        .collect()
}

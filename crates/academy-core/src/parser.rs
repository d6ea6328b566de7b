//! TOML course content parser.
//!
//! Loads course documents from TOML files and directories. Only a document
//! that is not TOML at all (or lacks a `[course]` id) is an error; a bad
//! chapter, exercise, question, or resource falls back to its default and is
//! reported as a warning.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog;
use crate::model::{
    default_recommended_tokens, default_required_tokens, ChapterContent, Course, CourseContent,
    ExerciseSpec, Part, Question, Resource, DEFAULT_PASS_THRESHOLD,
};

/// Intermediate TOML structure for course files.
#[derive(Debug, Deserialize)]
struct TomlCourseFile {
    course: TomlCourseHeader,
    #[serde(default)]
    chapters: Vec<toml::Value>,
}

#[derive(Debug, Deserialize)]
struct TomlCourseHeader {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    simple: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct TomlChapter {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    theory: String,
    #[serde(default)]
    exercise: Option<toml::Value>,
    #[serde(default)]
    quiz: Vec<toml::Value>,
    #[serde(default)]
    resources: Vec<toml::Value>,
}

#[derive(Debug, Deserialize)]
struct TomlExercise {
    #[serde(default)]
    prompt: String,
    reference_solution: String,
    #[serde(default)]
    required_tokens: Option<Vec<String>>,
    #[serde(default)]
    recommended_tokens: Option<Vec<String>>,
    #[serde(default)]
    pass_threshold: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(default)]
    id: Option<u32>,
    prompt: String,
    options: Vec<String>,
    correct_index: i64,
}

#[derive(Debug, Deserialize)]
struct TomlResource {
    title: String,
    #[serde(default)]
    url: Option<String>,
}

/// A warning from loading or validating course content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Zero-based chapter index (if applicable).
    pub chapter: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn chapter(index: usize, message: impl Into<String>) -> Self {
        Self {
            chapter: Some(index),
            message: message.into(),
        }
    }
}

/// A parsed course plus everything that had to be defaulted or dropped.
#[derive(Debug, Clone)]
pub struct ParsedCourse {
    pub content: CourseContent,
    pub warnings: Vec<ValidationWarning>,
}

/// Parse a single TOML course file.
pub fn parse_course(path: &Path) -> Result<ParsedCourse> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read course file: {}", path.display()))?;

    parse_course_str(&content, path)
}

/// Parse a TOML string into a course (useful for testing).
pub fn parse_course_str(content: &str, source_path: &Path) -> Result<ParsedCourse> {
    let parsed: TomlCourseFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    anyhow::ensure!(
        !parsed.course.id.trim().is_empty(),
        "course id is empty in {}",
        source_path.display()
    );

    let builtin = catalog::find_course(&parsed.course.id);
    let course = Course {
        title: parsed
            .course
            .title
            .or_else(|| builtin.as_ref().map(|c| c.title.clone()))
            .unwrap_or_else(|| parsed.course.id.clone()),
        simple: parsed
            .course
            .simple
            .or_else(|| builtin.as_ref().map(|c| c.simple))
            .unwrap_or(false),
        id: parsed.course.id,
    };

    let layout = catalog::chapter_layout(&course);
    let mut warnings = Vec::new();
    let chapters = parsed
        .chapters
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let default_title = layout
                .get(index)
                .map(|c| c.title.clone())
                .unwrap_or_else(|| format!("Chapter {}", index + 1));
            convert_chapter(index, value, default_title, &mut warnings)
        })
        .collect();

    for w in &warnings {
        tracing::warn!(
            "{}: chapter {}: {}",
            source_path.display(),
            w.chapter.map(|c| c + 1).unwrap_or(0),
            w.message
        );
    }

    Ok(ParsedCourse {
        content: CourseContent { course, chapters },
        warnings,
    })
}

fn convert_chapter(
    index: usize,
    value: toml::Value,
    default_title: String,
    warnings: &mut Vec<ValidationWarning>,
) -> ChapterContent {
    let raw: TomlChapter = match value.try_into() {
        Ok(raw) => raw,
        Err(e) => {
            warnings.push(ValidationWarning::chapter(
                index,
                format!("invalid chapter, using empty content: {e}"),
            ));
            return ChapterContent {
                title: default_title,
                ..Default::default()
            };
        }
    };

    let exercise = raw
        .exercise
        .and_then(|value| convert_exercise(index, value, warnings));

    let mut seen_ids = HashSet::new();
    let mut quiz = Vec::with_capacity(raw.quiz.len());
    for (position, value) in raw.quiz.into_iter().enumerate() {
        let Some(question) = convert_question(index, position, value, warnings) else {
            continue;
        };
        if !seen_ids.insert(question.id) {
            warnings.push(ValidationWarning::chapter(
                index,
                format!("duplicate question id {}, dropped", question.id),
            ));
            continue;
        }
        quiz.push(question);
    }

    let resources = raw
        .resources
        .into_iter()
        .filter_map(|value| match value.try_into::<TomlResource>() {
            Ok(r) => Some(Resource {
                title: r.title,
                url: r.url,
            }),
            Err(e) => {
                warnings.push(ValidationWarning::chapter(
                    index,
                    format!("invalid resource dropped: {e}"),
                ));
                None
            }
        })
        .collect();

    ChapterContent {
        title: raw.title.unwrap_or(default_title),
        theory: raw.theory,
        exercise,
        quiz,
        resources,
    }
}

fn convert_exercise(
    index: usize,
    value: toml::Value,
    warnings: &mut Vec<ValidationWarning>,
) -> Option<ExerciseSpec> {
    let raw: TomlExercise = match value.try_into() {
        Ok(raw) => raw,
        Err(e) => {
            warnings.push(ValidationWarning::chapter(
                index,
                format!("invalid exercise dropped: {e}"),
            ));
            return None;
        }
    };

    let pass_threshold = match raw.pass_threshold {
        None => DEFAULT_PASS_THRESHOLD,
        Some(t) => match u8::try_from(t) {
            Ok(t) if t <= 100 => t,
            _ => {
                warnings.push(ValidationWarning::chapter(
                    index,
                    format!("pass_threshold {t} outside 0..=100, using {DEFAULT_PASS_THRESHOLD}"),
                ));
                DEFAULT_PASS_THRESHOLD
            }
        },
    };

    Some(ExerciseSpec {
        prompt: raw.prompt,
        reference_solution: raw.reference_solution,
        required_tokens: raw.required_tokens.unwrap_or_else(default_required_tokens),
        recommended_tokens: raw
            .recommended_tokens
            .unwrap_or_else(default_recommended_tokens),
        pass_threshold,
    })
}

fn convert_question(
    index: usize,
    position: usize,
    value: toml::Value,
    warnings: &mut Vec<ValidationWarning>,
) -> Option<Question> {
    let raw: TomlQuestion = match value.try_into() {
        Ok(raw) => raw,
        Err(e) => {
            warnings.push(ValidationWarning::chapter(
                index,
                format!("invalid question {} dropped: {e}", position + 1),
            ));
            return None;
        }
    };
    let id = raw.id.unwrap_or(position as u32 + 1);

    if raw.options.len() < 2 {
        warnings.push(ValidationWarning::chapter(
            index,
            format!("question {id} has fewer than 2 options, dropped"),
        ));
        return None;
    }
    let correct_index = match usize::try_from(raw.correct_index) {
        Ok(i) if i < raw.options.len() => i,
        _ => {
            warnings.push(ValidationWarning::chapter(
                index,
                format!(
                    "question {id} correct_index {} out of range, dropped",
                    raw.correct_index
                ),
            ));
            return None;
        }
    };

    Some(Question {
        id,
        prompt: raw.prompt,
        options: raw.options,
        correct_index,
    })
}

/// Recursively load all `.toml` course files from a directory.
pub fn load_content_directory(dir: &Path) -> Result<Vec<ParsedCourse>> {
    let mut courses = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            courses.extend(load_content_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_course(&path) {
                Ok(course) => courses.push(course),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(courses)
}

/// Validate a parsed course for common authoring issues.
///
/// Includes the warnings raised while parsing.
pub fn validate_course(parsed: &ParsedCourse) -> Vec<ValidationWarning> {
    let mut warnings = parsed.warnings.clone();
    let course = &parsed.content.course;
    let layout = catalog::chapter_layout(course);

    if parsed.content.chapters.len() != layout.len() {
        warnings.push(ValidationWarning {
            chapter: None,
            message: format!(
                "course layout has {} chapter(s) but {} defined",
                layout.len(),
                parsed.content.chapters.len()
            ),
        });
    }

    for (index, chapter) in parsed.content.chapters.iter().enumerate() {
        let parts = layout.get(index).map(|c| c.parts.as_slice()).unwrap_or(&[]);

        if chapter.theory.trim().is_empty() {
            warnings.push(ValidationWarning::chapter(index, "theory is empty"));
        }

        match &chapter.exercise {
            Some(_) if !parts.contains(&Part::Exercise) => {
                warnings.push(ValidationWarning::chapter(
                    index,
                    "exercise defined but the layout has no exercise part",
                ));
            }
            Some(exercise) if exercise.reference_solution.trim().is_empty() => {
                warnings.push(ValidationWarning::chapter(
                    index,
                    "exercise reference_solution is empty",
                ));
            }
            None if parts.contains(&Part::Exercise) => {
                warnings.push(ValidationWarning::chapter(index, "no exercise defined"));
            }
            _ => {}
        }

        if parts.contains(&Part::FinalQuiz) && chapter.quiz.is_empty() {
            warnings.push(ValidationWarning::chapter(index, "quiz has no questions"));
        }

        for question in &chapter.quiz {
            if question.prompt.trim().is_empty() {
                warnings.push(ValidationWarning::chapter(
                    index,
                    format!("question {} prompt is empty", question.id),
                ));
            }
        }
    }

    warnings
}

//! In-memory content store backed by parsed course files.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use crate::catalog;
use crate::model::{ChapterContent, Course, CourseContent};
use crate::parser::load_content_directory;
use crate::traits::ContentSource;

/// Courses and their chapter content, keyed by course id.
///
/// Built-in catalog courses without a content file still resolve: each
/// chapter of their layout yields empty content under the layout title.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    courses: HashMap<String, CourseContent>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every course file under `dir`. Files that fail to parse are skipped.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut store = Self::new();
        for parsed in load_content_directory(dir)? {
            store.insert(parsed.content);
        }
        tracing::debug!(courses = store.courses.len(), "content loaded");
        Ok(store)
    }

    /// Add or replace a course.
    pub fn insert(&mut self, content: CourseContent) {
        if self.courses.contains_key(&content.course.id) {
            tracing::warn!("course '{}' defined more than once, keeping the last", content.course.id);
        }
        self.courses.insert(content.course.id.clone(), content);
    }

    /// A course by id, from loaded content or the built-in catalog.
    pub fn course(&self, course_id: &str) -> Option<Course> {
        self.courses
            .get(course_id)
            .map(|c| c.course.clone())
            .or_else(|| catalog::find_course(course_id))
    }

    /// Built-in catalog courses followed by loaded courses not in the catalog.
    pub fn courses(&self) -> Vec<Course> {
        let mut all: Vec<Course> = catalog::courses()
            .into_iter()
            .map(|c| self.course(&c.id).unwrap_or(c))
            .collect();
        let mut extra: Vec<Course> = self
            .courses
            .values()
            .filter(|c| catalog::find_course(&c.course.id).is_none())
            .map(|c| c.course.clone())
            .collect();
        extra.sort_by(|a, b| a.id.cmp(&b.id));
        all.extend(extra);
        all
    }

    /// Whether a content file was loaded for this course.
    pub fn has_content(&self, course_id: &str) -> bool {
        self.courses.contains_key(course_id)
    }
}

impl ContentSource for ContentStore {
    fn chapter_content(&self, course_id: &str, chapter_index: usize) -> Option<ChapterContent> {
        let course = self.course(course_id)?;
        let layout = catalog::chapter_layout(&course);
        let loaded = self
            .courses
            .get(course_id)
            .and_then(|c| c.chapters.get(chapter_index));

        match (loaded, layout.get(chapter_index)) {
            (Some(chapter), _) => Some(chapter.clone()),
            (None, Some(outline)) => Some(ChapterContent {
                title: outline.title.clone(),
                ..Default::default()
            }),
            (None, None) => None,
        }
    }
}

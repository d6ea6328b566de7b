//! Seams between the assessment engine and the code that feeds it.

use crate::model::ChapterContent;

// ---------------------------------------------------------------------------
// Content source trait
// ---------------------------------------------------------------------------

/// Supplies chapter content keyed by course and chapter.
///
/// The engine never loads content itself; sessions ask a source for the
/// chapter being visited and build fresh attempts from what it returns.
pub trait ContentSource: Send + Sync {
    /// Content for one chapter, or `None` if the course or chapter is unknown.
    fn chapter_content(&self, course_id: &str, chapter_index: usize) -> Option<ChapterContent>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapSource(HashMap<(String, usize), ChapterContent>);

    impl ContentSource for MapSource {
        fn chapter_content(&self, course_id: &str, chapter_index: usize) -> Option<ChapterContent> {
            self.0.get(&(course_id.to_string(), chapter_index)).cloned()
        }
    }

    #[test]
    fn usable_as_trait_object() {
        let mut map = HashMap::new();
        map.insert(
            ("pl1-basics".to_string(), 0),
            ChapterContent {
                theory: "PL/I programs are built from procedures.".into(),
                ..Default::default()
            },
        );
        let source: Box<dyn ContentSource> = Box::new(MapSource(map));
        assert!(source.chapter_content("pl1-basics", 0).is_some());
        assert!(source.chapter_content("pl1-basics", 1).is_none());
    }
}

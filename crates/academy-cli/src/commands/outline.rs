//! The `academy outline` command.

use anyhow::{Context as _, Result};

use academy_core::catalog::chapter_layout;
use academy_core::model::Part;
use academy_core::traits::ContentSource;

use super::Context;

pub fn execute(ctx: &Context, course_id: String) -> Result<()> {
    let (_, store) = ctx.load()?;
    let course = store
        .course(&course_id)
        .with_context(|| format!("unknown course: {course_id}"))?;
    println!("{} ({})", course.title, course.id);

    for (index, outline) in chapter_layout(&course).iter().enumerate() {
        println!("\n{}. {}", index + 1, outline.title);
        let content = store.chapter_content(&course.id, index).unwrap_or_default();
        for part in &outline.parts {
            let detail = match part {
                Part::Theory if content.theory.trim().is_empty() => " (no content)".to_string(),
                Part::Theory => String::new(),
                Part::Exercise if content.exercise.is_none() => " (no exercise)".to_string(),
                Part::Exercise => String::new(),
                Part::FinalQuiz => format!(" ({} questions)", content.quiz.len()),
            };
            println!("   - {part}{detail}");
        }
        for resource in &content.resources {
            match &resource.url {
                Some(url) => println!("   * {} <{url}>", resource.title),
                None => println!("   * {}", resource.title),
            }
        }
    }

    Ok(())
}

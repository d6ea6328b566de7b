//! The `academy validate` command.

use std::path::PathBuf;

use anyhow::Result;

use academy_core::parser::{load_content_directory, parse_course, validate_course};

use super::Context;

pub fn execute(ctx: &Context, path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => ctx.config()?.content_dir,
    };

    let courses = if path.is_dir() {
        load_content_directory(&path)?
    } else {
        vec![parse_course(&path)?]
    };

    let mut total_warnings = 0;

    for parsed in &courses {
        let course = &parsed.content.course;
        println!(
            "Course: {} ({} chapters)",
            course.title,
            parsed.content.chapters.len()
        );

        let warnings = validate_course(parsed);
        for w in &warnings {
            let prefix = w
                .chapter
                .map(|index| format!("  [chapter {}]", index + 1))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if courses.is_empty() {
        println!("No course files found in {}.", path.display());
    } else if total_warnings == 0 {
        println!("All course files valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

//! The `academy grade` command.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};

use academy_core::checking::schedule_check;
use academy_core::model::{AssessmentResult, FeedbackKind, Part};

use super::{chapter_index, Context};

pub async fn execute(
    ctx: &Context,
    course_id: String,
    chapter: usize,
    submission: PathBuf,
    format: String,
    no_delay: bool,
) -> Result<()> {
    let text = read_submission(&submission)?;
    let (config, mut session) = ctx.session(&course_id)?;
    let index = chapter_index(chapter)?;

    session.open_part(index, Part::Exercise)?;
    let (spec, attempt) = session
        .exercise_mut()
        .context("exercise part did not open")?;
    attempt.set_text(text)?;

    let delay = if no_delay {
        Duration::ZERO
    } else {
        Duration::from_millis(config.check_delay_ms)
    };
    let pending = schedule_check(attempt, spec, config.min_submission_len, delay)?;
    if !delay.is_zero() && format != "json" {
        eprintln!("Checking...");
    }
    let outcome = pending.wait().await.context("exercise check was aborted")?;
    let result = outcome.apply_to(attempt)?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(result)?),
        _ => print_result(result),
    }

    Ok(())
}

fn read_submission(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read submission from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read submission: {}", path.display()))
    }
}

fn print_result(result: &AssessmentResult) {
    let verdict = if result.passed { "PASSED" } else { "NOT PASSED" };
    println!("{verdict}  similarity {}%", result.similarity_percent);
    for item in &result.feedback {
        let mark = match item.kind {
            FeedbackKind::Correct => "✓",
            FeedbackKind::Incorrect => "✗",
            FeedbackKind::Warning => "!",
        };
        println!("  {mark} {}", item.message);
    }
}

//! The `academy quiz` command.

use anyhow::{Context as _, Result};
use serde::Serialize;

use academy_core::model::Part;
use academy_core::quiz::{OptionMark, QuizEngine};

use super::{chapter_index, Context};

#[derive(Serialize)]
struct QuizReport<'a> {
    score: u8,
    good: bool,
    questions: Vec<QuestionReport<'a>>,
}

#[derive(Serialize)]
struct QuestionReport<'a> {
    id: u32,
    prompt: &'a str,
    selected_index: usize,
    correct_index: usize,
    correct: bool,
}

pub fn execute(
    ctx: &Context,
    course_id: String,
    chapter: usize,
    answers: Option<String>,
    format: String,
) -> Result<()> {
    let (_, mut session) = ctx.session(&course_id)?;
    session.open_part(chapter_index(chapter)?, Part::FinalQuiz)?;
    let quiz = session.quiz_mut().context("quiz part did not open")?;

    let Some(answers) = answers else {
        print_questions(quiz);
        return Ok(());
    };

    let choices = parse_answers(&answers)?;
    anyhow::ensure!(
        choices.len() == quiz.questions().len(),
        "expected {} answer(s), got {}",
        quiz.questions().len(),
        choices.len()
    );
    let ids: Vec<u32> = quiz.questions().iter().map(|q| q.id).collect();
    for (id, choice) in ids.into_iter().zip(choices) {
        quiz.select_answer(id, choice)?;
    }
    let score = quiz.submit()?;

    match format.as_str() {
        "json" => {
            let attempt = quiz.attempt();
            let report = QuizReport {
                score,
                good: quiz.is_good_score().unwrap_or(false),
                questions: quiz
                    .questions()
                    .iter()
                    .map(|q| {
                        let selected_index = attempt.selections[&q.id];
                        QuestionReport {
                            id: q.id,
                            prompt: &q.prompt,
                            selected_index,
                            correct_index: q.correct_index,
                            correct: selected_index == q.correct_index,
                        }
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => print_results(quiz, score),
    }

    Ok(())
}

/// Parse "2,1,3" into zero-based option indices.
fn parse_answers(answers: &str) -> Result<Vec<usize>> {
    answers
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let n: usize = s
                .parse()
                .with_context(|| format!("invalid answer number: {s}"))?;
            anyhow::ensure!(n >= 1, "answer numbers start at 1");
            Ok(n - 1)
        })
        .collect()
}

fn print_questions(quiz: &QuizEngine) {
    if quiz.questions().is_empty() {
        println!("This quiz has no questions.");
        return;
    }
    for (number, question) in quiz.questions().iter().enumerate() {
        println!("{}. {}", number + 1, question.prompt);
        for (option, text) in question.options.iter().enumerate() {
            println!("   {}) {text}", option + 1);
        }
    }
}

fn print_results(quiz: &QuizEngine, score: u8) {
    for (number, question) in quiz.questions().iter().enumerate() {
        println!("{}. {}", number + 1, question.prompt);
        for (option, text) in question.options.iter().enumerate() {
            let mark = match quiz.option_mark(question.id, option) {
                Some(OptionMark::Correct) => "✓",
                Some(OptionMark::Incorrect) => "✗",
                None => " ",
            };
            println!("   {mark} {}) {text}", option + 1);
        }
    }

    let framing = if quiz.is_good_score().unwrap_or(false) {
        "Great job!"
    } else {
        "Keep practicing."
    };
    println!("\nScore: {score}%  {framing}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_are_one_based() {
        assert_eq!(parse_answers("2, 1,3").unwrap(), vec![1, 0, 2]);
    }

    #[test]
    fn zero_and_garbage_answers_rejected() {
        assert!(parse_answers("0,1").is_err());
        assert!(parse_answers("a").is_err());
    }
}

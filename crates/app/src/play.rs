use std::io::{BufRead, Write};

use anyhow::Context;
use quiz_core::model::{Question, QuizResult, ScoreSummary};
use services::QuizRun;

/// Option label shown to the player: A, B, C...
fn label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .map_or('?', char::from)
}

fn parse_choice(input: &str, question: &Question) -> Option<usize> {
    let mut chars = input.trim().chars();
    let first = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() || !first.is_ascii_uppercase() {
        return None;
    }
    let index = usize::from(u8::try_from(first).ok()? - b'A');
    (index < question.options().len()).then_some(index)
}

/// Drive a run to completion over line-based input.
///
/// Each question accepts an option letter; an empty line skips it.
pub fn play<R: BufRead, W: Write>(
    run: &mut QuizRun,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    while let Some(question) = run.current_question().cloned() {
        let position = run.position().unwrap_or_default();
        writeln!(out, "\nQuestion {position} of {}", run.total())?;
        writeln!(out, "{}", question.text())?;
        for (i, option) in question.options().iter().enumerate() {
            writeln!(out, "  {}) {option}", label(i))?;
        }

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let mut line = String::new();
            let read = input.read_line(&mut line).context("reading answer")?;
            if read == 0 || line.trim().is_empty() {
                run.skip()?;
                writeln!(out, "Skipped.")?;
                break;
            }
            match parse_choice(&line, &question) {
                Some(index) => {
                    run.select_index(index)?;
                    run.next()?;
                    break;
                }
                None => {
                    let last = label(question.options().len().saturating_sub(1));
                    writeln!(out, "Pick a letter between A and {last}.")?;
                }
            }
        }
    }
    Ok(())
}

/// Print the score card and a per-question review.
pub fn print_results<W: Write>(
    run: &QuizRun,
    summary: ScoreSummary,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "\nQuiz Results ({})", run.subject().to_uppercase())?;
    writeln!(
        out,
        "Score: {} / {} ({}%) {}",
        summary.score(),
        summary.total(),
        summary.percentage(),
        summary.performance().message()
    )?;
    for (i, (answer, question)) in run.answers().iter().zip(run.questions()).enumerate() {
        let status = if answer.is_correct() { "correct" } else { "incorrect" };
        writeln!(out, "Q{} [{status}] {}", i + 1, question.text())?;
        writeln!(
            out,
            "    yours: {}  answer: {}",
            answer.selected.as_deref().unwrap_or("(skipped)"),
            answer.correct
        )?;
    }
    Ok(())
}

pub fn print_leaderboard<W: Write>(results: &[QuizResult], out: &mut W) -> anyhow::Result<()> {
    if results.is_empty() {
        writeln!(out, "No results recorded yet.")?;
        return Ok(());
    }
    for (i, result) in results.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. {:<12} {:>3} / {:<3} {}",
            i + 1,
            result.subject(),
            result.score(),
            result.total(),
            result.completed_at().format("%Y-%m-%d %H:%M")
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerKey, QuestionId};
    use std::io::Cursor;

    fn question(id: u64) -> Question {
        Question::new(
            QuestionId::from(id),
            format!("Q{id}"),
            vec!["yes".into(), "no".into()],
            &AnswerKey::Index(0),
        )
        .unwrap()
    }

    #[test]
    fn letters_map_to_options() {
        let q = question(1);
        assert_eq!(parse_choice("a\n", &q), Some(0));
        assert_eq!(parse_choice(" B ", &q), Some(1));
        assert_eq!(parse_choice("c", &q), None);
        assert_eq!(parse_choice("ab", &q), None);
        assert_eq!(parse_choice("1", &q), None);
    }

    #[test]
    fn plays_through_with_retries_and_skips() {
        let mut run = QuizRun::new("python", vec![question(1), question(2), question(3)]).unwrap();
        let mut input = Cursor::new("a\nz\nb\n\n");
        let mut out = Vec::new();

        play(&mut run, &mut input, &mut out).unwrap();

        assert!(run.is_complete());
        assert_eq!(run.summary().score(), 1);
        assert!(run.answers()[2].is_skipped());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Question 3 of 3"));
        assert!(text.contains("Pick a letter between A and B."));
    }
}

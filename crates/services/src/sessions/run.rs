use std::fmt;

use quiz_core::model::{Question, ScoreSummary, SessionAnswer};

use super::progress::SessionProgress;
use crate::error::RunError;
use crate::scoring::ScoringTracker;

/// State of one quiz session, owned by the caller.
///
/// Steps through the selected questions in order, one answer per question.
pub struct QuizRun {
    subject: String,
    questions: Vec<Question>,
    current: usize,
    selected: Option<String>,
    answers: Vec<SessionAnswer>,
}

impl QuizRun {
    /// # Errors
    ///
    /// Returns `RunError::NoQuestions` if `questions` is empty.
    pub fn new(subject: impl Into<String>, questions: Vec<Question>) -> Result<Self, RunError> {
        if questions.is_empty() {
            return Err(RunError::NoQuestions);
        }
        let total = questions.len();
        Ok(Self {
            subject: subject.into(),
            questions,
            current: 0,
            selected: None,
            answers: Vec::with_capacity(total),
        })
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// 1-based position of the current question, `None` once complete.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.current_question().map(|_| self.current + 1)
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    #[must_use]
    pub fn answers(&self) -> &[SessionAnswer] {
        &self.answers
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total(),
            answered: self.answers.len(),
            remaining: self.total().saturating_sub(self.current),
            is_complete: self.is_complete(),
        }
    }

    /// Choose an option for the current question. May be changed until `next`.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Completed` if there is no current question, or
    /// `RunError::UnknownOption` if `option` is not one of its options.
    pub fn select(&mut self, option: &str) -> Result<(), RunError> {
        let question = self.current_question().ok_or(RunError::Completed)?;
        if !question.has_option(option) {
            return Err(RunError::UnknownOption(option.to_owned()));
        }
        self.selected = Some(option.to_owned());
        Ok(())
    }

    /// Choose an option of the current question by zero-based index.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Completed` if there is no current question, or
    /// `RunError::UnknownOption` if the index is out of range.
    pub fn select_index(&mut self, index: usize) -> Result<(), RunError> {
        let question = self.current_question().ok_or(RunError::Completed)?;
        let option = question
            .options()
            .get(index)
            .cloned()
            .ok_or_else(|| RunError::UnknownOption(format!("#{index}")))?;
        self.selected = Some(option);
        Ok(())
    }

    /// Record the selected option and move to the next question.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Completed` if the run is finished, or
    /// `RunError::NoSelection` if nothing has been selected.
    pub fn next(&mut self) -> Result<&SessionAnswer, RunError> {
        if self.is_complete() {
            return Err(RunError::Completed);
        }
        let selected = self.selected.take().ok_or(RunError::NoSelection)?;
        self.record(Some(selected))
    }

    /// Record the current question as skipped and move on.
    ///
    /// # Errors
    ///
    /// Returns `RunError::Completed` if the run is finished.
    pub fn skip(&mut self) -> Result<&SessionAnswer, RunError> {
        if self.is_complete() {
            return Err(RunError::Completed);
        }
        self.selected = None;
        self.record(None)
    }

    fn record(&mut self, selected: Option<String>) -> Result<&SessionAnswer, RunError> {
        let question = self.questions.get(self.current).ok_or(RunError::Completed)?;
        self.answers.push(SessionAnswer::new(question, selected));
        self.current += 1;
        self.answers.last().ok_or(RunError::Completed)
    }

    /// Score of the answers recorded so far.
    #[must_use]
    pub fn summary(&self) -> ScoreSummary {
        ScoringTracker::summarize(&self.answers)
    }
}

impl fmt::Debug for QuizRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizRun")
            .field("subject", &self.subject)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answers_len", &self.answers.len())
            .finish_non_exhaustive()
    }
}

use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// One answered (or skipped) question within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAnswer {
    pub question_id: QuestionId,
    pub selected: Option<String>,
    pub correct: String,
}

impl SessionAnswer {
    /// Record `selected` as the answer to `question`.
    #[must_use]
    pub fn new(question: &Question, selected: Option<String>) -> Self {
        Self {
            question_id: question.id().clone(),
            selected,
            correct: question.correct_option().to_owned(),
        }
    }

    /// Record that `question` was skipped.
    #[must_use]
    pub fn skipped(question: &Question) -> Self {
        Self::new(question, None)
    }

    /// A skipped or blank selection never counts as correct.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        match self.selected.as_deref() {
            Some(selected) if !selected.is_empty() => selected == self.correct,
            _ => false,
        }
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.selected.as_deref().is_none_or(str::is_empty)
    }
}

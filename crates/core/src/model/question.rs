use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{QuestionId, RawQuestionId};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id is missing or blank")]
    MissingId,

    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question must have at least one option")]
    NoOptions,

    #[error("option {index} is blank")]
    BlankOption { index: usize },

    #[error("answer is missing")]
    MissingAnswer,

    #[error("answer index {index} is out of range for {len} options")]
    AnswerOutOfRange { index: usize, len: usize },

    #[error("answer {0:?} is not one of the options")]
    AnswerNotAnOption(String),
}

//
// ─── ANSWER KEY ───────────────────────────────────────────────────────────────
//

/// Identifies the correct option of a question.
///
/// Catalogs either store the zero-based option index or the option text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Index(usize),
    Text(String),
}

impl AnswerKey {
    fn resolve(&self, options: &[String]) -> Result<usize, QuestionError> {
        match self {
            AnswerKey::Index(index) => {
                if *index < options.len() {
                    Ok(*index)
                } else {
                    Err(QuestionError::AnswerOutOfRange {
                        index: *index,
                        len: options.len(),
                    })
                }
            }
            AnswerKey::Text(text) => options
                .iter()
                .position(|opt| opt == text)
                .ok_or_else(|| QuestionError::AnswerNotAnOption(text.clone())),
        }
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A multiple-choice question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    correct: usize,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, there are no options, an
    /// option is blank, or the answer key does not resolve to an option.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        options: Vec<String>,
        answer: &AnswerKey,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if let Some(index) = options.iter().position(|opt| opt.trim().is_empty()) {
            return Err(QuestionError::BlankOption { index });
        }
        let correct = answer.resolve(&options)?;

        Ok(Self {
            id,
            text,
            options,
            correct,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct
    }

    /// Text of the correct option.
    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct]
    }

    /// Returns true if `option` is one of this question's options.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|opt| opt == option)
    }
}

//
// ─── RAW RECORD ───────────────────────────────────────────────────────────────
//

/// Catalog shape of a question before validation.
///
/// Every field is optional so a single bad record can be rejected without
/// failing the whole catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionRecord {
    #[serde(default)]
    id: Option<RawQuestionId>,
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    answer: Option<AnswerKey>,
}

impl QuestionRecord {
    /// Validate the record into a `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` describing the first missing or invalid field.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let id = self
            .id
            .and_then(|raw| QuestionId::try_from(raw).ok())
            .ok_or(QuestionError::MissingId)?;
        let text = self.question.ok_or(QuestionError::EmptyText)?;
        let options = self.options.ok_or(QuestionError::NoOptions)?;
        let answer = self.answer.ok_or(QuestionError::MissingAnswer)?;
        Question::new(id, text, options, &answer)
    }
}

//
// ─── TESTS ────────────────────────────────────────────────────────────────────
//

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;
use thiserror::Error;

use crate::model::question::{Question, QuestionRecord};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog must be a JSON object keyed by subject")]
    NotAnObject,
}

/// Read-only mapping from subject name to its ordered questions.
///
/// Subjects whose records were all rejected stay in the catalog with an empty
/// question list, so callers can tell "unknown subject" apart from "nothing
/// usable in this subject".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionCatalog {
    subjects: BTreeMap<String, Vec<Question>>,
}

impl QuestionCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the text is not JSON or the top level is not
    /// an object.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_json_value(value)
    }

    /// Build a catalog from an already parsed JSON value.
    ///
    /// Invalid question records are dropped and logged.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotAnObject` if the top level is not an object.
    pub fn from_json_value(value: Value) -> Result<Self, CatalogError> {
        let Value::Object(map) = value else {
            return Err(CatalogError::NotAnObject);
        };

        let mut catalog = Self::new();
        for (subject, entries) in map {
            let questions = match entries {
                Value::Array(items) => parse_records(&subject, items),
                other => {
                    tracing::warn!(%subject, kind = json_kind(&other), "subject is not a question list");
                    Vec::new()
                }
            };
            catalog.insert_subject(subject, questions);
        }
        Ok(catalog)
    }

    /// Insert or replace a subject. Duplicate ids keep their first occurrence.
    pub fn insert_subject(&mut self, subject: impl Into<String>, questions: Vec<Question>) {
        let subject = subject.into();
        let mut seen = HashSet::with_capacity(questions.len());
        let mut unique = Vec::with_capacity(questions.len());
        for question in questions {
            if seen.insert(question.id().clone()) {
                unique.push(question);
            } else {
                tracing::warn!(%subject, id = %question.id(), "dropping duplicate question id");
            }
        }
        self.subjects.insert(subject, unique);
    }

    #[must_use]
    pub fn contains_subject(&self, subject: &str) -> bool {
        self.subjects.contains_key(subject)
    }

    /// Questions for a subject, or `None` if the subject is unknown.
    #[must_use]
    pub fn questions(&self, subject: &str) -> Option<&[Question]> {
        self.subjects.get(subject).map(Vec::as_slice)
    }

    /// Subjects with at least one usable question, in name order.
    #[must_use]
    pub fn subjects(&self) -> Vec<&str> {
        self.subjects
            .iter()
            .filter(|(_, questions)| !questions.is_empty())
            .map(|(subject, _)| subject.as_str())
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subjects.values().all(Vec::is_empty)
    }
}

fn parse_records(subject: &str, items: Vec<Value>) -> Vec<Question> {
    let mut questions = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        let parsed = serde_json::from_value::<QuestionRecord>(item)
            .map_err(|err| err.to_string())
            .and_then(|record| record.validate().map_err(|err| err.to_string()));
        match parsed {
            Ok(question) => questions.push(question),
            Err(reason) => {
                tracing::warn!(%subject, position, %reason, "skipping malformed question");
            }
        }
    }
    questions
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "python": [
            {"id": 1, "question": "len([1,2])?", "options": ["1", "2"], "answer": "2"},
            {"id": 2, "question": "Type of 1.0?", "options": ["int", "float"], "answer": 1},
            {"question": "no id", "options": ["a"], "answer": 0},
            {"id": 1, "question": "duplicate", "options": ["a"], "answer": 0}
        ],
        "rust": [],
        "broken": "not a list",
        "junk": [{"id": 9, "question": "Q", "options": ["a"], "answer": "z"}]
    }"#;

    #[test]
    fn parses_valid_records_and_drops_the_rest() {
        let catalog = QuestionCatalog::from_json_str(SAMPLE).unwrap();
        let python = catalog.questions("python").unwrap();
        assert_eq!(python.len(), 2);
        assert_eq!(python[0].text(), "len([1,2])?");
        assert_eq!(python[1].correct_option(), "float");
    }

    #[test]
    fn subjects_lists_only_non_empty() {
        let catalog = QuestionCatalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.subjects(), vec!["python"]);
        assert!(catalog.contains_subject("rust"));
        assert!(catalog.contains_subject("broken"));
        assert_eq!(catalog.questions("junk").map(<[Question]>::len), Some(0));
        assert!(catalog.questions("go").is_none());
    }

    #[test]
    fn top_level_must_be_object() {
        let err = QuestionCatalog::from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, CatalogError::NotAnObject));
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = QuestionCatalog::from_json_str("{").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }
}

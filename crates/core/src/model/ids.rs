use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Question within a subject.
///
/// Catalogs may carry ids as JSON strings or unsigned integers; both
/// normalize to the same textual form so `7` and `"7"` are the same id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a new `QuestionId` from its textual form.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the id is empty or whitespace only.
    pub fn new(raw: impl Into<String>) -> Result<Self, ParseIdError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ParseIdError {
                kind: "QuestionId".to_string(),
            });
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    /// Returns the underlying textual value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for QuestionId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Identifier as it may appear in catalog or history JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawQuestionId {
    Number(u64),
    Text(String),
}

impl TryFrom<RawQuestionId> for QuestionId {
    type Error = ParseIdError;

    fn try_from(raw: RawQuestionId) -> Result<Self, Self::Error> {
        match raw {
            RawQuestionId::Number(n) => Ok(Self::from(n)),
            RawQuestionId::Text(s) => Self::new(s),
        }
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawQuestionId::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_are_equal() {
        let from_number: QuestionId = serde_json::from_str("7").unwrap();
        let from_text: QuestionId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(from_number.to_string(), "7");
    }

    #[test]
    fn blank_id_is_rejected() {
        assert!("   ".parse::<QuestionId>().is_err());
        assert!(serde_json::from_str::<QuestionId>("\"\"").is_err());
    }

    #[test]
    fn id_is_trimmed() {
        let id: QuestionId = " py-1 ".parse().unwrap();
        assert_eq!(id.as_str(), "py-1");
    }

    #[test]
    fn serializes_as_string() {
        let id = QuestionId::from(12);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"12\"");
    }
}

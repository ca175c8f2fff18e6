use async_trait::async_trait;
use quiz_core::model::{QuizResult, SubjectHistory};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Key under which a subject's history is persisted.
#[must_use]
pub fn history_key(subject: &str) -> String {
    format!("{subject}_played")
}

pub(crate) fn encode_history(history: &SubjectHistory) -> Result<String, StorageError> {
    serde_json::to_string(history).map_err(|e| StorageError::Serialization(e.to_string()))
}

pub(crate) fn decode_history(raw: &str) -> Result<SubjectHistory, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Persistence contract for per-subject "already served" history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Load the history for a subject.
    ///
    /// Returns an empty history when nothing has been persisted yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend is unavailable or the stored
    /// value cannot be decoded.
    async fn load(&self, subject: &str) -> Result<SubjectHistory, StorageError>;

    /// Replace the persisted history for a subject.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be stored.
    async fn save(&self, subject: &str, history: &SubjectHistory) -> Result<(), StorageError>;

    /// Forget the history for a subject so all its questions are eligible again.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend is unavailable.
    async fn reset(&self, subject: &str) -> Result<(), StorageError>;
}

/// Repository contract for completed session results.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Append a result and return its storage id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn append_result(&self, result: &QuizResult) -> Result<i64, StorageError>;

    /// List results, newest first, optionally for one subject.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend or decoding failures.
    async fn list_results(
        &self,
        subject: Option<&str>,
        limit: u32,
    ) -> Result<Vec<QuizResult>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// History is kept in the same key/value layout the persistent backend uses.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
    results: Arc<Mutex<Vec<QuizResult>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw persisted value for a key, if any.
    #[must_use]
    pub fn raw_entry(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|guard| guard.get(key).cloned())
    }

    /// Store a raw value under `key`, bypassing encoding.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.insert(key.into(), value.into());
        }
    }
}

#[async_trait]
impl HistoryStore for InMemoryRepository {
    async fn load(&self, subject: &str) -> Result<SubjectHistory, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.get(&history_key(subject)) {
            Some(raw) => decode_history(raw),
            None => Ok(SubjectHistory::default()),
        }
    }

    async fn save(&self, subject: &str, history: &SubjectHistory) -> Result<(), StorageError> {
        let encoded = encode_history(history)?;
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(history_key(subject), encoded);
        Ok(())
    }

    async fn reset(&self, subject: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&history_key(subject));
        Ok(())
    }
}

#[async_trait]
impl ResultRepository for InMemoryRepository {
    async fn append_result(&self, result: &QuizResult) -> Result<i64, StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(result.clone());
        i64::try_from(guard.len()).map_err(|_| StorageError::Conflict)
    }

    async fn list_results(
        &self,
        subject: Option<&str>,
        limit: u32,
    ) -> Result<Vec<QuizResult>, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let mut found: Vec<QuizResult> = guard
            .iter()
            .rev()
            .filter(|r| subject.is_none_or(|s| r.subject() == s))
            .cloned()
            .collect();
        // stable sort keeps insertion order (newest first) for equal timestamps
        found.sort_by(|a, b| b.completed_at().cmp(&a.completed_at()));
        found.truncate(limit);
        Ok(found)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub history: Arc<dyn HistoryStore>,
    pub results: Arc<dyn ResultRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let history: Arc<dyn HistoryStore> = Arc::new(repo.clone());
        let results: Arc<dyn ResultRepository> = Arc::new(repo);
        Self { history, results }
    }
}

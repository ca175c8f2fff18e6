use async_trait::async_trait;
use quiz_core::model::SubjectHistory;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{HistoryStore, StorageError, decode_history, encode_history, history_key};

#[async_trait]
impl HistoryStore for SqliteRepository {
    async fn load(&self, subject: &str) -> Result<SubjectHistory, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?1")
            .bind(history_key(subject))
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(SubjectHistory::default());
        };

        let raw: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        decode_history(&raw)
    }

    async fn save(&self, subject: &str, history: &SubjectHistory) -> Result<(), StorageError> {
        let encoded = encode_history(history)?;
        sqlx::query(
            r"
            INSERT INTO kv_store (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            ",
        )
        .bind(history_key(subject))
        .bind(encoded)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn reset(&self, subject: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(history_key(subject))
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}

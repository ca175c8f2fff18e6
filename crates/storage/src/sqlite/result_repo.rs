use quiz_core::model::QuizResult;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{ResultRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

fn map_result_row(row: &sqlx::sqlite::SqliteRow) -> Result<QuizResult, StorageError> {
    let subject: String = row.try_get("subject").map_err(ser)?;
    let score = u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?;
    let total = u32_from_i64("total", row.try_get::<i64, _>("total").map_err(ser)?)?;
    let completed_at = row.try_get("completed_at").map_err(ser)?;

    QuizResult::from_persisted(subject, score, total, completed_at).map_err(ser)
}

#[async_trait::async_trait]
impl ResultRepository for SqliteRepository {
    async fn append_result(&self, result: &QuizResult) -> Result<i64, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO quiz_results (subject, score, total, completed_at)
                VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(result.subject())
        .bind(i64::from(result.score()))
        .bind(i64::from(result.total()))
        .bind(result.completed_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(res.last_insert_rowid())
    }

    async fn list_results(
        &self,
        subject: Option<&str>,
        limit: u32,
    ) -> Result<Vec<QuizResult>, StorageError> {
        let mut sql = String::from(
            r"
                SELECT subject, score, total, completed_at
                FROM quiz_results
            ",
        );
        let mut bind_index = 1;
        if subject.is_some() {
            sql.push_str(" WHERE subject = ?1");
            bind_index += 1;
        }
        sql.push_str(" ORDER BY completed_at DESC, id DESC");
        sql.push_str(" LIMIT ?");
        sql.push_str(&bind_index.to_string());

        let mut query = sqlx::query(&sql);
        if let Some(subject) = subject {
            query = query.bind(subject);
        }
        query = query.bind(i64::from(limit));

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_result_row(&row)?);
        }

        Ok(out)
    }
}

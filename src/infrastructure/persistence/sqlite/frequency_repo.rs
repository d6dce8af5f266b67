//! SQLite Blocked Frequency Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    BlockedFrequencyRecord, BlockedFrequencyRepositoryPort, RepositoryError,
};

/// SQLite Blocked Frequency Repository
pub struct SqliteBlockedFrequencyRepository {
    pool: DbPool,
}

impl SqliteBlockedFrequencyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BlockedFrequencyRow {
    id: String,
    user_id: String,
    frequency_hz: f64,
    label: String,
    reason: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<BlockedFrequencyRow> for BlockedFrequencyRecord {
    type Error = RepositoryError;

    fn try_from(row: BlockedFrequencyRow) -> Result<Self, Self::Error> {
        Ok(BlockedFrequencyRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            user_id: row.user_id,
            frequency_hz: row.frequency_hz,
            label: row.label,
            reason: row.reason,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&row.updated_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl BlockedFrequencyRepositoryPort for SqliteBlockedFrequencyRepository {
    async fn save(&self, record: &BlockedFrequencyRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO blocked_frequencies (id, user_id, frequency_hz, label, reason, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                frequency_hz = excluded.frequency_hz,
                label = excluded.label,
                reason = excluded.reason,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.user_id)
        .bind(record.frequency_hz)
        .bind(&record.label)
        .bind(&record.reason)
        .bind(record.created_at.to_rfc3339())
        .bind(record.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<BlockedFrequencyRecord>, RepositoryError> {
        let row: Option<BlockedFrequencyRow> = sqlx::query_as(
            "SELECT id, user_id, frequency_hz, label, reason, created_at, updated_at FROM blocked_frequencies WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(BlockedFrequencyRecord::try_from).transpose()
    }

    async fn find_all(
        &self,
        user_id: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<BlockedFrequencyRecord>, RepositoryError> {
        let limit = limit.unwrap_or(i64::MAX as usize) as i64;

        let rows: Vec<BlockedFrequencyRow> = match user_id {
            Some(user_id) => sqlx::query_as(
                "SELECT id, user_id, frequency_hz, label, reason, created_at, updated_at FROM blocked_frequencies WHERE user_id = ? ORDER BY created_at DESC LIMIT ?",
            )
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await,
            None => sqlx::query_as(
                "SELECT id, user_id, frequency_hz, label, reason, created_at, updated_at FROM blocked_frequencies ORDER BY created_at DESC LIMIT ?",
            )
            .bind(limit)
            .fetch_all(&self.pool)
            .await,
        }
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(BlockedFrequencyRecord::try_from)
            .collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM blocked_frequencies WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{create_pool, run_migrations, DatabaseConfig};
    use super::*;

    async fn test_repo() -> SqliteBlockedFrequencyRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteBlockedFrequencyRepository::new(pool)
    }

    fn sample(user_id: &str, frequency_hz: f64) -> BlockedFrequencyRecord {
        let now = Utc::now();
        BlockedFrequencyRecord {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            frequency_hz,
            label: "test band".to_string(),
            reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = test_repo().await;
        let record = sample("alice", 17_400.0);
        repo.save(&record).await.unwrap();

        let found = repo.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found.user_id, "alice");
        assert_eq!(found.frequency_hz, 17_400.0);
    }

    #[tokio::test]
    async fn test_find_all_filters_by_user() {
        let repo = test_repo().await;
        repo.save(&sample("alice", 100.0)).await.unwrap();
        repo.save(&sample("alice", 200.0)).await.unwrap();
        repo.save(&sample("bob", 300.0)).await.unwrap();

        let all = repo.find_all(None, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let alice = repo.find_all(Some("alice"), None).await.unwrap();
        assert_eq!(alice.len(), 2);

        let limited = repo.find_all(None, Some(1)).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = test_repo().await;
        let record = sample("alice", 100.0);
        repo.save(&record).await.unwrap();
        repo.delete(record.id).await.unwrap();

        assert!(repo.find_by_id(record.id).await.unwrap().is_none());
    }
}

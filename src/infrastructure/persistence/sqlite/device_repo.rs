//! SQLite Mesh Device Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    DeviceStatus, MeshDeviceRecord, MeshDeviceRepositoryPort, RepositoryError,
};

/// SQLite Mesh Device Repository
pub struct SqliteMeshDeviceRepository {
    pool: DbPool,
}

impl SqliteMeshDeviceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct MeshDeviceRow {
    id: String,
    user_id: String,
    name: String,
    platform: String,
    status: String,
    last_seen_at: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<MeshDeviceRow> for MeshDeviceRecord {
    type Error = RepositoryError;

    fn try_from(row: MeshDeviceRow) -> Result<Self, Self::Error> {
        let last_seen_at = row
            .last_seen_at
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))
            })
            .transpose()?;

        Ok(MeshDeviceRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            user_id: row.user_id,
            name: row.name,
            platform: row.platform,
            status: DeviceStatus::from_str(&row.status).unwrap_or_default(),
            last_seen_at,
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
impl MeshDeviceRepositoryPort for SqliteMeshDeviceRepository {
    async fn save(&self, record: &MeshDeviceRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO mesh_devices (id, user_id, name, platform, status, last_seen_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                platform = excluded.platform,
                status = excluded.status,
                last_seen_at = excluded.last_seen_at,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.user_id)
        .bind(&record.name)
        .bind(&record.platform)
        .bind(record.status.as_str())
        .bind(record.last_seen_at.map(|dt| dt.to_rfc3339()))
        .bind(record.created_at.to_rfc3339())
        .bind(record.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MeshDeviceRecord>, RepositoryError> {
        let row: Option<MeshDeviceRow> = sqlx::query_as(
            "SELECT id, user_id, name, platform, status, last_seen_at, created_at, updated_at FROM mesh_devices WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(MeshDeviceRecord::try_from).transpose()
    }

    async fn find_all(
        &self,
        user_id: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<MeshDeviceRecord>, RepositoryError> {
        let limit = limit.unwrap_or(i64::MAX as usize) as i64;

        let rows: Vec<MeshDeviceRow> = match user_id {
            Some(user_id) => sqlx::query_as(
                "SELECT id, user_id, name, platform, status, last_seen_at, created_at, updated_at FROM mesh_devices WHERE user_id = ? ORDER BY created_at DESC LIMIT ?",
            )
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await,
            None => sqlx::query_as(
                "SELECT id, user_id, name, platform, status, last_seen_at, created_at, updated_at FROM mesh_devices ORDER BY created_at DESC LIMIT ?",
            )
            .bind(limit)
            .fetch_all(&self.pool)
            .await,
        }
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(MeshDeviceRecord::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM mesh_devices WHERE id = ?")
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

    async fn test_repo() -> SqliteMeshDeviceRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteMeshDeviceRepository::new(pool)
    }

    #[tokio::test]
    async fn test_save_and_update_status() {
        let repo = test_repo().await;
        let now = Utc::now();
        let mut record = MeshDeviceRecord {
            id: Uuid::new_v4(),
            user_id: "alice".to_string(),
            name: "pixel-7".to_string(),
            platform: "android".to_string(),
            status: DeviceStatus::Pairing,
            last_seen_at: None,
            created_at: now,
            updated_at: now,
        };
        repo.save(&record).await.unwrap();

        record.status = DeviceStatus::Online;
        record.last_seen_at = Some(Utc::now());
        repo.save(&record).await.unwrap();

        let found = repo.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found.status, DeviceStatus::Online);
        assert!(found.last_seen_at.is_some());
    }
}

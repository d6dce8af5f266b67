//! SQLite Forensic Report Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    ForensicReportRecord, ForensicReportRepositoryPort, ReportStatus, RepositoryError,
};

/// SQLite Forensic Report Repository
pub struct SqliteForensicReportRepository {
    pool: DbPool,
}

impl SqliteForensicReportRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ForensicReportRow {
    id: String,
    user_id: String,
    title: String,
    summary: String,
    threat_type: String,
    severity: i64,
    status: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<ForensicReportRow> for ForensicReportRecord {
    type Error = RepositoryError;

    fn try_from(row: ForensicReportRow) -> Result<Self, Self::Error> {
        Ok(ForensicReportRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            user_id: row.user_id,
            title: row.title,
            summary: row.summary,
            threat_type: row.threat_type,
            severity: row.severity as i32,
            status: ReportStatus::from_str(&row.status).unwrap_or_default(),
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
impl ForensicReportRepositoryPort for SqliteForensicReportRepository {
    async fn save(&self, record: &ForensicReportRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO forensic_reports (id, user_id, title, summary, threat_type, severity, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                summary = excluded.summary,
                threat_type = excluded.threat_type,
                severity = excluded.severity,
                status = excluded.status,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(record.id.to_string())
        .bind(&record.user_id)
        .bind(&record.title)
        .bind(&record.summary)
        .bind(&record.threat_type)
        .bind(record.severity as i64)
        .bind(record.status.as_str())
        .bind(record.created_at.to_rfc3339())
        .bind(record.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ForensicReportRecord>, RepositoryError> {
        let row: Option<ForensicReportRow> = sqlx::query_as(
            "SELECT id, user_id, title, summary, threat_type, severity, status, created_at, updated_at FROM forensic_reports WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(ForensicReportRecord::try_from).transpose()
    }

    async fn find_all(
        &self,
        user_id: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<ForensicReportRecord>, RepositoryError> {
        let limit = limit.unwrap_or(i64::MAX as usize) as i64;

        let rows: Vec<ForensicReportRow> = match user_id {
            Some(user_id) => sqlx::query_as(
                "SELECT id, user_id, title, summary, threat_type, severity, status, created_at, updated_at FROM forensic_reports WHERE user_id = ? ORDER BY created_at DESC LIMIT ?",
            )
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await,
            None => sqlx::query_as(
                "SELECT id, user_id, title, summary, threat_type, severity, status, created_at, updated_at FROM forensic_reports ORDER BY created_at DESC LIMIT ?",
            )
            .bind(limit)
            .fetch_all(&self.pool)
            .await,
        }
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(ForensicReportRecord::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM forensic_reports WHERE id = ?")
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

    async fn test_repo() -> SqliteForensicReportRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteForensicReportRepository::new(pool)
    }

    #[tokio::test]
    async fn test_save_and_transition_status() {
        let repo = test_repo().await;
        let now = Utc::now();
        let mut record = ForensicReportRecord {
            id: Uuid::new_v4(),
            user_id: "alice".to_string(),
            title: "Ultrasonic beacon near office".to_string(),
            summary: "Persistent 17.4 kHz tone".to_string(),
            threat_type: "ultrasonic".to_string(),
            severity: 3,
            status: ReportStatus::Open,
            created_at: now,
            updated_at: now,
        };
        repo.save(&record).await.unwrap();

        record.status = ReportStatus::Closed;
        repo.save(&record).await.unwrap();

        let found = repo.find_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(found.status, ReportStatus::Closed);
        assert_eq!(found.severity, 3);
    }
}

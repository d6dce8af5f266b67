//! SQLite Sonic Deployment Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{
    DeploymentStatus, RepositoryError, SonicDeploymentRecord, SonicDeploymentRepositoryPort,
};

/// SQLite Sonic Deployment Repository
pub struct SqliteSonicDeploymentRepository {
    pool: DbPool,
}

impl SqliteSonicDeploymentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SonicDeploymentRow {
    id: String,
    target_frequency: f64,
    disruptor_frequency: f64,
    power_level: f64,
    modulation: String,
    effectiveness: f64,
    threat_type: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    status: String,
    deployed_at: String,
    deactivated_at: Option<String>,
}

impl TryFrom<SonicDeploymentRow> for SonicDeploymentRecord {
    type Error = RepositoryError;

    fn try_from(row: SonicDeploymentRow) -> Result<Self, Self::Error> {
        let deactivated_at = row
            .deactivated_at
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))
            })
            .transpose()?;

        Ok(SonicDeploymentRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            target_frequency: row.target_frequency,
            disruptor_frequency: row.disruptor_frequency,
            power_level: row.power_level,
            modulation: row.modulation,
            effectiveness: row.effectiveness,
            threat_type: row.threat_type,
            latitude: row.latitude,
            longitude: row.longitude,
            status: DeploymentStatus::from_str(&row.status).unwrap_or_default(),
            deployed_at: DateTime::parse_from_rfc3339(&row.deployed_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
            deactivated_at,
        })
    }
}

const DEPLOYMENT_COLUMNS: &str = "id, target_frequency, disruptor_frequency, power_level, modulation, effectiveness, threat_type, latitude, longitude, status, deployed_at, deactivated_at";

#[async_trait]
impl SonicDeploymentRepositoryPort for SqliteSonicDeploymentRepository {
    async fn save(&self, record: &SonicDeploymentRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO sonic_deployments (id, target_frequency, disruptor_frequency, power_level, modulation, effectiveness, threat_type, latitude, longitude, status, deployed_at, deactivated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                status = excluded.status,
                deactivated_at = excluded.deactivated_at
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.target_frequency)
        .bind(record.disruptor_frequency)
        .bind(record.power_level)
        .bind(&record.modulation)
        .bind(record.effectiveness)
        .bind(&record.threat_type)
        .bind(record.latitude)
        .bind(record.longitude)
        .bind(record.status.as_str())
        .bind(record.deployed_at.to_rfc3339())
        .bind(record.deactivated_at.map(|dt| dt.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<SonicDeploymentRecord>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM sonic_deployments WHERE id = ?",
            DEPLOYMENT_COLUMNS
        );
        let row: Option<SonicDeploymentRow> = sqlx::query_as(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(SonicDeploymentRecord::try_from).transpose()
    }

    async fn find_active(&self) -> Result<Vec<SonicDeploymentRecord>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM sonic_deployments WHERE status = 'active' ORDER BY deployed_at DESC",
            DEPLOYMENT_COLUMNS
        );
        let rows: Vec<SonicDeploymentRow> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(SonicDeploymentRecord::try_from)
            .collect()
    }

    async fn find_latest(&self) -> Result<Option<SonicDeploymentRecord>, RepositoryError> {
        let query = format!(
            "SELECT {} FROM sonic_deployments ORDER BY deployed_at DESC LIMIT 1",
            DEPLOYMENT_COLUMNS
        );
        let row: Option<SonicDeploymentRow> = sqlx::query_as(&query)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(SonicDeploymentRecord::try_from).transpose()
    }

    async fn deactivate_all(&self, at: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let result = sqlx::query(
            "UPDATE sonic_deployments SET status = 'deactivated', deactivated_at = ? WHERE status = 'active'",
        )
        .bind(at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{create_pool, run_migrations, DatabaseConfig};
    use super::*;

    async fn test_repo() -> SqliteSonicDeploymentRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteSonicDeploymentRepository::new(pool)
    }

    fn sample() -> SonicDeploymentRecord {
        SonicDeploymentRecord {
            id: Uuid::new_v4(),
            target_frequency: 17_400.0,
            disruptor_frequency: 18_270.0,
            power_level: 0.8,
            modulation: "chaos".to_string(),
            effectiveness: 68.0,
            threat_type: "ultrasonic".to_string(),
            latitude: None,
            longitude: None,
            status: DeploymentStatus::Active,
            deployed_at: Utc::now(),
            deactivated_at: None,
        }
    }

    #[tokio::test]
    async fn test_save_and_find_active() {
        let repo = test_repo().await;
        let record = sample();
        repo.save(&record).await.unwrap();

        let active = repo.find_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, record.id);
    }

    #[tokio::test]
    async fn test_deactivate_all() {
        let repo = test_repo().await;
        repo.save(&sample()).await.unwrap();
        repo.save(&sample()).await.unwrap();

        let stopped = repo.deactivate_all(Utc::now()).await.unwrap();
        assert_eq!(stopped, 2);
        assert!(repo.find_active().await.unwrap().is_empty());

        // 再次执行应为零
        let stopped = repo.deactivate_all(Utc::now()).await.unwrap();
        assert_eq!(stopped, 0);
    }

    #[tokio::test]
    async fn test_find_latest() {
        let repo = test_repo().await;
        assert!(repo.find_latest().await.unwrap().is_none());

        let record = sample();
        repo.save(&record).await.unwrap();
        let latest = repo.find_latest().await.unwrap().unwrap();
        assert_eq!(latest.id, record.id);
    }
}

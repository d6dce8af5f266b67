//! SQLite Threat Event Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{RepositoryError, ThreatEventRecord, ThreatEventRepositoryPort};

/// SQLite Threat Event Repository
pub struct SqliteThreatEventRepository {
    pool: DbPool,
}

impl SqliteThreatEventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ThreatEventRow {
    id: String,
    frequency_hz: f64,
    label: String,
    threat_type: String,
    power_db: f64,
    beam_width_hz: f64,
    pulse_count: i64,
    detected_at: String,
}

impl TryFrom<ThreatEventRow> for ThreatEventRecord {
    type Error = RepositoryError;

    fn try_from(row: ThreatEventRow) -> Result<Self, Self::Error> {
        Ok(ThreatEventRecord {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            frequency_hz: row.frequency_hz,
            label: row.label,
            threat_type: row.threat_type,
            power_db: row.power_db,
            beam_width_hz: row.beam_width_hz,
            pulse_count: row.pulse_count as usize,
            detected_at: DateTime::parse_from_rfc3339(&row.detected_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl ThreatEventRepositoryPort for SqliteThreatEventRepository {
    async fn save(&self, record: &ThreatEventRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO threat_events (id, frequency_hz, label, threat_type, power_db, beam_width_hz, pulse_count, detected_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.frequency_hz)
        .bind(&record.label)
        .bind(&record.threat_type)
        .bind(record.power_db)
        .bind(record.beam_width_hz)
        .bind(record.pulse_count as i64)
        .bind(record.detected_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ThreatEventRecord>, RepositoryError> {
        let row: Option<ThreatEventRow> = sqlx::query_as(
            "SELECT id, frequency_hz, label, threat_type, power_db, beam_width_hz, pulse_count, detected_at FROM threat_events WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(ThreatEventRecord::try_from).transpose()
    }

    async fn find_recent(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<ThreatEventRecord>, RepositoryError> {
        let limit = limit.unwrap_or(i64::MAX as usize) as i64;

        let rows: Vec<ThreatEventRow> = sqlx::query_as(
            "SELECT id, frequency_hz, label, threat_type, power_db, beam_width_hz, pulse_count, detected_at FROM threat_events ORDER BY detected_at DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(ThreatEventRecord::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{create_pool, run_migrations, DatabaseConfig};
    use super::*;
    use chrono::Duration;

    async fn test_repo() -> SqliteThreatEventRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteThreatEventRepository::new(pool)
    }

    fn sample(detected_at: DateTime<Utc>) -> ThreatEventRecord {
        ThreatEventRecord {
            id: Uuid::new_v4(),
            frequency_hz: 17_400.0,
            label: "Ultrasonic beacon".to_string(),
            threat_type: "ultrasonic".to_string(),
            power_db: -12.5,
            beam_width_hz: 20.0,
            pulse_count: 4,
            detected_at,
        }
    }

    #[tokio::test]
    async fn test_find_recent_orders_newest_first() {
        let repo = test_repo().await;
        let now = Utc::now();
        let older = sample(now - Duration::minutes(10));
        let newer = sample(now);
        repo.save(&older).await.unwrap();
        repo.save(&newer).await.unwrap();

        let recent = repo.find_recent(Some(1)).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, newer.id);
    }
}

//! SQLite Database - 数据库连接和迁移

use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/sentra.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite:{}?mode=rwc", path.as_ref().display()),
            max_connections: 5,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    // 启用 WAL 模式，允许并发读写
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await?;

    // 设置 busy_timeout=5000ms，遇到锁时等待而不是立即失败
    sqlx::query("PRAGMA busy_timeout=5000")
        .execute(&pool)
        .await?;

    // 设置同步模式为 NORMAL（平衡性能和安全性）
    sqlx::query("PRAGMA synchronous=NORMAL")
        .execute(&pool)
        .await?;

    tracing::info!("SQLite pool created with WAL mode and busy_timeout=5000ms");

    Ok(pool)
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    // 创建 blocked_frequencies 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS blocked_frequencies (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            frequency_hz REAL NOT NULL,
            label TEXT NOT NULL,
            reason TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 mesh_devices 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS mesh_devices (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            platform TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pairing',
            last_seen_at TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 forensic_reports 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS forensic_reports (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            title TEXT NOT NULL,
            summary TEXT NOT NULL,
            threat_type TEXT NOT NULL,
            severity INTEGER NOT NULL DEFAULT 1,
            status TEXT NOT NULL DEFAULT 'open',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 threat_events 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS threat_events (
            id TEXT PRIMARY KEY,
            frequency_hz REAL NOT NULL,
            label TEXT NOT NULL,
            threat_type TEXT NOT NULL,
            power_db REAL NOT NULL,
            beam_width_hz REAL NOT NULL,
            pulse_count INTEGER NOT NULL DEFAULT 0,
            detected_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 sonic_deployments 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sonic_deployments (
            id TEXT PRIMARY KEY,
            target_frequency REAL NOT NULL,
            disruptor_frequency REAL NOT NULL,
            power_level REAL NOT NULL,
            modulation TEXT NOT NULL,
            effectiveness REAL NOT NULL,
            threat_type TEXT NOT NULL,
            latitude REAL,
            longitude REAL,
            status TEXT NOT NULL DEFAULT 'active',
            deployed_at TEXT NOT NULL,
            deactivated_at TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建索引
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_blocked_frequencies_user_id
        ON blocked_frequencies(user_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_mesh_devices_user_id
        ON mesh_devices(user_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_forensic_reports_user_id
        ON forensic_reports(user_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_threat_events_detected_at
        ON threat_events(detected_at)
        "#,
    )
    .execute(pool)
    .await?;

    // 索引: sonic_deployments.status (用于活跃部署查询)
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sonic_deployments_status
        ON sonic_deployments(status)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_in_memory_db() {
        let config = DatabaseConfig::in_memory();
        let pool = create_pool(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }
}

//! Sentra - 频谱威胁监测与声波反制系统
//!
//! - Domain: spectrum/, countermeasure/ (Bounded Contexts)
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence, events

use std::sync::Arc;

use sentra::config::{load_config, print_config};
use sentra::domain::spectrum::ScanConfig;
use sentra::infrastructure::events::EventPublisher;
use sentra::infrastructure::http::{AppState, HttpServer, ServerConfig};
use sentra::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteBlockedFrequencyRepository,
    SqliteForensicReportRepository, SqliteMeshDeviceRepository, SqliteSonicDeploymentRepository,
    SqliteThreatEventRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},sentra={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Sentra - 频谱威胁监测与声波反制系统");
    print_config(&config);

    // 确保数据目录存在
    tokio::fs::create_dir_all(&config.downloads.dir).await?;
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let frequency_repo = Arc::new(SqliteBlockedFrequencyRepository::new(pool.clone()));
    let device_repo = Arc::new(SqliteMeshDeviceRepository::new(pool.clone()));
    let report_repo = Arc::new(SqliteForensicReportRepository::new(pool.clone()));
    let threat_repo = Arc::new(SqliteThreatEventRepository::new(pool.clone()));
    let deployment_repo = Arc::new(SqliteSonicDeploymentRepository::new(pool));

    // 创建事件发布器
    let event_publisher = Arc::new(EventPublisher::new());

    // 扫描配置
    let scan_config = ScanConfig {
        threshold_db: config.spectrum.threshold_db,
        max_samples: config.spectrum.max_samples,
    };

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port);
    let state = AppState::new(
        frequency_repo,
        device_repo,
        report_repo,
        threat_repo,
        deployment_repo,
        event_publisher,
        scan_config,
        config.downloads.dir.clone(),
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

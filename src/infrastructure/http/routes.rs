//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /api/ping                          GET    健康检查
//! - /api/status                        GET    系统状态
//! - /api/frequencies                   GET    列出屏蔽频率
//! - /api/frequencies                   POST   创建屏蔽频率
//! - /api/frequencies/:id               GET    获取屏蔽频率
//! - /api/frequencies/:id               PUT/PATCH 更新屏蔽频率
//! - /api/frequencies/:id               DELETE 删除屏蔽频率
//! - /api/devices                       GET    列出组网设备
//! - /api/devices                       POST   注册组网设备
//! - /api/devices/:id                   GET    获取组网设备
//! - /api/devices/:id                   PUT/PATCH 更新组网设备
//! - /api/devices/:id                   DELETE 移除组网设备
//! - /api/reports                       GET    列出取证报告
//! - /api/reports                       POST   创建取证报告
//! - /api/reports/:id                   GET    获取取证报告
//! - /api/reports/:id                   PUT/PATCH 更新取证报告
//! - /api/reports/:id                   DELETE 删除取证报告
//! - /api/threats                       GET    列出最近威胁事件
//! - /api/threats/:id                   GET    获取威胁事件
//! - /api/spectrum/scan                 POST   执行频谱扫描
//! - /api/spectrum/analyze              POST   分析目标频率
//! - /api/deployments                   GET    列出生效中的部署
//! - /api/deployments                   POST   部署声波干扰
//! - /api/deployments/emergency-stop    POST   紧急停止全部部署
//! - /api/deployments/:id               GET    获取部署
//! - /api/deployments/:id               DELETE 停用部署
//! - /api/downloads/:platform/:filename GET    下载客户端安装包
//! - /ws                                WS     威胁情报实时通道

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api", api_routes())
        .route("/ws", get(handlers::websocket_handler))
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/status", get(handlers::system_status))
        .nest("/frequencies", frequency_routes())
        .nest("/devices", device_routes())
        .nest("/reports", report_routes())
        .nest("/threats", threat_routes())
        .nest("/spectrum", spectrum_routes())
        .nest("/deployments", deployment_routes())
        .route(
            "/downloads/:platform/:filename",
            get(handlers::download_package),
        )
}

/// 屏蔽频率路由
fn frequency_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_frequencies).post(handlers::create_frequency),
        )
        .route(
            "/:id",
            get(handlers::get_frequency)
                .put(handlers::update_frequency)
                .patch(handlers::update_frequency)
                .delete(handlers::delete_frequency),
        )
}

/// 组网设备路由
fn device_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_devices).post(handlers::register_device),
        )
        .route(
            "/:id",
            get(handlers::get_device)
                .put(handlers::update_device)
                .patch(handlers::update_device)
                .delete(handlers::remove_device),
        )
}

/// 取证报告路由
fn report_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route(
            "/:id",
            get(handlers::get_report)
                .put(handlers::update_report)
                .patch(handlers::update_report)
                .delete(handlers::delete_report),
        )
}

/// 威胁事件路由
fn threat_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_threats))
        .route("/:id", get(handlers::get_threat))
}

/// 频谱分析路由
fn spectrum_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/scan", post(handlers::run_scan))
        .route("/analyze", post(handlers::analyze_frequency))
}

/// 部署路由
fn deployment_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_deployments).post(handlers::create_deployment),
        )
        .route("/emergency-stop", post(handlers::emergency_stop))
        .route("/:id", get(handlers::get_deployment).delete(handlers::deactivate_deployment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::spectrum::ScanConfig;
    use crate::infrastructure::events::EventPublisher;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteBlockedFrequencyRepository,
        SqliteForensicReportRepository, SqliteMeshDeviceRepository,
        SqliteSonicDeploymentRepository, SqliteThreatEventRepository,
    };
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        test_app_with_downloads(std::env::temp_dir()).await
    }

    async fn test_app_with_downloads(downloads_dir: std::path::PathBuf) -> Router {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let state = Arc::new(AppState::new(
            Arc::new(SqliteBlockedFrequencyRepository::new(pool.clone())),
            Arc::new(SqliteMeshDeviceRepository::new(pool.clone())),
            Arc::new(SqliteForensicReportRepository::new(pool.clone())),
            Arc::new(SqliteThreatEventRepository::new(pool.clone())),
            Arc::new(SqliteSonicDeploymentRepository::new(pool)),
            EventPublisher::new().arc(),
            ScanConfig::default(),
            downloads_dir,
        ));

        create_routes().with_state(state)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_frequency_returns_201() {
        let app = test_app().await;
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/frequencies",
                serde_json::json!({
                    "user_id": "user-1",
                    "frequency_hz": 17400.0,
                    "label": "Ultrasonic carrier",
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["errno"], 0);
        assert_eq!(json["data"]["frequency_hz"], 17400.0);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/frequencies")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["errno"], 400);
    }

    #[tokio::test]
    async fn test_get_missing_frequency_returns_404() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/frequencies/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_owner_returns_403() {
        let app = test_app().await;
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/frequencies",
                serde_json::json!({
                    "user_id": "alice",
                    "frequency_hz": 2100.0,
                    "label": "V2K carrier",
                }),
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        let id = json["data"]["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/frequencies/{}?user_id=mallory", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = body_json(response).await;
        assert_eq!(json["errno"], 403);
    }

    #[tokio::test]
    async fn test_delete_frequency_returns_204() {
        let app = test_app().await;
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/frequencies",
                serde_json::json!({
                    "user_id": "alice",
                    "frequency_hz": 6800.0,
                    "label": "ADS band",
                }),
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        let id = json["data"]["id"].as_str().unwrap().to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/frequencies/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_deploy_and_emergency_stop() {
        let app = test_app().await;
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/deployments",
                serde_json::json!({ "target_frequency": 17400.0 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "active");

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/deployments/emergency-stop")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["stopped"], 1);
    }

    #[tokio::test]
    async fn test_download_serves_existing_package() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("linux")).unwrap();
        std::fs::write(dir.path().join("linux/sentra_1.0.0.deb"), b"deb-bytes").unwrap();

        let app = test_app_with_downloads(dir.path().to_path_buf()).await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/downloads/linux/sentra_1.0.0.deb")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/vnd.debian.binary-package"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"deb-bytes");
    }

    #[tokio::test]
    async fn test_download_missing_package_returns_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app_with_downloads(dir.path().to_path_buf()).await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/downloads/linux/absent.deb")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_download_rejects_bad_platform() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/downloads/amiga/setup.exe")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

//! System Status Handler

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::GetSystemStatus;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 系统状态响应
#[derive(Debug, Serialize)]
pub struct SystemStatusResponse {
    pub active_deployments: usize,
    pub connected_clients: usize,
    pub last_deployment_at: Option<String>,
    pub uptime_secs: i64,
    pub version: &'static str,
}

/// 系统状态
pub async fn system_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<SystemStatusResponse>>, ApiError> {
    let status = state.system_status_handler.handle(GetSystemStatus).await?;

    Ok(Json(ApiResponse::success(SystemStatusResponse {
        active_deployments: status.active_deployments,
        connected_clients: status.connected_clients,
        last_deployment_at: status.last_deployment_at.map(|dt| dt.to_rfc3339()),
        uptime_secs: status.uptime_secs,
        version: env!("CARGO_PKG_VERSION"),
    })))
}

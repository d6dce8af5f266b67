//! Sonic Deployment HTTP Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::SonicDeploymentRecord;
use crate::application::{
    DeactivateDeployment, DeployCountermeasure, EmergencyStopAll, GetDeployment,
    ListActiveDeployments,
};
use crate::infrastructure::http::dto::{ApiJson, ApiResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct DeploymentResponse {
    pub id: Uuid,
    pub target_frequency: f64,
    pub disruptor_frequency: f64,
    pub power_level: f64,
    pub modulation: String,
    pub effectiveness: f64,
    pub threat_type: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: String,
    pub deployed_at: String,
    pub deactivated_at: Option<String>,
    /// 部署以来的秒数
    pub duration_secs: i64,
}

impl From<SonicDeploymentRecord> for DeploymentResponse {
    fn from(record: SonicDeploymentRecord) -> Self {
        // 已停用的部署按停用时刻计算持续时长
        let end = record.deactivated_at.unwrap_or_else(Utc::now);
        Self {
            id: record.id,
            target_frequency: record.target_frequency,
            disruptor_frequency: record.disruptor_frequency,
            power_level: record.power_level,
            modulation: record.modulation,
            effectiveness: record.effectiveness,
            threat_type: record.threat_type,
            latitude: record.latitude,
            longitude: record.longitude,
            status: record.status.as_str().to_string(),
            deployed_at: record.deployed_at.to_rfc3339(),
            deactivated_at: record.deactivated_at.map(|dt| dt.to_rfc3339()),
            duration_secs: (end - record.deployed_at).num_seconds(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeployRequest {
    pub target_frequency: f64,
    pub power_level: Option<f64>,
    pub threat_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct EmergencyStopResponse {
    pub stopped: usize,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出生效中的部署
pub async fn list_deployments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<DeploymentResponse>>>, ApiError> {
    let records = state
        .list_deployments_handler
        .handle(ListActiveDeployments)
        .await?;

    let response = records.into_iter().map(DeploymentResponse::from).collect();
    Ok(Json(ApiResponse::success(response)))
}

/// 部署声波干扰
pub async fn create_deployment(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<DeployRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DeploymentResponse>>), ApiError> {
    let record = state
        .deploy_handler
        .handle(DeployCountermeasure {
            target_frequency: request.target_frequency,
            power_level: request.power_level,
            threat_type: request.threat_type,
            latitude: request.latitude,
            longitude: request.longitude,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(record.into())),
    ))
}

/// 获取单个部署
pub async fn get_deployment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeploymentResponse>>, ApiError> {
    let record = state
        .get_deployment_handler
        .handle(GetDeployment { deployment_id: id })
        .await?;

    Ok(Json(ApiResponse::success(record.into())))
}

/// 停用部署
pub async fn deactivate_deployment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .deactivate_deployment_handler
        .handle(DeactivateDeployment { deployment_id: id })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// 紧急停止：停用所有生效中的部署
pub async fn emergency_stop(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<EmergencyStopResponse>>, ApiError> {
    let stopped = state.emergency_stop_handler.handle(EmergencyStopAll).await?;

    Ok(Json(ApiResponse::success(EmergencyStopResponse { stopped })))
}

//! Mesh Device HTTP Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::MeshDeviceRecord;
use crate::application::{
    GetMeshDevice, ListMeshDevices, RegisterMeshDevice, RemoveMeshDevice, UpdateMeshDevice,
};
use crate::infrastructure::http::dto::{ActorParams, ApiJson, ApiResponse, ListParams};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MeshDeviceResponse {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub platform: String,
    pub status: String,
    pub last_seen_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<MeshDeviceRecord> for MeshDeviceResponse {
    fn from(record: MeshDeviceRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            name: record.name,
            platform: record.platform,
            status: record.status.as_str().to_string(),
            last_seen_at: record.last_seen_at.map(|dt| dt.to_rfc3339()),
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterMeshDeviceRequest {
    pub user_id: String,
    pub name: String,
    pub platform: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMeshDeviceRequest {
    /// 请求方用户 ID，提供时校验归属
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出网状设备
pub async fn list_devices(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<MeshDeviceResponse>>>, ApiError> {
    let records = state
        .list_devices_handler
        .handle(ListMeshDevices {
            user_id: params.user_id,
            limit: params.limit,
        })
        .await?;

    let response = records.into_iter().map(MeshDeviceResponse::from).collect();
    Ok(Json(ApiResponse::success(response)))
}

/// 注册网状设备
pub async fn register_device(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<RegisterMeshDeviceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MeshDeviceResponse>>), ApiError> {
    let record = state
        .register_device_handler
        .handle(RegisterMeshDevice {
            user_id: request.user_id,
            name: request.name,
            platform: request.platform,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(record.into())),
    ))
}

/// 获取单个网状设备
pub async fn get_device(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<ActorParams>,
) -> Result<Json<ApiResponse<MeshDeviceResponse>>, ApiError> {
    let record = state
        .get_device_handler
        .handle(GetMeshDevice {
            id,
            acting_user_id: params.user_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(record.into())))
}

/// 更新网状设备（改名或状态切换）
pub async fn update_device(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateMeshDeviceRequest>,
) -> Result<Json<ApiResponse<MeshDeviceResponse>>, ApiError> {
    let record = state
        .update_device_handler
        .handle(UpdateMeshDevice {
            id,
            acting_user_id: request.user_id,
            name: request.name,
            status: request.status,
        })
        .await?;

    Ok(Json(ApiResponse::success(record.into())))
}

/// 移除网状设备
pub async fn remove_device(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<ActorParams>,
) -> Result<StatusCode, ApiError> {
    state
        .remove_device_handler
        .handle(RemoveMeshDevice {
            id,
            acting_user_id: params.user_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

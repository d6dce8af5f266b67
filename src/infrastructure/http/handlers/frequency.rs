//! Blocked Frequency HTTP Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::BlockedFrequencyRecord;
use crate::application::{
    CreateBlockedFrequency, DeleteBlockedFrequency, GetBlockedFrequency, ListBlockedFrequencies,
    UpdateBlockedFrequency,
};
use crate::infrastructure::http::dto::{ActorParams, ApiJson, ApiResponse, ListParams};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct BlockedFrequencyResponse {
    pub id: Uuid,
    pub user_id: String,
    pub frequency_hz: f64,
    pub label: String,
    pub reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BlockedFrequencyRecord> for BlockedFrequencyResponse {
    fn from(record: BlockedFrequencyRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            frequency_hz: record.frequency_hz,
            label: record.label,
            reason: record.reason,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateBlockedFrequencyRequest {
    pub user_id: String,
    pub frequency_hz: f64,
    pub label: String,
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBlockedFrequencyRequest {
    /// 请求方用户 ID，提供时校验归属
    pub user_id: Option<String>,
    pub frequency_hz: Option<f64>,
    pub label: Option<String>,
    pub reason: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出屏蔽频点
pub async fn list_frequencies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<BlockedFrequencyResponse>>>, ApiError> {
    let records = state
        .list_frequencies_handler
        .handle(ListBlockedFrequencies {
            user_id: params.user_id,
            limit: params.limit,
        })
        .await?;

    let response = records
        .into_iter()
        .map(BlockedFrequencyResponse::from)
        .collect();
    Ok(Json(ApiResponse::success(response)))
}

/// 创建屏蔽频点
pub async fn create_frequency(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateBlockedFrequencyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BlockedFrequencyResponse>>), ApiError> {
    let record = state
        .create_frequency_handler
        .handle(CreateBlockedFrequency {
            user_id: request.user_id,
            frequency_hz: request.frequency_hz,
            label: request.label,
            reason: request.reason,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(record.into())),
    ))
}

/// 获取单个屏蔽频点
pub async fn get_frequency(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<ActorParams>,
) -> Result<Json<ApiResponse<BlockedFrequencyResponse>>, ApiError> {
    let record = state
        .get_frequency_handler
        .handle(GetBlockedFrequency {
            id,
            acting_user_id: params.user_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(record.into())))
}

/// 更新屏蔽频点（PATCH 与 PUT 共用，未提供的字段保持不变）
pub async fn update_frequency(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateBlockedFrequencyRequest>,
) -> Result<Json<ApiResponse<BlockedFrequencyResponse>>, ApiError> {
    let record = state
        .update_frequency_handler
        .handle(UpdateBlockedFrequency {
            id,
            acting_user_id: request.user_id,
            frequency_hz: request.frequency_hz,
            label: request.label,
            reason: request.reason,
        })
        .await?;

    Ok(Json(ApiResponse::success(record.into())))
}

/// 删除屏蔽频点
pub async fn delete_frequency(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<ActorParams>,
) -> Result<StatusCode, ApiError> {
    state
        .delete_frequency_handler
        .handle(DeleteBlockedFrequency {
            id,
            acting_user_id: params.user_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

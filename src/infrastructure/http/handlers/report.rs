//! Forensic Report HTTP Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::ForensicReportRecord;
use crate::application::{
    CreateForensicReport, DeleteForensicReport, GetForensicReport, ListForensicReports,
    UpdateForensicReport,
};
use crate::infrastructure::http::dto::{ActorParams, ApiJson, ApiResponse, ListParams};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ForensicReportResponse {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub summary: String,
    pub threat_type: String,
    pub severity: i32,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ForensicReportRecord> for ForensicReportResponse {
    fn from(record: ForensicReportRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            title: record.title,
            summary: record.summary,
            threat_type: record.threat_type,
            severity: record.severity,
            status: record.status.as_str().to_string(),
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateForensicReportRequest {
    pub user_id: String,
    pub title: String,
    pub summary: String,
    pub threat_type: String,
    pub severity: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateForensicReportRequest {
    /// 请求方用户 ID，提供时校验归属
    pub user_id: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub severity: Option<i32>,
    pub status: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出取证报告
pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<ForensicReportResponse>>>, ApiError> {
    let records = state
        .list_reports_handler
        .handle(ListForensicReports {
            user_id: params.user_id,
            limit: params.limit,
        })
        .await?;

    let response = records
        .into_iter()
        .map(ForensicReportResponse::from)
        .collect();
    Ok(Json(ApiResponse::success(response)))
}

/// 创建取证报告
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<CreateForensicReportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ForensicReportResponse>>), ApiError> {
    let record = state
        .create_report_handler
        .handle(CreateForensicReport {
            user_id: request.user_id,
            title: request.title,
            summary: request.summary,
            threat_type: request.threat_type,
            severity: request.severity,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(record.into())),
    ))
}

/// 获取单个取证报告
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<ActorParams>,
) -> Result<Json<ApiResponse<ForensicReportResponse>>, ApiError> {
    let record = state
        .get_report_handler
        .handle(GetForensicReport {
            id,
            acting_user_id: params.user_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(record.into())))
}

/// 更新取证报告
pub async fn update_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ApiJson(request): ApiJson<UpdateForensicReportRequest>,
) -> Result<Json<ApiResponse<ForensicReportResponse>>, ApiError> {
    let record = state
        .update_report_handler
        .handle(UpdateForensicReport {
            id,
            acting_user_id: request.user_id,
            title: request.title,
            summary: request.summary,
            severity: request.severity,
            status: request.status,
        })
        .await?;

    Ok(Json(ApiResponse::success(record.into())))
}

/// 删除取证报告
pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<ActorParams>,
) -> Result<StatusCode, ApiError> {
    state
        .delete_report_handler
        .handle(DeleteForensicReport {
            id,
            acting_user_id: params.user_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

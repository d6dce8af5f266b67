//! Threat Event HTTP Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::ThreatEventRecord;
use crate::application::{GetThreatEvent, ListThreatEvents};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ThreatEventResponse {
    pub id: Uuid,
    pub frequency_hz: f64,
    pub label: String,
    pub threat_type: String,
    pub power_db: f64,
    pub beam_width_hz: f64,
    pub pulse_count: usize,
    pub detected_at: String,
}

impl From<ThreatEventRecord> for ThreatEventResponse {
    fn from(record: ThreatEventRecord) -> Self {
        Self {
            id: record.id,
            frequency_hz: record.frequency_hz,
            label: record.label,
            threat_type: record.threat_type,
            power_db: record.power_db,
            beam_width_hz: record.beam_width_hz,
            pulse_count: record.pulse_count,
            detected_at: record.detected_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListThreatsParams {
    pub limit: Option<usize>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出最近威胁事件（按检出时间倒序）
pub async fn list_threats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListThreatsParams>,
) -> Result<Json<ApiResponse<Vec<ThreatEventResponse>>>, ApiError> {
    let records = state
        .list_threats_handler
        .handle(ListThreatEvents {
            limit: params.limit,
        })
        .await?;

    let response = records.into_iter().map(ThreatEventResponse::from).collect();
    Ok(Json(ApiResponse::success(response)))
}

/// 获取单个威胁事件
pub async fn get_threat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ThreatEventResponse>>, ApiError> {
    let record = state.get_threat_handler.handle(GetThreatEvent { id }).await?;

    Ok(Json(ApiResponse::success(record.into())))
}

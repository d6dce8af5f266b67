//! Spectrum HTTP Handlers
//!
//! 频谱扫描与干扰参数分析

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::{RunSpectrumScan, ScanDetection};
use crate::domain::countermeasure::analyze_target;
use crate::infrastructure::http::dto::{ApiJson, ApiResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// 复数样本实部
    pub re: Vec<f64>,
    /// 复数样本虚部（纯实信号传全零）
    pub im: Vec<f64>,
    /// 采样率（Hz）
    pub sample_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct DetectionResponse {
    pub event_id: Uuid,
    pub frequency_hz: f64,
    pub label: String,
    pub threat_type: String,
    pub power_db: f64,
    pub beam_width_hz: f64,
    pub pulse_intervals_ms: Vec<f64>,
}

impl From<ScanDetection> for DetectionResponse {
    fn from(detection: ScanDetection) -> Self {
        Self {
            event_id: detection.event_id,
            frequency_hz: detection.signature.frequency_hz,
            label: detection.signature.label.to_string(),
            threat_type: detection.signature.threat_type.as_str().to_string(),
            power_db: detection.signature.power_db,
            beam_width_hz: detection.signature.beam_width_hz,
            pulse_intervals_ms: detection.signature.pulse_intervals_ms,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub sample_count: usize,
    pub detections: Vec<DetectionResponse>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub target_frequency: f64,
    #[serde(default = "default_bandwidth")]
    pub bandwidth: f64,
}

fn default_bandwidth() -> f64 {
    200.0
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub target_frequency: f64,
    pub disruptor_frequency: f64,
    pub power_level: f64,
    pub modulation: String,
    pub interference_pattern: String,
    pub bandwidth: f64,
}

// ============================================================================
// Handlers
// ============================================================================

/// 执行频谱扫描
///
/// 命中目标频点的会落库为威胁事件并向所有 WS 客户端广播
pub async fn run_scan(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<ScanRequest>,
) -> Result<Json<ApiResponse<ScanResponse>>, ApiError> {
    let sample_count = request.re.len();

    let detections = state
        .run_scan_handler
        .handle(RunSpectrumScan {
            re: request.re,
            im: request.im,
            sample_rate: request.sample_rate,
        })
        .await?;

    Ok(Json(ApiResponse::success(ScanResponse {
        sample_count,
        detections: detections.into_iter().map(DetectionResponse::from).collect(),
    })))
}

/// 分析目标频率，返回最优干扰参数
pub async fn analyze_frequency(
    State(_state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<AnalyzeRequest>,
) -> Result<Json<ApiResponse<AnalyzeResponse>>, ApiError> {
    let plan = analyze_target(request.target_frequency, request.bandwidth)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok(Json(ApiResponse::success(AnalyzeResponse {
        target_frequency: plan.target_frequency,
        disruptor_frequency: plan.disruptor_frequency,
        power_level: plan.power_level,
        modulation: plan.modulation.as_str().to_string(),
        interference_pattern: plan.interference_pattern.to_string(),
        bandwidth: plan.bandwidth,
    })))
}

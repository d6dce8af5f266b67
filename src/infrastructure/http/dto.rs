//! Data Transfer Objects

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// JSON 提取器
// ============================================================================

/// JSON 请求体提取器
///
/// 包装 axum::Json，反序列化失败时返回统一格式的 400 响应，
/// 而不是 axum 默认的纯文本拒绝
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

// ============================================================================
// 通用查询参数
// ============================================================================

/// 列表查询参数
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// 按所属用户过滤
    pub user_id: Option<String>,
    /// 返回条数上限
    pub limit: Option<usize>,
}

/// 单资源操作的请求方标识
#[derive(Debug, Deserialize)]
pub struct ActorParams {
    pub user_id: Option<String>,
}

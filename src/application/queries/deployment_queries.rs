//! Sonic Deployment Queries

use uuid::Uuid;

/// 获取部署详情查询
#[derive(Debug, Clone)]
pub struct GetDeployment {
    pub deployment_id: Uuid,
}

/// 列出生效中的部署查询
#[derive(Debug, Clone)]
pub struct ListActiveDeployments;

/// 系统状态查询
#[derive(Debug, Clone)]
pub struct GetSystemStatus;

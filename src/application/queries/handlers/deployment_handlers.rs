//! Sonic Deployment Query Handlers

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{SonicDeploymentRecord, SonicDeploymentRepositoryPort};
use crate::application::queries::{GetDeployment, GetSystemStatus, ListActiveDeployments};
use crate::infrastructure::events::EventPublisher;

/// GetDeployment Handler
pub struct GetDeploymentHandler {
    deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>,
}

impl GetDeploymentHandler {
    pub fn new(deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>) -> Self {
        Self { deployment_repo }
    }

    pub async fn handle(
        &self,
        query: GetDeployment,
    ) -> Result<SonicDeploymentRecord, ApplicationError> {
        let record = self
            .deployment_repo
            .find_by_id(query.deployment_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("SonicDeployment", query.deployment_id))?;

        Ok(record)
    }
}

/// ListActiveDeployments Handler
pub struct ListActiveDeploymentsHandler {
    deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>,
}

impl ListActiveDeploymentsHandler {
    pub fn new(deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>) -> Self {
        Self { deployment_repo }
    }

    pub async fn handle(
        &self,
        _query: ListActiveDeployments,
    ) -> Result<Vec<SonicDeploymentRecord>, ApplicationError> {
        let records = self.deployment_repo.find_active().await?;

        Ok(records)
    }
}

// ============================================================================
// System Status
// ============================================================================

/// 系统状态快照
#[derive(Debug, Clone)]
pub struct SystemStatus {
    /// 生效中的部署数
    pub active_deployments: usize,
    /// 当前 WebSocket 连接数
    pub connected_clients: usize,
    /// 最近一次部署时间
    pub last_deployment_at: Option<DateTime<Utc>>,
    /// 服务运行秒数
    pub uptime_secs: i64,
}

/// GetSystemStatus Handler
pub struct GetSystemStatusHandler {
    deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>,
    event_publisher: Arc<EventPublisher>,
    started_at: DateTime<Utc>,
}

impl GetSystemStatusHandler {
    pub fn new(
        deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>,
        event_publisher: Arc<EventPublisher>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            deployment_repo,
            event_publisher,
            started_at,
        }
    }

    pub async fn handle(&self, _query: GetSystemStatus) -> Result<SystemStatus, ApplicationError> {
        let active = self.deployment_repo.find_active().await?;
        let latest = self.deployment_repo.find_latest().await?;

        Ok(SystemStatus {
            active_deployments: active.len(),
            connected_clients: self.event_publisher.client_count(),
            last_deployment_at: latest.map(|d| d.deployed_at),
            uptime_secs: (Utc::now() - self.started_at).num_seconds(),
        })
    }
}

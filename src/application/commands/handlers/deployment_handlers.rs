//! Sonic Deployment Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{DeactivateDeployment, DeployCountermeasure, EmergencyStopAll};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    DeploymentStatus, SonicDeploymentRecord, SonicDeploymentRepositoryPort,
};
use crate::domain::countermeasure::{
    analyze_target, deployment_parameters, DEFAULT_POWER_LEVEL,
};
use crate::domain::spectrum::ThreatType;
use crate::infrastructure::events::EventPublisher;

/// DeployCountermeasure Handler - 计算干扰参数并落库
pub struct DeployCountermeasureHandler {
    deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>,
    event_publisher: Arc<EventPublisher>,
}

impl DeployCountermeasureHandler {
    pub fn new(
        deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            deployment_repo,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        command: DeployCountermeasure,
    ) -> Result<SonicDeploymentRecord, ApplicationError> {
        let power_level = command.power_level.unwrap_or(DEFAULT_POWER_LEVEL);
        let params = deployment_parameters(command.target_frequency, power_level)?;
        // 调制方式沿用频段推荐值
        let plan = analyze_target(command.target_frequency, 0.0)?;

        let threat_type = match command.threat_type {
            Some(s) => {
                if ThreatType::from_str(&s).is_none() {
                    return Err(ApplicationError::validation(format!(
                        "Invalid threat_type: {}",
                        s
                    )));
                }
                s
            }
            None => ThreatType::Unknown.as_str().to_string(),
        };

        let record = SonicDeploymentRecord {
            id: Uuid::new_v4(),
            target_frequency: command.target_frequency,
            disruptor_frequency: params.disruptor_frequency,
            power_level,
            modulation: plan.modulation.as_str().to_string(),
            effectiveness: params.effectiveness,
            threat_type,
            latitude: command.latitude,
            longitude: command.longitude,
            status: DeploymentStatus::Active,
            deployed_at: Utc::now(),
            deactivated_at: None,
        };

        self.deployment_repo.save(&record).await?;

        tracing::info!(
            deployment_id = %record.id,
            target_frequency = record.target_frequency,
            disruptor_frequency = record.disruptor_frequency,
            effectiveness = record.effectiveness,
            "Countermeasure deployed"
        );

        self.event_publisher.publish_deployment_created(&record);

        Ok(record)
    }
}

/// DeactivateDeployment Handler
pub struct DeactivateDeploymentHandler {
    deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>,
    event_publisher: Arc<EventPublisher>,
}

impl DeactivateDeploymentHandler {
    pub fn new(
        deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            deployment_repo,
            event_publisher,
        }
    }

    pub async fn handle(&self, command: DeactivateDeployment) -> Result<(), ApplicationError> {
        let mut record = self
            .deployment_repo
            .find_by_id(command.deployment_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("SonicDeployment", command.deployment_id))?;

        // 已停用的部署重复停用视为无操作
        if record.status == DeploymentStatus::Deactivated {
            return Ok(());
        }

        record.status = DeploymentStatus::Deactivated;
        record.deactivated_at = Some(Utc::now());
        self.deployment_repo.save(&record).await?;

        tracing::info!(deployment_id = %record.id, "Deployment deactivated");

        self.event_publisher.publish_deployment_deactivated(record.id);

        Ok(())
    }
}

/// EmergencyStopAll Handler - 一键停用所有生效中的部署
pub struct EmergencyStopAllHandler {
    deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>,
    event_publisher: Arc<EventPublisher>,
}

impl EmergencyStopAllHandler {
    pub fn new(
        deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>,
        event_publisher: Arc<EventPublisher>,
    ) -> Self {
        Self {
            deployment_repo,
            event_publisher,
        }
    }

    pub async fn handle(&self, _command: EmergencyStopAll) -> Result<usize, ApplicationError> {
        let stopped = self.deployment_repo.deactivate_all(Utc::now()).await?;

        tracing::warn!(stopped = stopped, "Emergency stop executed");

        self.event_publisher.publish_emergency_stop(stopped);

        Ok(stopped)
    }
}

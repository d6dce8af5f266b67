//! Mesh Device Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::ensure_owner;
use crate::application::commands::{RegisterMeshDevice, RemoveMeshDevice, UpdateMeshDevice};
use crate::application::error::ApplicationError;
use crate::application::ports::{DeviceStatus, MeshDeviceRecord, MeshDeviceRepositoryPort};

/// RegisterMeshDevice Handler - 新设备以 pairing 状态入网
pub struct RegisterMeshDeviceHandler {
    device_repo: Arc<dyn MeshDeviceRepositoryPort>,
}

impl RegisterMeshDeviceHandler {
    pub fn new(device_repo: Arc<dyn MeshDeviceRepositoryPort>) -> Self {
        Self { device_repo }
    }

    pub async fn handle(
        &self,
        command: RegisterMeshDevice,
    ) -> Result<MeshDeviceRecord, ApplicationError> {
        if command.user_id.trim().is_empty() {
            return Err(ApplicationError::validation("user_id must not be empty"));
        }
        if command.name.trim().is_empty() {
            return Err(ApplicationError::validation("name must not be empty"));
        }

        let now = Utc::now();
        let record = MeshDeviceRecord {
            id: Uuid::new_v4(),
            user_id: command.user_id,
            name: command.name,
            platform: command.platform,
            status: DeviceStatus::Pairing,
            last_seen_at: None,
            created_at: now,
            updated_at: now,
        };

        self.device_repo.save(&record).await?;

        tracing::info!(
            device_id = %record.id,
            name = %record.name,
            platform = %record.platform,
            "Mesh device registered"
        );

        Ok(record)
    }
}

/// UpdateMeshDevice Handler
pub struct UpdateMeshDeviceHandler {
    device_repo: Arc<dyn MeshDeviceRepositoryPort>,
}

impl UpdateMeshDeviceHandler {
    pub fn new(device_repo: Arc<dyn MeshDeviceRepositoryPort>) -> Self {
        Self { device_repo }
    }

    pub async fn handle(
        &self,
        command: UpdateMeshDevice,
    ) -> Result<MeshDeviceRecord, ApplicationError> {
        let mut record = self
            .device_repo
            .find_by_id(command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("MeshDevice", command.id))?;

        ensure_owner(&record.user_id, command.acting_user_id.as_deref())?;

        if let Some(name) = command.name {
            if name.trim().is_empty() {
                return Err(ApplicationError::validation("name must not be empty"));
            }
            record.name = name;
        }
        if let Some(status_str) = command.status {
            let status = DeviceStatus::from_str(&status_str).ok_or_else(|| {
                ApplicationError::validation(format!("Invalid device status: {}", status_str))
            })?;
            // 上线即刷新心跳时间
            if status == DeviceStatus::Online {
                record.last_seen_at = Some(Utc::now());
            }
            record.status = status;
        }
        record.updated_at = Utc::now();

        self.device_repo.save(&record).await?;

        tracing::info!(
            device_id = %record.id,
            status = record.status.as_str(),
            "Mesh device updated"
        );

        Ok(record)
    }
}

/// RemoveMeshDevice Handler
pub struct RemoveMeshDeviceHandler {
    device_repo: Arc<dyn MeshDeviceRepositoryPort>,
}

impl RemoveMeshDeviceHandler {
    pub fn new(device_repo: Arc<dyn MeshDeviceRepositoryPort>) -> Self {
        Self { device_repo }
    }

    pub async fn handle(&self, command: RemoveMeshDevice) -> Result<(), ApplicationError> {
        let record = self
            .device_repo
            .find_by_id(command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("MeshDevice", command.id))?;

        ensure_owner(&record.user_id, command.acting_user_id.as_deref())?;

        self.device_repo.delete(command.id).await?;

        tracing::info!(device_id = %command.id, name = %record.name, "Mesh device removed");

        Ok(())
    }
}

//! Mesh Device Query Handlers

use std::sync::Arc;

use crate::application::commands::handlers::ensure_owner;
use crate::application::error::ApplicationError;
use crate::application::ports::{MeshDeviceRecord, MeshDeviceRepositoryPort};
use crate::application::queries::{GetMeshDevice, ListMeshDevices};

/// GetMeshDevice Handler
pub struct GetMeshDeviceHandler {
    device_repo: Arc<dyn MeshDeviceRepositoryPort>,
}

impl GetMeshDeviceHandler {
    pub fn new(device_repo: Arc<dyn MeshDeviceRepositoryPort>) -> Self {
        Self { device_repo }
    }

    pub async fn handle(&self, query: GetMeshDevice) -> Result<MeshDeviceRecord, ApplicationError> {
        let record = self
            .device_repo
            .find_by_id(query.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("MeshDevice", query.id))?;

        ensure_owner(&record.user_id, query.acting_user_id.as_deref())?;

        Ok(record)
    }
}

/// ListMeshDevices Handler
pub struct ListMeshDevicesHandler {
    device_repo: Arc<dyn MeshDeviceRepositoryPort>,
}

impl ListMeshDevicesHandler {
    pub fn new(device_repo: Arc<dyn MeshDeviceRepositoryPort>) -> Self {
        Self { device_repo }
    }

    pub async fn handle(
        &self,
        query: ListMeshDevices,
    ) -> Result<Vec<MeshDeviceRecord>, ApplicationError> {
        let records = self
            .device_repo
            .find_all(query.user_id.as_deref(), query.limit)
            .await?;

        Ok(records)
    }
}

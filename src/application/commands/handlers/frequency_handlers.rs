//! Blocked Frequency Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::ensure_owner;
use crate::application::commands::{
    CreateBlockedFrequency, DeleteBlockedFrequency, UpdateBlockedFrequency,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{BlockedFrequencyRecord, BlockedFrequencyRepositoryPort};

fn validate_frequency(frequency_hz: f64) -> Result<(), ApplicationError> {
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return Err(ApplicationError::validation(format!(
            "frequency_hz must be positive and finite, got {}",
            frequency_hz
        )));
    }
    Ok(())
}

/// CreateBlockedFrequency Handler
pub struct CreateBlockedFrequencyHandler {
    frequency_repo: Arc<dyn BlockedFrequencyRepositoryPort>,
}

impl CreateBlockedFrequencyHandler {
    pub fn new(frequency_repo: Arc<dyn BlockedFrequencyRepositoryPort>) -> Self {
        Self { frequency_repo }
    }

    pub async fn handle(
        &self,
        command: CreateBlockedFrequency,
    ) -> Result<BlockedFrequencyRecord, ApplicationError> {
        validate_frequency(command.frequency_hz)?;
        if command.user_id.trim().is_empty() {
            return Err(ApplicationError::validation("user_id must not be empty"));
        }
        if command.label.trim().is_empty() {
            return Err(ApplicationError::validation("label must not be empty"));
        }

        let now = Utc::now();
        let record = BlockedFrequencyRecord {
            id: Uuid::new_v4(),
            user_id: command.user_id,
            frequency_hz: command.frequency_hz,
            label: command.label,
            reason: command.reason,
            created_at: now,
            updated_at: now,
        };

        self.frequency_repo.save(&record).await?;

        tracing::info!(
            frequency_id = %record.id,
            frequency_hz = record.frequency_hz,
            "Blocked frequency created"
        );

        Ok(record)
    }
}

/// UpdateBlockedFrequency Handler
pub struct UpdateBlockedFrequencyHandler {
    frequency_repo: Arc<dyn BlockedFrequencyRepositoryPort>,
}

impl UpdateBlockedFrequencyHandler {
    pub fn new(frequency_repo: Arc<dyn BlockedFrequencyRepositoryPort>) -> Self {
        Self { frequency_repo }
    }

    pub async fn handle(
        &self,
        command: UpdateBlockedFrequency,
    ) -> Result<BlockedFrequencyRecord, ApplicationError> {
        let mut record = self
            .frequency_repo
            .find_by_id(command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("BlockedFrequency", command.id))?;

        ensure_owner(&record.user_id, command.acting_user_id.as_deref())?;

        if let Some(frequency_hz) = command.frequency_hz {
            validate_frequency(frequency_hz)?;
            record.frequency_hz = frequency_hz;
        }
        if let Some(label) = command.label {
            if label.trim().is_empty() {
                return Err(ApplicationError::validation("label must not be empty"));
            }
            record.label = label;
        }
        if let Some(reason) = command.reason {
            record.reason = Some(reason);
        }
        record.updated_at = Utc::now();

        self.frequency_repo.save(&record).await?;

        tracing::info!(
            frequency_id = %record.id,
            frequency_hz = record.frequency_hz,
            "Blocked frequency updated"
        );

        Ok(record)
    }
}

/// DeleteBlockedFrequency Handler
pub struct DeleteBlockedFrequencyHandler {
    frequency_repo: Arc<dyn BlockedFrequencyRepositoryPort>,
}

impl DeleteBlockedFrequencyHandler {
    pub fn new(frequency_repo: Arc<dyn BlockedFrequencyRepositoryPort>) -> Self {
        Self { frequency_repo }
    }

    pub async fn handle(&self, command: DeleteBlockedFrequency) -> Result<(), ApplicationError> {
        let record = self
            .frequency_repo
            .find_by_id(command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("BlockedFrequency", command.id))?;

        ensure_owner(&record.user_id, command.acting_user_id.as_deref())?;

        self.frequency_repo.delete(command.id).await?;

        tracing::info!(frequency_id = %command.id, "Blocked frequency deleted");

        Ok(())
    }
}

//! Blocked Frequency Query Handlers

use std::sync::Arc;

use crate::application::commands::handlers::ensure_owner;
use crate::application::error::ApplicationError;
use crate::application::ports::{BlockedFrequencyRecord, BlockedFrequencyRepositoryPort};
use crate::application::queries::{GetBlockedFrequency, ListBlockedFrequencies};

/// GetBlockedFrequency Handler
pub struct GetBlockedFrequencyHandler {
    frequency_repo: Arc<dyn BlockedFrequencyRepositoryPort>,
}

impl GetBlockedFrequencyHandler {
    pub fn new(frequency_repo: Arc<dyn BlockedFrequencyRepositoryPort>) -> Self {
        Self { frequency_repo }
    }

    pub async fn handle(
        &self,
        query: GetBlockedFrequency,
    ) -> Result<BlockedFrequencyRecord, ApplicationError> {
        let record = self
            .frequency_repo
            .find_by_id(query.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("BlockedFrequency", query.id))?;

        ensure_owner(&record.user_id, query.acting_user_id.as_deref())?;

        Ok(record)
    }
}

/// ListBlockedFrequencies Handler
pub struct ListBlockedFrequenciesHandler {
    frequency_repo: Arc<dyn BlockedFrequencyRepositoryPort>,
}

impl ListBlockedFrequenciesHandler {
    pub fn new(frequency_repo: Arc<dyn BlockedFrequencyRepositoryPort>) -> Self {
        Self { frequency_repo }
    }

    pub async fn handle(
        &self,
        query: ListBlockedFrequencies,
    ) -> Result<Vec<BlockedFrequencyRecord>, ApplicationError> {
        let records = self
            .frequency_repo
            .find_all(query.user_id.as_deref(), query.limit)
            .await?;

        Ok(records)
    }
}

//! Threat Event Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{ThreatEventRecord, ThreatEventRepositoryPort};
use crate::application::queries::{GetThreatEvent, ListThreatEvents};

/// GetThreatEvent Handler
pub struct GetThreatEventHandler {
    threat_repo: Arc<dyn ThreatEventRepositoryPort>,
}

impl GetThreatEventHandler {
    pub fn new(threat_repo: Arc<dyn ThreatEventRepositoryPort>) -> Self {
        Self { threat_repo }
    }

    pub async fn handle(&self, query: GetThreatEvent) -> Result<ThreatEventRecord, ApplicationError> {
        let record = self
            .threat_repo
            .find_by_id(query.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("ThreatEvent", query.id))?;

        Ok(record)
    }
}

/// ListThreatEvents Handler
pub struct ListThreatEventsHandler {
    threat_repo: Arc<dyn ThreatEventRepositoryPort>,
}

impl ListThreatEventsHandler {
    pub fn new(threat_repo: Arc<dyn ThreatEventRepositoryPort>) -> Self {
        Self { threat_repo }
    }

    pub async fn handle(
        &self,
        query: ListThreatEvents,
    ) -> Result<Vec<ThreatEventRecord>, ApplicationError> {
        let records = self.threat_repo.find_recent(query.limit).await?;

        Ok(records)
    }
}

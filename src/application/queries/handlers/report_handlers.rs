//! Forensic Report Query Handlers

use std::sync::Arc;

use crate::application::commands::handlers::ensure_owner;
use crate::application::error::ApplicationError;
use crate::application::ports::{ForensicReportRecord, ForensicReportRepositoryPort};
use crate::application::queries::{GetForensicReport, ListForensicReports};

/// GetForensicReport Handler
pub struct GetForensicReportHandler {
    report_repo: Arc<dyn ForensicReportRepositoryPort>,
}

impl GetForensicReportHandler {
    pub fn new(report_repo: Arc<dyn ForensicReportRepositoryPort>) -> Self {
        Self { report_repo }
    }

    pub async fn handle(
        &self,
        query: GetForensicReport,
    ) -> Result<ForensicReportRecord, ApplicationError> {
        let record = self
            .report_repo
            .find_by_id(query.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("ForensicReport", query.id))?;

        ensure_owner(&record.user_id, query.acting_user_id.as_deref())?;

        Ok(record)
    }
}

/// ListForensicReports Handler
pub struct ListForensicReportsHandler {
    report_repo: Arc<dyn ForensicReportRepositoryPort>,
}

impl ListForensicReportsHandler {
    pub fn new(report_repo: Arc<dyn ForensicReportRepositoryPort>) -> Self {
        Self { report_repo }
    }

    pub async fn handle(
        &self,
        query: ListForensicReports,
    ) -> Result<Vec<ForensicReportRecord>, ApplicationError> {
        let records = self
            .report_repo
            .find_all(query.user_id.as_deref(), query.limit)
            .await?;

        Ok(records)
    }
}

//! Forensic Report Command Handlers

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use super::ensure_owner;
use crate::application::commands::{CreateForensicReport, DeleteForensicReport, UpdateForensicReport};
use crate::application::error::ApplicationError;
use crate::application::ports::{ForensicReportRecord, ForensicReportRepositoryPort, ReportStatus};
use crate::domain::spectrum::ThreatType;

fn validate_severity(severity: i32) -> Result<(), ApplicationError> {
    if !(1..=5).contains(&severity) {
        return Err(ApplicationError::validation(format!(
            "severity must be in 1..=5, got {}",
            severity
        )));
    }
    Ok(())
}

/// CreateForensicReport Handler
pub struct CreateForensicReportHandler {
    report_repo: Arc<dyn ForensicReportRepositoryPort>,
}

impl CreateForensicReportHandler {
    pub fn new(report_repo: Arc<dyn ForensicReportRepositoryPort>) -> Self {
        Self { report_repo }
    }

    pub async fn handle(
        &self,
        command: CreateForensicReport,
    ) -> Result<ForensicReportRecord, ApplicationError> {
        if command.user_id.trim().is_empty() {
            return Err(ApplicationError::validation("user_id must not be empty"));
        }
        if command.title.trim().is_empty() {
            return Err(ApplicationError::validation("title must not be empty"));
        }
        if ThreatType::from_str(&command.threat_type).is_none() {
            return Err(ApplicationError::validation(format!(
                "Invalid threat_type: {}",
                command.threat_type
            )));
        }
        let severity = command.severity.unwrap_or(1);
        validate_severity(severity)?;

        let now = Utc::now();
        let record = ForensicReportRecord {
            id: Uuid::new_v4(),
            user_id: command.user_id,
            title: command.title,
            summary: command.summary,
            threat_type: command.threat_type,
            severity,
            status: ReportStatus::Open,
            created_at: now,
            updated_at: now,
        };

        self.report_repo.save(&record).await?;

        tracing::info!(
            report_id = %record.id,
            threat_type = %record.threat_type,
            severity = record.severity,
            "Forensic report created"
        );

        Ok(record)
    }
}

/// UpdateForensicReport Handler
pub struct UpdateForensicReportHandler {
    report_repo: Arc<dyn ForensicReportRepositoryPort>,
}

impl UpdateForensicReportHandler {
    pub fn new(report_repo: Arc<dyn ForensicReportRepositoryPort>) -> Self {
        Self { report_repo }
    }

    pub async fn handle(
        &self,
        command: UpdateForensicReport,
    ) -> Result<ForensicReportRecord, ApplicationError> {
        let mut record = self
            .report_repo
            .find_by_id(command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("ForensicReport", command.id))?;

        ensure_owner(&record.user_id, command.acting_user_id.as_deref())?;

        if let Some(title) = command.title {
            if title.trim().is_empty() {
                return Err(ApplicationError::validation("title must not be empty"));
            }
            record.title = title;
        }
        if let Some(summary) = command.summary {
            record.summary = summary;
        }
        if let Some(severity) = command.severity {
            validate_severity(severity)?;
            record.severity = severity;
        }
        if let Some(status_str) = command.status {
            let status = ReportStatus::from_str(&status_str).ok_or_else(|| {
                ApplicationError::validation(format!("Invalid report status: {}", status_str))
            })?;
            record.status = status;
        }
        record.updated_at = Utc::now();

        self.report_repo.save(&record).await?;

        tracing::info!(
            report_id = %record.id,
            status = record.status.as_str(),
            "Forensic report updated"
        );

        Ok(record)
    }
}

/// DeleteForensicReport Handler
pub struct DeleteForensicReportHandler {
    report_repo: Arc<dyn ForensicReportRepositoryPort>,
}

impl DeleteForensicReportHandler {
    pub fn new(report_repo: Arc<dyn ForensicReportRepositoryPort>) -> Self {
        Self { report_repo }
    }

    pub async fn handle(&self, command: DeleteForensicReport) -> Result<(), ApplicationError> {
        let record = self
            .report_repo
            .find_by_id(command.id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("ForensicReport", command.id))?;

        ensure_owner(&record.user_id, command.acting_user_id.as_deref())?;

        self.report_repo.delete(command.id).await?;

        tracing::info!(report_id = %command.id, title = %record.title, "Forensic report deleted");

        Ok(())
    }
}

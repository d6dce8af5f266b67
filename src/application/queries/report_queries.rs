//! Forensic Report Queries

use uuid::Uuid;

/// 获取取证报告详情查询
#[derive(Debug, Clone)]
pub struct GetForensicReport {
    pub id: Uuid,
    pub acting_user_id: Option<String>,
}

/// 列出取证报告查询
#[derive(Debug, Clone)]
pub struct ListForensicReports {
    pub user_id: Option<String>,
    pub limit: Option<usize>,
}

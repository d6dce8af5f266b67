//! Threat Event Queries

use uuid::Uuid;

/// 获取威胁事件详情查询
#[derive(Debug, Clone)]
pub struct GetThreatEvent {
    pub id: Uuid,
}

/// 列出最近威胁事件查询
#[derive(Debug, Clone)]
pub struct ListThreatEvents {
    pub limit: Option<usize>,
}

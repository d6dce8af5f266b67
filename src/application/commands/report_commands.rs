//! Forensic Report Commands

use uuid::Uuid;

/// 创建取证报告命令
#[derive(Debug, Clone)]
pub struct CreateForensicReport {
    pub user_id: String,
    pub title: String,
    pub summary: String,
    pub threat_type: String,
    /// 严重度 1-5，缺省为 1
    pub severity: Option<i32>,
}

/// 更新取证报告命令
#[derive(Debug, Clone)]
pub struct UpdateForensicReport {
    pub id: Uuid,
    pub acting_user_id: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub severity: Option<i32>,
    /// 字符串形式的目标状态（open / closed / archived）
    pub status: Option<String>,
}

/// 删除取证报告命令
#[derive(Debug, Clone)]
pub struct DeleteForensicReport {
    pub id: Uuid,
    pub acting_user_id: Option<String>,
}

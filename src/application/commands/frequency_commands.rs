//! Blocked Frequency Commands

use uuid::Uuid;

/// 创建屏蔽频点命令
#[derive(Debug, Clone)]
pub struct CreateBlockedFrequency {
    pub user_id: String,
    pub frequency_hz: f64,
    pub label: String,
    pub reason: Option<String>,
}

/// 更新屏蔽频点命令
///
/// `acting_user_id` 为请求方用户 ID，提供时校验资源归属
#[derive(Debug, Clone)]
pub struct UpdateBlockedFrequency {
    pub id: Uuid,
    pub acting_user_id: Option<String>,
    pub frequency_hz: Option<f64>,
    pub label: Option<String>,
    pub reason: Option<String>,
}

/// 删除屏蔽频点命令
#[derive(Debug, Clone)]
pub struct DeleteBlockedFrequency {
    pub id: Uuid,
    pub acting_user_id: Option<String>,
}

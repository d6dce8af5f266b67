//! Blocked Frequency Queries

use uuid::Uuid;

/// 获取屏蔽频点详情查询
#[derive(Debug, Clone)]
pub struct GetBlockedFrequency {
    pub id: Uuid,
    pub acting_user_id: Option<String>,
}

/// 列出屏蔽频点查询
#[derive(Debug, Clone)]
pub struct ListBlockedFrequencies {
    pub user_id: Option<String>,
    pub limit: Option<usize>,
}

//! Mesh Device Commands

use uuid::Uuid;

/// 注册网状设备命令（初始状态 pairing）
#[derive(Debug, Clone)]
pub struct RegisterMeshDevice {
    pub user_id: String,
    pub name: String,
    pub platform: String,
}

/// 更新网状设备命令
///
/// `status` 为字符串形式的目标状态，由 Handler 解析校验。
/// 状态切换为 online 时刷新 last_seen_at。
#[derive(Debug, Clone)]
pub struct UpdateMeshDevice {
    pub id: Uuid,
    pub acting_user_id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
}

/// 移除网状设备命令
#[derive(Debug, Clone)]
pub struct RemoveMeshDevice {
    pub id: Uuid,
    pub acting_user_id: Option<String>,
}

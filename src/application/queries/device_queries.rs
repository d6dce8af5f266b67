//! Mesh Device Queries

use uuid::Uuid;

/// 获取网状设备详情查询
#[derive(Debug, Clone)]
pub struct GetMeshDevice {
    pub id: Uuid,
    pub acting_user_id: Option<String>,
}

/// 列出网状设备查询
#[derive(Debug, Clone)]
pub struct ListMeshDevices {
    pub user_id: Option<String>,
    pub limit: Option<usize>,
}

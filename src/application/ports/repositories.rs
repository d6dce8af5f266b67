//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Blocked Frequency Repository
// ============================================================================

/// 屏蔽频点实体（用于持久化）
#[derive(Debug, Clone)]
pub struct BlockedFrequencyRecord {
    pub id: Uuid,
    /// 所属用户
    pub user_id: String,
    pub frequency_hz: f64,
    pub label: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Blocked Frequency Repository Port
#[async_trait]
pub trait BlockedFrequencyRepositoryPort: Send + Sync {
    /// 保存（插入或更新）
    async fn save(&self, record: &BlockedFrequencyRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlockedFrequencyRecord>, RepositoryError>;

    /// 列出，可按所属用户过滤
    async fn find_all(
        &self,
        user_id: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<BlockedFrequencyRecord>, RepositoryError>;

    /// 删除
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// Mesh Device Repository
// ============================================================================

/// 网状设备状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    /// 配对中
    Pairing,
    /// 在线
    Online,
    /// 离线
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Pairing => "pairing",
            DeviceStatus::Online => "online",
            DeviceStatus::Offline => "offline",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pairing" => Some(DeviceStatus::Pairing),
            "online" => Some(DeviceStatus::Online),
            "offline" => Some(DeviceStatus::Offline),
            _ => None,
        }
    }
}

impl Default for DeviceStatus {
    fn default() -> Self {
        DeviceStatus::Pairing
    }
}

/// 网状设备实体（用于持久化）
#[derive(Debug, Clone)]
pub struct MeshDeviceRecord {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub platform: String,
    pub status: DeviceStatus,
    pub last_seen_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Mesh Device Repository Port
#[async_trait]
pub trait MeshDeviceRepositoryPort: Send + Sync {
    async fn save(&self, record: &MeshDeviceRecord) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MeshDeviceRecord>, RepositoryError>;

    async fn find_all(
        &self,
        user_id: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<MeshDeviceRecord>, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// Forensic Report Repository
// ============================================================================

/// 取证报告状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    /// 打开
    Open,
    /// 已关闭
    Closed,
    /// 已归档
    Archived,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Open => "open",
            ReportStatus::Closed => "closed",
            ReportStatus::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "open" => Some(ReportStatus::Open),
            "closed" => Some(ReportStatus::Closed),
            "archived" => Some(ReportStatus::Archived),
            _ => None,
        }
    }
}

impl Default for ReportStatus {
    fn default() -> Self {
        ReportStatus::Open
    }
}

/// 取证报告实体（用于持久化）
#[derive(Debug, Clone)]
pub struct ForensicReportRecord {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub summary: String,
    pub threat_type: String,
    /// 严重度 1-5
    pub severity: i32,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Forensic Report Repository Port
#[async_trait]
pub trait ForensicReportRepositoryPort: Send + Sync {
    async fn save(&self, record: &ForensicReportRecord) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ForensicReportRecord>, RepositoryError>;

    async fn find_all(
        &self,
        user_id: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<ForensicReportRecord>, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// Threat Event Repository
// ============================================================================

/// 威胁事件实体（扫描命中落库，只插入不更新）
#[derive(Debug, Clone)]
pub struct ThreatEventRecord {
    pub id: Uuid,
    pub frequency_hz: f64,
    pub label: String,
    pub threat_type: String,
    pub power_db: f64,
    pub beam_width_hz: f64,
    /// 检出的脉冲间隔数
    pub pulse_count: usize,
    pub detected_at: DateTime<Utc>,
}

/// Threat Event Repository Port
#[async_trait]
pub trait ThreatEventRepositoryPort: Send + Sync {
    async fn save(&self, record: &ThreatEventRecord) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ThreatEventRecord>, RepositoryError>;

    /// 按检出时间倒序列出
    async fn find_recent(&self, limit: Option<usize>)
        -> Result<Vec<ThreatEventRecord>, RepositoryError>;
}

// ============================================================================
// Sonic Deployment Repository
// ============================================================================

/// 部署状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentStatus {
    /// 生效中
    Active,
    /// 已停用
    Deactivated,
}

impl DeploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Active => "active",
            DeploymentStatus::Deactivated => "deactivated",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(DeploymentStatus::Active),
            "deactivated" => Some(DeploymentStatus::Deactivated),
            _ => None,
        }
    }
}

impl Default for DeploymentStatus {
    fn default() -> Self {
        DeploymentStatus::Active
    }
}

/// 声波干扰部署实体（用于持久化）
#[derive(Debug, Clone)]
pub struct SonicDeploymentRecord {
    pub id: Uuid,
    pub target_frequency: f64,
    pub disruptor_frequency: f64,
    pub power_level: f64,
    pub modulation: String,
    /// 有效度（百分比）
    pub effectiveness: f64,
    pub threat_type: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: DeploymentStatus,
    pub deployed_at: DateTime<Utc>,
    pub deactivated_at: Option<DateTime<Utc>>,
}

/// Sonic Deployment Repository Port
#[async_trait]
pub trait SonicDeploymentRepositoryPort: Send + Sync {
    async fn save(&self, record: &SonicDeploymentRecord) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SonicDeploymentRecord>, RepositoryError>;

    /// 列出生效中的部署，按部署时间倒序
    async fn find_active(&self) -> Result<Vec<SonicDeploymentRecord>, RepositoryError>;

    /// 最近一次部署（不论状态）
    async fn find_latest(&self) -> Result<Option<SonicDeploymentRecord>, RepositoryError>;

    /// 停用所有生效中的部署，返回停用数量
    async fn deactivate_all(&self, at: DateTime<Utc>) -> Result<usize, RepositoryError>;
}

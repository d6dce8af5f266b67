//! Sonic Deployment Commands

use uuid::Uuid;

/// 部署声波干扰命令
#[derive(Debug, Clone)]
pub struct DeployCountermeasure {
    pub target_frequency: f64,
    /// 功率 (0, 1]，缺省 0.8
    pub power_level: Option<f64>,
    pub threat_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// 停用单个部署命令
#[derive(Debug, Clone)]
pub struct DeactivateDeployment {
    pub deployment_id: Uuid,
}

/// 紧急停止命令（停用全部生效中的部署）
#[derive(Debug, Clone)]
pub struct EmergencyStopAll;

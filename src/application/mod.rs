//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（各 Repository 抽象）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Deployment commands
    DeactivateDeployment,
    DeployCountermeasure,
    EmergencyStopAll,
    // Device commands
    RegisterMeshDevice,
    RemoveMeshDevice,
    UpdateMeshDevice,
    // Frequency commands
    CreateBlockedFrequency,
    DeleteBlockedFrequency,
    UpdateBlockedFrequency,
    // Report commands
    CreateForensicReport,
    DeleteForensicReport,
    UpdateForensicReport,
    // Spectrum commands
    RunSpectrumScan,
    // Handlers
    handlers::{
        CreateBlockedFrequencyHandler, CreateForensicReportHandler, DeactivateDeploymentHandler,
        DeleteBlockedFrequencyHandler, DeleteForensicReportHandler, DeployCountermeasureHandler,
        EmergencyStopAllHandler, RegisterMeshDeviceHandler, RemoveMeshDeviceHandler,
        RunSpectrumScanHandler, ScanDetection, UpdateBlockedFrequencyHandler,
        UpdateForensicReportHandler, UpdateMeshDeviceHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    BlockedFrequencyRecord, BlockedFrequencyRepositoryPort, DeploymentStatus, DeviceStatus,
    ForensicReportRecord, ForensicReportRepositoryPort, MeshDeviceRecord, MeshDeviceRepositoryPort,
    ReportStatus, RepositoryError, SonicDeploymentRecord, SonicDeploymentRepositoryPort,
    ThreatEventRecord, ThreatEventRepositoryPort,
};

pub use queries::{
    // Deployment queries
    GetDeployment,
    GetSystemStatus,
    ListActiveDeployments,
    // Device queries
    GetMeshDevice,
    ListMeshDevices,
    // Frequency queries
    GetBlockedFrequency,
    ListBlockedFrequencies,
    // Report queries
    GetForensicReport,
    ListForensicReports,
    // Threat queries
    GetThreatEvent,
    ListThreatEvents,
    // Handlers
    handlers::{
        GetBlockedFrequencyHandler, GetDeploymentHandler, GetForensicReportHandler,
        GetMeshDeviceHandler, GetSystemStatusHandler, GetThreatEventHandler,
        ListActiveDeploymentsHandler, ListBlockedFrequenciesHandler, ListForensicReportsHandler,
        ListMeshDevicesHandler, ListThreatEventsHandler, SystemStatus,
    },
};

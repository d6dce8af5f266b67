//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateBlockedFrequencyHandler, CreateForensicReportHandler, DeactivateDeploymentHandler,
    DeleteBlockedFrequencyHandler, DeleteForensicReportHandler, DeployCountermeasureHandler,
    EmergencyStopAllHandler, RegisterMeshDeviceHandler, RemoveMeshDeviceHandler,
    RunSpectrumScanHandler, UpdateBlockedFrequencyHandler, UpdateForensicReportHandler,
    UpdateMeshDeviceHandler,
    // Query handlers
    GetBlockedFrequencyHandler, GetDeploymentHandler, GetForensicReportHandler,
    GetMeshDeviceHandler, GetSystemStatusHandler, GetThreatEventHandler,
    ListActiveDeploymentsHandler, ListBlockedFrequenciesHandler, ListForensicReportsHandler,
    ListMeshDevicesHandler, ListThreatEventsHandler,
    // Ports
    BlockedFrequencyRepositoryPort, ForensicReportRepositoryPort, MeshDeviceRepositoryPort,
    SonicDeploymentRepositoryPort, ThreatEventRepositoryPort,
};
use crate::domain::spectrum::ScanConfig;
use crate::infrastructure::events::EventPublisher;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub frequency_repo: Arc<dyn BlockedFrequencyRepositoryPort>,
    pub device_repo: Arc<dyn MeshDeviceRepositoryPort>,
    pub report_repo: Arc<dyn ForensicReportRepositoryPort>,
    pub threat_repo: Arc<dyn ThreatEventRepositoryPort>,
    pub deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>,
    pub event_publisher: Arc<EventPublisher>,

    /// 客户端安装包目录
    pub downloads_dir: PathBuf,

    // ========== Command Handlers ==========
    pub create_frequency_handler: CreateBlockedFrequencyHandler,
    pub update_frequency_handler: UpdateBlockedFrequencyHandler,
    pub delete_frequency_handler: DeleteBlockedFrequencyHandler,
    pub register_device_handler: RegisterMeshDeviceHandler,
    pub update_device_handler: UpdateMeshDeviceHandler,
    pub remove_device_handler: RemoveMeshDeviceHandler,
    pub create_report_handler: CreateForensicReportHandler,
    pub update_report_handler: UpdateForensicReportHandler,
    pub delete_report_handler: DeleteForensicReportHandler,
    pub deploy_handler: DeployCountermeasureHandler,
    pub deactivate_deployment_handler: DeactivateDeploymentHandler,
    pub emergency_stop_handler: EmergencyStopAllHandler,
    pub run_scan_handler: RunSpectrumScanHandler,

    // ========== Query Handlers ==========
    pub get_frequency_handler: GetBlockedFrequencyHandler,
    pub list_frequencies_handler: ListBlockedFrequenciesHandler,
    pub get_device_handler: GetMeshDeviceHandler,
    pub list_devices_handler: ListMeshDevicesHandler,
    pub get_report_handler: GetForensicReportHandler,
    pub list_reports_handler: ListForensicReportsHandler,
    pub get_threat_handler: GetThreatEventHandler,
    pub list_threats_handler: ListThreatEventsHandler,
    pub get_deployment_handler: GetDeploymentHandler,
    pub list_deployments_handler: ListActiveDeploymentsHandler,
    pub system_status_handler: GetSystemStatusHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        frequency_repo: Arc<dyn BlockedFrequencyRepositoryPort>,
        device_repo: Arc<dyn MeshDeviceRepositoryPort>,
        report_repo: Arc<dyn ForensicReportRepositoryPort>,
        threat_repo: Arc<dyn ThreatEventRepositoryPort>,
        deployment_repo: Arc<dyn SonicDeploymentRepositoryPort>,
        event_publisher: Arc<EventPublisher>,
        scan_config: ScanConfig,
        downloads_dir: PathBuf,
    ) -> Self {
        let started_at = Utc::now();

        Self {
            // Ports
            frequency_repo: frequency_repo.clone(),
            device_repo: device_repo.clone(),
            report_repo: report_repo.clone(),
            threat_repo: threat_repo.clone(),
            deployment_repo: deployment_repo.clone(),
            event_publisher: event_publisher.clone(),

            downloads_dir,

            // Command handlers
            create_frequency_handler: CreateBlockedFrequencyHandler::new(frequency_repo.clone()),
            update_frequency_handler: UpdateBlockedFrequencyHandler::new(frequency_repo.clone()),
            delete_frequency_handler: DeleteBlockedFrequencyHandler::new(frequency_repo.clone()),
            register_device_handler: RegisterMeshDeviceHandler::new(device_repo.clone()),
            update_device_handler: UpdateMeshDeviceHandler::new(device_repo.clone()),
            remove_device_handler: RemoveMeshDeviceHandler::new(device_repo.clone()),
            create_report_handler: CreateForensicReportHandler::new(report_repo.clone()),
            update_report_handler: UpdateForensicReportHandler::new(report_repo.clone()),
            delete_report_handler: DeleteForensicReportHandler::new(report_repo.clone()),
            deploy_handler: DeployCountermeasureHandler::new(
                deployment_repo.clone(),
                event_publisher.clone(),
            ),
            deactivate_deployment_handler: DeactivateDeploymentHandler::new(
                deployment_repo.clone(),
                event_publisher.clone(),
            ),
            emergency_stop_handler: EmergencyStopAllHandler::new(
                deployment_repo.clone(),
                event_publisher.clone(),
            ),
            run_scan_handler: RunSpectrumScanHandler::new(
                threat_repo.clone(),
                event_publisher.clone(),
                scan_config,
            ),

            // Query handlers
            get_frequency_handler: GetBlockedFrequencyHandler::new(frequency_repo.clone()),
            list_frequencies_handler: ListBlockedFrequenciesHandler::new(frequency_repo.clone()),
            get_device_handler: GetMeshDeviceHandler::new(device_repo.clone()),
            list_devices_handler: ListMeshDevicesHandler::new(device_repo.clone()),
            get_report_handler: GetForensicReportHandler::new(report_repo.clone()),
            list_reports_handler: ListForensicReportsHandler::new(report_repo.clone()),
            get_threat_handler: GetThreatEventHandler::new(threat_repo.clone()),
            list_threats_handler: ListThreatEventsHandler::new(threat_repo.clone()),
            get_deployment_handler: GetDeploymentHandler::new(deployment_repo.clone()),
            list_deployments_handler: ListActiveDeploymentsHandler::new(deployment_repo.clone()),
            system_status_handler: GetSystemStatusHandler::new(
                deployment_repo.clone(),
                event_publisher.clone(),
                started_at,
            ),
        }
    }
}

//! Spectrum Scan Command Handler
//!
//! 扫描命中的目标频点落库为威胁事件，并向所有 WebSocket 客户端广播

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::RunSpectrumScan;
use crate::application::error::ApplicationError;
use crate::application::ports::{ThreatEventRecord, ThreatEventRepositoryPort};
use crate::domain::spectrum::{scan, ScanConfig, ThreatSignature};
use crate::infrastructure::events::EventPublisher;

/// 单次检出：威胁特征 + 落库的事件 ID
#[derive(Debug, Clone)]
pub struct ScanDetection {
    pub event_id: Uuid,
    pub signature: ThreatSignature,
}

/// RunSpectrumScan Handler
pub struct RunSpectrumScanHandler {
    threat_repo: Arc<dyn ThreatEventRepositoryPort>,
    event_publisher: Arc<EventPublisher>,
    config: ScanConfig,
}

impl RunSpectrumScanHandler {
    pub fn new(
        threat_repo: Arc<dyn ThreatEventRepositoryPort>,
        event_publisher: Arc<EventPublisher>,
        config: ScanConfig,
    ) -> Self {
        Self {
            threat_repo,
            event_publisher,
            config,
        }
    }

    pub async fn handle(
        &self,
        command: RunSpectrumScan,
    ) -> Result<Vec<ScanDetection>, ApplicationError> {
        let signatures = scan(&command.re, &command.im, command.sample_rate, &self.config)?;

        let mut detections = Vec::with_capacity(signatures.len());
        for signature in signatures {
            let record = ThreatEventRecord {
                id: Uuid::new_v4(),
                frequency_hz: signature.frequency_hz,
                label: signature.label.to_string(),
                threat_type: signature.threat_type.as_str().to_string(),
                power_db: signature.power_db,
                beam_width_hz: signature.beam_width_hz,
                pulse_count: signature.pulse_intervals_ms.len(),
                detected_at: Utc::now(),
            };

            self.threat_repo.save(&record).await?;
            self.event_publisher.publish_threat_detected(&record);

            tracing::info!(
                event_id = %record.id,
                frequency_hz = record.frequency_hz,
                label = %record.label,
                power_db = record.power_db,
                "Threat detected"
            );

            detections.push(ScanDetection {
                event_id: record.id,
                signature,
            });
        }

        Ok(detections)
    }
}

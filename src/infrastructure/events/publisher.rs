//! Event Publisher Implementation
//!
//! WebSocket 事件推送实现：全局广播通道 + 在线客户端注册表

use chrono::Utc;
use dashmap::DashSet;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::application::ports::{SonicDeploymentRecord, ThreatEventRecord};

/// WebSocket 事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum WsEvent {
    /// 频谱扫描命中目标频点
    ThreatDetected {
        event_id: Uuid,
        frequency_hz: f64,
        label: String,
        threat_type: String,
        power_db: f64,
        detected_at: String,
    },
    /// 客户端上报的威胁转发（不回发给上报方）
    ThreatAlert {
        reporter_id: Uuid,
        frequency_hz: f64,
        threat_type: String,
        intensity: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        latitude: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        longitude: Option<f64>,
        reported_at: String,
    },
    /// 新建干扰部署
    DeploymentCreated {
        deployment_id: Uuid,
        target_frequency: f64,
        disruptor_frequency: f64,
        modulation: String,
        effectiveness: f64,
    },
    /// 部署停用
    DeploymentDeactivated {
        deployment_id: Uuid,
    },
    /// 紧急停止
    EmergencyStop {
        stopped: usize,
    },
    /// 心跳响应（仅回发给发送方）
    Pong,
    /// 错误提示（仅回发给发送方）
    Error {
        message: String,
    },
}

/// 全局广播载荷
///
/// `origin` 标记事件来源客户端，转发时跳过来源方自身
#[derive(Debug, Clone)]
pub struct GlobalEvent {
    pub origin: Option<Uuid>,
    pub event: WsEvent,
}

impl GlobalEvent {
    /// 是否应投递给指定客户端（事件来源方自身除外）
    pub fn should_deliver_to(&self, client_id: Uuid) -> bool {
        self.origin != Some(client_id)
    }
}

/// 事件发布器
pub struct EventPublisher {
    /// 在线 WebSocket 客户端注册表
    clients: DashSet<Uuid>,
    /// 全局广播通道
    global_channel: broadcast::Sender<GlobalEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (global_tx, _) = broadcast::channel(100);
        Self {
            clients: DashSet::new(),
            global_channel: global_tx,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 注册客户端并订阅全局事件
    pub fn register_client(&self, client_id: Uuid) -> broadcast::Receiver<GlobalEvent> {
        self.clients.insert(client_id);
        self.global_channel.subscribe()
    }

    /// 取消注册客户端
    pub fn unregister_client(&self, client_id: Uuid) {
        self.clients.remove(&client_id);
    }

    /// 当前在线客户端数
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    /// 发布威胁检出事件（全局广播）
    pub fn publish_threat_detected(&self, record: &ThreatEventRecord) {
        self.publish_global(
            None,
            WsEvent::ThreatDetected {
                event_id: record.id,
                frequency_hz: record.frequency_hz,
                label: record.label.clone(),
                threat_type: record.threat_type.clone(),
                power_db: record.power_db,
                detected_at: record.detected_at.to_rfc3339(),
            },
        );
    }

    /// 转发客户端上报的威胁（全局广播，来源方除外）
    pub fn relay_threat_alert(
        &self,
        reporter_id: Uuid,
        frequency_hz: f64,
        threat_type: &str,
        intensity: f64,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) {
        self.publish_global(
            Some(reporter_id),
            WsEvent::ThreatAlert {
                reporter_id,
                frequency_hz,
                threat_type: threat_type.to_string(),
                intensity,
                latitude,
                longitude,
                reported_at: Utc::now().to_rfc3339(),
            },
        );
    }

    /// 发布部署创建事件（全局广播）
    pub fn publish_deployment_created(&self, record: &SonicDeploymentRecord) {
        self.publish_global(
            None,
            WsEvent::DeploymentCreated {
                deployment_id: record.id,
                target_frequency: record.target_frequency,
                disruptor_frequency: record.disruptor_frequency,
                modulation: record.modulation.clone(),
                effectiveness: record.effectiveness,
            },
        );
    }

    /// 发布部署停用事件（全局广播）
    pub fn publish_deployment_deactivated(&self, deployment_id: Uuid) {
        self.publish_global(None, WsEvent::DeploymentDeactivated { deployment_id });
    }

    /// 发布紧急停止事件（全局广播）
    pub fn publish_emergency_stop(&self, stopped: usize) {
        self.publish_global(None, WsEvent::EmergencyStop { stopped });
    }

    fn publish_global(&self, origin: Option<Uuid>, event: WsEvent) {
        if let Err(e) = self.global_channel.send(GlobalEvent { origin, event }) {
            tracing::debug!(error = %e, "Failed to publish event (no receivers)");
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_count() {
        let publisher = EventPublisher::new();
        assert_eq!(publisher.client_count(), 0);

        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let _rx_a = publisher.register_client(a);
        let _rx_b = publisher.register_client(b);
        assert_eq!(publisher.client_count(), 2);

        publisher.unregister_client(a);
        assert_eq!(publisher.client_count(), 1);
    }

    #[tokio::test]
    async fn test_relay_carries_origin() {
        let publisher = EventPublisher::new();
        let reporter = Uuid::new_v4();
        let mut rx = publisher.register_client(Uuid::new_v4());

        publisher.relay_threat_alert(reporter, 17_400.0, "ultrasonic", 0.8, None, None);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.origin, Some(reporter));
        match received.event {
            WsEvent::ThreatAlert {
                reporter_id,
                frequency_hz,
                ..
            } => {
                assert_eq!(reporter_id, reporter);
                assert_eq!(frequency_hz, 17_400.0);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_delivery_skips_origin() {
        let reporter = Uuid::new_v4();
        let other = Uuid::new_v4();
        let event = GlobalEvent {
            origin: Some(reporter),
            event: WsEvent::Pong,
        };

        assert!(!event.should_deliver_to(reporter));
        assert!(event.should_deliver_to(other));
    }

    #[test]
    fn test_delivery_without_origin_reaches_everyone() {
        let event = GlobalEvent {
            origin: None,
            event: WsEvent::EmergencyStop { stopped: 1 },
        };

        assert!(event.should_deliver_to(Uuid::new_v4()));
    }

    #[test]
    fn test_direct_reply_envelope() {
        let pong = serde_json::to_value(WsEvent::Pong).unwrap();
        assert_eq!(pong["event"], "pong");

        let error = serde_json::to_value(WsEvent::Error {
            message: "Invalid message".to_string(),
        })
        .unwrap();
        assert_eq!(error["event"], "error");
        assert_eq!(error["data"]["message"], "Invalid message");
    }

    #[tokio::test]
    async fn test_emergency_stop_broadcast() {
        let publisher = EventPublisher::new();
        let mut rx = publisher.register_client(Uuid::new_v4());

        publisher.publish_emergency_stop(3);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.origin, None);
        let json = serde_json::to_value(&received.event).unwrap();
        assert_eq!(json["event"], "emergency_stop");
        assert_eq!(json["data"]["stopped"], 3);
    }
}

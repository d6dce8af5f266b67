//! WebSocket Handler
//!
//! 威胁情报实时通道：
//! - 下行：扫描检出、部署事件、其他客户端上报的威胁转发
//! - 上行：threat_report（转发给其他客户端）、ping（心跳）

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::infrastructure::events::WsEvent;
use crate::infrastructure::http::state::AppState;

/// 客户端上行消息
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    /// 威胁上报（转发给其他所有客户端）
    ThreatReport {
        frequency_hz: f64,
        threat_type: String,
        intensity: f64,
        latitude: Option<f64>,
        longitude: Option<f64>,
    },
    /// 心跳
    Ping,
}

/// WebSocket 连接处理
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let client_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();

    // 注册客户端并订阅全局事件
    let mut event_rx = state.event_publisher.register_client(client_id);

    // 直发通道：pong / error 响应
    let (direct_tx, mut direct_rx) = mpsc::channel::<String>(32);

    tracing::info!(client_id = %client_id, "WebSocket connected");

    // 下行任务：全局事件 + 直发响应
    let forward_task = tokio::spawn(async move {
        loop {
            let json = tokio::select! {
                event = event_rx.recv() => {
                    let Ok(global) = event else { break };
                    // 转发时跳过事件来源方自身
                    if !global.should_deliver_to(client_id) {
                        continue;
                    }
                    match serde_json::to_string(&global.event) {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to serialize event");
                            continue;
                        }
                    }
                }
                direct = direct_rx.recv() => {
                    let Some(json) = direct else { break };
                    json
                }
            };

            if let Err(e) = sender.send(Message::Text(json)).await {
                tracing::debug!(
                    client_id = %client_id,
                    error = %e,
                    "Failed to send WebSocket message"
                );
                break;
            }
        }
    });

    // 上行任务：解析客户端消息
    let publisher = state.event_publisher.clone();
    let receive_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::ThreatReport {
                        frequency_hz,
                        threat_type,
                        intensity,
                        latitude,
                        longitude,
                    }) => {
                        tracing::info!(
                            client_id = %client_id,
                            frequency_hz = frequency_hz,
                            threat_type = %threat_type,
                            "Threat report relayed"
                        );
                        publisher.relay_threat_alert(
                            client_id,
                            frequency_hz,
                            &threat_type,
                            intensity,
                            latitude,
                            longitude,
                        );
                    }
                    Ok(ClientMessage::Ping) => {
                        if send_direct(&direct_tx, &WsEvent::Pong).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::debug!(client_id = %client_id, error = %e, "Malformed message");
                        let error = WsEvent::Error {
                            message: format!("Invalid message: {}", e),
                        };
                        if send_direct(&direct_tx, &error).await.is_err() {
                            break;
                        }
                    }
                },
                Ok(Message::Ping(_)) => {
                    // 协议层 pong 由 axum 自动响应
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(client_id = %client_id, "WebSocket closed by client");
                    break;
                }
                Err(e) => {
                    tracing::debug!(client_id = %client_id, error = %e, "WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });

    // 等待任一任务完成
    tokio::select! {
        _ = forward_task => {}
        _ = receive_task => {}
    }

    // 清理
    state.event_publisher.unregister_client(client_id);
    tracing::info!(client_id = %client_id, "WebSocket disconnected");
}

/// 直发响应（与广播事件共用 `event`/`data` 信封）
async fn send_direct(tx: &mpsc::Sender<String>, event: &WsEvent) -> Result<(), ()> {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize direct reply");
            return Ok(());
        }
    };
    tx.send(json).await.map_err(|_| ())
}

//! Sentra - 频谱威胁监测与声波反制系统
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Spectrum Context: 频谱扫描与威胁特征识别
//! - Countermeasure Context: 声波干扰参数规划
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + WebSocket
//! - Persistence: SQLite 存储
//! - Events: WebSocket 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};

//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 频谱扫描配置
    #[serde(default)]
    pub spectrum: SpectrumConfig,

    /// 客户端下载配置
    #[serde(default)]
    pub downloads: DownloadsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            spectrum: SpectrumConfig::default(),
            downloads: DownloadsConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5090
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/sentra.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 频谱扫描配置
#[derive(Debug, Clone, Deserialize)]
pub struct SpectrumConfig {
    /// 检测阈值（dBFS），目标频点功率达到该值判定为命中
    #[serde(default = "default_threshold_db")]
    pub threshold_db: f64,

    /// 单次扫描允许的最大采样点数
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

fn default_threshold_db() -> f64 {
    -45.0
}

fn default_max_samples() -> usize {
    1024 * 1024
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            threshold_db: default_threshold_db(),
            max_samples: default_max_samples(),
        }
    }
}

/// 客户端下载配置
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadsConfig {
    /// 客户端安装包存储目录，按平台分子目录
    #[serde(default = "default_downloads_dir")]
    pub dir: PathBuf,
}

fn default_downloads_dir() -> PathBuf {
    PathBuf::from("data/downloads")
}

impl Default for DownloadsConfig {
    fn default() -> Self {
        Self {
            dir: default_downloads_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5090);
        assert_eq!(config.database.path, "data/sentra.db");
        assert_eq!(config.spectrum.threshold_db, -45.0);
        assert_eq!(config.spectrum.max_samples, 1024 * 1024);
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5090");
    }

    #[test]
    fn test_database_url() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url(), "sqlite:data/sentra.db?mode=rwc");
    }
}

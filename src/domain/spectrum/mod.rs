//! Spectrum Context - 频谱扫描上下文
//!
//! 对复数采样缓冲区做一次前向 FFT，在固定目标频点表上做阈值比对，
//! 产出威胁签名（频点、半功率束宽、脉冲间隔）。
//! 扫描是无状态的：每次调用独立，不保留检测器状态。

mod scanner;
mod targets;

pub use scanner::{scan, ScanConfig, SpectrumError, ThreatSignature};
pub use targets::{ThreatType, TargetFrequency, TARGET_FREQUENCIES};

//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Spectrum Context: 频谱扫描与威胁签名
//! - Countermeasure Context: 干扰参数规划

pub mod countermeasure;
pub mod spectrum;

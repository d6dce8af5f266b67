//! Spectrum Scan Commands

/// 执行频谱扫描命令
///
/// `re` / `im` 为等长的复数样本缓冲，纯实信号传全零虚部即可
#[derive(Debug, Clone)]
pub struct RunSpectrumScan {
    pub re: Vec<f64>,
    pub im: Vec<f64>,
    pub sample_rate: f64,
}

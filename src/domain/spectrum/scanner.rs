//! 频谱阈值扫描
//!
//! 处理流程：
//! 1. 对整个缓冲区做一次前向 FFT，逐 bin 取幅度平方
//! 2. 归一化为 dBFS（满量程解析单音为 0 dBFS）
//! 3. 在固定目标频点表上取最近 bin 做静态阈值比对
//! 4. 命中时围绕该 bin 做对称半功率搜索得到束宽
//! 5. 时域包络上升沿检测得到脉冲间隔
//!
//! 没有自适应阈值、没有噪底估计、没有跨调用状态。

use num_complex::Complex64;
use rustfft::FftPlanner;

use super::targets::{ThreatType, TARGET_FREQUENCIES};

/// 功率谱下限保护，避免 log10(0)
const POWER_FLOOR: f64 = 1e-12;

/// 脉冲边沿去抖间隔（秒）
const PULSE_DEBOUNCE_SECS: f64 = 0.005;

/// 扫描配置
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// 检测阈值（dBFS）
    pub threshold_db: f64,
    /// 允许的最大采样点数
    pub max_samples: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold_db: -45.0,
            max_samples: 1024 * 1024,
        }
    }
}

/// 威胁签名
///
/// `frequency_hz` 是查表得到的目标频率，不是测量值。
#[derive(Debug, Clone)]
pub struct ThreatSignature {
    pub frequency_hz: f64,
    pub label: &'static str,
    pub threat_type: ThreatType,
    /// 目标 bin 的功率（dBFS）
    pub power_db: f64,
    /// 半功率束宽（Hz）
    pub beam_width_hz: f64,
    /// 相邻脉冲间隔（毫秒）
    pub pulse_intervals_ms: Vec<f64>,
}

/// 扫描错误
#[derive(Debug, thiserror::Error)]
pub enum SpectrumError {
    #[error("Sample buffer is empty")]
    EmptyBuffer,

    #[error("Mismatched buffer lengths: re={re_len}, im={im_len}")]
    MismatchedBuffers { re_len: usize, im_len: usize },

    #[error("Sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("Buffer too large: {len} samples (max {max})")]
    BufferTooLarge { len: usize, max: usize },
}

/// 对复数采样缓冲区执行一次阈值扫描
///
/// 同步且有界：计算量与缓冲区长度成正比，上限由 `config.max_samples` 约束。
pub fn scan(
    re: &[f64],
    im: &[f64],
    sample_rate: f64,
    config: &ScanConfig,
) -> Result<Vec<ThreatSignature>, SpectrumError> {
    if re.is_empty() {
        return Err(SpectrumError::EmptyBuffer);
    }
    if re.len() != im.len() {
        return Err(SpectrumError::MismatchedBuffers {
            re_len: re.len(),
            im_len: im.len(),
        });
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(SpectrumError::InvalidSampleRate(sample_rate));
    }
    if re.len() > config.max_samples {
        return Err(SpectrumError::BufferTooLarge {
            len: re.len(),
            max: config.max_samples,
        });
    }

    let n = re.len();
    let resolution = sample_rate / n as f64;

    let mut buffer: Vec<Complex64> = re
        .iter()
        .zip(im.iter())
        .map(|(&r, &i)| Complex64::new(r, i))
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    // 幅度平方，按 n^2 归一化后满量程解析单音为 0 dBFS
    let power: Vec<f64> = buffer.iter().map(|c| c.norm_sqr()).collect();
    let norm = (n as f64) * (n as f64);

    let half = n / 2;
    let mut signatures = Vec::new();
    let mut intervals: Option<Vec<f64>> = None;

    for target in TARGET_FREQUENCIES {
        let bin = (target.frequency_hz / resolution).round() as usize;
        if bin == 0 || bin >= half.max(1) {
            // 目标频点低于分辨率或超出 Nyquist
            continue;
        }

        let power_db = 10.0 * (power[bin] / norm + POWER_FLOOR).log10();
        if power_db < config.threshold_db {
            continue;
        }

        // 脉冲间隔对整个缓冲区只算一次
        let pulses = intervals
            .get_or_insert_with(|| pulse_intervals(re, im, sample_rate))
            .clone();

        signatures.push(ThreatSignature {
            frequency_hz: target.frequency_hz,
            label: target.label,
            threat_type: target.threat_type,
            power_db,
            beam_width_hz: half_power_width(&power, bin, half, resolution),
            pulse_intervals_ms: pulses,
        });
    }

    Ok(signatures)
}

/// 对称半功率搜索
///
/// 从目标 bin 向两侧扩展，直到功率跌破峰值一半，束宽 = bin 跨度 × 频率分辨率。
fn half_power_width(power: &[f64], bin: usize, half: usize, resolution: f64) -> f64 {
    let peak = power[bin];
    if peak <= 0.0 {
        return resolution;
    }
    let cutoff = peak / 2.0;

    let mut left = bin;
    while left > 0 && power[left - 1] >= cutoff {
        left -= 1;
    }

    let mut right = bin;
    while right + 1 < half && power[right + 1] >= cutoff {
        right += 1;
    }

    (right - left + 1) as f64 * resolution
}

/// 包络上升沿脉冲间隔检测
///
/// 包络取 sqrt(re^2 + im^2)，阈值为包络峰值的一半，
/// 上升穿越即记为一个脉冲沿，带固定去抖间隔。
fn pulse_intervals(re: &[f64], im: &[f64], sample_rate: f64) -> Vec<f64> {
    let envelope: Vec<f64> = re
        .iter()
        .zip(im.iter())
        .map(|(&r, &i)| (r * r + i * i).sqrt())
        .collect();

    let peak = envelope.iter().cloned().fold(0.0, f64::max);
    if peak <= 0.0 {
        return Vec::new();
    }
    let threshold = peak / 2.0;
    let debounce = ((PULSE_DEBOUNCE_SECS * sample_rate) as usize).max(1);

    let mut edges: Vec<usize> = Vec::new();
    for i in 1..envelope.len() {
        if envelope[i] >= threshold && envelope[i - 1] < threshold {
            if let Some(&last) = edges.last() {
                if i - last < debounce {
                    continue;
                }
            }
            edges.push(i);
        }
    }

    edges
        .windows(2)
        .map(|w| (w[1] - w[0]) as f64 * 1000.0 / sample_rate)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const SAMPLE_RATE: f64 = 48_000.0;

    /// 满量程解析单音（恒定包络）
    fn analytic_tone(freq: f64, n: usize, amplitude: f64) -> (Vec<f64>, Vec<f64>) {
        let re = (0..n)
            .map(|i| amplitude * (2.0 * PI * freq * i as f64 / SAMPLE_RATE).cos())
            .collect();
        let im = (0..n)
            .map(|i| amplitude * (2.0 * PI * freq * i as f64 / SAMPLE_RATE).sin())
            .collect();
        (re, im)
    }

    #[test]
    fn test_tone_at_target_is_detected() {
        // 17.4 kHz 在 48 kHz / 4800 点下正好落在 bin 1740
        let (re, im) = analytic_tone(17_400.0, 4800, 1.0);
        let signatures = scan(&re, &im, SAMPLE_RATE, &ScanConfig::default()).unwrap();

        assert_eq!(signatures.len(), 1);
        let sig = &signatures[0];
        assert_eq!(sig.frequency_hz, 17_400.0);
        assert_eq!(sig.label, "Ultrasonic beacon");
        assert_eq!(sig.threat_type, ThreatType::Ultrasonic);
        // 满量程解析单音约为 0 dBFS
        assert!(sig.power_db > -1.0 && sig.power_db <= 0.1);
    }

    #[test]
    fn test_pure_tone_beam_width_is_narrow() {
        let (re, im) = analytic_tone(17_400.0, 4800, 1.0);
        let signatures = scan(&re, &im, SAMPLE_RATE, &ScanConfig::default()).unwrap();

        let resolution = SAMPLE_RATE / 4800.0;
        assert!(signatures[0].beam_width_hz <= 2.0 * resolution);
    }

    #[test]
    fn test_weak_tone_below_threshold_ignored() {
        // -60 dBFS，低于默认 -45 dBFS 阈值
        let (re, im) = analytic_tone(17_400.0, 4800, 0.001);
        let signatures = scan(&re, &im, SAMPLE_RATE, &ScanConfig::default()).unwrap();
        assert!(signatures.is_empty());
    }

    #[test]
    fn test_silence_produces_no_signatures() {
        let re = vec![0.0; 4800];
        let im = vec![0.0; 4800];
        let signatures = scan(&re, &im, SAMPLE_RATE, &ScanConfig::default()).unwrap();
        assert!(signatures.is_empty());
    }

    #[test]
    fn test_continuous_tone_has_no_pulse_intervals() {
        let (re, im) = analytic_tone(17_400.0, 4800, 1.0);
        let signatures = scan(&re, &im, SAMPLE_RATE, &ScanConfig::default()).unwrap();
        assert!(signatures[0].pulse_intervals_ms.is_empty());
    }

    #[test]
    fn test_pulsed_tone_intervals() {
        // 每 100 ms 一个 10 ms 的突发，共 5 个脉冲 -> 4 个间隔
        // 首个突发偏移 5 ms，保证第一个上升沿可检测
        let n = 24_480; // 510 ms
        let offset = 240; // 5 ms
        let burst_period = 4800; // 100 ms
        let burst_len = 480; // 10 ms
        let mut re = vec![0.0; n];
        let mut im = vec![0.0; n];
        for i in offset..n {
            if (i - offset) % burst_period < burst_len {
                let t = i as f64 / SAMPLE_RATE;
                re[i] = (2.0 * PI * 17_400.0 * t).cos();
                im[i] = (2.0 * PI * 17_400.0 * t).sin();
            }
        }

        let intervals = pulse_intervals(&re, &im, SAMPLE_RATE);
        assert_eq!(intervals.len(), 4);
        for interval in intervals {
            assert!((interval - 100.0).abs() < 1.0, "interval = {}", interval);
        }
    }

    #[test]
    fn test_empty_buffer_error() {
        assert!(matches!(
            scan(&[], &[], SAMPLE_RATE, &ScanConfig::default()),
            Err(SpectrumError::EmptyBuffer)
        ));
    }

    #[test]
    fn test_mismatched_buffers_error() {
        let re = vec![0.0; 10];
        let im = vec![0.0; 8];
        assert!(matches!(
            scan(&re, &im, SAMPLE_RATE, &ScanConfig::default()),
            Err(SpectrumError::MismatchedBuffers { re_len: 10, im_len: 8 })
        ));
    }

    #[test]
    fn test_invalid_sample_rate_error() {
        let re = vec![0.0; 10];
        let im = vec![0.0; 10];
        assert!(matches!(
            scan(&re, &im, 0.0, &ScanConfig::default()),
            Err(SpectrumError::InvalidSampleRate(_))
        ));
        assert!(matches!(
            scan(&re, &im, f64::NAN, &ScanConfig::default()),
            Err(SpectrumError::InvalidSampleRate(_))
        ));
    }

    #[test]
    fn test_buffer_too_large_error() {
        let config = ScanConfig {
            max_samples: 16,
            ..Default::default()
        };
        let re = vec![0.0; 32];
        let im = vec![0.0; 32];
        assert!(matches!(
            scan(&re, &im, SAMPLE_RATE, &config),
            Err(SpectrumError::BufferTooLarge { len: 32, max: 16 })
        ));
    }

    #[test]
    fn test_targets_above_nyquist_skipped() {
        // 8 kHz 采样率下 Nyquist 为 4 kHz，只有 2.1 kHz 目标可见
        let n = 4000;
        let rate = 8_000.0;
        let re: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 2_100.0 * i as f64 / rate).cos())
            .collect();
        let im: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 2_100.0 * i as f64 / rate).sin())
            .collect();

        let signatures = scan(&re, &im, rate, &ScanConfig::default()).unwrap();
        assert_eq!(signatures.len(), 1);
        assert_eq!(signatures[0].frequency_hz, 2_100.0);
    }
}

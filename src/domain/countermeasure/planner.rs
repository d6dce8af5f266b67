//! 干扰参数规划
//!
//! 闭式启发式：
//! - 分析：最优干扰频率 = 目标 + 带宽 × 0.1，功率和调制方式按目标频段查表
//! - 部署：干扰频率 = 目标 × 1.05，有效度 = min(功率 × 85, 95)

use thiserror::Error;

/// 未指定时的默认功率
pub const DEFAULT_POWER_LEVEL: f64 = 0.8;

/// 干涉模式（固定值）
pub const INTERFERENCE_PATTERN: &str = "destructive";

/// 调制方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modulation {
    /// 幅度调制（低频段）
    Amplitude,
    /// 频率调制（中频段）
    Frequency,
    /// 混沌调制（高频段）
    Chaos,
}

impl Modulation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modulation::Amplitude => "amplitude",
            Modulation::Frequency => "frequency",
            Modulation::Chaos => "chaos",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "amplitude" => Some(Modulation::Amplitude),
            "frequency" => Some(Modulation::Frequency),
            "chaos" => Some(Modulation::Chaos),
            _ => None,
        }
    }
}

/// 规划错误
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Target frequency must be positive and finite, got {0}")]
    InvalidTargetFrequency(f64),

    #[error("Bandwidth must be non-negative and finite, got {0}")]
    InvalidBandwidth(f64),

    #[error("Power level must be in (0, 1], got {0}")]
    InvalidPowerLevel(f64),
}

/// 目标频率分析结果
#[derive(Debug, Clone)]
pub struct DisruptionPlan {
    pub target_frequency: f64,
    /// 最优干扰频率
    pub disruptor_frequency: f64,
    /// 推荐功率
    pub power_level: f64,
    /// 推荐调制方式
    pub modulation: Modulation,
    /// 干涉模式
    pub interference_pattern: &'static str,
    pub bandwidth: f64,
}

/// 部署参数
#[derive(Debug, Clone, Copy)]
pub struct DeploymentParams {
    /// 干扰频率（目标频率上偏 5%）
    pub disruptor_frequency: f64,
    /// 有效度（百分比，上限 95）
    pub effectiveness: f64,
}

/// 分析目标频率，返回最优干扰参数
pub fn analyze_target(target_frequency: f64, bandwidth: f64) -> Result<DisruptionPlan, PlanError> {
    validate_target(target_frequency)?;
    if !bandwidth.is_finite() || bandwidth < 0.0 {
        return Err(PlanError::InvalidBandwidth(bandwidth));
    }

    Ok(DisruptionPlan {
        target_frequency,
        disruptor_frequency: target_frequency + bandwidth * 0.1,
        power_level: recommended_power(target_frequency),
        modulation: recommended_modulation(target_frequency),
        interference_pattern: INTERFERENCE_PATTERN,
        bandwidth,
    })
}

/// 计算部署参数
pub fn deployment_parameters(
    target_frequency: f64,
    power_level: f64,
) -> Result<DeploymentParams, PlanError> {
    validate_target(target_frequency)?;
    if !power_level.is_finite() || power_level <= 0.0 || power_level > 1.0 {
        return Err(PlanError::InvalidPowerLevel(power_level));
    }

    Ok(DeploymentParams {
        disruptor_frequency: target_frequency * 1.05,
        effectiveness: (power_level * 85.0).min(95.0),
    })
}

fn validate_target(target_frequency: f64) -> Result<(), PlanError> {
    if !target_frequency.is_finite() || target_frequency <= 0.0 {
        return Err(PlanError::InvalidTargetFrequency(target_frequency));
    }
    Ok(())
}

/// 按频段推荐功率
fn recommended_power(target_frequency: f64) -> f64 {
    if target_frequency < 1_000.0 {
        0.9
    } else if target_frequency < 10_000.0 {
        0.7
    } else {
        0.5
    }
}

/// 按频段推荐调制方式
fn recommended_modulation(target_frequency: f64) -> Modulation {
    if target_frequency < 500.0 {
        Modulation::Amplitude
    } else if target_frequency < 5_000.0 {
        Modulation::Frequency
    } else {
        Modulation::Chaos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_low_band() {
        let plan = analyze_target(400.0, 200.0).unwrap();
        assert_eq!(plan.disruptor_frequency, 420.0);
        assert_eq!(plan.power_level, 0.9);
        assert_eq!(plan.modulation, Modulation::Amplitude);
        assert_eq!(plan.interference_pattern, "destructive");
    }

    #[test]
    fn test_analyze_mid_band() {
        let plan = analyze_target(2_000.0, 100.0).unwrap();
        assert_eq!(plan.disruptor_frequency, 2_010.0);
        assert_eq!(plan.power_level, 0.7);
        assert_eq!(plan.modulation, Modulation::Frequency);
    }

    #[test]
    fn test_analyze_high_band() {
        let plan = analyze_target(15_000.0, 0.0).unwrap();
        assert_eq!(plan.disruptor_frequency, 15_000.0);
        assert_eq!(plan.power_level, 0.5);
        assert_eq!(plan.modulation, Modulation::Chaos);
    }

    #[test]
    fn test_deployment_parameters() {
        let params = deployment_parameters(1_000.0, 0.8).unwrap();
        assert_eq!(params.disruptor_frequency, 1_050.0);
        assert_eq!(params.effectiveness, 68.0);
    }

    #[test]
    fn test_effectiveness_capped() {
        // 满功率 1.0 × 85 = 85，未达到 95 上限
        let params = deployment_parameters(1_000.0, 1.0).unwrap();
        assert_eq!(params.effectiveness, 85.0);
    }

    #[test]
    fn test_invalid_target_frequency() {
        assert!(matches!(
            analyze_target(0.0, 100.0),
            Err(PlanError::InvalidTargetFrequency(_))
        ));
        assert!(matches!(
            analyze_target(-50.0, 100.0),
            Err(PlanError::InvalidTargetFrequency(_))
        ));
        assert!(matches!(
            deployment_parameters(f64::INFINITY, 0.5),
            Err(PlanError::InvalidTargetFrequency(_))
        ));
    }

    #[test]
    fn test_invalid_bandwidth() {
        assert!(matches!(
            analyze_target(1_000.0, -1.0),
            Err(PlanError::InvalidBandwidth(_))
        ));
    }

    #[test]
    fn test_invalid_power_level() {
        assert!(matches!(
            deployment_parameters(1_000.0, 0.0),
            Err(PlanError::InvalidPowerLevel(_))
        ));
        assert!(matches!(
            deployment_parameters(1_000.0, 1.5),
            Err(PlanError::InvalidPowerLevel(_))
        ));
    }

    #[test]
    fn test_modulation_round_trip() {
        for m in [Modulation::Amplitude, Modulation::Frequency, Modulation::Chaos] {
            assert_eq!(Modulation::from_str(m.as_str()), Some(m));
        }
        assert_eq!(Modulation::from_str("pulse"), None);
    }
}

//! 目标频点表
//!
//! 固定的已知威胁频点清单。ADS/V2K/LRAD 等名称只是行业沿用的标签字符串，
//! 不代表对相应设备的物理建模。

/// 威胁类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatType {
    /// 可听声波
    Acoustic,
    /// 超声
    Ultrasonic,
    /// 定向能调制
    DirectedEnergy,
    /// 神经音频（标签用途）
    Neural,
    /// 未知
    Unknown,
}

impl ThreatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatType::Acoustic => "acoustic",
            ThreatType::Ultrasonic => "ultrasonic",
            ThreatType::DirectedEnergy => "directed_energy",
            ThreatType::Neural => "neural",
            ThreatType::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "acoustic" => Some(ThreatType::Acoustic),
            "ultrasonic" => Some(ThreatType::Ultrasonic),
            "directed_energy" => Some(ThreatType::DirectedEnergy),
            "neural" => Some(ThreatType::Neural),
            "unknown" => Some(ThreatType::Unknown),
            _ => None,
        }
    }
}

impl Default for ThreatType {
    fn default() -> Self {
        ThreatType::Unknown
    }
}

/// 目标频点
#[derive(Debug, Clone, Copy)]
pub struct TargetFrequency {
    /// 频率（Hz）
    pub frequency_hz: f64,
    /// 标签
    pub label: &'static str,
    /// 威胁类别
    pub threat_type: ThreatType,
}

/// 固定目标频点表
///
/// 扫描时对每个频点取最近的 FFT bin 做静态 dB 阈值比对。
pub const TARGET_FREQUENCIES: &[TargetFrequency] = &[
    TargetFrequency {
        frequency_hz: 2_100.0,
        label: "V2K carrier band",
        threat_type: ThreatType::Neural,
    },
    TargetFrequency {
        frequency_hz: 6_800.0,
        label: "ADS modulation band",
        threat_type: ThreatType::DirectedEnergy,
    },
    TargetFrequency {
        frequency_hz: 12_500.0,
        label: "Sonic projector sweep",
        threat_type: ThreatType::Acoustic,
    },
    TargetFrequency {
        frequency_hz: 14_700.0,
        label: "LRAD deterrent tone",
        threat_type: ThreatType::Acoustic,
    },
    TargetFrequency {
        frequency_hz: 17_400.0,
        label: "Ultrasonic beacon",
        threat_type: ThreatType::Ultrasonic,
    },
    TargetFrequency {
        frequency_hz: 19_800.0,
        label: "Mosquito deterrent",
        threat_type: ThreatType::Ultrasonic,
    },
    TargetFrequency {
        frequency_hz: 21_300.0,
        label: "Silent subliminal carrier",
        threat_type: ThreatType::Ultrasonic,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threat_type_round_trip() {
        for t in [
            ThreatType::Acoustic,
            ThreatType::Ultrasonic,
            ThreatType::DirectedEnergy,
            ThreatType::Neural,
            ThreatType::Unknown,
        ] {
            assert_eq!(ThreatType::from_str(t.as_str()), Some(t));
        }
        assert_eq!(ThreatType::from_str("sonic"), None);
    }

    #[test]
    fn test_table_is_sorted_and_positive() {
        let mut prev = 0.0;
        for target in TARGET_FREQUENCIES {
            assert!(target.frequency_hz > prev);
            assert!(!target.label.is_empty());
            prev = target.frequency_hz;
        }
    }
}

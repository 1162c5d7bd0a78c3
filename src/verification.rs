//! 셋업 검증 시트 생성.
//!
//! 공칭값에서 합격 범위를 만들고, 측정값이 주어지면 합격/불합격을 판정한다.
//! 측정값이 없으면 합격·불합격과 구분되는 `Unknown` 상태가 된다.

use std::collections::HashMap;

use serde::Serialize;

use crate::process::{DerivedMetrics, ProcessInputs, TIP_SPEED_MAX_MPS, TIP_SPEED_MIN_MPS};

/// 스트리트 폭 허용 비율(±)
pub const STREET_TOLERANCE: f64 = 0.10;
/// 웨이퍼 두께 허용 비율(±)
pub const WAFER_THICKNESS_TOLERANCE: f64 = 0.02;
/// 다이 가로/세로 절대 허용치(mm)
pub const DIE_SIZE_TOLERANCE_MM: f64 = 0.01;
/// 커프 하한 비율
pub const KERF_LOWER_RATIO: f64 = 0.8;
/// 커프 상한 비율
pub const KERF_UPPER_RATIO: f64 = 1.5;
/// 척 진공도 합격 범위(kPa)
pub const VACUUM_RANGE_KPA: (f64, f64) = (70.0, 90.0);
/// 기본 척 진공도 공칭값(kPa)
pub const DEFAULT_VACUUM_KPA: f64 = 80.0;

/// 검증 항목 식별자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationKey {
    StreetWidth,
    Kerf,
    DieWidth,
    DieHeight,
    WaferThickness,
    TipSpeed,
    VacuumLevel,
}

impl VerificationKey {
    pub const ALL: [VerificationKey; 7] = [
        VerificationKey::StreetWidth,
        VerificationKey::Kerf,
        VerificationKey::DieWidth,
        VerificationKey::DieHeight,
        VerificationKey::WaferThickness,
        VerificationKey::TipSpeed,
        VerificationKey::VacuumLevel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationKey::StreetWidth => "street_width",
            VerificationKey::Kerf => "kerf",
            VerificationKey::DieWidth => "die_width",
            VerificationKey::DieHeight => "die_height",
            VerificationKey::WaferThickness => "wafer_thickness",
            VerificationKey::TipSpeed => "tip_speed",
            VerificationKey::VacuumLevel => "vacuum_level",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            VerificationKey::StreetWidth => "Street width",
            VerificationKey::Kerf => "Kerf width",
            VerificationKey::DieWidth => "Die width",
            VerificationKey::DieHeight => "Die height",
            VerificationKey::WaferThickness => "Wafer thickness",
            VerificationKey::TipSpeed => "Blade tip speed",
            VerificationKey::VacuumLevel => "Chuck vacuum level",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            VerificationKey::StreetWidth | VerificationKey::Kerf | VerificationKey::WaferThickness => {
                "µm"
            }
            VerificationKey::DieWidth | VerificationKey::DieHeight => "mm",
            VerificationKey::TipSpeed => "m/s",
            VerificationKey::VacuumLevel => "kPa",
        }
    }
}

/// 측정값 판정 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckStatus {
    Pass,
    Fail,
    /// 측정값 없음
    Unknown,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Unknown => "-",
        }
    }
}

/// 검증 항목 하나의 공칭값과 합격 범위.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationSpec {
    pub name: String,
    pub nominal: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub key: VerificationKey,
}

impl VerificationSpec {
    fn new(key: VerificationKey, nominal: f64, lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            name: key.label().to_string(),
            nominal,
            lower_bound,
            upper_bound,
            key,
        }
    }

    fn percent(key: VerificationKey, nominal: f64, tolerance: f64) -> Self {
        Self::new(
            key,
            nominal,
            nominal * (1.0 - tolerance),
            nominal * (1.0 + tolerance),
        )
    }

    fn absolute(key: VerificationKey, nominal: f64, tolerance: f64) -> Self {
        Self::new(key, nominal, nominal - tolerance, nominal + tolerance)
    }

    pub fn unit(&self) -> &'static str {
        self.key.unit()
    }

    /// `lower ≤ measured ≤ upper`이면 합격. 측정값이 없으면 `Unknown`.
    pub fn check(&self, measured: Option<f64>) -> CheckStatus {
        match measured {
            None => CheckStatus::Unknown,
            Some(m) if self.lower_bound <= m && m <= self.upper_bound => CheckStatus::Pass,
            Some(_) => CheckStatus::Fail,
        }
    }
}

/// 검증 시트 생성을 위한 공칭값 묶음.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationNominals {
    pub street_width_um: f64,
    pub kerf_um: f64,
    pub die_width_mm: f64,
    pub die_height_mm: f64,
    pub wafer_thickness_um: f64,
    pub tip_speed_mps: f64,
    pub vacuum_kpa: f64,
}

impl VerificationNominals {
    /// 현재 입력값·유도 지표에서 공칭값을 모은다.
    pub fn from_process(inputs: &ProcessInputs, metrics: &DerivedMetrics, vacuum_kpa: f64) -> Self {
        Self {
            street_width_um: inputs.street_width_um,
            kerf_um: metrics.kerf_um,
            die_width_mm: inputs.die_width_mm,
            die_height_mm: inputs.die_height_mm,
            wafer_thickness_um: inputs.wafer_thickness_um,
            tip_speed_mps: metrics.tip_speed_mps,
            vacuum_kpa,
        }
    }
}

/// 커프 범위: 하한 -20%, 상한 +50% (단, 현재 커프보다 작아지지 않음).
fn kerf_spec(nominal: f64) -> VerificationSpec {
    let upper = nominal.max(nominal * KERF_UPPER_RATIO);
    VerificationSpec::new(VerificationKey::Kerf, nominal, nominal * KERF_LOWER_RATIO, upper)
}

/// 고정 순서의 검증 시트를 만든다.
///
/// 주속과 진공도는 공칭값과 무관한 고정 범위를 쓴다.
pub fn generate_verification_specs(nominals: &VerificationNominals) -> Vec<VerificationSpec> {
    let (vac_lo, vac_hi) = VACUUM_RANGE_KPA;
    vec![
        VerificationSpec::percent(
            VerificationKey::StreetWidth,
            nominals.street_width_um,
            STREET_TOLERANCE,
        ),
        kerf_spec(nominals.kerf_um),
        VerificationSpec::absolute(
            VerificationKey::DieWidth,
            nominals.die_width_mm,
            DIE_SIZE_TOLERANCE_MM,
        ),
        VerificationSpec::absolute(
            VerificationKey::DieHeight,
            nominals.die_height_mm,
            DIE_SIZE_TOLERANCE_MM,
        ),
        VerificationSpec::percent(
            VerificationKey::WaferThickness,
            nominals.wafer_thickness_um,
            WAFER_THICKNESS_TOLERANCE,
        ),
        VerificationSpec::new(
            VerificationKey::TipSpeed,
            nominals.tip_speed_mps,
            TIP_SPEED_MIN_MPS,
            TIP_SPEED_MAX_MPS,
        ),
        VerificationSpec::new(
            VerificationKey::VacuumLevel,
            nominals.vacuum_kpa,
            vac_lo,
            vac_hi,
        ),
    ]
}

/// 측정값 표를 받아 항목별 판정 결과를 돌려준다.
pub fn evaluate(
    specs: &[VerificationSpec],
    measurements: &HashMap<VerificationKey, f64>,
) -> Vec<CheckStatus> {
    specs
        .iter()
        .map(|s| s.check(measurements.get(&s.key).copied()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_round_trip() {
        for key in VerificationKey::ALL {
            assert_eq!(VerificationKey::from_name(key.as_str()), Some(key));
        }
        assert_eq!(
            VerificationKey::from_name("Tip-Speed"),
            Some(VerificationKey::TipSpeed)
        );
        assert_eq!(VerificationKey::from_name("spindle"), None);
    }
}

use serde::Serialize;

use crate::material_db::Material;
use crate::units::um_to_mm;

use super::geometry::{TIP_SPEED_MAX_MPS, TIP_SPEED_MIN_MPS};

/// 이 값(mm/s)을 넘는 이송속도부터 위험도 가산.
pub const RISK_FEED_THRESHOLD_MM_PER_S: f64 = 1.5;
const RISK_FEED_WEIGHT: f64 = 8.0;
const RISK_LOW_TIP_WEIGHT: f64 = 0.8;
const RISK_HIGH_TIP_WEIGHT: f64 = 0.9;
const RISK_BLADE_DIVISOR: f64 = 100.0;
const RISK_THICKNESS_WEIGHT: f64 = 6.0;
const RISK_COOLANT_WEIGHT: f64 = 1.1;

/// 스핀들 부하 동력(kW) = 재질계수 × 이송 × 커프(mm) × 두께(mm).
pub fn spindle_power_kw(
    material: Material,
    feed_mm_per_s: f64,
    kerf_um: f64,
    wafer_thickness_um: f64,
) -> f64 {
    material.data().power_coeff * feed_mm_per_s * um_to_mm(kerf_um) * um_to_mm(wafer_thickness_um)
}

/// 치핑 위험도 계산 입력.
#[derive(Debug, Clone)]
pub struct ChippingRiskInput {
    pub material: Material,
    pub feed_mm_per_s: f64,
    pub tip_speed_mps: f64,
    pub blade_thickness_um: f64,
    pub wafer_thickness_um: f64,
    pub coolant_l_per_min: f64,
}

/// 항목별 위험도 가감 점수. 합계가 반올림·클램프 전 점수이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskBreakdown {
    pub material_base: f64,
    pub feed_penalty: f64,
    pub tip_speed_penalty: f64,
    pub blade_penalty: f64,
    pub thickness_penalty: f64,
    /// 냉각수에 의한 감점(양수로 저장, 합계에서 뺀다)
    pub coolant_credit: f64,
}

impl RiskBreakdown {
    pub fn raw_score(&self) -> f64 {
        self.material_base
            + self.feed_penalty
            + self.tip_speed_penalty
            + self.blade_penalty
            + self.thickness_penalty
            - self.coolant_credit
    }
}

/// 주속이 권장 구간을 벗어난 정도에 대한 비대칭 가산점.
fn tip_speed_penalty(tip_speed_mps: f64) -> f64 {
    if tip_speed_mps < TIP_SPEED_MIN_MPS {
        (TIP_SPEED_MIN_MPS - tip_speed_mps) * RISK_LOW_TIP_WEIGHT
    } else if tip_speed_mps > TIP_SPEED_MAX_MPS {
        (tip_speed_mps - TIP_SPEED_MAX_MPS) * RISK_HIGH_TIP_WEIGHT
    } else if tip_speed_mps.is_nan() {
        f64::NAN
    } else {
        0.0
    }
}

/// 위험도 항목별 점수를 계산한다.
pub fn risk_breakdown(input: &ChippingRiskInput) -> RiskBreakdown {
    let feed_excess = input.feed_mm_per_s - RISK_FEED_THRESHOLD_MM_PER_S;
    let feed_penalty = if feed_excess > 0.0 {
        feed_excess * RISK_FEED_WEIGHT
    } else if feed_excess.is_nan() {
        f64::NAN
    } else {
        0.0
    };
    RiskBreakdown {
        material_base: input.material.data().risk_base,
        feed_penalty,
        tip_speed_penalty: tip_speed_penalty(input.tip_speed_mps),
        blade_penalty: input.blade_thickness_um / RISK_BLADE_DIVISOR,
        thickness_penalty: um_to_mm(input.wafer_thickness_um) * RISK_THICKNESS_WEIGHT,
        coolant_credit: input.coolant_l_per_min * RISK_COOLANT_WEIGHT,
    }
}

/// 치핑 위험도(0~100 정수). 반올림 후 클램프한다.
///
/// 입력에 NaN이 섞여 점수를 정할 수 없으면 `None`.
pub fn chipping_risk(input: &ChippingRiskInput) -> Option<u8> {
    let raw = risk_breakdown(input).raw_score();
    if raw.is_nan() {
        return None;
    }
    Some(raw.round().clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tip_speed_penalty_is_asymmetric() {
        assert_eq!(tip_speed_penalty(35.0), 0.0);
        assert!((tip_speed_penalty(20.0) - 8.0).abs() < 1e-12);
        assert!((tip_speed_penalty(55.0) - 9.0).abs() < 1e-12);
    }
}

use std::f64::consts::PI;

use crate::material_db::{BladeBond, Material};

use super::at_least;

/// 권장 이송속도 범위(mm/s)
pub const FEED_SUGGESTION_RANGE: (f64, f64) = (0.2, 6.0);
/// 권장 RPM 범위
pub const RPM_SUGGESTION_RANGE: (f64, f64) = (8_000.0, 60_000.0);
/// 권장 냉각수 범위(L/min)
pub const COOLANT_SUGGESTION_RANGE: (f64, f64) = (1.0, 12.0);
/// 기준 목표 주속(m/s). 재질·본드 계수를 곱해 보정한다.
pub const BASE_TARGET_TIP_SPEED_MPS: f64 = 38.0;
/// 두께가 이보다 얇으면 이 값으로 보고 계산한다(mm).
const MIN_FEED_THICKNESS_MM: f64 = 0.05;

/// 재질 기준 이송속도를 웨이퍼 두께의 제곱근으로 나눈 권장 이송속도(mm/s).
/// 두께가 두꺼울수록 감소한다.
pub fn suggest_feed_mm_per_s(material: Material, wafer_thickness_mm: f64) -> f64 {
    let base = material.data().feed_base_mm_per_s;
    let (lo, hi) = FEED_SUGGESTION_RANGE;
    (base / at_least(wafer_thickness_mm, MIN_FEED_THICKNESS_MM).sqrt()).clamp(lo, hi)
}

/// 재질·본드별 목표 주속(m/s).
pub fn target_tip_speed_mps(material: Material, bond: BladeBond) -> f64 {
    BASE_TARGET_TIP_SPEED_MPS * material.data().rpm_factor * bond.rpm_factor()
}

/// 목표 주속을 만족하는 RPM을 주속 식의 역산으로 구한다.
///
/// 직경이 0이면 무한대가 되어 상한으로, 음수이면 하한으로 클램프된다.
pub fn suggest_rpm(material: Material, blade_diameter_mm: f64, bond: BladeBond) -> f64 {
    let target = target_tip_speed_mps(material, bond);
    let rpm = target * 60.0 / (PI * blade_diameter_mm / 1000.0);
    let (lo, hi) = RPM_SUGGESTION_RANGE;
    rpm.clamp(lo, hi)
}

/// 스핀들 동력에 비례하는 권장 냉각수 유량(L/min). 동력이 클수록 증가한다.
pub fn suggest_coolant_lpm(spindle_power_kw: f64) -> f64 {
    let (lo, hi) = COOLANT_SUGGESTION_RANGE;
    (3.0 + 6.0 * spindle_power_kw).clamp(lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thin_wafers_use_minimum_thickness() {
        let a = suggest_feed_mm_per_s(Material::Si, 0.0);
        let b = suggest_feed_mm_per_s(Material::Si, 0.05);
        assert_eq!(a, b);
        assert_eq!(a, 6.0);
    }

    #[test]
    fn zero_diameter_hits_rpm_ceiling() {
        assert_eq!(suggest_rpm(Material::Si, 0.0, BladeBond::Resin), 60_000.0);
        assert_eq!(suggest_rpm(Material::Si, -10.0, BladeBond::Resin), 8_000.0);
    }

    #[test]
    fn nan_thickness_propagates() {
        assert!(suggest_feed_mm_per_s(Material::Si, f64::NAN).is_nan());
    }
}

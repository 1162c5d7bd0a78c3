//! 공정 유도 모델 회귀 테스트.
use wafer_dicing_toolbox::material_db::{BladeBond, Material};
use wafer_dicing_toolbox::process::{
    chipping_risk, derive_metrics, kerf_um, risk_breakdown, spindle_power_kw, suggest_coolant_lpm,
    suggest_feed_mm_per_s, suggest_rpm, target_tip_speed_mps, tip_speed_mps, ChippingRiskInput,
    ProcessInputs, TipSpeedStatus,
};
use wafer_dicing_toolbox::units::{mm_to_um, um_to_mm};

#[test]
fn mm_um_round_trip() {
    for x in [0.0, 0.03, 1.0, 58.0, 300.0, -12.5, 1e-6] {
        let back = um_to_mm(mm_to_um(x));
        assert!((back - x).abs() <= 1e-12 * x.abs().max(1.0), "x={x} back={back}");
    }
}

#[test]
fn tip_speed_reference_point() {
    let v = tip_speed_mps(58.0, 30_000.0);
    assert!((v - 90.99).abs() < 0.5, "v={v}");
    assert_eq!(TipSpeedStatus::classify(v), TipSpeedStatus::High);
}

#[test]
fn kerf_grows_with_wear() {
    assert!((kerf_um(30.0, 0.0) - 30.0).abs() < 1e-12);
    assert!((kerf_um(30.0, 0.2) - 30.72).abs() < 1e-9);
    assert!(kerf_um(30.0, 1.0) > kerf_um(30.0, 0.5));
}

#[test]
fn feed_suggestion_stays_in_range_and_decreases_with_thickness() {
    for m in Material::ALL.into_iter().chain([Material::Other]) {
        let mut prev = f64::INFINITY;
        for t in [0.001, 0.05, 0.1, 0.3, 0.725, 1.0, 2.0, 10.0, 1000.0] {
            let f = suggest_feed_mm_per_s(m, t);
            assert!((0.2..=6.0).contains(&f), "{m} t={t} f={f}");
            assert!(f <= prev, "{m} t={t}");
            prev = f;
        }
    }
}

#[test]
fn rpm_suggestion_stays_in_range() {
    for m in Material::ALL {
        for b in BladeBond::ALL {
            for d in [0.5, 10.0, 20.0, 58.0, 76.2, 120.0, 500.0] {
                let rpm = suggest_rpm(m, d, b);
                assert!((8_000.0..=60_000.0).contains(&rpm), "{m} {b} d={d} rpm={rpm}");
            }
        }
    }
}

#[test]
fn coolant_suggestion_is_monotonic() {
    let mut prev = suggest_coolant_lpm(0.0);
    assert!((prev - 3.0).abs() < 1e-12);
    for p in [0.01, 0.1, 0.5, 1.0, 1.5, 2.0, 5.0] {
        let c = suggest_coolant_lpm(p);
        assert!(c >= prev, "p={p}");
        assert!((1.0..=12.0).contains(&c));
        prev = c;
    }
}

#[test]
fn chipping_risk_is_bounded_for_finite_inputs() {
    for m in Material::ALL {
        for feed in [0.0, 1.0, 3.0, 20.0] {
            for tip in [0.0, 25.0, 38.0, 60.0, 500.0] {
                for coolant in [0.0, 2.0, 200.0] {
                    let risk = chipping_risk(&ChippingRiskInput {
                        material: m,
                        feed_mm_per_s: feed,
                        tip_speed_mps: tip,
                        blade_thickness_um: 30.0,
                        wafer_thickness_um: 725.0,
                        coolant_l_per_min: coolant,
                    });
                    assert!(matches!(risk, Some(r) if r <= 100));
                }
            }
        }
    }
}

#[test]
fn default_setup_scores_low_risk() {
    let metrics = derive_metrics(&ProcessInputs::default());
    // 25 + 0.3 + 4.35 - 1.65
    assert_eq!(metrics.chipping_risk, Some(28));
    assert_eq!(metrics.tip_speed_status, TipSpeedStatus::InRange);
    assert!((metrics.risk_breakdown.raw_score() - 28.0).abs() < 1e-9);
}

#[test]
fn nan_input_propagates_instead_of_panicking() {
    let inputs = ProcessInputs {
        rpm: f64::NAN,
        ..ProcessInputs::default()
    };
    let metrics = derive_metrics(&inputs.sanitized());
    assert!(metrics.tip_speed_mps.is_nan());
    assert_eq!(metrics.tip_speed_status, TipSpeedStatus::Unknown);
    assert_eq!(metrics.chipping_risk, None);
    assert!(metrics.kerf_um.is_finite());
}

#[test]
fn sanitize_clamps_wear_and_negative_lengths() {
    let inputs = ProcessInputs {
        wear_factor: 1.7,
        street_width_um: -10.0,
        ..ProcessInputs::default()
    };
    assert_eq!(inputs.warnings().len(), 2);
    let clean = inputs.sanitized();
    assert_eq!(clean.wear_factor, 1.0);
    assert_eq!(clean.street_width_um, 0.0);
    assert!(clean.warnings().is_empty());
}

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// 주속 35 m/s, 블레이드·두께·냉각수 0인 기준 입력. 점수는 재질 기준값과 이송 가산점뿐이다.
fn bare_risk_input(material: Material, feed_mm_per_s: f64) -> ChippingRiskInput {
    ChippingRiskInput {
        material,
        feed_mm_per_s,
        tip_speed_mps: 35.0,
        blade_thickness_um: 0.0,
        wafer_thickness_um: 0.0,
        coolant_l_per_min: 0.0,
    }
}

#[test]
fn spindle_power_reference_values() {
    let p = spindle_power_kw(Material::SiC, 2.0, 30.0, 500.0);
    assert!(close(p, 0.0018, 1e-12), "p={p}");
    let p = spindle_power_kw(Material::Si, 5.0, 30.0, 725.0);
    assert!(close(p, 0.015 * 5.0 * 0.03 * 0.725, 1e-12), "p={p}");
    assert_eq!(spindle_power_kw(Material::Sapphire, 0.0, 30.0, 500.0), 0.0);
}

#[test]
fn rpm_suggestion_reference_values() {
    let rpm = suggest_rpm(Material::Si, 58.0, BladeBond::Resin);
    assert!(close(rpm, 12_512.87, 0.01), "rpm={rpm}");

    // 재질 계수와 본드 계수는 곱으로 적용된다
    let target = target_tip_speed_mps(Material::GaAs, BladeBond::Metal);
    assert!(close(target, 38.0 * 0.85 * 0.9, 1e-9), "target={target}");
    let rpm = suggest_rpm(Material::SiC, 58.0, BladeBond::Hybrid);
    assert!(close(rpm, 12_512.87 * 0.8 * 0.95, 0.01), "rpm={rpm}");
}

#[test]
fn feed_penalty_grows_above_threshold() {
    let b = risk_breakdown(&bare_risk_input(Material::Si, 1.0));
    assert_eq!(b.feed_penalty, 0.0);
    let b = risk_breakdown(&bare_risk_input(Material::Si, 2.5));
    assert!(close(b.feed_penalty, 8.0, 1e-12), "{b:?}");
    assert_eq!(chipping_risk(&bare_risk_input(Material::Si, 2.5)), Some(33));
}

#[test]
fn thickness_and_coolant_terms() {
    let mut input = bare_risk_input(Material::Si, 1.0);
    input.wafer_thickness_um = 500.0;
    input.coolant_l_per_min = 2.0;
    let b = risk_breakdown(&input);
    assert!(close(b.thickness_penalty, 3.0, 1e-12), "{b:?}");
    assert!(close(b.coolant_credit, 2.2, 1e-12), "{b:?}");
    assert!(close(b.raw_score(), 25.0 + 3.0 - 2.2, 1e-12));
    assert_eq!(chipping_risk(&input), Some(26));
}

#[test]
fn sapphire_aggressive_setup_scores_high() {
    let input = ChippingRiskInput {
        material: Material::Sapphire,
        feed_mm_per_s: 3.0,
        tip_speed_mps: 20.0,
        blade_thickness_um: 50.0,
        wafer_thickness_um: 1000.0,
        coolant_l_per_min: 2.0,
    };
    // 60 + 12 + 8 + 0.5 + 6 - 2.2
    assert!(close(risk_breakdown(&input).raw_score(), 84.3, 1e-9));
    assert_eq!(chipping_risk(&input), Some(84));
}

#[test]
fn risk_rounds_before_clamping() {
    // 25 + 0.0625 * 8 = 25.5, 반올림은 0에서 먼 쪽
    assert_eq!(chipping_risk(&bare_risk_input(Material::Si, 1.5625)), Some(26));

    // 60 + 5 * 8 + 0.4 = 100.4
    let mut high = bare_risk_input(Material::Sapphire, 6.5);
    high.blade_thickness_um = 40.0;
    assert!(close(risk_breakdown(&high).raw_score(), 100.4, 1e-9));
    assert_eq!(chipping_risk(&high), Some(100));
    high.blade_thickness_um = 60.0;
    assert_eq!(chipping_risk(&high), Some(100));

    // 25 - 23 * 1.1 = -0.3
    let mut low = bare_risk_input(Material::Si, 1.0);
    low.coolant_l_per_min = 23.0;
    assert!(close(risk_breakdown(&low).raw_score(), -0.3, 1e-9));
    assert_eq!(chipping_risk(&low), Some(0));
    low.coolant_l_per_min = 100.0;
    assert_eq!(chipping_risk(&low), Some(0));
}

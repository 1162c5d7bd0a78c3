use serde::Serialize;
use tracing::debug;

use crate::units::um_to_mm;

use super::geometry::{kerf_um, tip_speed_mps, TipSpeedStatus};
use super::inputs::ProcessInputs;
use super::risk::{chipping_risk, risk_breakdown, spindle_power_kw, ChippingRiskInput, RiskBreakdown};
use super::setpoint::{suggest_coolant_lpm, suggest_feed_mm_per_s, suggest_rpm};

/// 입력값에서 유도한 성능 추정치와 권장 셋포인트.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub tip_speed_mps: f64,
    pub tip_speed_status: TipSpeedStatus,
    pub kerf_um: f64,
    pub spindle_power_kw: f64,
    /// 0~100. 입력이 NaN이면 None.
    pub chipping_risk: Option<u8>,
    pub risk_breakdown: RiskBreakdown,
    pub coolant_suggestion_l_per_min: f64,
    pub feed_suggestion_mm_per_s: f64,
    pub rpm_suggestion_rpm: f64,
}

/// 입력값으로 모든 유도 지표를 계산한다. 입력이 바뀔 때마다 다시 호출하면 된다.
pub fn derive_metrics(inputs: &ProcessInputs) -> DerivedMetrics {
    let tip = tip_speed_mps(inputs.blade_diameter_mm, inputs.rpm);
    let kerf = kerf_um(inputs.blade_thickness_um, inputs.wear_factor);
    let power = spindle_power_kw(
        inputs.material,
        inputs.feed_mm_per_s,
        kerf,
        inputs.wafer_thickness_um,
    );
    let risk_input = ChippingRiskInput {
        material: inputs.material,
        feed_mm_per_s: inputs.feed_mm_per_s,
        tip_speed_mps: tip,
        blade_thickness_um: inputs.blade_thickness_um,
        wafer_thickness_um: inputs.wafer_thickness_um,
        coolant_l_per_min: inputs.coolant_l_per_min,
    };
    let metrics = DerivedMetrics {
        tip_speed_mps: tip,
        tip_speed_status: TipSpeedStatus::classify(tip),
        kerf_um: kerf,
        spindle_power_kw: power,
        chipping_risk: chipping_risk(&risk_input),
        risk_breakdown: risk_breakdown(&risk_input),
        coolant_suggestion_l_per_min: suggest_coolant_lpm(power),
        feed_suggestion_mm_per_s: suggest_feed_mm_per_s(
            inputs.material,
            um_to_mm(inputs.wafer_thickness_um),
        ),
        rpm_suggestion_rpm: suggest_rpm(inputs.material, inputs.blade_diameter_mm, inputs.blade_bond),
    };
    debug!(
        material = %inputs.material,
        tip_speed = metrics.tip_speed_mps,
        kerf = metrics.kerf_um,
        risk = ?metrics.chipping_risk,
        "derived process metrics"
    );
    metrics
}

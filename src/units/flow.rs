use serde::{Deserialize, Serialize};

/// 냉각수 유량 단위. 내부 기준은 L/min이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowUnit {
    LiterPerMinute,
    LiterPerHour,
    CubicMeterPerHour,
    /// US gallon per minute
    GallonPerMinute,
}

const LITER_PER_US_GAL: f64 = 3.785_411_784;

fn to_lpm(value: f64, unit: FlowUnit) -> f64 {
    match unit {
        FlowUnit::LiterPerMinute => value,
        FlowUnit::LiterPerHour => value / 60.0,
        FlowUnit::CubicMeterPerHour => value * 1000.0 / 60.0,
        FlowUnit::GallonPerMinute => value * LITER_PER_US_GAL,
    }
}

fn from_lpm(value: f64, unit: FlowUnit) -> f64 {
    match unit {
        FlowUnit::LiterPerMinute => value,
        FlowUnit::LiterPerHour => value * 60.0,
        FlowUnit::CubicMeterPerHour => value * 60.0 / 1000.0,
        FlowUnit::GallonPerMinute => value / LITER_PER_US_GAL,
    }
}

/// 유량을 변환한다.
pub fn convert_flow(value: f64, from: FlowUnit, to: FlowUnit) -> f64 {
    let lpm = to_lpm(value, from);
    from_lpm(lpm, to)
}

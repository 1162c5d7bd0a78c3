use serde::{Deserialize, Serialize};

/// 속도 단위. 내부 기준은 m/s이다.
/// 블레이드 주속은 m/s, 이송속도는 mm/s 로 주로 표기한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityUnit {
    MeterPerSecond,
    MillimeterPerSecond,
    MeterPerMinute,
    /// surface feet per minute
    FootPerMinute,
    InchPerSecond,
}

fn to_mps(value: f64, unit: VelocityUnit) -> f64 {
    match unit {
        VelocityUnit::MeterPerSecond => value,
        VelocityUnit::MillimeterPerSecond => value / 1000.0,
        VelocityUnit::MeterPerMinute => value / 60.0,
        VelocityUnit::FootPerMinute => value * 0.3048 / 60.0,
        VelocityUnit::InchPerSecond => value * 0.0254,
    }
}

fn from_mps(value: f64, unit: VelocityUnit) -> f64 {
    match unit {
        VelocityUnit::MeterPerSecond => value,
        VelocityUnit::MillimeterPerSecond => value * 1000.0,
        VelocityUnit::MeterPerMinute => value * 60.0,
        VelocityUnit::FootPerMinute => value * 60.0 / 0.3048,
        VelocityUnit::InchPerSecond => value / 0.0254,
    }
}

/// 속도를 변환한다.
pub fn convert_velocity(value: f64, from: VelocityUnit, to: VelocityUnit) -> f64 {
    let base = to_mps(value, from);
    from_mps(base, to)
}

use serde::{Deserialize, Serialize};

/// 길이 단위. 내부 기준은 밀리미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Meter,
    Centimeter,
    Millimeter,
    Micrometer,
    Inch,
    /// 1/1000 inch
    Mil,
}

/// mm → µm. 음수도 그대로 통과시키며 범위 검사는 호출 측 책임이다.
pub fn mm_to_um(mm: f64) -> f64 {
    mm * 1000.0
}

/// µm → mm.
pub fn um_to_mm(um: f64) -> f64 {
    um / 1000.0
}

fn to_mm(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Meter => value * 1000.0,
        LengthUnit::Centimeter => value * 10.0,
        LengthUnit::Millimeter => value,
        LengthUnit::Micrometer => um_to_mm(value),
        LengthUnit::Inch => value * 25.4,
        LengthUnit::Mil => value * 0.0254,
    }
}

fn from_mm(value_mm: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Meter => value_mm / 1000.0,
        LengthUnit::Centimeter => value_mm / 10.0,
        LengthUnit::Millimeter => value_mm,
        LengthUnit::Micrometer => mm_to_um(value_mm),
        LengthUnit::Inch => value_mm / 25.4,
        LengthUnit::Mil => value_mm / 0.0254,
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    let mm = to_mm(value, from);
    from_mm(mm, to)
}

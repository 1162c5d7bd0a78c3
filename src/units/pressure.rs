use serde::{Deserialize, Serialize};

/// 척(chuck) 진공도 표기에 쓰는 압력 단위. 내부 기준은 kPa이다.
/// 진공도는 대기압 대비 감압량(양수)으로 다루므로 게이지/절대 보정은 하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    KiloPascal,
    Pascal,
    Bar,
    Psi,
    MmHg,
    InchHg,
}

const KPA_PER_PSI: f64 = 6.894_757;
const MMHG_PER_KPA: f64 = 7.500_62;
const INHG_PER_KPA: f64 = 0.295_300;

/// 주어진 압력을 kPa 로 변환한다.
pub fn to_kpa(value: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::KiloPascal => value,
        PressureUnit::Pascal => value / 1000.0,
        PressureUnit::Bar => value * 100.0,
        PressureUnit::Psi => value * KPA_PER_PSI,
        PressureUnit::MmHg => value / MMHG_PER_KPA,
        PressureUnit::InchHg => value / INHG_PER_KPA,
    }
}

/// kPa 값을 원하는 단위로 변환한다.
pub fn from_kpa(value_kpa: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::KiloPascal => value_kpa,
        PressureUnit::Pascal => value_kpa * 1000.0,
        PressureUnit::Bar => value_kpa / 100.0,
        PressureUnit::Psi => value_kpa / KPA_PER_PSI,
        PressureUnit::MmHg => value_kpa * MMHG_PER_KPA,
        PressureUnit::InchHg => value_kpa * INHG_PER_KPA,
    }
}

/// 압력을 원하는 단위로 변환한다.
pub fn convert_pressure(value: f64, from: PressureUnit, to: PressureUnit) -> f64 {
    let kpa = to_kpa(value, from);
    from_kpa(kpa, to)
}

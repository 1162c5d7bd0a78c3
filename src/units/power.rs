use serde::{Deserialize, Serialize};

/// 스핀들 동력 단위. 내부 기준은 kW이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUnit {
    Kilowatt,
    Watt,
    /// mechanical horsepower
    Horsepower,
}

fn to_kw(value: f64, unit: PowerUnit) -> f64 {
    match unit {
        PowerUnit::Kilowatt => value,
        PowerUnit::Watt => value / 1000.0,
        PowerUnit::Horsepower => value * 0.745_699_872,
    }
}

fn from_kw(value_kw: f64, unit: PowerUnit) -> f64 {
    match unit {
        PowerUnit::Kilowatt => value_kw,
        PowerUnit::Watt => value_kw * 1000.0,
        PowerUnit::Horsepower => value_kw / 0.745_699_872,
    }
}

/// 동력을 변환한다.
pub fn convert_power(value: f64, from: PowerUnit, to: PowerUnit) -> f64 {
    let kw = to_kw(value, from);
    from_kw(kw, to)
}

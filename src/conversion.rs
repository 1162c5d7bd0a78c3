use thiserror::Error;

use crate::i18n::{keys, Translator};
use crate::quantity::QuantityKind;
use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("알 수 없는 단위: {0}")]
    UnknownUnit(String),
    /// 지원하지 않는 물리량
    #[error("지원하지 않는 물리량: {0}")]
    UnsupportedQuantity(String),
}

impl ConversionError {
    pub fn localized(&self, tr: &Translator) -> String {
        match self {
            ConversionError::UnknownUnit(u) => format!("{}: {u}", tr.t(keys::ERROR_UNKNOWN_UNIT)),
            ConversionError::UnsupportedQuantity(q) => {
                format!("{}: {q}", tr.t(keys::ERROR_UNSUPPORTED_QUANTITY))
            }
        }
    }
}

/// 문자열로 전달된 단위명을 enum으로 변환한 뒤 지정된 단위로 환산한다.
///
/// 단위 문자열 예시는 `mm`, `um`, `m/s`, `mm/s`, `L/min`, `kPa`, `kW` 등을 사용할 수 있다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Length => {
            let from = parse_length_unit(from_unit_str)?;
            let to = parse_length_unit(to_unit_str)?;
            Ok(convert_length(value, from, to))
        }
        QuantityKind::Velocity => {
            let from = parse_velocity_unit(from_unit_str)?;
            let to = parse_velocity_unit(to_unit_str)?;
            Ok(convert_velocity(value, from, to))
        }
        QuantityKind::Flow => {
            let from = parse_flow_unit(from_unit_str)?;
            let to = parse_flow_unit(to_unit_str)?;
            Ok(convert_flow(value, from, to))
        }
        QuantityKind::Pressure => {
            let from = parse_pressure_unit(from_unit_str)?;
            let to = parse_pressure_unit(to_unit_str)?;
            Ok(convert_pressure(value, from, to))
        }
        QuantityKind::Power => {
            let from = parse_power_unit(from_unit_str)?;
            let to = parse_power_unit(to_unit_str)?;
            Ok(convert_power(value, from, to))
        }
    }
}

/// 물리량 이름과 단위 문자열을 함께 받아 변환한다. CLI `convert` 서브커맨드에서 사용한다.
pub fn convert_named(
    kind_name: &str,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    let kind = QuantityKind::from_name(kind_name)
        .ok_or_else(|| ConversionError::UnsupportedQuantity(kind_name.to_string()))?;
    convert(kind, value, from_unit_str, to_unit_str)
}

/// GUI/CLI 콤보박스에 표시할 (표시명, 코드) 목록.
pub fn unit_options(kind: QuantityKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        QuantityKind::Length => &[
            ("m", "m"),
            ("cm", "cm"),
            ("mm", "mm"),
            ("µm", "um"),
            ("in", "in"),
            ("mil", "mil"),
        ],
        QuantityKind::Velocity => &[
            ("m/s", "m/s"),
            ("mm/s", "mm/s"),
            ("m/min", "m/min"),
            ("ft/min", "ft/min"),
            ("in/s", "in/s"),
        ],
        QuantityKind::Flow => &[
            ("L/min", "L/min"),
            ("L/h", "L/h"),
            ("m³/h", "m3/h"),
            ("gpm", "gpm"),
        ],
        QuantityKind::Pressure => &[
            ("kPa", "kPa"),
            ("Pa", "Pa"),
            ("bar", "bar"),
            ("psi", "psi"),
            ("mmHg", "mmHg"),
            ("inHg", "inHg"),
        ],
        QuantityKind::Power => &[("kW", "kW"), ("W", "W"), ("hp", "hp")],
    }
}

fn parse_length_unit(s: &str) -> Result<LengthUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "m" | "meter" | "metre" => Ok(LengthUnit::Meter),
        "cm" => Ok(LengthUnit::Centimeter),
        "mm" => Ok(LengthUnit::Millimeter),
        "um" | "µm" | "micron" | "micrometer" => Ok(LengthUnit::Micrometer),
        "in" | "inch" | "\"" => Ok(LengthUnit::Inch),
        "mil" | "thou" => Ok(LengthUnit::Mil),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_velocity_unit(s: &str) -> Result<VelocityUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "m/s" | "mps" => Ok(VelocityUnit::MeterPerSecond),
        "mm/s" => Ok(VelocityUnit::MillimeterPerSecond),
        "m/min" => Ok(VelocityUnit::MeterPerMinute),
        "ft/min" | "sfm" | "fpm" => Ok(VelocityUnit::FootPerMinute),
        "in/s" | "ips" => Ok(VelocityUnit::InchPerSecond),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_flow_unit(s: &str) -> Result<FlowUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "l/min" | "lpm" => Ok(FlowUnit::LiterPerMinute),
        "l/h" | "lph" => Ok(FlowUnit::LiterPerHour),
        "m3/h" | "m^3/h" | "m³/h" => Ok(FlowUnit::CubicMeterPerHour),
        "gpm" | "gal/min" => Ok(FlowUnit::GallonPerMinute),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_pressure_unit(s: &str) -> Result<PressureUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "kpa" | "kilopascal" => Ok(PressureUnit::KiloPascal),
        "pa" | "pascal" => Ok(PressureUnit::Pascal),
        "bar" => Ok(PressureUnit::Bar),
        "psi" => Ok(PressureUnit::Psi),
        "mmhg" | "torr" => Ok(PressureUnit::MmHg),
        "inhg" => Ok(PressureUnit::InchHg),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

fn parse_power_unit(s: &str) -> Result<PowerUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "kw" | "kilowatt" => Ok(PowerUnit::Kilowatt),
        "w" | "watt" => Ok(PowerUnit::Watt),
        "hp" | "horsepower" => Ok(PowerUnit::Horsepower),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_options_are_all_parseable() {
        for kind in QuantityKind::ALL {
            for (_, code) in unit_options(kind) {
                assert!(
                    convert(kind, 1.0, code, code).is_ok(),
                    "{code} not parseable for {:?}",
                    kind
                );
            }
        }
    }

    #[test]
    fn unknown_unit_is_reported() {
        let err = convert(QuantityKind::Length, 1.0, "furlong", "mm").unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit(u) if u == "furlong"));
    }
}

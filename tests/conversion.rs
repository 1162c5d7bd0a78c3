use wafer_dicing_toolbox::conversion::{convert, convert_named, unit_options, ConversionError};
use wafer_dicing_toolbox::quantity::QuantityKind;

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn blade_thickness_mm_to_um() {
    let v = convert(QuantityKind::Length, 0.03, "mm", "um").unwrap();
    assert!(close(v, 30.0, 1e-9));
    let v = convert(QuantityKind::Length, 1.0, "mil", "µm").unwrap();
    assert!(close(v, 25.4, 1e-9));
}

#[test]
fn tip_speed_to_surface_feet() {
    let v = convert(QuantityKind::Velocity, 38.0, "m/s", "ft/min").unwrap();
    assert!(close(v, 7480.3, 0.1), "v={v}");
}

#[test]
fn vacuum_kpa_to_inhg() {
    let v = convert(QuantityKind::Pressure, 80.0, "kPa", "inHg").unwrap();
    assert!(close(v, 23.62, 0.01), "v={v}");
}

#[test]
fn coolant_lpm_to_gpm() {
    let v = convert(QuantityKind::Flow, 3.785411784, "L/min", "gpm").unwrap();
    assert!(close(v, 1.0, 1e-6), "v={v}");
}

#[test]
fn every_listed_unit_round_trips() {
    for kind in QuantityKind::ALL {
        let opts = unit_options(kind);
        let base = opts[0].1;
        for (_, code) in opts {
            let there = convert(kind, 12.5, base, code).unwrap();
            let back = convert(kind, there, code, base).unwrap();
            assert!(close(back, 12.5, 1e-9), "{kind:?} {code}");
        }
    }
}

#[test]
fn unknown_units_and_kinds_are_errors() {
    assert!(matches!(
        convert(QuantityKind::Length, 1.0, "furlong", "mm"),
        Err(ConversionError::UnknownUnit(_))
    ));
    assert!(matches!(
        convert_named("temperature", 1.0, "C", "K"),
        Err(ConversionError::UnsupportedQuantity(_))
    ));
    assert!(convert_named("Length", 1.0, "in", "mm").is_ok());
}

use wafer_dicing_toolbox::process::{derive_metrics, ProcessInputs};
use wafer_dicing_toolbox::report::{
    export_rows, format_risk, format_value, generate_sop, risk_level_label, rows_to_csv,
    PLACEHOLDER,
};
use wafer_dicing_toolbox::verification::{generate_verification_specs, VerificationNominals};

#[test]
fn non_finite_values_render_as_placeholder() {
    assert_eq!(format_value(f64::NAN, 2), PLACEHOLDER);
    assert_eq!(format_value(f64::INFINITY, 2), PLACEHOLDER);
    assert_eq!(format_value(1.23456, 2), "1.23");
    assert_eq!(format_risk(None), PLACEHOLDER);
    assert_eq!(format_risk(Some(42)), "42");
}

#[test]
fn risk_levels() {
    assert_eq!(risk_level_label(Some(0)), "Low");
    assert_eq!(risk_level_label(Some(34)), "Low");
    assert_eq!(risk_level_label(Some(35)), "Medium");
    assert_eq!(risk_level_label(Some(65)), "High");
    assert_eq!(risk_level_label(None), PLACEHOLDER);
}

#[test]
fn csv_export_has_header_and_fixed_rows() {
    let inputs = ProcessInputs::default();
    let metrics = derive_metrics(&inputs);
    let rows = export_rows(&inputs, &metrics, &inputs.die_layout(), 3);
    let csv = rows_to_csv(&rows);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "parameter,value,unit");
    assert_eq!(lines.len(), rows.len() + 1);
    assert_eq!(lines[1], "Material,Si,");
    assert!(lines.contains(&"Kerf estimate,30.720,µm"));
    assert!(lines.contains(&"Chipping risk,28,/100"));
}

#[test]
fn sop_contains_setpoints_and_verification() {
    let inputs = ProcessInputs::default();
    let metrics = derive_metrics(&inputs);
    let layout = inputs.die_layout();
    let specs =
        generate_verification_specs(&VerificationNominals::from_process(&inputs, &metrics, 80.0));
    let sop = generate_sop(&inputs, &metrics, &layout, &specs);
    assert!(sop.contains("Spindle speed: 12500 rpm"));
    assert!(sop.contains("Kerf estimate: 30.7 µm"));
    assert!(sop.contains(&format!("Usable dies: {}", layout.usable_dies)));
    for s in &specs {
        assert!(sop.contains(&s.name), "missing {}", s.name);
    }
    assert!(!sop.contains('{'), "unfilled placeholder in SOP");
}

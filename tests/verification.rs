use std::collections::HashMap;

use wafer_dicing_toolbox::process::{derive_metrics, ProcessInputs};
use wafer_dicing_toolbox::verification::{
    evaluate, generate_verification_specs, CheckStatus, VerificationKey, VerificationNominals,
    DEFAULT_VACUUM_KPA,
};

fn nominals() -> VerificationNominals {
    let inputs = ProcessInputs::default();
    let metrics = derive_metrics(&inputs);
    VerificationNominals::from_process(&inputs, &metrics, DEFAULT_VACUUM_KPA)
}

#[test]
fn specs_come_in_fixed_order() {
    let keys: Vec<_> = generate_verification_specs(&nominals())
        .into_iter()
        .map(|s| s.key)
        .collect();
    assert_eq!(keys, VerificationKey::ALL.to_vec());
}

#[test]
fn kerf_band_is_point_eight_to_one_point_five() {
    let specs = generate_verification_specs(&nominals());
    let kerf = specs
        .iter()
        .find(|s| s.key == VerificationKey::Kerf)
        .unwrap();
    let k = kerf.nominal;
    assert!((k - 30.72).abs() < 1e-9);
    assert!((kerf.lower_bound - 0.8 * k).abs() < 1e-9);
    assert!((kerf.upper_bound - 1.5 * k).abs() < 1e-9);
}

#[test]
fn tolerance_bands() {
    let specs = generate_verification_specs(&nominals());
    let by_key = |key| specs.iter().find(|s| s.key == key).unwrap();
    let street = by_key(VerificationKey::StreetWidth);
    assert!((street.lower_bound - 54.0).abs() < 1e-9);
    assert!((street.upper_bound - 66.0).abs() < 1e-9);
    let die = by_key(VerificationKey::DieWidth);
    assert!((die.upper_bound - 5.01).abs() < 1e-9);
    let vacuum = by_key(VerificationKey::VacuumLevel);
    assert_eq!((vacuum.lower_bound, vacuum.upper_bound), (70.0, 90.0));
    let tip = by_key(VerificationKey::TipSpeed);
    assert_eq!((tip.lower_bound, tip.upper_bound), (30.0, 45.0));
}

#[test]
fn missing_measurement_is_unknown() {
    let specs = generate_verification_specs(&nominals());
    let mut measured = HashMap::new();
    measured.insert(VerificationKey::Kerf, 33.0);
    measured.insert(VerificationKey::VacuumLevel, 65.0);
    measured.insert(VerificationKey::StreetWidth, 65.0);
    let results = evaluate(&specs, &measured);
    assert_eq!(
        results,
        vec![
            CheckStatus::Pass,
            CheckStatus::Pass,
            CheckStatus::Unknown,
            CheckStatus::Unknown,
            CheckStatus::Unknown,
            CheckStatus::Unknown,
            CheckStatus::Fail,
        ]
    );
}

#[test]
fn nan_measurement_fails() {
    let specs = generate_verification_specs(&nominals());
    assert_eq!(specs[0].check(Some(f64::NAN)), CheckStatus::Fail);
}

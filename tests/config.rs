use tempfile::tempdir;
use wafer_dicing_toolbox::config::{load_from, save_to, Config};
use wafer_dicing_toolbox::material_db::{BladeBond, Material};

#[test]
fn missing_file_is_created_with_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let cfg = load_from(&path).unwrap();
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
}

#[test]
fn saved_config_loads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut cfg = Config::default();
    cfg.language = "ko".into();
    cfg.vacuum_kpa = 85.0;
    cfg.process.material = Material::Sapphire;
    cfg.process.blade_bond = BladeBond::Metal;
    cfg.process.rpm = 30_000.0;
    save_to(&cfg, &path).unwrap();
    assert_eq!(load_from(&path).unwrap(), cfg);
}

#[test]
fn partial_file_fills_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "language = \"en\"\n\n[process]\nmaterial = \"Unobtainium\"\nrpm = 20000.0\n").unwrap();
    let cfg = load_from(&path).unwrap();
    assert_eq!(cfg.language, "en");
    assert_eq!(cfg.process.material, Material::Other);
    assert_eq!(cfg.process.rpm, 20_000.0);
    assert_eq!(cfg.process.wafer_diameter_mm, 200.0);
    assert_eq!(cfg.vacuum_kpa, 80.0);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "language = [").unwrap();
    assert!(load_from(&path).is_err());
}

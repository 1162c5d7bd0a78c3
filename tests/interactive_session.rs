//! 대화형 메뉴 루프 회귀 테스트. 표준 입력 대신 메모리 버퍼로 구동한다.
use std::io::Cursor;

use tempfile::tempdir;
use wafer_dicing_toolbox::app;
use wafer_dicing_toolbox::config::{load_from, Config};
use wafer_dicing_toolbox::i18n::Translator;

fn run_session(script: &str, cfg: &mut Config, config_path: &std::path::Path) {
    let tr = Translator::new("en");
    let mut input = Cursor::new(script.as_bytes().to_vec());
    app::run(cfg, config_path, &tr, &mut input).unwrap();
}

#[test]
fn missing_wafer_map_returns_to_menu_and_keeps_edits() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let missing = dir.path().join("no_such_map.csv");
    let script = format!("2\n300\n\n\n\n3\n{}\n0\n", missing.display());

    let mut cfg = Config::default();
    run_session(&script, &mut cfg, &config_path);

    assert_eq!(cfg.process.wafer_diameter_mm, 300.0);
    let saved = load_from(&config_path).unwrap();
    assert_eq!(saved.process.wafer_diameter_mm, 300.0);
}

#[test]
fn unknown_unit_returns_to_menu() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let mut cfg = Config::default();
    run_session("5\n1\n1\nmm\nfurlong\n0\n", &mut cfg, &config_path);
    assert!(config_path.exists());
}

#[test]
fn end_of_input_saves_and_stops() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let mut cfg = Config::default();
    // 다이 가로 입력 도중 입력이 끊긴다
    run_session("2\n300\n", &mut cfg, &config_path);
    assert_eq!(load_from(&config_path).unwrap().process.wafer_diameter_mm, 300.0);
}

#[test]
fn empty_or_garbage_input_does_not_spin() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let mut cfg = Config::default();
    run_session("", &mut cfg, &config_path);
    run_session("x\ny\n9\n", &mut cfg, &config_path);
    // 숫자 입력 반복 중에도 EOF에서 끝난다
    run_session("1\nSi\nResin\nabc\n", &mut cfg, &config_path);
    assert_eq!(cfg, Config::default());
}

use std::collections::HashMap;
use std::fs;
use std::io::{self, BufRead, Write};

use tracing::info;

use crate::app::AppError;
use crate::config::Config;
use crate::conversion;
use crate::i18n::{keys, resolve_language, Translator};
use crate::material_db::{BladeBond, Material};
use crate::process::{derive_metrics, DerivedMetrics, DieLayout};
use crate::quantity::QuantityKind;
use crate::report::{self, format_risk, format_value};
use crate::verification::{
    generate_verification_specs, VerificationKey, VerificationNominals, VerificationSpec,
};
use crate::wafer_map::{parse_wafer_map, WaferMapSummary};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ProcessSetup,
    DieLayout,
    WaferMap,
    Verification,
    UnitConversion,
    Export,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator, input: &mut impl BufRead) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_PROCESS,
        keys::MAIN_MENU_DIE_LAYOUT,
        keys::MAIN_MENU_WAFER_MAP,
        keys::MAIN_MENU_VERIFICATION,
        keys::MAIN_MENU_UNIT_CONVERSION,
        keys::MAIN_MENU_EXPORT,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(input, &tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::ProcessSetup),
            "2" => return Ok(MenuChoice::DieLayout),
            "3" => return Ok(MenuChoice::WaferMap),
            "4" => return Ok(MenuChoice::Verification),
            "5" => return Ok(MenuChoice::UnitConversion),
            "6" => return Ok(MenuChoice::Export),
            "7" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 공정 셋업 메뉴. 입력값을 갱신하고 유도 지표를 출력한다.
pub fn handle_process(
    tr: &Translator,
    cfg: &mut Config,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PROCESS_HEADING));
    println!("{}", tr.t(keys::PROMPT_KEEP_HINT));
    let p = &mut cfg.process;

    let material = read_line_or(input, &tr.t(keys::PROMPT_MATERIAL), p.material.code())?;
    p.material = Material::from_code(&material);
    let bond = read_line_or(input, &tr.t(keys::PROMPT_BOND), p.blade_bond.code())?;
    p.blade_bond = BladeBond::from_code(&bond);

    p.wafer_diameter_mm = read_f64_or(input, tr, keys::PROMPT_WAFER_DIAMETER, p.wafer_diameter_mm)?;
    p.wafer_thickness_um =
        read_f64_or(input, tr, keys::PROMPT_WAFER_THICKNESS, p.wafer_thickness_um)?;
    p.die_width_mm = read_f64_or(input, tr, keys::PROMPT_DIE_WIDTH, p.die_width_mm)?;
    p.die_height_mm = read_f64_or(input, tr, keys::PROMPT_DIE_HEIGHT, p.die_height_mm)?;
    p.street_width_um = read_f64_or(input, tr, keys::PROMPT_STREET, p.street_width_um)?;
    p.blade_diameter_mm = read_f64_or(input, tr, keys::PROMPT_BLADE_DIAMETER, p.blade_diameter_mm)?;
    p.blade_thickness_um =
        read_f64_or(input, tr, keys::PROMPT_BLADE_THICKNESS, p.blade_thickness_um)?;
    p.rpm = read_f64_or(input, tr, keys::PROMPT_RPM, p.rpm)?;
    p.feed_mm_per_s = read_f64_or(input, tr, keys::PROMPT_FEED, p.feed_mm_per_s)?;
    p.coolant_l_per_min = read_f64_or(input, tr, keys::PROMPT_COOLANT, p.coolant_l_per_min)?;
    p.wear_factor = read_f64_or(input, tr, keys::PROMPT_WEAR, p.wear_factor)?;

    for w in p.warnings() {
        println!("! {w}");
    }
    *p = p.sanitized();
    print_metrics(tr, &derive_metrics(p));
    Ok(())
}

/// 다이 배치 메뉴.
pub fn handle_die_layout(
    tr: &Translator,
    cfg: &mut Config,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::DIE_LAYOUT_HEADING));
    println!("{}", tr.t(keys::PROMPT_KEEP_HINT));
    let p = &mut cfg.process;
    p.wafer_diameter_mm = read_f64_or(input, tr, keys::PROMPT_WAFER_DIAMETER, p.wafer_diameter_mm)?;
    p.die_width_mm = read_f64_or(input, tr, keys::PROMPT_DIE_WIDTH, p.die_width_mm)?;
    p.die_height_mm = read_f64_or(input, tr, keys::PROMPT_DIE_HEIGHT, p.die_height_mm)?;
    p.street_width_um = read_f64_or(input, tr, keys::PROMPT_STREET, p.street_width_um)?;
    *p = p.sanitized();
    print_layout(tr, &p.die_layout());
    Ok(())
}

/// 웨이퍼 맵 메뉴. 파일을 읽어 파서에 전체 텍스트를 넘긴다.
pub fn handle_wafer_map(tr: &Translator, input: &mut impl BufRead) -> Result<(), AppError> {
    println!("{}", tr.t(keys::WAFER_MAP_HEADING));
    let path = read_line(input, &tr.t(keys::PROMPT_CSV_PATH))?;
    let text = fs::read_to_string(path.trim())?;
    let records = parse_wafer_map(&text);
    print_wafer_summary(tr, &WaferMapSummary::from_records(&records));
    Ok(())
}

/// 검증 시트 메뉴. 항목별 측정값을 받아 판정한다.
pub fn handle_verification(
    tr: &Translator,
    cfg: &mut Config,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::VERIFY_HEADING));
    let inputs = cfg.process.sanitized();
    let metrics = derive_metrics(&inputs);
    let nominals = VerificationNominals::from_process(&inputs, &metrics, cfg.vacuum_kpa);
    let specs = generate_verification_specs(&nominals);
    let mut measurements = HashMap::new();
    for spec in &specs {
        let prompt = format!(
            "{} [{} .. {} {}] {}: ",
            spec.name,
            format_value(spec.lower_bound, 3),
            format_value(spec.upper_bound, 3),
            spec.unit(),
            tr.t(keys::PROMPT_MEASURED)
        );
        if let Some(v) = read_optional_f64(input, tr, &prompt)? {
            measurements.insert(spec.key, v);
        }
    }
    print_verification(&specs, &measurements);
    Ok(())
}

/// 단위 변환 메뉴를 처리한다.
pub fn handle_unit_conversion(tr: &Translator, input: &mut impl BufRead) -> Result<(), AppError> {
    println!("{}", tr.t(keys::UNIT_CONVERSION_HEADING));
    println!("{}", tr.t(keys::UNIT_CONVERSION_OPTIONS));
    let kind = loop {
        let sel = read_line(input, &tr.t(keys::UNIT_CONVERSION_PROMPT_KIND))?;
        if let Ok(n) = sel.trim().parse::<usize>() {
            if let Some(kind) = map_quantity(n) {
                break kind;
            }
        }
        println!("{}", tr.t(keys::UNIT_CONVERSION_UNSUPPORTED));
    };
    let codes: Vec<&str> = conversion::unit_options(kind)
        .iter()
        .map(|(_, code)| *code)
        .collect();
    println!("({})", codes.join(", "));
    let value = read_f64(input, tr, &tr.t(keys::UNIT_CONVERSION_PROMPT_VALUE))?;
    let from_unit = read_line(input, &tr.t(keys::UNIT_CONVERSION_PROMPT_FROM_UNIT))?;
    let to_unit = read_line(input, &tr.t(keys::UNIT_CONVERSION_PROMPT_TO_UNIT))?;
    let result = conversion::convert(kind, value, from_unit.trim(), to_unit.trim())?;
    println!(
        "{} {result} {}",
        tr.t(keys::UNIT_CONVERSION_RESULT),
        to_unit.trim()
    );
    Ok(())
}

fn map_quantity(n: usize) -> Option<QuantityKind> {
    n.checked_sub(1)
        .and_then(|i| QuantityKind::ALL.get(i))
        .copied()
}

/// CSV 또는 SOP 문서를 파일로 저장한다.
pub fn handle_export(
    tr: &Translator,
    cfg: &Config,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::EXPORT_HEADING));
    println!("{}", tr.t(keys::EXPORT_OPTIONS));
    let sel = read_line(input, &tr.t(keys::PROMPT_SELECT))?;
    let inputs = cfg.process.sanitized();
    let (content, default_name) = match sel.trim() {
        "1" => {
            let metrics = derive_metrics(&inputs);
            let rows = report::export_rows(
                &inputs,
                &metrics,
                &inputs.die_layout(),
                cfg.csv_decimals,
            );
            (report::rows_to_csv(&rows), "dicing_setup.csv")
        }
        "2" => (crate::app::sop_for(&inputs, cfg), "dicing_sop.txt"),
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
            return Ok(());
        }
    };
    let path = read_line_or(input, &tr.t(keys::PROMPT_EXPORT_PATH), default_name)?;
    fs::write(&path, content)?;
    info!(path = %path, "exported");
    println!("{} {path}", tr.t(keys::EXPORT_SAVED));
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(
    tr: &Translator,
    cfg: &mut Config,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {} ({})",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        cfg.language,
        resolve_language(&cfg.language, None)
    );
    cfg.language = read_line_or(input, &tr.t(keys::SETTINGS_PROMPT_LANGUAGE), &cfg.language)?;
    cfg.vacuum_kpa = read_f64_or(input, tr, keys::SETTINGS_PROMPT_VACUUM, cfg.vacuum_kpa)?;
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

/// 유도 지표를 출력한다.
pub fn print_metrics(tr: &Translator, m: &DerivedMetrics) {
    println!(
        "{} {} m/s",
        tr.t(keys::RESULT_TIP_SPEED),
        format_value(m.tip_speed_mps, 2)
    );
    if m.tip_speed_status.is_warning() {
        println!("  {}", tr.t(keys::WARN_TIP_SPEED));
    }
    println!("{} {} µm", tr.t(keys::RESULT_KERF), format_value(m.kerf_um, 2));
    println!(
        "{} {} kW",
        tr.t(keys::RESULT_POWER),
        format_value(m.spindle_power_kw, 4)
    );
    println!(
        "{} {}/100 ({})",
        tr.t(keys::RESULT_RISK),
        format_risk(m.chipping_risk),
        report::risk_level_label(m.chipping_risk)
    );
    println!(
        "{} {} mm/s",
        tr.t(keys::RESULT_SUGGESTED_FEED),
        format_value(m.feed_suggestion_mm_per_s, 2)
    );
    println!(
        "{} {} rpm",
        tr.t(keys::RESULT_SUGGESTED_RPM),
        format_value(m.rpm_suggestion_rpm, 0)
    );
    println!(
        "{} {} L/min",
        tr.t(keys::RESULT_SUGGESTED_COOLANT),
        format_value(m.coolant_suggestion_l_per_min, 2)
    );
}

pub fn print_layout(tr: &Translator, layout: &DieLayout) {
    println!(
        "{} {} x {}",
        tr.t(keys::RESULT_DIE_GRID),
        layout.columns,
        layout.rows
    );
    println!("{} {}", tr.t(keys::RESULT_USABLE_DIES), layout.usable_dies);
}

pub fn print_wafer_summary(tr: &Translator, s: &WaferMapSummary) {
    println!(
        "{} {} / {} / {} / {} %",
        tr.t(keys::RESULT_WAFER_MAP),
        s.total,
        s.good,
        s.bad,
        format_value(s.yield_percent, 2)
    );
}

/// 검증 시트를 표 형태로 출력한다.
pub fn print_verification(specs: &[VerificationSpec], measured: &HashMap<VerificationKey, f64>) {
    println!(
        "{:<20} {:>10} {:>10} {:>10} {:>6} {:>10} {:>6}",
        "item", "nominal", "lower", "upper", "unit", "measured", "result"
    );
    for spec in specs {
        let m = measured.get(&spec.key).copied();
        println!(
            "{:<20} {:>10} {:>10} {:>10} {:>6} {:>10} {:>6}",
            spec.name,
            format_value(spec.nominal, 3),
            format_value(spec.lower_bound, 3),
            format_value(spec.upper_bound, 3),
            spec.unit(),
            m.map_or_else(|| report::PLACEHOLDER.to_string(), |v| format_value(v, 3)),
            spec.check(m).as_str()
        );
    }
}

/// 한 줄을 읽는다. 입력이 닫혔으면(EOF) `AppError::InputClosed`.
fn read_line(input: &mut impl BufRead, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Console)?;
    let mut buf = String::new();
    if input.read_line(&mut buf).map_err(AppError::Console)? == 0 {
        return Err(AppError::InputClosed);
    }
    Ok(buf)
}

/// 빈 입력이면 현재값을 유지한다.
fn read_line_or(
    input: &mut impl BufRead,
    prompt: &str,
    current: &str,
) -> Result<String, AppError> {
    let s = read_line(input, &format!("{prompt} [{current}]: "))?;
    let s = s.trim();
    Ok(if s.is_empty() {
        current.to_string()
    } else {
        s.to_string()
    })
}

fn read_f64(input: &mut impl BufRead, tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(input, prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_f64_or(
    input: &mut impl BufRead,
    tr: &Translator,
    key: &str,
    current: f64,
) -> Result<f64, AppError> {
    loop {
        let s = read_line(input, &format!("{} [{current}]: ", tr.t(key)))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(current);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_optional_f64(
    input: &mut impl BufRead,
    tr: &Translator,
    prompt: &str,
) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(input, prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_map_to_quantities() {
        assert_eq!(map_quantity(1), Some(QuantityKind::Length));
        assert_eq!(map_quantity(5), Some(QuantityKind::Power));
        assert_eq!(map_quantity(0), None);
        assert_eq!(map_quantity(6), None);
    }

    #[test]
    fn closed_input_is_reported_not_retried() {
        let tr = Translator::new("en");
        let mut empty = io::Cursor::new(Vec::<u8>::new());
        assert!(matches!(main_menu(&tr, &mut empty), Err(AppError::InputClosed)));

        let mut garbage = io::Cursor::new(b"abc\n".to_vec());
        assert!(matches!(
            read_f64(&mut garbage, &tr, "> "),
            Err(AppError::InputClosed)
        ));
    }

    #[test]
    fn missing_wafer_map_is_a_recoverable_error() {
        let tr = Translator::new("en");
        let mut input = io::Cursor::new(b"/nonexistent/dir/map.csv\n".to_vec());
        let err = handle_wafer_map(&tr, &mut input).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(!err.ends_session());
    }
}

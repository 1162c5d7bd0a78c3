//! 결과 표시·내보내기용 도우미: 숫자 포맷, CSV 내보내기 행, SOP 문서 생성.

use crate::process::{DerivedMetrics, DieLayout, ProcessInputs, TipSpeedStatus};
use crate::verification::VerificationSpec;

/// NaN/무한대 값을 표시할 때 쓰는 자리표시 문자열.
pub const PLACEHOLDER: &str = "—";

/// 소수점 자릿수를 지정해 숫자를 포맷한다. 유한하지 않은 값은 자리표시로 바꾼다.
pub fn format_value(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        PLACEHOLDER.to_string()
    }
}

/// 치핑 위험도를 표시 문자열로 바꾼다.
pub fn format_risk(risk: Option<u8>) -> String {
    risk.map_or_else(|| PLACEHOLDER.to_string(), |r| r.to_string())
}

/// 위험도 구간 라벨.
pub fn risk_level_label(risk: Option<u8>) -> &'static str {
    match risk {
        None => PLACEHOLDER,
        Some(r) if r < 35 => "Low",
        Some(r) if r < 65 => "Medium",
        Some(_) => "High",
    }
}

pub fn tip_speed_note(status: TipSpeedStatus) -> &'static str {
    match status {
        TipSpeedStatus::InRange => "within 30-45 m/s",
        TipSpeedStatus::Low => "below 30 m/s: raise RPM",
        TipSpeedStatus::High => "above 45 m/s: lower RPM",
        TipSpeedStatus::Unknown => PLACEHOLDER,
    }
}

/// `{key}` 자리표시를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CSV 내보내기 한 행.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub parameter: &'static str,
    pub value: String,
    pub unit: &'static str,
}

fn row(parameter: &'static str, value: String, unit: &'static str) -> ExportRow {
    ExportRow {
        parameter,
        value,
        unit,
    }
}

/// 입력값·유도 지표·다이 배치를 고정 순서의 (항목, 값, 단위) 행으로 만든다.
pub fn export_rows(
    inputs: &ProcessInputs,
    metrics: &DerivedMetrics,
    layout: &DieLayout,
    decimals: usize,
) -> Vec<ExportRow> {
    let f = |v: f64| format_value(v, decimals);
    vec![
        row("Material", inputs.material.to_string(), ""),
        row("Wafer diameter", f(inputs.wafer_diameter_mm), "mm"),
        row("Wafer thickness", f(inputs.wafer_thickness_um), "µm"),
        row("Die width", f(inputs.die_width_mm), "mm"),
        row("Die height", f(inputs.die_height_mm), "mm"),
        row("Street width", f(inputs.street_width_um), "µm"),
        row("Blade diameter", f(inputs.blade_diameter_mm), "mm"),
        row("Blade thickness", f(inputs.blade_thickness_um), "µm"),
        row("Blade bond", inputs.blade_bond.to_string(), ""),
        row("Spindle speed", f(inputs.rpm), "rpm"),
        row("Feed rate", f(inputs.feed_mm_per_s), "mm/s"),
        row("Coolant flow", f(inputs.coolant_l_per_min), "L/min"),
        row("Wear factor", f(inputs.wear_factor), ""),
        row("Tip speed", f(metrics.tip_speed_mps), "m/s"),
        row("Kerf estimate", f(metrics.kerf_um), "µm"),
        row("Spindle power", f(metrics.spindle_power_kw), "kW"),
        row("Chipping risk", format_risk(metrics.chipping_risk), "/100"),
        row("Suggested feed", f(metrics.feed_suggestion_mm_per_s), "mm/s"),
        row("Suggested RPM", format_value(metrics.rpm_suggestion_rpm, 0), "rpm"),
        row(
            "Suggested coolant",
            f(metrics.coolant_suggestion_l_per_min),
            "L/min",
        ),
        row("Die columns", layout.columns.to_string(), ""),
        row("Die rows", layout.rows.to_string(), ""),
        row("Usable dies", layout.usable_dies.to_string(), ""),
    ]
}

/// 쉼표·따옴표·줄바꿈이 있으면 따옴표로 감싼다.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// 행 목록을 `parameter,value,unit` 헤더가 붙은 CSV 텍스트로 만든다.
pub fn rows_to_csv(rows: &[ExportRow]) -> String {
    let mut out = String::from("parameter,value,unit\n");
    for r in rows {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(r.parameter),
            csv_field(&r.value),
            csv_field(r.unit)
        ));
    }
    out
}

const SOP_TEMPLATE: &str = "\
WAFER DICING SETUP SOP
======================

1. Purpose
   Dice {material} wafer ({wafer_diameter} mm, {wafer_thickness} µm) into {die_width} x {die_height} mm dies.

2. Material & Blade
   - Blade: {blade_diameter} mm OD, {blade_thickness} µm thick, {bond} bond
   - Blade wear factor: {wear}
   - Street width: {street} µm

3. Machine Setpoints
   - Spindle speed: {rpm} rpm (suggested {rpm_suggestion} rpm)
   - Feed rate: {feed} mm/s (suggested {feed_suggestion} mm/s)
   - Coolant flow: {coolant} L/min (suggested {coolant_suggestion} L/min)

4. Predicted Performance
   - Tip speed: {tip_speed} m/s ({tip_note})
   - Kerf estimate: {kerf} µm
   - Spindle power: {power} kW
   - Chipping risk: {risk}/100 ({risk_level})

5. Die Layout
   - Grid: {columns} columns x {rows} rows
   - Usable dies: {usable}

6. Verification
{verification}
7. Notes
   - Dress the blade before first cut and after blade change.
   - Verify first-cut kerf and chipping under the microscope before running the lot.
";

/// 현재 값으로 SOP 문서를 만든다.
pub fn generate_sop(
    inputs: &ProcessInputs,
    metrics: &DerivedMetrics,
    layout: &DieLayout,
    specs: &[VerificationSpec],
) -> String {
    let mut verification = String::new();
    for s in specs {
        verification.push_str(&format!(
            "   - {}: {} {} (accept {} .. {})\n",
            s.name,
            format_value(s.nominal, 3),
            s.unit(),
            format_value(s.lower_bound, 3),
            format_value(s.upper_bound, 3),
        ));
    }
    let f2 = |v: f64| format_value(v, 2);
    let vars = [
        ("material", inputs.material.to_string()),
        ("wafer_diameter", f2(inputs.wafer_diameter_mm)),
        ("wafer_thickness", format_value(inputs.wafer_thickness_um, 0)),
        ("die_width", f2(inputs.die_width_mm)),
        ("die_height", f2(inputs.die_height_mm)),
        ("blade_diameter", f2(inputs.blade_diameter_mm)),
        ("blade_thickness", format_value(inputs.blade_thickness_um, 1)),
        ("bond", inputs.blade_bond.to_string()),
        ("wear", f2(inputs.wear_factor)),
        ("street", format_value(inputs.street_width_um, 1)),
        ("rpm", format_value(inputs.rpm, 0)),
        ("rpm_suggestion", format_value(metrics.rpm_suggestion_rpm, 0)),
        ("feed", f2(inputs.feed_mm_per_s)),
        ("feed_suggestion", f2(metrics.feed_suggestion_mm_per_s)),
        ("coolant", f2(inputs.coolant_l_per_min)),
        ("coolant_suggestion", f2(metrics.coolant_suggestion_l_per_min)),
        ("tip_speed", f2(metrics.tip_speed_mps)),
        ("tip_note", tip_speed_note(metrics.tip_speed_status).to_string()),
        ("kerf", format_value(metrics.kerf_um, 1)),
        ("power", format_value(metrics.spindle_power_kw, 4)),
        ("risk", format_risk(metrics.chipping_risk)),
        ("risk_level", risk_level_label(metrics.chipping_risk).to_string()),
        ("columns", layout.columns.to_string()),
        ("rows", layout.rows.to_string()),
        ("usable", layout.usable_dies.to_string()),
        ("verification", verification),
    ];
    fill_template(SOP_TEMPLATE, &vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_field_quotes_when_needed() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn template_replaces_every_occurrence() {
        let out = fill_template("{a}-{a}-{b}", &[("a", "1".into()), ("b", "2".into())]);
        assert_eq!(out, "1-1-2");
    }
}

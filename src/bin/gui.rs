#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use std::collections::HashMap;
use std::{env, fs, path::Path, path::PathBuf};

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use tracing::{info, warn, Level};
use wafer_dicing_toolbox::{
    config, conversion, i18n, logging,
    material_db::{BladeBond, Material},
    process::{derive_metrics, DerivedMetrics, ProcessInputs, TipSpeedStatus},
    quantity::QuantityKind,
    report::{self, format_risk, format_value},
    verification::{
        generate_verification_specs, CheckStatus, VerificationKey, VerificationNominals,
        VerificationSpec,
    },
    wafer_map::{parse_wafer_map, DieStatus, WaferMapRecord, WaferMapSummary},
};

fn main() -> Result<(), eframe::Error> {
    logging::init_logging(Level::WARN);

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_transparent(true);
    if let Some(icon) = icon_data {
        viewport = viewport.with_icon(icon);
    }
    let opts = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        config::Config::default()
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Wafer Dicing Toolbox",
        opts,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("{e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png", "../../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

fn legend_toggle(ui: &mut egui::Ui, title: &str, body: &str, state: &mut bool) {
    ui.horizontal(|ui| {
        ui.checkbox(state, title);
    });
    if *state {
        ui.add(egui::Label::new(egui::RichText::new(body).small()).wrap(true));
    }
}

/// 라벨 + DragValue 한 줄.
fn number_row(ui: &mut egui::Ui, label: &str, value: &mut f64, speed: f64, suffix: &str) {
    ui.label(label);
    ui.add(
        egui::DragValue::new(value)
            .speed(speed)
            .suffix(format!(" {suffix}")),
    );
    ui.end_row();
}

fn status_color(status: CheckStatus) -> egui::Color32 {
    match status {
        CheckStatus::Pass => egui::Color32::from_rgb(60, 160, 80),
        CheckStatus::Fail => egui::Color32::from_rgb(200, 60, 60),
        CheckStatus::Unknown => egui::Color32::GRAY,
    }
}

fn risk_color(risk: Option<u8>) -> egui::Color32 {
    match risk {
        Some(r) if r < 35 => egui::Color32::from_rgb(60, 160, 80),
        Some(r) if r < 65 => egui::Color32::from_rgb(220, 160, 40),
        Some(_) => egui::Color32::from_rgb(200, 60, 60),
        None => egui::Color32::GRAY,
    }
}

/// 측정값 입력칸을 해석한다. 빈 칸은 미측정, 숫자가 아닌 값은 NaN(불합격)으로 본다.
fn parse_measured(text: &str) -> Option<f64> {
    let t = text.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.parse::<f64>().unwrap_or(f64::NAN))
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    lang_pack_dir_input: String,
    lang_save_status: Option<String>,
    tab: Tab,
    window_alpha: f32,
    show_formula_modal: bool,
    show_settings_modal: bool,
    apply_initial_view_size: bool,
    // 해설 토글
    show_legend_risk: bool,
    show_legend_layout: bool,
    // 공정 입력
    inputs: ProcessInputs,
    // 웨이퍼 맵
    map_path: String,
    map_records: Vec<WaferMapRecord>,
    map_summary: Option<WaferMapSummary>,
    map_error: Option<String>,
    // 검증
    measured: HashMap<VerificationKey, String>,
    // 단위 변환
    conv_value: f64,
    conv_from: String,
    conv_to: String,
    conv_kind: QuantityKind,
    conv_result: Option<String>,
    export_status: Option<String>,
    custom_font_path: String,
    font_load_error: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Tab {
    Process,
    DieLayout,
    WaferMap,
    Verification,
    UnitConv,
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 기본 폰트를 우선 적용한다.
/// 1) assets/fonts/malgun.ttf
/// 2) Windows 시스템 폰트(맑은 고딕/굴림 등)
/// 3) 리눅스 Nanum/Noto CJK
/// 모두 실패하면 Err를 반환해 사용자 지정 폰트 로드를 유도한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "malgunsl.ttf", "gulim.ttc", "batang.ttc"] {
            candidates.push(fonts.join(cand));
        }
    }
    for cand in [
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    ] {
        candidates.push(PathBuf::from(cand));
    }
    if let Some(p) = candidates.iter().find(|p| p.exists()) {
        let bytes = fs::read(p)
            .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    Err("Font not found. Please set a user font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let (conv_from, conv_to) = default_units_for_kind(QuantityKind::Length);
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        info!(lang = %lang_code, "GUI language resolved");
        Self {
            lang_input: config.language.clone(),
            lang_pack_dir_input: config.language_pack_dir.clone().unwrap_or_default(),
            lang_save_status: None,
            tab: Tab::Process,
            window_alpha: config.clamped_alpha(),
            show_formula_modal: false,
            show_settings_modal: false,
            apply_initial_view_size: true,
            show_legend_risk: false,
            show_legend_layout: false,
            inputs: config.process.clone(),
            map_path: String::new(),
            map_records: Vec::new(),
            map_summary: None,
            map_error: None,
            measured: HashMap::new(),
            conv_value: 30.0,
            conv_from: conv_from.into(),
            conv_to: conv_to.into(),
            conv_kind: QuantityKind::Length,
            conv_result: None,
            export_status: None,
            custom_font_path: String::new(),
            font_load_error: None,
            tr,
            config,
        }
    }

    /// 화면에 표시된 입력값을 보정한 사본.
    fn current_inputs(&self) -> ProcessInputs {
        self.inputs.sanitized()
    }

    fn current_specs(&self, metrics: &DerivedMetrics) -> Vec<VerificationSpec> {
        let nominals =
            VerificationNominals::from_process(&self.current_inputs(), metrics, self.config.vacuum_kpa);
        generate_verification_specs(&nominals)
    }

    fn load_wafer_map(&mut self, path: &str) {
        match fs::read_to_string(path) {
            Ok(text) => {
                self.map_records = parse_wafer_map(&text);
                self.map_summary = Some(WaferMapSummary::from_records(&self.map_records));
                self.map_error = None;
                info!(path, records = self.map_records.len(), "wafer map loaded");
            }
            Err(e) => {
                warn!(path, error = %e, "wafer map read failed");
                self.map_records.clear();
                self.map_summary = None;
                self.map_error = Some(format!("{path}: {e}"));
            }
        }
        self.map_path = path.to_string();
    }

    fn csv_text(&self) -> String {
        let inputs = self.current_inputs();
        let metrics = derive_metrics(&inputs);
        let rows = report::export_rows(
            &inputs,
            &metrics,
            &inputs.die_layout(),
            self.config.csv_decimals,
        );
        report::rows_to_csv(&rows)
    }

    fn sop_text(&self) -> String {
        let inputs = self.current_inputs();
        let metrics = derive_metrics(&inputs);
        let specs = self.current_specs(&metrics);
        report::generate_sop(&inputs, &metrics, &inputs.die_layout(), &specs)
    }

    fn save_with_dialog(&mut self, default_name: &str, ext: &str, content: String) {
        let Some(path) = FileDialog::new()
            .add_filter(ext, &[ext])
            .set_file_name(default_name)
            .save_file()
        else {
            return;
        };
        self.export_status = Some(match fs::write(&path, content) {
            Ok(()) => {
                info!(path = %path.display(), "exported");
                format!("{} {}", self.tr.t(i18n::keys::EXPORT_SAVED), path.display())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "export failed");
                format!("{}: {e}", self.tr.t(i18n::keys::ERROR_PREFIX))
            }
        });
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.t_or(key, default);
        ui.style_mut().wrap = Some(false);
        ui.vertical_centered(|ui| {
            ui.heading(txt("gui.nav.heading", "Menu"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Process, txt("gui.tab.process", "Process Setup")),
            (Tab::DieLayout, txt("gui.tab.die_layout", "Die Layout")),
            (Tab::WaferMap, txt("gui.tab.wafer_map", "Wafer Map")),
            (Tab::Verification, txt("gui.tab.verification", "Verification")),
            (Tab::UnitConv, txt("gui.tab.unit_conv", "Unit Converter")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            let resp = ui
                .add(button)
                .on_hover_text(txt("gui.nav.switch_tip", "Switch menu"));
            if resp.clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_process(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.t_or(key, default);
        heading_with_tip(
            ui,
            &txt("gui.process.heading", "Process Setup"),
            &txt(
                "gui.process.tip",
                "Enter wafer, blade and spindle conditions; results update as you type.",
            ),
        );
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("process_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label(txt("gui.process.material", "Material"));
                    egui::ComboBox::from_id_source("material")
                        .selected_text(self.inputs.material.data().name)
                        .show_ui(ui, |ui| {
                            for m in Material::ALL {
                                ui.selectable_value(&mut self.inputs.material, m, m.data().name);
                            }
                        });
                    ui.end_row();
                    ui.label(txt("gui.process.bond", "Blade bond"));
                    egui::ComboBox::from_id_source("bond")
                        .selected_text(self.inputs.blade_bond.code())
                        .show_ui(ui, |ui| {
                            for b in BladeBond::ALL {
                                ui.selectable_value(&mut self.inputs.blade_bond, b, b.code());
                            }
                        });
                    ui.end_row();
                    let p = &mut self.inputs;
                    number_row(ui, &txt("gui.process.wafer_diameter", "Wafer diameter"), &mut p.wafer_diameter_mm, 1.0, "mm");
                    number_row(ui, &txt("gui.process.wafer_thickness", "Wafer thickness"), &mut p.wafer_thickness_um, 5.0, "µm");
                    number_row(ui, &txt("gui.process.blade_diameter", "Blade diameter"), &mut p.blade_diameter_mm, 0.5, "mm");
                    number_row(ui, &txt("gui.process.blade_thickness", "Blade thickness"), &mut p.blade_thickness_um, 1.0, "µm");
                    number_row(ui, &txt("gui.process.rpm", "Spindle speed"), &mut p.rpm, 100.0, "rpm");
                    number_row(ui, &txt("gui.process.feed", "Feed rate"), &mut p.feed_mm_per_s, 0.1, "mm/s");
                    number_row(ui, &txt("gui.process.coolant", "Coolant flow"), &mut p.coolant_l_per_min, 0.1, "L/min");
                    ui.label(txt("gui.process.wear", "Blade wear"));
                    ui.add(egui::Slider::new(&mut p.wear_factor, 0.0..=1.0));
                    ui.end_row();
                });
        });
        for w in self.inputs.warnings() {
            ui.colored_label(egui::Color32::from_rgb(220, 160, 40), w);
        }

        let metrics = derive_metrics(&self.current_inputs());
        ui.add_space(8.0);
        ui.heading(txt("gui.process.results", "Results"));
        egui::Grid::new("process_results")
            .num_columns(3)
            .spacing([12.0, 6.0])
            .striped(true)
            .show(ui, |ui| {
                ui.label(txt("gui.process.tip_speed", "Tip speed"));
                ui.label(format!("{} m/s", format_value(metrics.tip_speed_mps, 2)));
                let note = report::tip_speed_note(metrics.tip_speed_status);
                if metrics.tip_speed_status == TipSpeedStatus::InRange {
                    ui.label(note);
                } else {
                    ui.colored_label(egui::Color32::from_rgb(220, 160, 40), note);
                }
                ui.end_row();

                ui.label(txt("gui.process.kerf", "Kerf estimate"));
                ui.label(format!("{} µm", format_value(metrics.kerf_um, 2)));
                ui.label("");
                ui.end_row();

                ui.label(txt("gui.process.power", "Spindle power"));
                ui.label(format!("{} kW", format_value(metrics.spindle_power_kw, 4)));
                ui.label("");
                ui.end_row();

                ui.label(txt("gui.process.risk", "Chipping risk"));
                ui.colored_label(
                    risk_color(metrics.chipping_risk),
                    format!(
                        "{} / 100 ({})",
                        format_risk(metrics.chipping_risk),
                        report::risk_level_label(metrics.chipping_risk)
                    ),
                );
                ui.add(
                    egui::ProgressBar::new(
                        metrics.chipping_risk.map_or(0.0, |r| f32::from(r) / 100.0),
                    )
                    .desired_width(160.0),
                );
                ui.end_row();

                ui.label(txt("gui.process.suggested_feed", "Suggested feed"));
                ui.label(format!("{} mm/s", format_value(metrics.feed_suggestion_mm_per_s, 2)));
                if ui.button(txt("gui.process.apply", "Apply")).clicked() {
                    self.inputs.feed_mm_per_s = metrics.feed_suggestion_mm_per_s;
                }
                ui.end_row();

                ui.label(txt("gui.process.suggested_rpm", "Suggested RPM"));
                ui.label(format!("{} rpm", format_value(metrics.rpm_suggestion_rpm, 0)));
                if ui.button(txt("gui.process.apply", "Apply")).clicked() {
                    self.inputs.rpm = metrics.rpm_suggestion_rpm;
                }
                ui.end_row();

                ui.label(txt("gui.process.suggested_coolant", "Suggested coolant"));
                ui.label(format!(
                    "{} L/min",
                    format_value(metrics.coolant_suggestion_l_per_min, 2)
                ));
                if ui.button(txt("gui.process.apply", "Apply")).clicked() {
                    self.inputs.coolant_l_per_min = metrics.coolant_suggestion_l_per_min;
                }
                ui.end_row();
            });

        ui.add_space(6.0);
        let b = metrics.risk_breakdown;
        legend_toggle(
            ui,
            &txt("gui.process.risk_breakdown", "Risk breakdown"),
            &format!(
                "material {} + feed {} + tip speed {} + blade {} + thickness {} - coolant {} = {}",
                format_value(b.material_base, 1),
                format_value(b.feed_penalty, 1),
                format_value(b.tip_speed_penalty, 1),
                format_value(b.blade_penalty, 1),
                format_value(b.thickness_penalty, 1),
                format_value(b.coolant_credit, 1),
                format_value(b.raw_score(), 1),
            ),
            &mut self.show_legend_risk,
        );
        ui.small(self.inputs.material.data().notes);
    }

    fn ui_die_layout(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.t_or(key, default);
        heading_with_tip(
            ui,
            &txt("gui.layout.heading", "Die Layout"),
            &txt(
                "gui.layout.tip",
                "Rectangular grid inside the wafer bounding square, scaled by circle/grid area.",
            ),
        );
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("layout_grid")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    let p = &mut self.inputs;
                    number_row(ui, &txt("gui.process.wafer_diameter", "Wafer diameter"), &mut p.wafer_diameter_mm, 1.0, "mm");
                    number_row(ui, &txt("gui.layout.die_width", "Die width"), &mut p.die_width_mm, 0.05, "mm");
                    number_row(ui, &txt("gui.layout.die_height", "Die height"), &mut p.die_height_mm, 0.05, "mm");
                    number_row(ui, &txt("gui.layout.street", "Street width"), &mut p.street_width_um, 1.0, "µm");
                });
        });

        let layout = self.current_inputs().die_layout();
        ui.add_space(8.0);
        egui::Grid::new("layout_results")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .striped(true)
            .show(ui, |ui| {
                ui.label(txt("gui.layout.columns", "Columns"));
                ui.label(layout.columns.to_string());
                ui.end_row();
                ui.label(txt("gui.layout.rows", "Rows"));
                ui.label(layout.rows.to_string());
                ui.end_row();
                ui.label(txt("gui.layout.grid", "Grid dies"));
                ui.label(layout.grid_dies().to_string());
                ui.end_row();
                ui.label(txt("gui.layout.usable", "Usable dies"));
                ui.strong(layout.usable_dies.to_string());
                ui.end_row();
            });
        ui.add_space(6.0);
        legend_toggle(
            ui,
            &txt("gui.layout.legend", "How is this estimated?"),
            &txt(
                "gui.layout.legend_body",
                "pitch = die + street; columns = floor(D / pitch_x), rows = floor(D / pitch_y); \
                 usable = floor(grid x min(1, circle area / grid area)). Edge exclusion and flat/notch are not modelled.",
            ),
            &mut self.show_legend_layout,
        );
    }

    fn ui_wafer_map(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.t_or(key, default);
        heading_with_tip(
            ui,
            &txt("gui.map.heading", "Wafer Map"),
            &txt(
                "gui.map.tip",
                "CSV with x, y, status columns. Only \"bad\" counts as bad; a missing status counts as good.",
            ),
        );
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(txt("gui.map.path", "CSV path"));
            ui.text_edit_singleline(&mut self.map_path);
            if ui.button(txt("gui.map.load", "Load")).clicked() {
                let path = self.map_path.trim().to_string();
                self.load_wafer_map(&path);
            }
            if ui.button(txt("gui.map.browse", "Browse…")).clicked() {
                if let Some(path) = FileDialog::new().add_filter("CSV", &["csv"]).pick_file() {
                    self.load_wafer_map(&path.display().to_string());
                }
            }
        });
        if let Some(err) = &self.map_error {
            ui.colored_label(egui::Color32::from_rgb(200, 60, 60), err);
        }
        let Some(summary) = self.map_summary else {
            return;
        };
        ui.add_space(8.0);
        egui::Grid::new("map_summary")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .striped(true)
            .show(ui, |ui| {
                ui.label(txt("gui.map.total", "Total dies"));
                ui.label(summary.total.to_string());
                ui.end_row();
                ui.label(txt("gui.map.good", "Good"));
                ui.label(summary.good.to_string());
                ui.end_row();
                ui.label(txt("gui.map.bad", "Bad"));
                ui.label(summary.bad.to_string());
                ui.end_row();
                ui.label(txt("gui.map.yield", "Yield"));
                ui.strong(format!("{} %", format_value(summary.yield_percent, 2)));
                ui.end_row();
            });
        ui.add_space(8.0);
        egui::CollapsingHeader::new(txt("gui.map.records", "Records"))
            .default_open(false)
            .show(ui, |ui| {
                egui::ScrollArea::vertical().max_height(300.0).show(ui, |ui| {
                    egui::Grid::new("map_records")
                        .num_columns(3)
                        .striped(true)
                        .show(ui, |ui| {
                            ui.strong("x");
                            ui.strong("y");
                            ui.strong("status");
                            ui.end_row();
                            for r in &self.map_records {
                                ui.label(r.x.to_string());
                                ui.label(r.y.to_string());
                                let color = if r.status == DieStatus::Good {
                                    egui::Color32::from_rgb(60, 160, 80)
                                } else {
                                    egui::Color32::from_rgb(200, 60, 60)
                                };
                                ui.colored_label(color, r.status.as_str());
                                ui.end_row();
                            }
                        });
                });
            });
    }

    fn ui_verification(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.t_or(key, default);
        heading_with_tip(
            ui,
            &txt("gui.verify.heading", "Verification Sheet"),
            &txt(
                "gui.verify.tip",
                "Enter measured values; empty cells stay unknown.",
            ),
        );
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(txt("gui.verify.vacuum", "Nominal chuck vacuum"));
            ui.add(
                egui::DragValue::new(&mut self.config.vacuum_kpa)
                    .speed(0.5)
                    .suffix(" kPa"),
            );
            if ui.button(txt("gui.verify.clear", "Clear measurements")).clicked() {
                self.measured.clear();
            }
        });
        let metrics = derive_metrics(&self.current_inputs());
        let specs = self.current_specs(&metrics);
        ui.add_space(8.0);
        egui::Grid::new("verify_grid")
            .num_columns(7)
            .spacing([10.0, 6.0])
            .striped(true)
            .show(ui, |ui| {
                for h in [
                    txt("gui.verify.item", "Item"),
                    txt("gui.verify.nominal", "Nominal"),
                    txt("gui.verify.lower", "Lower"),
                    txt("gui.verify.upper", "Upper"),
                    txt("gui.verify.unit", "Unit"),
                    txt("gui.verify.measured", "Measured"),
                    txt("gui.verify.result", "Result"),
                ] {
                    ui.strong(h);
                }
                ui.end_row();
                for spec in &specs {
                    ui.label(&spec.name);
                    ui.label(format_value(spec.nominal, 3));
                    ui.label(format_value(spec.lower_bound, 3));
                    ui.label(format_value(spec.upper_bound, 3));
                    ui.label(spec.unit());
                    let cell = self.measured.entry(spec.key).or_default();
                    ui.add(egui::TextEdit::singleline(cell).desired_width(80.0));
                    let status = spec.check(parse_measured(cell));
                    ui.colored_label(status_color(status), status.as_str());
                    ui.end_row();
                }
            });
    }

    fn ui_unit_conv(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.t_or(key, default);
        heading_with_tip(
            ui,
            &txt("gui.unit.heading", "Unit Converter"),
            &txt(
                "gui.unit.tip",
                "Convert dicing-related quantities between units.",
            ),
        );
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("conv_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    label_with_tip(
                        ui,
                        &txt("gui.unit.quantity.label", "Quantity"),
                        &txt("gui.unit.quantity_tip", "Select the quantity type"),
                    );
                    let before = self.conv_kind;
                    egui::ComboBox::from_id_source("conv_kind")
                        .selected_text(kind_label(&tr, self.conv_kind))
                        .show_ui(ui, |ui| {
                            for k in QuantityKind::ALL {
                                ui.selectable_value(&mut self.conv_kind, k, kind_label(&tr, k));
                            }
                        });
                    if before != self.conv_kind {
                        let (f, t) = default_units_for_kind(self.conv_kind);
                        self.conv_from = f.to_string();
                        self.conv_to = t.to_string();
                        self.conv_result = None;
                    }
                    ui.end_row();

                    label_with_tip(
                        ui,
                        &txt("gui.unit.value", "Value"),
                        &txt("gui.unit.value_tip", "Enter the value to convert"),
                    );
                    ui.add(egui::DragValue::new(&mut self.conv_value).speed(1.0));
                    ui.end_row();

                    label_with_tip(
                        ui,
                        &txt("gui.unit.from", "From unit"),
                        &txt("gui.unit.from_tip", "Current unit of the value"),
                    );
                    unit_combo(ui, "conv_from", &mut self.conv_from, self.conv_kind);
                    ui.end_row();

                    label_with_tip(
                        ui,
                        &txt("gui.unit.to", "To unit"),
                        &txt("gui.unit.to_tip", "Desired unit after conversion"),
                    );
                    unit_combo(ui, "conv_to", &mut self.conv_to, self.conv_kind);
                    ui.end_row();
                });
            ui.add_space(8.0);
            if ui.button(txt("gui.unit.run", "Convert")).clicked() {
                self.conv_result = Some(
                    match conversion::convert(
                        self.conv_kind,
                        self.conv_value,
                        self.conv_from.trim(),
                        self.conv_to.trim(),
                    ) {
                        Ok(v) => format!("{v:.6} {}", unit_label(&self.conv_to, self.conv_kind)),
                        Err(e) => format!(
                            "{}: {}",
                            txt("gui.unit.error_prefix", "Error"),
                            e.localized(&tr)
                        ),
                    },
                );
            }
            if let Some(res) = &self.conv_result {
                ui.label(res);
            }
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 최초 1회 화면 크기 조정
        if self.apply_initial_view_size {
            if let Some(screen) = ctx.input(|i| {
                let r = i.screen_rect();
                if r.is_positive() {
                    Some(r.size())
                } else {
                    None
                }
            }) {
                let target = egui::vec2((screen.x * 0.60).max(1000.0), (screen.y * 0.60).max(700.0));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(target));
                self.apply_initial_view_size = false;
            }
        }

        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| tr.t_or(key, default);

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "Wafer Dicing Toolbox"));
                ui.separator();
                if ui.button(txt("gui.formula.button", "Formula reference")).clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                ui.separator();
                if ui.button(txt("gui.export.csv", "Export CSV")).clicked() {
                    let csv = self.csv_text();
                    self.save_with_dialog("dicing_setup.csv", "csv", csv);
                }
                if ui.button(txt("gui.export.sop", "Save SOP")).clicked() {
                    let sop = self.sop_text();
                    self.save_with_dialog("dicing_sop.txt", "txt", sop);
                }
                if let Some(msg) = &self.export_status {
                    ui.small(msg);
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            egui::Window::new(txt("gui.settings.title", "Settings"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.label(txt("gui.settings.alpha", "Window transparency"));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                    ui.separator();
                    ui.label(txt("gui.settings.csv_decimals", "CSV decimals"));
                    ui.add(egui::Slider::new(&mut self.config.csv_decimals, 0..=6));
                    ui.separator();
                    ui.label(txt("gui.settings.lang", "Language"));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut self.lang_input, "auto".into(), txt("gui.settings.lang.auto", "System"));
                            ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                            ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
                        });
                    ui.horizontal(|ui| {
                        ui.label(txt("gui.settings.lang_pack", "Language pack dir"));
                        ui.text_edit_singleline(&mut self.lang_pack_dir_input);
                    });
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label(txt("gui.settings.font", "User font (.ttf/.ttc)"));
                        ui.text_edit_singleline(&mut self.custom_font_path);
                        if ui.button(txt("gui.settings.font_load", "Load")).clicked() {
                            self.font_load_error =
                                load_custom_font(ctx, self.custom_font_path.trim()).err();
                        }
                    });
                    if let Some(err) = &self.font_load_error {
                        ui.colored_label(egui::Color32::from_rgb(200, 60, 60), err);
                    }
                    ui.separator();
                    if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                        self.config.language = self.lang_input.clone();
                        let dir = self.lang_pack_dir_input.trim();
                        self.config.language_pack_dir =
                            (!dir.is_empty()).then(|| dir.to_string());
                        self.config.window_alpha = self.window_alpha;
                        self.config.process = self.inputs.clone();
                        // 즉시 번역기 반영
                        let resolved = i18n::resolve_language(&self.config.language, None);
                        self.tr = i18n::Translator::new_with_pack(
                            &resolved,
                            self.config.language_pack_dir.as_deref(),
                        );
                        self.lang_save_status = Some(match self.config.save() {
                            Ok(()) => txt("gui.settings.saved", "Saved."),
                            Err(e) => e.localized(&self.tr),
                        });
                    }
                    if let Some(msg) = &self.lang_save_status {
                        ui.label(msg);
                    }
                });
        }

        if self.show_formula_modal {
            egui::Window::new(txt("gui.formula.title", "Formula reference"))
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    ui.style_mut().wrap = Some(true);
                    ui.heading(txt("gui.formula.tip_speed", "Tip speed: v = π·D[m]·rpm / 60; target 30-45 m/s."));
                    ui.label(txt("gui.formula.kerf", "Kerf: K = t_blade · (1 + 0.12·wear)."));
                    ui.label(txt("gui.formula.power", "Spindle power: P = c_mat · feed · (K/1000) · (t_wafer/1000)."));
                    ui.separator();
                    ui.heading(txt("gui.formula.feed", "Feed: f = f_mat / √(t_wafer[mm]), clamped to 0.2-6 mm/s."));
                    ui.label(txt("gui.formula.rpm", "RPM: 38·k_mat·k_bond·60 / (π·D[m]), clamped to 8,000-60,000."));
                    ui.label(txt("gui.formula.coolant", "Coolant: 3 + 6·P[kW], clamped to 1-12 L/min."));
                    ui.separator();
                    ui.heading(txt("gui.formula.risk", "Chipping risk: base + feed + tip speed + blade + thickness - coolant, rounded and clamped 0-100."));
                    ui.label(txt("gui.formula.dies", "Die count: floor(D/pitch) per axis, scaled by circle/grid area."));
                    ui.label(txt("gui.formula.verify", "Verification: street ±10%, thickness ±2%, die ±0.01 mm, kerf 0.8-1.5×, vacuum 70-90 kPa."));
                });
        }

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(200.0)
            .max_width(400.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Process => self.ui_process(ui),
                    Tab::DieLayout => self.ui_die_layout(ui),
                    Tab::WaferMap => self.ui_wafer_map(ui),
                    Tab::Verification => self.ui_verification(ui),
                    Tab::UnitConv => self.ui_unit_conv(ui),
                });
        });
    }
}

fn kind_label(tr: &i18n::Translator, kind: QuantityKind) -> String {
    let default = match kind {
        QuantityKind::Length => "Length",
        QuantityKind::Velocity => "Velocity",
        QuantityKind::Flow => "Flow",
        QuantityKind::Pressure => "Pressure (vacuum)",
        QuantityKind::Power => "Power",
    };
    tr.t_or(&format!("gui.unit.quantity.{}", kind.name()), default)
}

fn default_units_for_kind(kind: QuantityKind) -> (&'static str, &'static str) {
    match kind {
        QuantityKind::Length => ("mm", "um"),
        QuantityKind::Velocity => ("m/s", "ft/min"),
        QuantityKind::Flow => ("L/min", "gpm"),
        QuantityKind::Pressure => ("kPa", "inHg"),
        QuantityKind::Power => ("kW", "hp"),
    }
}

fn unit_label(code: &str, kind: QuantityKind) -> String {
    conversion::unit_options(kind)
        .iter()
        .find(|(_, c)| code.eq_ignore_ascii_case(c))
        .map_or_else(|| code.to_string(), |(label, _)| label.to_string())
}

fn unit_combo(ui: &mut egui::Ui, id: &str, value: &mut String, kind: QuantityKind) {
    egui::ComboBox::from_id_source(id)
        .selected_text(unit_label(value, kind))
        .show_ui(ui, |ui| {
            for (label, code) in conversion::unit_options(kind) {
                ui.selectable_value(value, code.to_string(), *label);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_starts_from_config_process() {
        let mut cfg = config::Config::default();
        cfg.process.rpm = 30_000.0;
        let app = GuiApp::new(cfg);
        assert_eq!(app.tab, Tab::Process);
        assert_eq!(app.inputs.rpm, 30_000.0);
        assert_eq!(app.conv_kind, QuantityKind::Length);
    }

    #[test]
    fn default_units_are_valid_for_every_kind() {
        for kind in QuantityKind::ALL {
            let (from, to) = default_units_for_kind(kind);
            assert!(conversion::convert(kind, 1.0, from, to).is_ok(), "{kind:?}");
        }
    }

    #[test]
    fn measured_cells_parse_or_stay_unknown() {
        assert_eq!(parse_measured(" 33.5 "), Some(33.5));
        assert_eq!(parse_measured(""), None);
        assert_eq!(parse_measured("   "), None);
        assert!(parse_measured("NaN").is_some_and(f64::is_nan));
    }

    #[test]
    fn non_numeric_measurement_fails_check() {
        let nominals = VerificationNominals::from_process(
            &ProcessInputs::default(),
            &derive_metrics(&ProcessInputs::default()),
            wafer_dicing_toolbox::verification::DEFAULT_VACUUM_KPA,
        );
        let spec = &generate_verification_specs(&nominals)[0];
        let measured = parse_measured("12,5um");
        assert!(measured.is_some_and(f64::is_nan));
        assert_eq!(spec.check(measured), CheckStatus::Fail);
        assert_eq!(spec.check(parse_measured("")), CheckStatus::Unknown);
    }

    #[test]
    fn unit_label_falls_back_to_code() {
        assert_eq!(unit_label("um", QuantityKind::Length), "µm");
        assert_eq!(unit_label("furlong", QuantityKind::Length), "furlong");
    }

    #[test]
    fn missing_map_file_reports_error() {
        let mut app = GuiApp::new(config::Config::default());
        app.load_wafer_map("/nonexistent/dir/map.csv");
        assert!(app.map_summary.is_none());
        assert!(app.map_error.is_some());
    }
}

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::debug;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const PROMPT_KEEP_HINT: &str = "general.keep_hint";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_PROCESS: &str = "main_menu.process";
    pub const MAIN_MENU_DIE_LAYOUT: &str = "main_menu.die_layout";
    pub const MAIN_MENU_WAFER_MAP: &str = "main_menu.wafer_map";
    pub const MAIN_MENU_VERIFICATION: &str = "main_menu.verification";
    pub const MAIN_MENU_UNIT_CONVERSION: &str = "main_menu.unit_conversion";
    pub const MAIN_MENU_EXPORT: &str = "main_menu.export";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_IO: &str = "error.io";
    pub const ERROR_CONSOLE: &str = "error.console";
    pub const ERROR_INPUT_CLOSED: &str = "error.input_closed";
    pub const ERROR_CONFIG_IO: &str = "error.config_io";
    pub const ERROR_CONFIG_PARSE: &str = "error.config_parse";
    pub const ERROR_CONFIG_SERIALIZE: &str = "error.config_serialize";
    pub const ERROR_UNKNOWN_UNIT: &str = "error.unknown_unit";
    pub const ERROR_UNSUPPORTED_QUANTITY: &str = "error.unsupported_quantity";

    pub const PROCESS_HEADING: &str = "process.heading";
    pub const PROMPT_MATERIAL: &str = "prompt.material";
    pub const PROMPT_BOND: &str = "prompt.bond";
    pub const PROMPT_WAFER_DIAMETER: &str = "prompt.wafer_diameter";
    pub const PROMPT_WAFER_THICKNESS: &str = "prompt.wafer_thickness";
    pub const PROMPT_DIE_WIDTH: &str = "prompt.die_width";
    pub const PROMPT_DIE_HEIGHT: &str = "prompt.die_height";
    pub const PROMPT_STREET: &str = "prompt.street";
    pub const PROMPT_BLADE_DIAMETER: &str = "prompt.blade_diameter";
    pub const PROMPT_BLADE_THICKNESS: &str = "prompt.blade_thickness";
    pub const PROMPT_RPM: &str = "prompt.rpm";
    pub const PROMPT_FEED: &str = "prompt.feed";
    pub const PROMPT_COOLANT: &str = "prompt.coolant";
    pub const PROMPT_WEAR: &str = "prompt.wear";

    pub const RESULT_TIP_SPEED: &str = "result.tip_speed";
    pub const RESULT_KERF: &str = "result.kerf";
    pub const RESULT_POWER: &str = "result.power";
    pub const RESULT_RISK: &str = "result.risk";
    pub const RESULT_SUGGESTED_FEED: &str = "result.suggested_feed";
    pub const RESULT_SUGGESTED_RPM: &str = "result.suggested_rpm";
    pub const RESULT_SUGGESTED_COOLANT: &str = "result.suggested_coolant";
    pub const WARN_TIP_SPEED: &str = "warn.tip_speed";

    pub const DIE_LAYOUT_HEADING: &str = "die_layout.heading";
    pub const RESULT_DIE_GRID: &str = "result.die_grid";
    pub const RESULT_USABLE_DIES: &str = "result.usable_dies";

    pub const WAFER_MAP_HEADING: &str = "wafer_map.heading";
    pub const PROMPT_CSV_PATH: &str = "prompt.csv_path";
    pub const RESULT_WAFER_MAP: &str = "result.wafer_map";

    pub const VERIFY_HEADING: &str = "verify.heading";
    pub const PROMPT_MEASURED: &str = "prompt.measured";

    pub const UNIT_CONVERSION_HEADING: &str = "unit_conversion.heading";
    pub const UNIT_CONVERSION_OPTIONS: &str = "unit_conversion.options";
    pub const UNIT_CONVERSION_PROMPT_KIND: &str = "unit_conversion.prompt_kind";
    pub const UNIT_CONVERSION_PROMPT_VALUE: &str = "unit_conversion.prompt_value";
    pub const UNIT_CONVERSION_PROMPT_FROM_UNIT: &str = "unit_conversion.prompt_from_unit";
    pub const UNIT_CONVERSION_PROMPT_TO_UNIT: &str = "unit_conversion.prompt_to_unit";
    pub const UNIT_CONVERSION_RESULT: &str = "unit_conversion.result";
    pub const UNIT_CONVERSION_UNSUPPORTED: &str = "unit_conversion.unsupported";

    pub const EXPORT_HEADING: &str = "export.heading";
    pub const EXPORT_OPTIONS: &str = "export.options";
    pub const PROMPT_EXPORT_PATH: &str = "prompt.export_path";
    pub const EXPORT_SAVED: &str = "export.saved";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_VACUUM: &str = "settings.prompt_vacuum";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        debug!(
            lang = lang_code,
            overrides = overrides.as_ref().map_or(0, |m| m.len()),
            "translator ready"
        );
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순으로 찾고, 한국어에 없으면 영어를 쓴다.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key)
            .or_else(|| self.built_in(key).map(str::to_string))
            .unwrap_or_else(|| format!("[{key}]"))
    }

    /// 번역이 없으면 `default`를 쓴다. GUI 라벨처럼 내장 표에 없는 키에 사용한다.
    pub fn t_or(&self, key: &str, default: &str) -> String {
        self.lookup(key)
            .or_else(|| self.built_in(key).map(str::to_string))
            .unwrap_or_else(|| default.to_string())
    }

    fn built_in(&self, key: &str) -> Option<&'static str> {
        match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

/// 중첩 테이블은 `section.key` 형태의 점 표기 키로 펼친다.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        PROMPT_KEEP_HINT => "(엔터 = 현재값 유지)",
        MAIN_MENU_TITLE => "\n=== Wafer Dicing Toolbox ===",
        MAIN_MENU_PROCESS => "1) 공정 셋업 계산",
        MAIN_MENU_DIE_LAYOUT => "2) 다이 배치/수량",
        MAIN_MENU_WAFER_MAP => "3) 웨이퍼 맵(CSV) 분석",
        MAIN_MENU_VERIFICATION => "4) 셋업 검증 시트",
        MAIN_MENU_UNIT_CONVERSION => "5) 단위 변환기",
        MAIN_MENU_EXPORT => "6) CSV/SOP 내보내기",
        MAIN_MENU_SETTINGS => "7) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_IO => "입출력 오류",
        ERROR_CONSOLE => "콘솔 입출력 오류",
        ERROR_INPUT_CLOSED => "입력이 종료되었습니다.",
        ERROR_CONFIG_IO => "설정 파일 입출력 오류",
        ERROR_CONFIG_PARSE => "설정 파싱 오류",
        ERROR_CONFIG_SERIALIZE => "설정 직렬화 오류",
        ERROR_UNKNOWN_UNIT => "알 수 없는 단위",
        ERROR_UNSUPPORTED_QUANTITY => "지원하지 않는 물리량",
        PROCESS_HEADING => "\n-- 공정 셋업 --",
        PROMPT_MATERIAL => "재질 (Si/GaAs/SiC/Sapphire/Glass)",
        PROMPT_BOND => "블레이드 본드 (Resin/Metal/Hybrid)",
        PROMPT_WAFER_DIAMETER => "웨이퍼 직경 [mm]",
        PROMPT_WAFER_THICKNESS => "웨이퍼 두께 [µm]",
        PROMPT_DIE_WIDTH => "다이 가로 [mm]",
        PROMPT_DIE_HEIGHT => "다이 세로 [mm]",
        PROMPT_STREET => "스트리트 폭 [µm]",
        PROMPT_BLADE_DIAMETER => "블레이드 외경 [mm]",
        PROMPT_BLADE_THICKNESS => "블레이드 두께 [µm]",
        PROMPT_RPM => "스핀들 회전수 [rpm]",
        PROMPT_FEED => "이송속도 [mm/s]",
        PROMPT_COOLANT => "냉각수 유량 [L/min]",
        PROMPT_WEAR => "블레이드 마모율 (0~1)",
        RESULT_TIP_SPEED => "주속:",
        RESULT_KERF => "커프 추정:",
        RESULT_POWER => "스핀들 부하:",
        RESULT_RISK => "치핑 위험도:",
        RESULT_SUGGESTED_FEED => "권장 이송속도:",
        RESULT_SUGGESTED_RPM => "권장 회전수:",
        RESULT_SUGGESTED_COOLANT => "권장 냉각수:",
        WARN_TIP_SPEED => "경고: 주속이 권장 범위(30~45 m/s)를 벗어났습니다.",
        DIE_LAYOUT_HEADING => "\n-- 다이 배치 --",
        RESULT_DIE_GRID => "격자(열 x 행):",
        RESULT_USABLE_DIES => "사용 가능 다이:",
        WAFER_MAP_HEADING => "\n-- 웨이퍼 맵 --",
        PROMPT_CSV_PATH => "CSV 파일 경로: ",
        RESULT_WAFER_MAP => "전체/양품/불량/수율:",
        VERIFY_HEADING => "\n-- 셋업 검증 --",
        PROMPT_MEASURED => "측정값 (엔터 = 미측정)",
        UNIT_CONVERSION_HEADING => "\n-- 단위 변환 --",
        UNIT_CONVERSION_OPTIONS => "1) 길이  2) 속도  3) 유량  4) 압력(진공)  5) 동력",
        UNIT_CONVERSION_PROMPT_KIND => "항목 번호를 입력: ",
        UNIT_CONVERSION_PROMPT_VALUE => "값 입력: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "입력 단위(ex: mm, m/s, L/min): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "변환 단위(ex: um, ft/min, gpm): ",
        UNIT_CONVERSION_RESULT => "변환 결과:",
        UNIT_CONVERSION_UNSUPPORTED => "지원하지 않는 번호입니다.",
        EXPORT_HEADING => "\n-- 내보내기 --",
        EXPORT_OPTIONS => "1) CSV  2) SOP 문서",
        PROMPT_EXPORT_PATH => "저장 경로",
        EXPORT_SAVED => "저장했습니다:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_PROMPT_LANGUAGE => "언어 (auto/ko/en)",
        SETTINGS_PROMPT_VACUUM => "척 진공도 공칭값 [kPa]",
        SETTINGS_SAVED => "설정이 변경되었습니다.",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        PROMPT_KEEP_HINT => "(enter = keep current)",
        MAIN_MENU_TITLE => "\n=== Wafer Dicing Toolbox ===",
        MAIN_MENU_PROCESS => "1) Process setup",
        MAIN_MENU_DIE_LAYOUT => "2) Die layout / count",
        MAIN_MENU_WAFER_MAP => "3) Wafer map (CSV)",
        MAIN_MENU_VERIFICATION => "4) Verification sheet",
        MAIN_MENU_UNIT_CONVERSION => "5) Unit converter",
        MAIN_MENU_EXPORT => "6) Export CSV/SOP",
        MAIN_MENU_SETTINGS => "7) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_IO => "I/O error",
        ERROR_CONSOLE => "Console I/O error",
        ERROR_INPUT_CLOSED => "Input closed.",
        ERROR_CONFIG_IO => "Config file I/O error",
        ERROR_CONFIG_PARSE => "Config parse error",
        ERROR_CONFIG_SERIALIZE => "Config serialize error",
        ERROR_UNKNOWN_UNIT => "Unknown unit",
        ERROR_UNSUPPORTED_QUANTITY => "Unsupported quantity",
        PROCESS_HEADING => "\n-- Process Setup --",
        PROMPT_MATERIAL => "Material (Si/GaAs/SiC/Sapphire/Glass)",
        PROMPT_BOND => "Blade bond (Resin/Metal/Hybrid)",
        PROMPT_WAFER_DIAMETER => "Wafer diameter [mm]",
        PROMPT_WAFER_THICKNESS => "Wafer thickness [µm]",
        PROMPT_DIE_WIDTH => "Die width [mm]",
        PROMPT_DIE_HEIGHT => "Die height [mm]",
        PROMPT_STREET => "Street width [µm]",
        PROMPT_BLADE_DIAMETER => "Blade diameter [mm]",
        PROMPT_BLADE_THICKNESS => "Blade thickness [µm]",
        PROMPT_RPM => "Spindle speed [rpm]",
        PROMPT_FEED => "Feed rate [mm/s]",
        PROMPT_COOLANT => "Coolant flow [L/min]",
        PROMPT_WEAR => "Blade wear factor (0-1)",
        RESULT_TIP_SPEED => "Tip speed:",
        RESULT_KERF => "Kerf estimate:",
        RESULT_POWER => "Spindle power:",
        RESULT_RISK => "Chipping risk:",
        RESULT_SUGGESTED_FEED => "Suggested feed:",
        RESULT_SUGGESTED_RPM => "Suggested RPM:",
        RESULT_SUGGESTED_COOLANT => "Suggested coolant:",
        WARN_TIP_SPEED => "Warning: tip speed is outside the 30-45 m/s window.",
        DIE_LAYOUT_HEADING => "\n-- Die Layout --",
        RESULT_DIE_GRID => "Grid (columns x rows):",
        RESULT_USABLE_DIES => "Usable dies:",
        WAFER_MAP_HEADING => "\n-- Wafer Map --",
        PROMPT_CSV_PATH => "CSV file path: ",
        RESULT_WAFER_MAP => "Total/good/bad/yield:",
        VERIFY_HEADING => "\n-- Verification --",
        PROMPT_MEASURED => "Measured value (enter = not measured)",
        UNIT_CONVERSION_HEADING => "\n-- Unit Conversion --",
        UNIT_CONVERSION_OPTIONS => "1) Length  2) Velocity  3) Flow  4) Pressure (vacuum)  5) Power",
        UNIT_CONVERSION_PROMPT_KIND => "Enter item number: ",
        UNIT_CONVERSION_PROMPT_VALUE => "Value: ",
        UNIT_CONVERSION_PROMPT_FROM_UNIT => "From unit (ex: mm, m/s, L/min): ",
        UNIT_CONVERSION_PROMPT_TO_UNIT => "To unit (ex: um, ft/min, gpm): ",
        UNIT_CONVERSION_RESULT => "Result:",
        UNIT_CONVERSION_UNSUPPORTED => "Unsupported selection.",
        EXPORT_HEADING => "\n-- Export --",
        EXPORT_OPTIONS => "1) CSV  2) SOP document",
        PROMPT_EXPORT_PATH => "Output path",
        EXPORT_SAVED => "Saved:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_PROMPT_LANGUAGE => "Language (auto/ko/en)",
        SETTINGS_PROMPT_VACUUM => "Nominal chuck vacuum [kPa]",
        SETTINGS_SAVED => "Settings updated.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko-KR", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-us")), "en");
    }

    #[test]
    fn every_english_key_has_korean_text() {
        use keys::*;
        for key in [MAIN_MENU_TITLE, PROMPT_WEAR, RESULT_RISK, SETTINGS_SAVED] {
            assert!(en(key).is_some());
            assert!(ko(key).is_some());
        }
    }

    #[test]
    fn sectioned_pack_is_flattened() {
        let map = parse_toml_to_map("[gui.tab]\nprocess = \"Setup\"\n").unwrap();
        assert_eq!(map.get("gui.tab.process").map(String::as_str), Some("Setup"));
    }

    #[test]
    fn missing_key_uses_default() {
        let tr = Translator::new("ko");
        assert_eq!(tr.t_or("gui.nope", "Fallback"), "Fallback");
        assert_eq!(tr.t(keys::ERROR_PREFIX), "오류");
    }
}

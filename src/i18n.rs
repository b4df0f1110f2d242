use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_STATE_QUERY: &str = "main_menu.state_query";
    pub const MAIN_MENU_PROCESS: &str = "main_menu.process";
    pub const MAIN_MENU_CHART_SUMMARY: &str = "main_menu.chart_summary";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const PROMPT_ALTITUDE: &str = "prompt.altitude";
    pub const PROMPT_DRY_BULB: &str = "prompt.dry_bulb";
    pub const PROMPT_HUMIDITY_KIND: &str = "prompt.humidity_kind";
    pub const PROMPT_RH_VALUE: &str = "prompt.rh_value";
    pub const PROMPT_W_VALUE: &str = "prompt.w_value";
    pub const PROMPT_WET_BULB_VALUE: &str = "prompt.wet_bulb_value";

    pub const STATE_HEADING: &str = "state.heading";
    pub const STATE_PRESSURE: &str = "state.pressure";
    pub const STATE_HUMIDITY_RATIO: &str = "state.humidity_ratio";
    pub const STATE_RELATIVE_HUMIDITY: &str = "state.relative_humidity";
    pub const STATE_SATURATION_RATIO: &str = "state.saturation_ratio";
    pub const STATE_ENTHALPY: &str = "state.enthalpy";
    pub const STATE_SPECIFIC_VOLUME: &str = "state.specific_volume";
    pub const STATE_DEW_POINT: &str = "state.dew_point";
    pub const STATE_SUPERSATURATED: &str = "state.supersaturated";

    pub const PROCESS_HEADING: &str = "process.heading";
    pub const PROCESS_POINT_A: &str = "process.point_a";
    pub const PROCESS_POINT_B: &str = "process.point_b";
    pub const PROCESS_DELTA_T: &str = "process.delta_t";
    pub const PROCESS_DELTA_W: &str = "process.delta_w";
    pub const PROCESS_DELTA_H: &str = "process.delta_h";
    pub const PROCESS_DUTY: &str = "process.duty";
    pub const PROCESS_KIND_SENSIBLE_HEATING: &str = "process.kind.sensible_heating";
    pub const PROCESS_KIND_SENSIBLE_COOLING: &str = "process.kind.sensible_cooling";
    pub const PROCESS_KIND_HUMIDIFICATION: &str = "process.kind.humidification";
    pub const PROCESS_KIND_DEHUMIDIFICATION: &str = "process.kind.dehumidification";
    pub const PROCESS_KIND_ADIABATIC: &str = "process.kind.adiabatic";
    pub const PROCESS_KIND_COMBINED: &str = "process.kind.combined";

    pub const CHART_HEADING: &str = "chart.heading";
    pub const CHART_PRESSURE_LINE: &str = "chart.pressure_line";
    pub const CHART_EMPTY_CURVE: &str = "chart.empty_curve";
    pub const FAMILY_SATURATION: &str = "chart.family.saturation";
    pub const FAMILY_RELATIVE_HUMIDITY: &str = "chart.family.relative_humidity";
    pub const FAMILY_ISOTHERM: &str = "chart.family.isotherm";
    pub const FAMILY_ENTHALPY: &str = "chart.family.enthalpy";
    pub const FAMILY_SPECIFIC_VOLUME: &str = "chart.family.specific_volume";
    pub const FAMILY_HUMIDITY_RATIO: &str = "chart.family.humidity_ratio";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_PROMPT_ALTITUDE: &str = "settings.prompt_altitude";
    pub const SETTINGS_PROMPT_T_MIN: &str = "settings.prompt_t_min";
    pub const SETTINGS_PROMPT_T_MAX: &str = "settings.prompt_t_max";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_INPUT_GROUP: &str = "gui.input_group";
    pub const GUI_ALTITUDE: &str = "gui.altitude";
    pub const GUI_DRY_BULB: &str = "gui.dry_bulb";
    pub const GUI_RELATIVE_HUMIDITY: &str = "gui.relative_humidity";
    pub const GUI_PROCESS_LOG: &str = "gui.process_log";
    pub const GUI_CLICK_HINT: &str = "gui.click_hint";
    pub const GUI_CLEAR_POINTS: &str = "gui.clear_points";
    pub const GUI_EXPORT_PNG: &str = "gui.export_png";
    pub const GUI_EXPORT_SAVED: &str = "gui.export_saved";
    pub const GUI_EXPORT_ERROR: &str = "gui.export_error";
    pub const GUI_CURRENT_POINT: &str = "gui.current_point";
    pub const GUI_POINT_REJECTED: &str = "gui.point_rejected";
    pub const GUI_SAVE_SETTINGS: &str = "gui.save_settings";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
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
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
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
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을, 그마저 없으면
    /// 키 자체를 폴백한다.
    pub fn t(&self, key: &'static str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).or_else(|| ko(key)).unwrap_or(key),
            Language::Ko => ko(key).unwrap_or(key),
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
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
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
        MAIN_MENU_TITLE => "\n=== Psychrometric Toolbox ===",
        MAIN_MENU_STATE_QUERY => "1) 습공기 상태 계산",
        MAIN_MENU_PROCESS => "2) 프로세스 분석 (상태 A → B)",
        MAIN_MENU_CHART_SUMMARY => "3) 선도 곡선 요약",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 해석할 수 없습니다.",
        PROMPT_ALTITUDE => "고도 [m]: ",
        PROMPT_DRY_BULB => "건구온도 [°C]: ",
        PROMPT_HUMIDITY_KIND => "습도 입력 방식 1) 상대습도  2) 습도비  3) 습구온도: ",
        PROMPT_RH_VALUE => "상대습도 [%]: ",
        PROMPT_W_VALUE => "습도비 [kg/kg]: ",
        PROMPT_WET_BULB_VALUE => "습구온도 [°C]: ",
        STATE_HEADING => "\n-- 습공기 상태 --",
        STATE_PRESSURE => "대기압:",
        STATE_HUMIDITY_RATIO => "습도비:",
        STATE_RELATIVE_HUMIDITY => "상대습도:",
        STATE_SATURATION_RATIO => "포화 습도비:",
        STATE_ENTHALPY => "비엔탈피:",
        STATE_SPECIFIC_VOLUME => "비체적:",
        STATE_DEW_POINT => "노점온도:",
        STATE_SUPERSATURATED => "주의: 과포화 상태입니다 (상대습도 > 100 %).",
        PROCESS_HEADING => "\n-- 프로세스 분석 --",
        PROCESS_POINT_A => "상태 A 입력",
        PROCESS_POINT_B => "상태 B 입력",
        PROCESS_DELTA_T => "Δ건구온도:",
        PROCESS_DELTA_W => "Δ습도비:",
        PROCESS_DELTA_H => "Δ비엔탈피:",
        PROCESS_DUTY => "건공기 1 kg/s 기준 열량:",
        PROCESS_KIND_SENSIBLE_HEATING => "현열 가열",
        PROCESS_KIND_SENSIBLE_COOLING => "현열 냉각",
        PROCESS_KIND_HUMIDIFICATION => "가습",
        PROCESS_KIND_DEHUMIDIFICATION => "감습",
        PROCESS_KIND_ADIABATIC => "단열(증발) 프로세스",
        PROCESS_KIND_COMBINED => "복합 프로세스",
        CHART_HEADING => "\n-- 선도 곡선 요약 --",
        CHART_PRESSURE_LINE => "기준 압력:",
        CHART_EMPTY_CURVE => "(표시 영역 밖)",
        FAMILY_SATURATION => "포화 곡선",
        FAMILY_RELATIVE_HUMIDITY => "상대습도 일정",
        FAMILY_ISOTHERM => "건구 등온선",
        FAMILY_ENTHALPY => "비엔탈피 일정",
        FAMILY_SPECIFIC_VOLUME => "비체적 일정",
        FAMILY_HUMIDITY_RATIO => "습도비 일정",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재 설정:",
        SETTINGS_PROMPT_ALTITUDE => "기본 고도 [m] (현재값 유지: 엔터): ",
        SETTINGS_PROMPT_T_MIN => "온도 축 하한 [°C] (현재값 유지: 엔터): ",
        SETTINGS_PROMPT_T_MAX => "온도 축 상한 [°C] (현재값 유지: 엔터): ",
        SETTINGS_PROMPT_LANGUAGE => "언어 (auto/ko/en, 현재값 유지: 엔터): ",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        GUI_INPUT_GROUP => "수동 입력",
        GUI_ALTITUDE => "고도 (m)",
        GUI_DRY_BULB => "건구온도 (°C)",
        GUI_RELATIVE_HUMIDITY => "상대습도 (%)",
        GUI_PROCESS_LOG => "프로세스 분석:",
        GUI_CLICK_HINT => "선도를 클릭해 프로세스의 두 점을 지정하세요.",
        GUI_CLEAR_POINTS => "선택 점 지우기",
        GUI_EXPORT_PNG => "PNG로 내보내기",
        GUI_EXPORT_SAVED => "저장 완료:",
        GUI_EXPORT_ERROR => "내보내기 오류:",
        GUI_CURRENT_POINT => "현재 점",
        GUI_POINT_REJECTED => "포화 곡선 위의 점은 선택할 수 없습니다.",
        GUI_SAVE_SETTINGS => "설정 저장",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Psychrometric Toolbox ===",
        MAIN_MENU_STATE_QUERY => "1) Moist air state",
        MAIN_MENU_PROCESS => "2) Process analysis (state A → B)",
        MAIN_MENU_CHART_SUMMARY => "3) Chart curve summary",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid selection. Try again.",
        ERROR_INVALID_NUMBER => "Could not parse a number.",
        PROMPT_ALTITUDE => "Altitude [m]: ",
        PROMPT_DRY_BULB => "Dry-bulb temperature [°C]: ",
        PROMPT_HUMIDITY_KIND => "Humidity input 1) relative humidity  2) humidity ratio  3) wet bulb: ",
        PROMPT_RH_VALUE => "Relative humidity [%]: ",
        PROMPT_W_VALUE => "Humidity ratio [kg/kg]: ",
        PROMPT_WET_BULB_VALUE => "Wet-bulb temperature [°C]: ",
        STATE_HEADING => "\n-- Moist air state --",
        STATE_PRESSURE => "Pressure:",
        STATE_HUMIDITY_RATIO => "Humidity ratio:",
        STATE_RELATIVE_HUMIDITY => "Relative humidity:",
        STATE_SATURATION_RATIO => "Saturation humidity ratio:",
        STATE_ENTHALPY => "Specific enthalpy:",
        STATE_SPECIFIC_VOLUME => "Specific volume:",
        STATE_DEW_POINT => "Dew point:",
        STATE_SUPERSATURATED => "Warning: supersaturated state (relative humidity > 100 %).",
        PROCESS_HEADING => "\n-- Process analysis --",
        PROCESS_POINT_A => "Enter state A",
        PROCESS_POINT_B => "Enter state B",
        PROCESS_DELTA_T => "Δ dry-bulb:",
        PROCESS_DELTA_W => "Δ humidity ratio:",
        PROCESS_DELTA_H => "Δ enthalpy:",
        PROCESS_DUTY => "Duty for 1 kg/s dry air:",
        PROCESS_KIND_SENSIBLE_HEATING => "sensible heating",
        PROCESS_KIND_SENSIBLE_COOLING => "sensible cooling",
        PROCESS_KIND_HUMIDIFICATION => "humidification",
        PROCESS_KIND_DEHUMIDIFICATION => "dehumidification",
        PROCESS_KIND_ADIABATIC => "adiabatic (evaporative) process",
        PROCESS_KIND_COMBINED => "combined process",
        CHART_HEADING => "\n-- Chart curve summary --",
        CHART_PRESSURE_LINE => "Reference pressure:",
        CHART_EMPTY_CURVE => "(outside visible region)",
        FAMILY_SATURATION => "saturation",
        FAMILY_RELATIVE_HUMIDITY => "constant relative humidity",
        FAMILY_ISOTHERM => "isotherm",
        FAMILY_ENTHALPY => "constant enthalpy",
        FAMILY_SPECIFIC_VOLUME => "constant specific volume",
        FAMILY_HUMIDITY_RATIO => "constant humidity ratio",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current settings:",
        SETTINGS_PROMPT_ALTITUDE => "Default altitude [m] (enter to keep): ",
        SETTINGS_PROMPT_T_MIN => "Temperature axis min [°C] (enter to keep): ",
        SETTINGS_PROMPT_T_MAX => "Temperature axis max [°C] (enter to keep): ",
        SETTINGS_PROMPT_LANGUAGE => "Language (auto/ko/en, enter to keep): ",
        SETTINGS_SAVED => "Settings saved.",
        GUI_INPUT_GROUP => "Manual input",
        GUI_ALTITUDE => "Altitude (m)",
        GUI_DRY_BULB => "Dry bulb (°C)",
        GUI_RELATIVE_HUMIDITY => "Relative humidity (%)",
        GUI_PROCESS_LOG => "Process analysis:",
        GUI_CLICK_HINT => "Click the chart to pick the two process points.",
        GUI_CLEAR_POINTS => "Clear points",
        GUI_EXPORT_PNG => "Export PNG",
        GUI_EXPORT_SAVED => "Saved:",
        GUI_EXPORT_ERROR => "Export error:",
        GUI_CURRENT_POINT => "Current point",
        GUI_POINT_REJECTED => "Points above the saturation curve cannot be selected.",
        GUI_SAVE_SETTINGS => "Save settings",
        _ => return None,
    })
}

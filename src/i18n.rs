use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::reference::{PanelType, Weather};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const PER_YEAR: &str = "general.per_year";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_ESTIMATE: &str = "main_menu.estimate";
    pub const MAIN_MENU_REFERENCE: &str = "main_menu.reference";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_PANEL_COUNT_RANGE: &str = "error.panel_count_range";

    pub const ESTIMATE_HEADING: &str = "estimate.heading";
    pub const PROMPT_CITY: &str = "prompt.city";
    pub const PROMPT_PANEL_TYPE: &str = "prompt.panel_type";
    pub const PROMPT_WEATHER: &str = "prompt.weather";
    pub const PROMPT_PANEL_COUNT: &str = "prompt.panel_count";
    pub const PROMPT_SAVE_PRESET: &str = "prompt.save_preset";
    pub const PRESET_SAVED: &str = "estimate.preset_saved";

    pub const REPORT_HEADING: &str = "report.heading";
    pub const REPORT_CITY_LINE: &str = "report.city_line";
    pub const REPORT_EFFICIENCY: &str = "report.efficiency";
    pub const REPORT_FOOTER: &str = "report.footer";
    pub const METRIC_PRODUCTION: &str = "metric.production";
    pub const METRIC_CAPACITY: &str = "metric.capacity";
    pub const METRIC_PER_AREA: &str = "metric.per_area";
    pub const METRIC_COST: &str = "metric.cost";

    pub const SPLIT_HEADING: &str = "split.heading";
    pub const SPLIT_SELF_CONSUMED: &str = "split.self_consumed";
    pub const SPLIT_GRID_INJECTED: &str = "split.grid_injected";
    pub const SPLIT_GRID_DRAWN: &str = "split.grid_drawn";
    pub const CHART_TITLE: &str = "chart.title";
    pub const CHART_Y_AXIS: &str = "chart.y_axis";

    pub const REFERENCE_HEADING: &str = "reference.heading";
    pub const REFERENCE_CITIES: &str = "reference.cities";
    pub const REFERENCE_PANELS: &str = "reference.panels";
    pub const REFERENCE_WEATHER: &str = "reference.weather";
    pub const REFERENCE_ASSUMPTIONS: &str = "reference.assumptions";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_CURRENCY: &str = "settings.prompt_currency";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    Fr,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else if c.starts_with("fr") {
            Language::Fr
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Fr => "fr",
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
    /// 언어 코드(ko/en/fr)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 언어팩을 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 순으로 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        let built_in = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En | Language::Fr => en(key),
        };
        built_in.unwrap_or("[missing translation]")
    }

    /// `{name}` 형태의 자리표시자를 채운 번역을 반환한다.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }

    pub fn panel_name(&self, panel: PanelType) -> &str {
        let key = format!("panel.{}", panel.key());
        match self.overrides.as_ref().and_then(|m| m.get(&key)) {
            Some(v) => v.as_str(),
            None => match self.lang {
                Language::Fr => panel.french_name(),
                _ => panel.name(),
            },
        }
    }

    pub fn weather_name(&self, weather: Weather) -> &str {
        let key = format!("weather.{}", weather.key());
        match self.overrides.as_ref().and_then(|m| m.get(&key)) {
            Some(v) => v.as_str(),
            None => match self.lang {
                Language::Fr => weather.french_name(),
                _ => weather.name(),
            },
        }
    }
}

/// 템플릿의 `{key}`를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" | "ko-kr" => Some("ko-kr".into()),
        "en" | "en-us" | "en-uk" | "en-gb" => Some("en-us".into()),
        "fr" | "fr-fr" => Some("fr-fr".into()),
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("fr") => Some("fr-fr".into()),
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
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        "fr" => Some("fr-fr".into()),
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
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 플랫 맵 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., fr-fr)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., fr)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
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

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        "fr-fr" | "fr" => parse_toml_to_map(include_str!("../locales/fr-fr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        PER_YEAR => "/년",
        MAIN_MENU_TITLE => "\n=== 태양광 발전량 추정기 ===",
        MAIN_MENU_ESTIMATE => "1) 발전량 추정",
        MAIN_MENU_REFERENCE => "2) 기준표 보기",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_PANEL_COUNT_RANGE => "패널 수는 {min}~{max} 사이여야 합니다.",
        ESTIMATE_HEADING => "\n-- 발전량 추정 --",
        PROMPT_CITY => "도시를 선택하세요",
        PROMPT_PANEL_TYPE => "패널 종류를 선택하세요",
        PROMPT_WEATHER => "날씨 조건을 선택하세요",
        PROMPT_PANEL_COUNT => "패널 수 ({min}-{max}, 엔터={default}): ",
        PROMPT_SAVE_PRESET => "이 선택을 기본값으로 저장할까요? (y/N): ",
        PRESET_SAVED => "기본 선택값을 저장했습니다.",
        REPORT_HEADING => "{icon} 시뮬레이션 결과",
        REPORT_CITY_LINE => "선택 도시: {city} – 일사량: {irradiation} kWh/m²/년",
        REPORT_EFFICIENCY => "{panel} 패널 효율: {efficiency}%",
        REPORT_FOOTER => "PVsyst 기준 생산량을 바탕으로 한 단순 추정입니다.",
        METRIC_PRODUCTION => "예상 생산량",
        METRIC_CAPACITY => "설치 용량",
        METRIC_PER_AREA => "면적당 생산량",
        METRIC_COST => "패널 예상 비용",
        SPLIT_HEADING => "에너지 분배",
        SPLIT_SELF_CONSUMED => "자가소비",
        SPLIT_GRID_INJECTED => "계통 주입",
        SPLIT_GRID_DRAWN => "계통 수전",
        CHART_TITLE => "연간 에너지 분배",
        CHART_Y_AXIS => "에너지 ({unit})",
        REFERENCE_HEADING => "\n-- 기준표 --",
        REFERENCE_CITIES => "도시별 연간 일사량 [kWh/m²/년]",
        REFERENCE_PANELS => "패널 종류별 효율 / 와트당 가격 / 기준 생산량",
        REFERENCE_WEATHER => "날씨 보정 계수",
        REFERENCE_ASSUMPTIONS => "가정: 패널 1장 {area} m², {power} kWc, 건물 소비 {consumption} kWh/년, 자가소비 포착률 {ratio}",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재: 언어={lang}, 에너지 단위={energy}, 면적 단위={area}, 통화={currency}",
        SETTINGS_OPTIONS => "1) 언어  2) 에너지 단위  3) 면적 단위  4) 통화 기호",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드 (auto/ko/en-us/fr-fr): ",
        SETTINGS_PROMPT_CURRENCY => "통화 기호: ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        PER_YEAR => "/year",
        MAIN_MENU_TITLE => "\n=== Solar PV Estimator ===",
        MAIN_MENU_ESTIMATE => "1) Estimate production",
        MAIN_MENU_REFERENCE => "2) Reference tables",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_PANEL_COUNT_RANGE => "Panel count must be between {min} and {max}.",
        ESTIMATE_HEADING => "\n-- Estimate production --",
        PROMPT_CITY => "Choose a city",
        PROMPT_PANEL_TYPE => "Choose a panel type",
        PROMPT_WEATHER => "Choose the weather conditions",
        PROMPT_PANEL_COUNT => "Number of panels ({min}-{max}, enter={default}): ",
        PROMPT_SAVE_PRESET => "Save this selection as the default? (y/N): ",
        PRESET_SAVED => "Default selection saved.",
        REPORT_HEADING => "{icon} Simulation results",
        REPORT_CITY_LINE => "Selected city: {city} – Irradiation: {irradiation} kWh/m²/year",
        REPORT_EFFICIENCY => "Efficiency of the {panel} panel: {efficiency}%",
        REPORT_FOOTER => "Simple estimate based on PVsyst reference yields.",
        METRIC_PRODUCTION => "Estimated production",
        METRIC_CAPACITY => "Installed capacity",
        METRIC_PER_AREA => "Production per area",
        METRIC_COST => "Estimated panel cost",
        SPLIT_HEADING => "Energy breakdown",
        SPLIT_SELF_CONSUMED => "Self-consumed",
        SPLIT_GRID_INJECTED => "Grid-injected",
        SPLIT_GRID_DRAWN => "Grid-drawn",
        CHART_TITLE => "Annual energy breakdown",
        CHART_Y_AXIS => "Energy ({unit})",
        REFERENCE_HEADING => "\n-- Reference tables --",
        REFERENCE_CITIES => "Annual irradiation by city [kWh/m²/year]",
        REFERENCE_PANELS => "Panel type efficiency / price per watt / reference production",
        REFERENCE_WEATHER => "Weather derating factors",
        REFERENCE_ASSUMPTIONS => "Assumptions: {area} m² and {power} kWc per panel, building consumption {consumption} kWh/year, self-consumption capture {ratio}",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current: language={lang}, energy unit={energy}, area unit={area}, currency={currency}",
        SETTINGS_OPTIONS => "1) Language  2) Energy unit  3) Area unit  4) Currency symbol",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_PROMPT_LANGUAGE => "Language code (auto/ko/en-us/fr-fr): ",
        SETTINGS_PROMPT_CURRENCY => "Currency symbol: ",
        SETTINGS_INVALID => "Invalid input; nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("fr", Some("ko")), "fr-fr");
        assert_eq!(resolve_language("auto", Some("ko")), "ko-kr");
        assert_eq!(resolve_language("", Some("en-gb")), "en-us");
    }

    #[test]
    fn built_in_strings_fall_back_to_english() {
        let tr = Translator::new("fr-fr");
        assert_eq!(tr.t(keys::SPLIT_GRID_DRAWN), "Grid-drawn");
        assert_eq!(tr.panel_name(PanelType::Amorphous), "Amorphe");
        assert_eq!(tr.weather_name(Weather::Rainy), "Pluvieux");
        assert_eq!(tr.language_code(), "fr");
        let ko = Translator::new("ko");
        assert_eq!(ko.t(keys::SPLIT_SELF_CONSUMED), "자가소비");
    }

    #[test]
    fn french_pack_overrides_split_labels() {
        let tr = Translator::new_with_pack("fr-fr", None);
        assert_eq!(tr.t(keys::SPLIT_SELF_CONSUMED), "Autoconsommée");
        assert_eq!(tr.weather_name(Weather::Rainy), "Pluvieux");
    }

    #[test]
    fn nested_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[split]\ngrid_drawn = \"Reprise réseau\"\n").unwrap();
        assert_eq!(map.get("split.grid_drawn").map(String::as_str), Some("Reprise réseau"));
    }

    #[test]
    fn template_fills_every_placeholder() {
        let out = fill_template(
            "{a} and {b} and {a}",
            &[("a", "x".to_string()), ("b", "y".to_string())],
        );
        assert_eq!(out, "x and y and x");
    }
}

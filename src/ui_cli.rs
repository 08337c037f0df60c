use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::{Config, Preset};
use crate::estimator::{
    self, SimulationInput, ANNUAL_BUILDING_CONSUMPTION_KWH, AREA_PER_PANEL_M2, MAX_PANEL_COUNT,
    MIN_PANEL_COUNT, POWER_PER_PANEL_KWC, SELF_CONSUMPTION_CAPTURE_RATIO,
};
use crate::i18n::{keys, Translator};
use crate::reference::{City, PanelType, Weather};
use crate::report::{format_thousands, Report};
use crate::units::{AreaUnit, EnergyUnit};

/// 텍스트 막대그래프 최대 폭
const CHART_WIDTH: usize = 40;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Estimate,
    ReferenceTables,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator, input: &mut impl BufRead) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_ESTIMATE));
    println!("{}", tr.t(keys::MAIN_MENU_REFERENCE));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(input, tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Estimate),
            "2" => return Ok(MenuChoice::ReferenceTables),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 발전량 추정 메뉴를 처리한다. 프리셋 값이 각 선택의 기본값이 된다.
pub fn handle_estimate(
    tr: &Translator,
    cfg: &mut Config,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::ESTIMATE_HEADING));
    let preset = cfg.preset.to_input();

    let city_labels: Vec<String> = City::ALL
        .iter()
        .map(|c| format!("{} ({:.0} kWh/m²)", c.name(), c.irradiation_kwh_per_m2()))
        .collect();
    let city = City::ALL[pick(input, tr, keys::PROMPT_CITY, &city_labels, index_of(&City::ALL, preset.city()))?];

    let panel_labels: Vec<String> = PanelType::ALL
        .iter()
        .map(|p| tr.panel_name(*p).to_string())
        .collect();
    let panel_type = PanelType::ALL[pick(
        input,
        tr,
        keys::PROMPT_PANEL_TYPE,
        &panel_labels,
        index_of(&PanelType::ALL, preset.panel_type()),
    )?];

    let weather_labels: Vec<String> = Weather::ALL
        .iter()
        .map(|w| format!("{} {}", w.icon(), tr.weather_name(*w)))
        .collect();
    let weather = Weather::ALL[pick(
        input,
        tr,
        keys::PROMPT_WEATHER,
        &weather_labels,
        index_of(&Weather::ALL, preset.weather()),
    )?];

    let panel_count = read_panel_count(input, tr, preset.panel_count())?;
    let selection = SimulationInput::new(city, panel_type, weather, panel_count)?;
    print_report(tr, cfg, &selection);

    let answer = read_line(input, tr.t(keys::PROMPT_SAVE_PRESET))?;
    if matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "o" | "oui"
    ) {
        cfg.preset = Preset::from_input(&selection);
        cfg.save()?;
        println!("{}", tr.t(keys::PRESET_SAVED));
    }
    Ok(())
}

/// 입력을 추정하고 결과 보고서를 출력한다.
pub fn print_report(tr: &Translator, cfg: &Config, input: &SimulationInput) {
    let result = estimator::estimate(input);
    let report = Report::build(&result, tr, &cfg.display_units, &cfg.currency_symbol);
    for line in report.lines(CHART_WIDTH) {
        println!("{line}");
    }
}

/// 기준표(도시 일사량, 패널 계수, 날씨 계수, 고정 가정)를 출력한다.
pub fn handle_reference_tables(tr: &Translator) {
    println!("{}", tr.t(keys::REFERENCE_HEADING));
    println!("{}", tr.t(keys::REFERENCE_CITIES));
    for city in City::ALL {
        let marker = if city == City::REFERENCE { " *" } else { "" };
        println!(
            "  {:<12} {:>6}{marker}",
            city.name(),
            format_thousands(city.irradiation_kwh_per_m2(), 0)
        );
    }
    println!();
    println!("{}", tr.t(keys::REFERENCE_PANELS));
    for panel in PanelType::ALL {
        let spec = panel.spec();
        println!(
            "  {:<16} {:>5.1}%  {:>5.2}/W  {:>7} kWh",
            tr.panel_name(panel),
            spec.efficiency_pct,
            spec.price_per_watt,
            format_thousands(spec.reference_annual_production_kwh, 0)
        );
    }
    println!();
    println!("{}", tr.t(keys::REFERENCE_WEATHER));
    for weather in Weather::ALL {
        println!(
            "  {} {:<12} x{:.2}",
            weather.icon(),
            tr.weather_name(weather),
            weather.multiplier()
        );
    }
    println!();
    println!(
        "{}",
        tr.tf(
            keys::REFERENCE_ASSUMPTIONS,
            &[
                ("area", format!("{AREA_PER_PANEL_M2}")),
                ("power", format!("{POWER_PER_PANEL_KWC}")),
                ("consumption", format_thousands(ANNUAL_BUILDING_CONSUMPTION_KWH, 0)),
                ("ratio", format!("{SELF_CONSUMPTION_CAPTURE_RATIO}")),
            ],
        )
    );
}

/// 설정 메뉴 처리 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOutcome {
    /// 취소 또는 잘못된 입력. 저장할 것이 없다.
    Unchanged,
    Changed,
    /// 언어가 바뀌어 번역기를 다시 만들어야 한다.
    LanguageChanged,
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(
    tr: &Translator,
    cfg: &mut Config,
    input: &mut impl BufRead,
) -> Result<SettingsOutcome, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    let lang = if cfg.language == "auto" {
        format!("auto ({})", tr.language_code())
    } else {
        cfg.language.clone()
    };
    println!(
        "{}",
        tr.tf(
            keys::SETTINGS_CURRENT,
            &[
                ("lang", lang),
                ("energy", cfg.display_units.energy.label().to_string()),
                ("area", cfg.display_units.area.label().to_string()),
                ("currency", cfg.currency_symbol.clone()),
            ],
        )
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(input, tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let outcome = match sel.trim() {
        "" => return Ok(SettingsOutcome::Unchanged),
        "1" => {
            let code = read_line(input, tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let code = code.trim();
            if !is_supported_language(code) {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(SettingsOutcome::Unchanged);
            }
            cfg.language = code.to_lowercase();
            SettingsOutcome::LanguageChanged
        }
        "2" => {
            let labels: Vec<String> = EnergyUnit::ALL.iter().map(|u| u.label().to_string()).collect();
            let current = index_of(&EnergyUnit::ALL, cfg.display_units.energy);
            cfg.display_units.energy =
                EnergyUnit::ALL[pick(input, tr, keys::PROMPT_SELECT, &labels, current)?];
            SettingsOutcome::Changed
        }
        "3" => {
            let labels: Vec<String> = AreaUnit::ALL.iter().map(|u| u.label().to_string()).collect();
            let current = index_of(&AreaUnit::ALL, cfg.display_units.area);
            cfg.display_units.area =
                AreaUnit::ALL[pick(input, tr, keys::PROMPT_SELECT, &labels, current)?];
            SettingsOutcome::Changed
        }
        "4" => {
            let symbol = read_line(input, tr.t(keys::SETTINGS_PROMPT_CURRENCY))?;
            if symbol.trim().is_empty() {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(SettingsOutcome::Unchanged);
            }
            cfg.currency_symbol = symbol.trim().to_string();
            SettingsOutcome::Changed
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(SettingsOutcome::Unchanged);
        }
    };
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(outcome)
}

fn is_supported_language(code: &str) -> bool {
    matches!(
        code.to_lowercase().as_str(),
        "auto" | "ko" | "ko-kr" | "en" | "en-us" | "fr" | "fr-fr"
    )
}

fn index_of<T: PartialEq>(items: &[T], value: T) -> usize {
    items.iter().position(|v| *v == value).unwrap_or(0)
}

/// 번호 목록을 보여주고 0부터 시작하는 인덱스를 반환한다. 엔터는 기본값 선택.
fn pick(
    input: &mut impl BufRead,
    tr: &Translator,
    title_key: &str,
    labels: &[String],
    default: usize,
) -> Result<usize, AppError> {
    println!("{}", tr.t(title_key));
    for (i, label) in labels.iter().enumerate() {
        let marker = if i == default { " *" } else { "" };
        println!("  {}) {label}{marker}", i + 1);
    }
    loop {
        let sel = read_line(input, tr.t(keys::PROMPT_SELECT))?;
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(default);
        }
        match sel.parse::<usize>() {
            Ok(n) if (1..=labels.len()).contains(&n) => return Ok(n - 1),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn read_panel_count(
    input: &mut impl BufRead,
    tr: &Translator,
    default: u32,
) -> Result<u32, AppError> {
    let range_vars = [
        ("min", MIN_PANEL_COUNT.to_string()),
        ("max", MAX_PANEL_COUNT.to_string()),
        ("default", default.to_string()),
    ];
    loop {
        let s = read_line(input, &tr.tf(keys::PROMPT_PANEL_COUNT, &range_vars))?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<i64>() {
            Ok(v) if (i64::from(MIN_PANEL_COUNT)..=i64::from(MAX_PANEL_COUNT)).contains(&v) => {
                return Ok(v as u32)
            }
            Ok(_) => println!("{}", tr.tf(keys::ERROR_PANEL_COUNT_RANGE, &range_vars)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_line(input: &mut impl BufRead, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    let n = input.read_line(&mut buf).map_err(AppError::Io)?;
    if n == 0 {
        // stdin EOF
        return Err(AppError::Io(io::Error::from(io::ErrorKind::UnexpectedEof)));
    }
    Ok(buf)
}

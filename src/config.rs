use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::estimator::{
    check_panel_count, EstimationError, SimulationInput, DEFAULT_PANEL_COUNT, MAX_PANEL_COUNT,
    MIN_PANEL_COUNT,
};
use crate::reference::{City, PanelType, Weather};
use crate::units::{AreaUnit, EnergyUnit};

/// 설정 파일 기본 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 결과 표시 단위 설정을 담는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayUnits {
    pub energy: EnergyUnit,
    pub area: AreaUnit,
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self {
            energy: EnergyUnit::KilowattHour,
            area: AreaUnit::SquareMeter,
        }
    }
}

/// 화면을 열었을 때 처음 선택되어 있을 입력값.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    pub city: City,
    pub panel_type: PanelType,
    pub weather: Weather,
    pub panel_count: u32,
}

impl Default for Preset {
    fn default() -> Self {
        let input = SimulationInput::default();
        Self {
            city: input.city(),
            panel_type: input.panel_type(),
            weather: input.weather(),
            panel_count: DEFAULT_PANEL_COUNT,
        }
    }
}

impl Preset {
    /// 프리셋을 검증된 입력으로 바꾼다. 파일에 범위 밖 패널 수가 있으면 잘라낸다.
    pub fn to_input(&self) -> SimulationInput {
        let count = self.panel_count.clamp(MIN_PANEL_COUNT, MAX_PANEL_COUNT);
        SimulationInput::new(self.city, self.panel_type, self.weather, count)
            .unwrap_or_default()
    }

    /// 명령행에서 받은 선택값을 프리셋 위에 덮어쓴다.
    ///
    /// 주어진 값은 엄격히 검증하고, 빠진 값은 `to_input`으로 보정된 프리셋 값을 쓴다.
    pub fn merge_selection(
        &self,
        city: Option<&str>,
        panel_type: Option<&str>,
        weather: Option<&str>,
        panel_count: Option<i64>,
    ) -> Result<SimulationInput, EstimationError> {
        let defaults = self.to_input();
        let city = match city {
            Some(s) => s.parse::<City>()?,
            None => defaults.city(),
        };
        let panel_type = match panel_type {
            Some(s) => s.parse::<PanelType>()?,
            None => defaults.panel_type(),
        };
        let weather = match weather {
            Some(s) => s.parse::<Weather>()?,
            None => defaults.weather(),
        };
        let count = match panel_count {
            Some(n) => check_panel_count(n)?,
            None => defaults.panel_count(),
        };
        SimulationInput::new(city, panel_type, weather, count)
    }

    pub fn from_input(input: &SimulationInput) -> Self {
        Self {
            city: input.city(),
            panel_type: input.panel_type(),
            weather: input.weather(),
            panel_count: input.panel_count(),
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (auto/ko/en-us/fr-fr)
    pub language: String,
    /// 외부 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    /// 비용 표시용 통화 기호
    pub currency_symbol: String,
    pub display_units: DisplayUnits,
    pub preset: Preset,
    /// 저장 위치. 파일에는 기록하지 않는다.
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            currency_symbol: "€".into(),
            display_units: DisplayUnits::default(),
            preset: Preset::default(),
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// 작업 디렉터리의 config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_from(Path::new(DEFAULT_CONFIG_PATH))
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본값을 저장한 뒤 반환한다.
pub fn load_or_default_from(path: &Path) -> Result<Config, ConfigError> {
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        parse_config(&content)?
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        cfg
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

/// TOML 문자열을 설정으로 해석한다. 빠진 항목은 기본값으로 채운다.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let cfg: Config = toml::from_str(content)?;
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 로드했던 파일(기본 config.toml)에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        save_config(self, &path)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.language, "auto");
        assert_eq!(cfg.currency_symbol, "€");
        assert_eq!(cfg.preset, Preset::default());
        assert_eq!(cfg.display_units.energy, EnergyUnit::KilowattHour);
    }

    #[test]
    fn partial_preset_keeps_other_defaults() {
        let cfg = parse_config(
            r#"
language = "fr-fr"
[preset]
city = "Nice"
panel_count = 12
"#,
        )
        .unwrap();
        assert_eq!(cfg.language, "fr-fr");
        assert_eq!(cfg.preset.city, City::Nice);
        assert_eq!(cfg.preset.panel_count, 12);
        assert_eq!(cfg.preset.panel_type, PanelType::Monocrystalline);
    }

    #[test]
    fn out_of_range_preset_count_is_clamped() {
        let preset = Preset {
            panel_count: 40,
            ..Preset::default()
        };
        assert_eq!(preset.to_input().panel_count(), MAX_PANEL_COUNT);
    }

    #[test]
    fn unknown_city_in_file_is_a_parse_error() {
        let err = parse_config("[preset]\ncity = \"Berlin\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Serde(_)));
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut cfg = Config::default();
        cfg.display_units.area = AreaUnit::SquareFoot;
        cfg.preset.weather = Weather::Cloudy;
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back = parse_config(&text).unwrap();
        assert_eq!(back.display_units.area, AreaUnit::SquareFoot);
        assert_eq!(back.preset.weather, Weather::Cloudy);
    }
}

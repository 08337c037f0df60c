//! 도시별 연간 일사량, 패널 기술별 계수, 날씨 보정 계수 기준표.
//!
//! 모든 표는 프로세스 전역 상수이며 `match`로만 조회한다.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 기준표 조회 실패를 표현한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// 목록에 없는 도시 이름
    UnknownCity(String),
    /// 목록에 없는 패널 종류
    UnknownPanelType(String),
    /// 목록에 없는 날씨 조건
    UnknownWeather(String),
}

impl std::fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceError::UnknownCity(v) => write!(f, "unknown city: {v}"),
            ReferenceError::UnknownPanelType(v) => write!(f, "unknown panel type: {v}"),
            ReferenceError::UnknownWeather(v) => write!(f, "unknown weather: {v}"),
        }
    }
}

impl std::error::Error for ReferenceError {}

/// 선택 가능한 도시 12곳.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Marseille,
    Lyon,
    Toulouse,
    Bordeaux,
    Nantes,
    Paris,
    Strasbourg,
    Lille,
    Metz,
    Colmar,
    Nice,
    Montpellier,
}

impl City {
    /// 화면 표시 순서.
    pub const ALL: [City; 12] = [
        City::Marseille,
        City::Lyon,
        City::Toulouse,
        City::Bordeaux,
        City::Nantes,
        City::Paris,
        City::Strasbourg,
        City::Lille,
        City::Metz,
        City::Colmar,
        City::Nice,
        City::Montpellier,
    ];

    /// 패널 기준 생산량이 측정된 기준 도시 (1824 kWh/m²/년).
    pub const REFERENCE: City = City::Marseille;

    /// 연간 일사량 [kWh/m²/년]
    pub fn irradiation_kwh_per_m2(self) -> f64 {
        match self {
            City::Marseille => 1824.0,
            City::Lyon => 1470.0,
            City::Toulouse => 1610.0,
            City::Bordeaux => 1575.0,
            City::Nantes => 1420.0,
            City::Paris => 1340.0,
            City::Strasbourg => 1300.0,
            City::Lille => 1190.0,
            City::Metz => 1220.0,
            City::Colmar => 1280.0,
            City::Nice => 1800.0,
            City::Montpellier => 1790.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            City::Marseille => "Marseille",
            City::Lyon => "Lyon",
            City::Toulouse => "Toulouse",
            City::Bordeaux => "Bordeaux",
            City::Nantes => "Nantes",
            City::Paris => "Paris",
            City::Strasbourg => "Strasbourg",
            City::Lille => "Lille",
            City::Metz => "Metz",
            City::Colmar => "Colmar",
            City::Nice => "Nice",
            City::Montpellier => "Montpellier",
        }
    }
}

impl FromStr for City {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_name(s);
        City::ALL
            .iter()
            .copied()
            .find(|c| normalize_name(c.name()) == key)
            .ok_or_else(|| ReferenceError::UnknownCity(s.trim().to_string()))
    }
}

/// 패널 기술별 기술 계수.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSpec {
    /// 모듈 효율 [%]
    pub efficiency_pct: f64,
    /// 와트당 가격 [통화/W]
    pub price_per_watt: f64,
    /// 기준 도시 일사량, 8 kWc 설치 기준 연간 생산량 [kWh]
    pub reference_annual_production_kwh: f64,
}

/// 패널 기술 5종.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelType {
    Monocrystalline,
    Polycrystalline,
    Amorphous,
    Heterojunction,
    Bifacial,
}

impl PanelType {
    pub const ALL: [PanelType; 5] = [
        PanelType::Monocrystalline,
        PanelType::Polycrystalline,
        PanelType::Amorphous,
        PanelType::Heterojunction,
        PanelType::Bifacial,
    ];

    pub fn spec(self) -> PanelSpec {
        let (efficiency_pct, price_per_watt, reference_annual_production_kwh) = match self {
            PanelType::Monocrystalline => (20.0, 1.20, 11862.0),
            PanelType::Polycrystalline => (17.5, 1.00, 10500.0),
            PanelType::Amorphous => (10.0, 0.80, 6000.0),
            PanelType::Heterojunction => (21.5, 1.50, 12500.0),
            PanelType::Bifacial => (19.5, 1.40, 11200.0),
        };
        PanelSpec {
            efficiency_pct,
            price_per_watt,
            reference_annual_production_kwh,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PanelType::Monocrystalline => "Monocrystalline",
            PanelType::Polycrystalline => "Polycrystalline",
            PanelType::Amorphous => "Amorphous",
            PanelType::Heterojunction => "Heterojunction",
            PanelType::Bifacial => "Bifacial",
        }
    }

    /// 불어 명칭. 입력 파싱 시 별칭으로도 쓴다.
    pub fn french_name(self) -> &'static str {
        match self {
            PanelType::Monocrystalline => "Monocristallin",
            PanelType::Polycrystalline => "Polycristallin",
            PanelType::Amorphous => "Amorphe",
            PanelType::Heterojunction => "Hétérojonction",
            PanelType::Bifacial => "Bifacial",
        }
    }

    /// i18n 키 접미사
    pub fn key(self) -> &'static str {
        match self {
            PanelType::Monocrystalline => "monocrystalline",
            PanelType::Polycrystalline => "polycrystalline",
            PanelType::Amorphous => "amorphous",
            PanelType::Heterojunction => "heterojunction",
            PanelType::Bifacial => "bifacial",
        }
    }
}

impl FromStr for PanelType {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_name(s);
        PanelType::ALL
            .iter()
            .copied()
            .find(|p| normalize_name(p.name()) == key || normalize_name(p.french_name()) == key)
            .ok_or_else(|| ReferenceError::UnknownPanelType(s.trim().to_string()))
    }
}

/// 3단계 날씨 조건.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
}

impl Weather {
    pub const ALL: [Weather; 3] = [Weather::Sunny, Weather::Cloudy, Weather::Rainy];

    /// 연간 생산량 감쇄 계수
    pub fn multiplier(self) -> f64 {
        match self {
            Weather::Sunny => 1.0,
            Weather::Cloudy => 0.75,
            Weather::Rainy => 0.55,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Weather::Sunny => "☀️",
            Weather::Cloudy => "☁️",
            Weather::Rainy => "🌧️",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Weather::Sunny => "Sunny",
            Weather::Cloudy => "Cloudy",
            Weather::Rainy => "Rainy",
        }
    }

    /// 불어 명칭. 입력 파싱 시 별칭으로도 쓴다.
    pub fn french_name(self) -> &'static str {
        match self {
            Weather::Sunny => "Ensoleillé",
            Weather::Cloudy => "Nuageux",
            Weather::Rainy => "Pluvieux",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Weather::Sunny => "sunny",
            Weather::Cloudy => "cloudy",
            Weather::Rainy => "rainy",
        }
    }
}

impl FromStr for Weather {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_name(s);
        Weather::ALL
            .iter()
            .copied()
            .find(|w| normalize_name(w.name()) == key || normalize_name(w.french_name()) == key)
            .ok_or_else(|| ReferenceError::UnknownWeather(s.trim().to_string()))
    }
}

/// 대소문자와 불어 악센트를 무시하고 비교하기 위한 정규화.
fn normalize_name(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            'é' | 'è' | 'ê' | 'É' | 'È' | 'Ê' => 'e',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_city_is_marseille_at_1824() {
        assert_eq!(City::REFERENCE, City::Marseille);
        assert_eq!(City::REFERENCE.irradiation_kwh_per_m2(), 1824.0);
    }

    #[test]
    fn parse_accepts_case_and_french_aliases() {
        assert_eq!("  lyon ".parse::<City>(), Ok(City::Lyon));
        assert_eq!("HETEROJONCTION".parse::<PanelType>(), Ok(PanelType::Heterojunction));
        assert_eq!("Hétérojonction".parse::<PanelType>(), Ok(PanelType::Heterojunction));
        assert_eq!("ensoleillé".parse::<Weather>(), Ok(Weather::Sunny));
        assert_eq!("rainy".parse::<Weather>(), Ok(Weather::Rainy));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(
            "Berlin".parse::<City>(),
            Err(ReferenceError::UnknownCity("Berlin".into()))
        );
        assert!("Perovskite".parse::<PanelType>().is_err());
        assert!("Snowy".parse::<Weather>().is_err());
    }
}

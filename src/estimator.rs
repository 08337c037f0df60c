//! 연간 태양광 발전량 추정 엔진.
//!
//! 입력(도시, 패널 종류, 날씨, 패널 수)과 기준표만으로 결과를 계산하는 순수 함수이다.
//! 상태나 부수효과가 없으므로 입력이 바뀔 때마다 전체를 다시 계산하면 된다.

use serde::Serialize;

use crate::reference::{City, PanelType, ReferenceError, Weather};

/// 패널 1장 면적 [m²]
pub const AREA_PER_PANEL_M2: f64 = 1.7;
/// 패널 1장 정격 출력 [kWc]
pub const POWER_PER_PANEL_KWC: f64 = 0.4;
/// 기준 생산량이 정의된 설치 용량 [kWc] (20장 × 0.4 kWc)
pub const REFERENCE_INSTALLED_CAPACITY_KWC: f64 = 8.0;
/// 기준 도시 일사량 [kWh/m²/년]
pub const REFERENCE_IRRADIATION_KWH_PER_M2: f64 = 1824.0;
/// 건물 연간 소비량 가정치 [kWh/년]
pub const ANNUAL_BUILDING_CONSUMPTION_KWH: f64 = 8260.0;
/// 소비와 겹치는 생산량 중 실제 자가소비로 잡히는 비율
pub const SELF_CONSUMPTION_CAPTURE_RATIO: f64 = 0.9;
pub const MIN_PANEL_COUNT: u32 = 0;
pub const MAX_PANEL_COUNT: u32 = 25;
/// 화면 기본값
pub const DEFAULT_PANEL_COUNT: u32 = 20;

/// 입력 검증 실패를 표현한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EstimationError {
    /// 목록에 없는 도시/패널/날씨 선택
    InvalidSelection { field: &'static str, value: String },
    /// 패널 수가 허용 범위를 벗어남
    OutOfRange { value: i64, min: u32, max: u32 },
}

impl std::fmt::Display for EstimationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimationError::InvalidSelection { field, value } => {
                write!(f, "invalid {field} selection: {value}")
            }
            EstimationError::OutOfRange { value, min, max } => {
                write!(f, "panel count {value} is outside [{min}, {max}]")
            }
        }
    }
}

impl std::error::Error for EstimationError {}

impl From<ReferenceError> for EstimationError {
    fn from(value: ReferenceError) -> Self {
        match value {
            ReferenceError::UnknownCity(v) => EstimationError::InvalidSelection {
                field: "city",
                value: v,
            },
            ReferenceError::UnknownPanelType(v) => EstimationError::InvalidSelection {
                field: "panel type",
                value: v,
            },
            ReferenceError::UnknownWeather(v) => EstimationError::InvalidSelection {
                field: "weather",
                value: v,
            },
        }
    }
}

/// 검증을 통과한 시뮬레이션 입력.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationInput {
    city: City,
    panel_type: PanelType,
    weather: Weather,
    panel_count: u32,
}

impl SimulationInput {
    /// 패널 수 범위를 확인한 뒤 입력을 만든다.
    pub fn new(
        city: City,
        panel_type: PanelType,
        weather: Weather,
        panel_count: u32,
    ) -> Result<Self, EstimationError> {
        check_panel_count(i64::from(panel_count))?;
        Ok(Self {
            city,
            panel_type,
            weather,
            panel_count,
        })
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn panel_type(&self) -> PanelType {
        self.panel_type
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn panel_count(&self) -> u32 {
        self.panel_count
    }
}

impl Default for SimulationInput {
    fn default() -> Self {
        Self {
            city: City::REFERENCE,
            panel_type: PanelType::Monocrystalline,
            weather: Weather::Sunny,
            panel_count: DEFAULT_PANEL_COUNT,
        }
    }
}

pub(crate) fn check_panel_count(value: i64) -> Result<u32, EstimationError> {
    if value < i64::from(MIN_PANEL_COUNT) || value > i64::from(MAX_PANEL_COUNT) {
        return Err(EstimationError::OutOfRange {
            value,
            min: MIN_PANEL_COUNT,
            max: MAX_PANEL_COUNT,
        });
    }
    Ok(value as u32)
}

/// 추정 결과. 입력에서 매번 새로 계산되며 수정되지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimationResult {
    /// 선택 도시 일사량 [kWh/m²/년]
    pub city_irradiation_kwh_per_m2: f64,
    /// 설치 용량 [kWc]
    pub installed_capacity_kwc: f64,
    /// 총 패널 면적 [m²]
    pub total_area_m2: f64,
    /// 연간 생산량 [kWh]
    pub annual_production_kwh: f64,
    /// 면적당 생산량 [kWh/m²/년], 면적 0이면 0
    pub production_per_area_kwh_per_m2: f64,
    /// 패널 비용 [통화]
    pub estimated_cost: f64,
    pub self_consumed_kwh: f64,
    pub grid_injected_kwh: f64,
    pub grid_drawn_kwh: f64,
    /// 패널 효율 [%]
    pub panel_efficiency_pct: f64,
    /// 계산에 사용한 입력. TOML 내보내기에서 테이블이 값 뒤에 오도록 마지막에 둔다.
    pub input: SimulationInput,
}

/// 검증된 입력으로 연간 생산량과 에너지 분배를 계산한다.
pub fn estimate(input: &SimulationInput) -> EstimationResult {
    let panel = input.panel_type.spec();
    let irradiation = input.city.irradiation_kwh_per_m2();
    let count = f64::from(input.panel_count);

    let total_area_m2 = count * AREA_PER_PANEL_M2;
    let installed_capacity_kwc = count * POWER_PER_PANEL_KWC;

    // 기준 도시에서 측정된 생산량을 선택 도시 일사량 비율로 환산
    let city_scaled_reference =
        panel.reference_annual_production_kwh * (irradiation / REFERENCE_IRRADIATION_KWH_PER_M2);
    let annual_production_kwh = (installed_capacity_kwc / REFERENCE_INSTALLED_CAPACITY_KWC)
        * city_scaled_reference
        * input.weather.multiplier();

    let production_per_area_kwh_per_m2 = if total_area_m2 > 0.0 {
        annual_production_kwh / total_area_m2
    } else {
        0.0
    };
    // kW → W 환산 후 와트당 가격 적용
    let estimated_cost = installed_capacity_kwc * 1000.0 * panel.price_per_watt;

    let self_consumed_kwh = ANNUAL_BUILDING_CONSUMPTION_KWH.min(annual_production_kwh)
        * SELF_CONSUMPTION_CAPTURE_RATIO;
    let grid_injected_kwh = (annual_production_kwh - self_consumed_kwh).max(0.0);
    let grid_drawn_kwh = (ANNUAL_BUILDING_CONSUMPTION_KWH - self_consumed_kwh).max(0.0);

    EstimationResult {
        city_irradiation_kwh_per_m2: irradiation,
        installed_capacity_kwc,
        total_area_m2,
        annual_production_kwh,
        production_per_area_kwh_per_m2,
        estimated_cost,
        self_consumed_kwh,
        grid_injected_kwh,
        grid_drawn_kwh,
        panel_efficiency_pct: panel.efficiency_pct,
        input: *input,
    }
}

/// 문자열 선택값을 파싱/검증한 뒤 추정한다. 외부 입력 경계에서 사용한다.
pub fn estimate_selection(
    city: &str,
    panel_type: &str,
    weather: &str,
    panel_count: i64,
) -> Result<EstimationResult, EstimationError> {
    let city: City = city.parse()?;
    let panel_type: PanelType = panel_type.parse()?;
    let weather: Weather = weather.parse()?;
    let count = check_panel_count(panel_count)?;
    let input = SimulationInput::new(city, panel_type, weather, count)?;
    Ok(estimate(&input))
}

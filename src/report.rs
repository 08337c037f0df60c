//! 추정 결과를 화면용 지표/막대그래프 데이터로 바꾸는 표현 계층.
//!
//! CLI와 GUI가 같은 문자열과 막대 순서를 쓰도록 한곳에서 만든다.

use crate::config::DisplayUnits;
use crate::estimator::EstimationResult;
use crate::i18n::{keys, Translator};
use crate::units::{convert_energy, convert_production_per_area, EnergyUnit};

/// 막대 색상. 자가소비=초록, 주입=주황, 수전=빨강.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    Green,
    Orange,
    Red,
}

impl BarColor {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            BarColor::Green => [0, 128, 0],
            BarColor::Orange => [255, 165, 0],
            BarColor::Red => [255, 0, 0],
        }
    }
}

/// 에너지 분배 항목. 선언 순서가 그래프 순서이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnergyCategory {
    SelfConsumed,
    GridInjected,
    GridDrawn,
}

impl EnergyCategory {
    pub const ALL: [EnergyCategory; 3] = [
        EnergyCategory::SelfConsumed,
        EnergyCategory::GridInjected,
        EnergyCategory::GridDrawn,
    ];

    pub fn label_key(self) -> &'static str {
        match self {
            EnergyCategory::SelfConsumed => keys::SPLIT_SELF_CONSUMED,
            EnergyCategory::GridInjected => keys::SPLIT_GRID_INJECTED,
            EnergyCategory::GridDrawn => keys::SPLIT_GRID_DRAWN,
        }
    }

    pub fn color(self) -> BarColor {
        match self {
            EnergyCategory::SelfConsumed => BarColor::Green,
            EnergyCategory::GridInjected => BarColor::Orange,
            EnergyCategory::GridDrawn => BarColor::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyBar {
    pub category: EnergyCategory,
    pub value_kwh: f64,
}

/// 연간 에너지 분배 [kWh].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergySplit {
    pub self_consumed_kwh: f64,
    pub grid_injected_kwh: f64,
    pub grid_drawn_kwh: f64,
}

impl EnergySplit {
    pub fn from_result(result: &EstimationResult) -> Self {
        Self {
            self_consumed_kwh: result.self_consumed_kwh,
            grid_injected_kwh: result.grid_injected_kwh,
            grid_drawn_kwh: result.grid_drawn_kwh,
        }
    }

    /// 자가소비, 계통 주입, 계통 수전 순서로 고정된 막대 목록.
    pub fn bars(&self) -> [EnergyBar; 3] {
        EnergyCategory::ALL.map(|category| EnergyBar {
            category,
            value_kwh: match category {
                EnergyCategory::SelfConsumed => self.self_consumed_kwh,
                EnergyCategory::GridInjected => self.grid_injected_kwh,
                EnergyCategory::GridDrawn => self.grid_drawn_kwh,
            },
        })
    }
}

/// 표시 단위로 변환되고 라벨이 붙은 막대.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    pub color: BarColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

/// 화면 한 장 분량의 결과 표현.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub heading: String,
    pub city_line: String,
    /// 생산량, 설치 용량
    pub headline: [Metric; 2],
    /// 면적당 생산량, 비용
    pub secondary: [Metric; 2],
    pub efficiency_line: String,
    pub split_heading: String,
    pub chart_title: String,
    pub y_axis_label: String,
    pub energy_unit: EnergyUnit,
    pub bars: Vec<ChartBar>,
    pub footer: String,
}

impl Report {
    pub fn build(
        result: &EstimationResult,
        tr: &Translator,
        units: &DisplayUnits,
        currency_symbol: &str,
    ) -> Self {
        let input = &result.input;
        let per_year = tr.t(keys::PER_YEAR);
        let energy = units.energy;

        let production = convert_energy(
            result.annual_production_kwh,
            EnergyUnit::KilowattHour,
            energy,
        );
        let per_area = convert_production_per_area(
            result.production_per_area_kwh_per_m2,
            energy,
            units.area,
        );

        let headline = [
            Metric {
                label: tr.t(keys::METRIC_PRODUCTION).to_string(),
                value: format!(
                    "{:.*} {}{}",
                    energy.decimals(),
                    production,
                    energy.label(),
                    per_year
                ),
            },
            Metric {
                label: tr.t(keys::METRIC_CAPACITY).to_string(),
                value: format!("{:.2} kWc", result.installed_capacity_kwc),
            },
        ];
        let secondary = [
            Metric {
                label: tr.t(keys::METRIC_PER_AREA).to_string(),
                value: format!(
                    "{:.1} {}/{}{}",
                    per_area,
                    energy.label(),
                    units.area.label(),
                    per_year
                ),
            },
            Metric {
                label: tr.t(keys::METRIC_COST).to_string(),
                value: format!(
                    "{} {}",
                    format_thousands(result.estimated_cost, 0),
                    currency_symbol
                ),
            },
        ];

        let bars = EnergySplit::from_result(result)
            .bars()
            .iter()
            .map(|bar| ChartBar {
                label: tr.t(bar.category.label_key()).to_string(),
                value: convert_energy(bar.value_kwh, EnergyUnit::KilowattHour, energy),
                color: bar.category.color(),
            })
            .collect();

        Self {
            heading: tr.tf(
                keys::REPORT_HEADING,
                &[("icon", input.weather().icon().to_string())],
            ),
            city_line: tr.tf(
                keys::REPORT_CITY_LINE,
                &[
                    ("city", input.city().name().to_string()),
                    ("irradiation", format!("{:.0}", result.city_irradiation_kwh_per_m2)),
                ],
            ),
            headline,
            secondary,
            efficiency_line: tr.tf(
                keys::REPORT_EFFICIENCY,
                &[
                    ("panel", tr.panel_name(input.panel_type()).to_string()),
                    ("efficiency", format!("{:.1}", result.panel_efficiency_pct)),
                ],
            ),
            split_heading: tr.t(keys::SPLIT_HEADING).to_string(),
            chart_title: tr.t(keys::CHART_TITLE).to_string(),
            y_axis_label: tr.tf(keys::CHART_Y_AXIS, &[("unit", energy.label().to_string())]),
            energy_unit: energy,
            bars,
            footer: tr.t(keys::REPORT_FOOTER).to_string(),
        }
    }

    /// CLI 출력용 텍스트 줄 목록.
    pub fn lines(&self, chart_width: usize) -> Vec<String> {
        let mut out = vec![
            format!("\n{}", self.heading),
            self.city_line.clone(),
            String::new(),
        ];
        for m in self.headline.iter().chain(self.secondary.iter()) {
            out.push(format!("  {}: {}", m.label, m.value));
        }
        out.push(String::new());
        out.push(self.efficiency_line.clone());
        out.push(String::new());
        out.push(format!("{} – {}", self.split_heading, self.chart_title));
        out.push(format!("  [{}]", self.y_axis_label));
        out.extend(render_text_chart(&self.bars, chart_width, self.energy_unit.decimals()));
        out.push(String::new());
        out.push(self.footer.clone());
        out
    }
}

/// 가로 텍스트 막대그래프를 만든다. 가장 큰 값이 `width` 칸을 채운다.
pub fn render_text_chart(bars: &[ChartBar], width: usize, decimals: usize) -> Vec<String> {
    let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    let label_width = bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    bars.iter()
        .map(|b| {
            let len = if max > 0.0 {
                ((b.value / max) * width as f64).round() as usize
            } else {
                0
            };
            format!(
                "  {:<label_width$} | {} {}",
                b.label,
                "█".repeat(len),
                format_thousands(b.value, decimals)
            )
        })
        .collect()
}

/// 그래프 y축 최댓값. 1, 2, 2.5, 5 × 10ⁿ 중 `max` 이상인 가장 작은 값.
pub fn axis_ceiling(max: f64) -> f64 {
    if !(max > 0.0) {
        return 1.0;
    }
    let magnitude = 10_f64.powf(max.log10().floor());
    for step in [1.0, 2.0, 2.5, 5.0, 10.0] {
        let candidate = step * magnitude;
        if candidate >= max {
            return candidate;
        }
    }
    10.0 * magnitude
}

/// 천 단위 구분 기호(,)를 넣어 숫자를 포맷한다. 반올림은 0에서 먼 쪽으로 한다.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let factor = 10_f64.powi(decimals as i32);
    let rounded = (value.abs() * factor).round() / factor;
    let text = format!("{:.*}", decimals, rounded);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let mut out = String::new();
    if value < 0.0 && rounded > 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

use solar_pv_estimator::{
    config::DisplayUnits,
    estimator::{estimate, estimate_selection, SimulationInput},
    i18n::Translator,
    report::{BarColor, EnergyCategory, EnergySplit, Report},
    units::{AreaUnit, EnergyUnit},
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual} expected={expected} tol={tol}"
    );
}

#[test]
fn split_bars_keep_fixed_order_and_colors() {
    let res = estimate(&SimulationInput::default());
    let bars = EnergySplit::from_result(&res).bars();
    let order: Vec<EnergyCategory> = bars.iter().map(|b| b.category).collect();
    assert_eq!(order, EnergyCategory::ALL.to_vec());
    assert_eq!(
        bars.iter().map(|b| b.category.color()).collect::<Vec<_>>(),
        vec![BarColor::Green, BarColor::Orange, BarColor::Red]
    );
    assert_close(bars[0].value_kwh, res.self_consumed_kwh, 1e-12);
    assert_close(bars[1].value_kwh, res.grid_injected_kwh, 1e-12);
    assert_close(bars[2].value_kwh, res.grid_drawn_kwh, 1e-12);
}

#[test]
fn english_report_for_reference_scenario() {
    let res = estimate(&SimulationInput::default());
    let tr = Translator::new("en-us");
    let report = Report::build(&res, &tr, &DisplayUnits::default(), "€");

    assert_eq!(report.headline[0].value, "11862 kWh/year");
    assert_eq!(report.headline[1].value, "8.00 kWc");
    assert_eq!(report.secondary[0].value, "348.9 kWh/m²/year");
    assert_eq!(report.secondary[1].value, "9,600 €");
    assert!(report.city_line.contains("Marseille"));
    assert!(report.city_line.contains("1824"));
    assert!(report.efficiency_line.contains("20.0"));

    let labels: Vec<&str> = report.bars.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["Self-consumed", "Grid-injected", "Grid-drawn"]);
}

#[test]
fn french_pack_labels_the_chart() {
    let res = estimate_selection("Lyon", "Amorphe", "Nuageux", 10).expect("estimate");
    let tr = Translator::new_with_pack("fr-fr", Some("locales"));
    let report = Report::build(&res, &tr, &DisplayUnits::default(), "€");
    let labels: Vec<&str> = report.bars.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Autoconsommée", "Injectée au réseau", "Reprise réseau"]
    );
}

#[test]
fn display_units_convert_bars_and_metrics() {
    let res = estimate(&SimulationInput::default());
    let tr = Translator::new("en-us");
    let units = DisplayUnits {
        energy: EnergyUnit::MegawattHour,
        area: AreaUnit::SquareFoot,
    };
    let report = Report::build(&res, &tr, &units, "$");

    assert_eq!(report.energy_unit, EnergyUnit::MegawattHour);
    assert_eq!(report.headline[0].value, "11.86 MWh/year");
    assert!(report.secondary[1].value.ends_with('$'));
    assert!(report.y_axis_label.contains("MWh"));
    assert_close(report.bars[0].value, res.self_consumed_kwh / 1000.0, 1e-9);
}

#[test]
fn text_lines_contain_one_row_per_bar() {
    let res = estimate(&SimulationInput::default());
    let tr = Translator::new("en-us");
    let report = Report::build(&res, &tr, &DisplayUnits::default(), "€");
    let lines = report.lines(40);
    let rows: Vec<&String> = lines.iter().filter(|l| l.contains(" | ")).collect();
    assert_eq!(rows.len(), 3);
    // 가장 큰 막대(자가소비 7434 kWh)가 폭을 모두 채운다
    assert!(rows[0].contains(&"█".repeat(40)));
    assert!(rows[0].ends_with("7,434"));
}

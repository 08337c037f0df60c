use solar_pv_estimator::{
    estimator::{
        estimate, estimate_selection, EstimationError, SimulationInput,
        ANNUAL_BUILDING_CONSUMPTION_KWH, MAX_PANEL_COUNT,
    },
    reference::{City, PanelType, Weather},
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual} expected={expected} tol={tol}"
    );
}

fn all_inputs() -> Vec<SimulationInput> {
    let mut out = Vec::new();
    for city in City::ALL {
        for panel in PanelType::ALL {
            for weather in Weather::ALL {
                for count in 0..=MAX_PANEL_COUNT {
                    out.push(SimulationInput::new(city, panel, weather, count).expect("valid input"));
                }
            }
        }
    }
    out
}

#[test]
fn reference_scenario_matches_published_figures() {
    let res = estimate_selection("Marseille", "Monocrystalline", "Sunny", 20).expect("estimate");
    assert_close(res.installed_capacity_kwc, 8.0, 1e-9);
    assert_close(res.annual_production_kwh, 11862.0, 1e-6);
    assert_close(res.total_area_m2, 34.0, 1e-9);
    assert_close(res.production_per_area_kwh_per_m2, 348.882, 1e-3);
    assert_close(res.estimated_cost, 9600.0, 1e-6);
    assert_close(res.panel_efficiency_pct, 20.0, 1e-9);

    // 생산 > 소비: 자가소비는 소비량의 90%
    assert_close(res.self_consumed_kwh, 7434.0, 1e-6);
    assert_close(res.grid_injected_kwh, 4428.0, 1e-6);
    assert_close(res.grid_drawn_kwh, 826.0, 1e-6);
}

#[test]
fn reference_installation_reproduces_table_for_every_panel() {
    for panel in PanelType::ALL {
        let input = SimulationInput::new(City::REFERENCE, panel, Weather::Sunny, 20).expect("input");
        let res = estimate(&input);
        assert_close(
            res.annual_production_kwh,
            panel.spec().reference_annual_production_kwh,
            1e-6,
        );
    }
}

#[test]
fn every_combination_is_non_negative_and_balanced() {
    for input in all_inputs() {
        let r = estimate(&input);
        for v in [
            r.installed_capacity_kwc,
            r.total_area_m2,
            r.annual_production_kwh,
            r.production_per_area_kwh_per_m2,
            r.estimated_cost,
            r.self_consumed_kwh,
            r.grid_injected_kwh,
            r.grid_drawn_kwh,
        ] {
            assert!(v >= 0.0, "{input:?} produced {v}");
        }
        assert_close(
            r.self_consumed_kwh + r.grid_injected_kwh,
            r.annual_production_kwh,
            1e-6,
        );
        assert!(r.self_consumed_kwh <= ANNUAL_BUILDING_CONSUMPTION_KWH * 0.9 + 1e-9);
        assert_close(
            r.self_consumed_kwh + r.grid_drawn_kwh,
            ANNUAL_BUILDING_CONSUMPTION_KWH,
            1e-6,
        );
    }
}

#[test]
fn production_grows_with_panel_count() {
    for city in City::ALL {
        for panel in PanelType::ALL {
            let mut prev = -1.0;
            for count in 0..=MAX_PANEL_COUNT {
                let input = SimulationInput::new(city, panel, Weather::Cloudy, count).expect("input");
                let prod = estimate(&input).annual_production_kwh;
                assert!(prod > prev || (count == 0 && prod == 0.0));
                prev = prod;
            }
        }
    }
}

#[test]
fn production_follows_irradiation_and_weather() {
    let at = |city, weather| {
        let input = SimulationInput::new(city, PanelType::Polycrystalline, weather, 10).expect("input");
        estimate(&input).annual_production_kwh
    };
    assert!(at(City::Marseille, Weather::Sunny) > at(City::Lille, Weather::Sunny));
    assert!(at(City::Paris, Weather::Sunny) > at(City::Paris, Weather::Cloudy));
    assert!(at(City::Paris, Weather::Cloudy) > at(City::Paris, Weather::Rainy));
}

#[test]
fn zero_panels_means_zero_production_and_full_grid_draw() {
    let res = estimate_selection("Lyon", "Bifacial", "Rainy", 0).expect("estimate");
    assert_eq!(res.installed_capacity_kwc, 0.0);
    assert_eq!(res.total_area_m2, 0.0);
    assert_eq!(res.annual_production_kwh, 0.0);
    assert_eq!(res.production_per_area_kwh_per_m2, 0.0);
    assert_eq!(res.estimated_cost, 0.0);
    assert_eq!(res.self_consumed_kwh, 0.0);
    assert_eq!(res.grid_injected_kwh, 0.0);
    assert_close(res.grid_drawn_kwh, ANNUAL_BUILDING_CONSUMPTION_KWH, 1e-9);
}

#[test]
fn cost_is_linear_in_panel_count() {
    let cost = |n| {
        let input = SimulationInput::new(City::Nice, PanelType::Heterojunction, Weather::Sunny, n)
            .expect("input");
        estimate(&input).estimated_cost
    };
    assert_close(cost(10), 2.0 * cost(5), 1e-9);
    // 10장 × 0.4 kWc × 1000 W × 1.50
    assert_close(cost(10), 6000.0, 1e-9);
}

#[test]
fn french_and_lowercase_names_are_accepted() {
    let a = estimate_selection("marseille", "Monocristallin", "sunny", 20).expect("aliases");
    let b = estimate_selection("Marseille", "Monocrystalline", "Sunny", 20).expect("canonical");
    assert_eq!(a, b);
}

#[test]
fn unknown_city_is_invalid_selection() {
    let err = estimate_selection("Berlin", "Monocrystalline", "Sunny", 20).unwrap_err();
    assert_eq!(
        err,
        EstimationError::InvalidSelection {
            field: "city",
            value: "Berlin".into()
        }
    );
    assert!(matches!(
        estimate_selection("Paris", "Perovskite", "Sunny", 5),
        Err(EstimationError::InvalidSelection { field: "panel type", .. })
    ));
    assert!(matches!(
        estimate_selection("Paris", "Amorphous", "Foggy", 5),
        Err(EstimationError::InvalidSelection { field: "weather", .. })
    ));
}

#[test]
fn panel_count_outside_range_is_rejected() {
    for n in [-1, 26, 1000] {
        let err = estimate_selection("Nantes", "Amorphous", "Cloudy", n).unwrap_err();
        assert_eq!(
            err,
            EstimationError::OutOfRange {
                value: n,
                min: 0,
                max: 25
            }
        );
    }
    assert!(estimate_selection("Nantes", "Amorphous", "Cloudy", 25).is_ok());
}

#[test]
fn result_exports_to_toml() {
    let res = estimate(&SimulationInput::default());
    let text = toml::to_string_pretty(&res).expect("serialize");
    assert!(text.contains("annual_production_kwh = 11862"));
    assert!(text.contains("[input]"));
    assert!(text.contains("city = \"Marseille\""));
}

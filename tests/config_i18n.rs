use std::fs;
use std::path::PathBuf;

use solar_pv_estimator::{
    config::{self, Preset},
    estimator::EstimationError,
    i18n::{self, keys, Translator},
    reference::{City, PanelType, Weather},
    units::EnergyUnit,
};

fn temp_config_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "solar_pv_estimator_test_{}_{}",
        name,
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("temp dir");
    dir.join("config.toml")
}

#[test]
fn missing_file_is_created_with_defaults() {
    let path = temp_config_path("create");
    let _ = fs::remove_file(&path);
    let cfg = config::load_or_default_from(&path).expect("load");
    assert!(path.exists());
    assert_eq!(cfg.path(), Some(path.as_path()));
    assert_eq!(cfg.preset, Preset::default());
}

#[test]
fn saved_preset_is_read_back() {
    let path = temp_config_path("roundtrip");
    let _ = fs::remove_file(&path);
    let mut cfg = config::load_or_default_from(&path).expect("load");
    cfg.language = "fr-fr".into();
    cfg.display_units.energy = EnergyUnit::Gigajoule;
    cfg.preset = Preset {
        city: City::Strasbourg,
        panel_type: PanelType::Heterojunction,
        weather: Weather::Rainy,
        panel_count: 7,
    };
    cfg.save().expect("save");

    let again = config::load_or_default_from(&path).expect("reload");
    assert_eq!(again.language, "fr-fr");
    assert_eq!(again.display_units.energy, EnergyUnit::Gigajoule);
    assert_eq!(again.preset, cfg.preset);
    assert_eq!(again.preset.to_input().panel_count(), 7);
}

#[test]
fn broken_file_reports_parse_error() {
    let path = temp_config_path("broken");
    fs::write(&path, "language = [").expect("write");
    assert!(matches!(
        config::load_or_default_from(&path),
        Err(config::ConfigError::Serde(_))
    ));
}

#[test]
fn cli_language_wins_over_config() {
    assert_eq!(i18n::resolve_language("fr", Some("ko")), "fr-fr");
    assert_eq!(i18n::resolve_language("auto", Some("ko-kr")), "ko-kr");
}

#[test]
fn missing_keys_fall_back_to_english() {
    let tr = Translator::new("fr-fr");
    assert_eq!(tr.t(keys::METRIC_COST), "Estimated panel cost");
    assert_eq!(tr.t("no.such.key"), "[missing translation]");
}

#[test]
fn language_pack_is_loaded_from_directory() {
    let tr = Translator::new_with_pack("ko-kr", Some("locales"));
    assert!(tr.lookup("gui.app_title").is_some());
    assert_eq!(tr.t(keys::SPLIT_GRID_INJECTED), "계통 주입");
}

#[test]
fn missing_flags_use_clamped_preset() {
    let cfg = config::parse_config("[preset]\ncity = \"Nice\"\npanel_count = 40\n").expect("parse");
    let input = cfg
        .preset
        .merge_selection(Some("Lyon"), None, None, None)
        .expect("preset count is clamped");
    assert_eq!(input.city(), City::Lyon);
    assert_eq!(input.panel_type(), PanelType::Monocrystalline);
    assert_eq!(input.panel_count(), 25);
}

#[test]
fn explicit_panel_count_is_still_validated() {
    let preset = Preset::default();
    assert_eq!(
        preset.merge_selection(None, None, None, Some(26)),
        Err(EstimationError::OutOfRange {
            value: 26,
            min: 0,
            max: 25
        })
    );
    let input = preset
        .merge_selection(None, Some("Bifacial"), Some("Pluvieux"), Some(3))
        .expect("valid flags");
    assert_eq!(input.panel_type(), PanelType::Bifacial);
    assert_eq!(input.weather(), Weather::Rainy);
    assert_eq!(input.panel_count(), 3);
}

#[test]
fn explicit_unknown_city_is_rejected() {
    let err = Preset::default()
        .merge_selection(Some("Berlin"), None, None, None)
        .unwrap_err();
    assert_eq!(
        err,
        EstimationError::InvalidSelection {
            field: "city",
            value: "Berlin".into()
        }
    );
}

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};
use solar_pv_estimator::{
    config,
    estimator::{self, SimulationInput, MAX_PANEL_COUNT, MIN_PANEL_COUNT},
    i18n,
    reference::{City, PanelType, Weather},
    report::{self, ChartBar, Report},
    units::{AreaUnit, EnergyUnit},
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/fr-fr)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size(egui::vec2(980.0, 720.0));
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Config error: {e}");
            config::Config::default()
        }
    };
    let lang = i18n::resolve_language(
        cli_lang.as_deref().unwrap_or("auto"),
        Some(app_cfg.language.as_str()),
    );
    eframe::run_native(
        "Solar PV Estimator",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone(), &lang))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    // 기본 폰트 뒤에 두어 라틴 문자는 기본 폰트, 한글만 대체 폰트로 그린다.
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .push(font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트를 찾아 등록한다.
/// 1) assets/fonts/*.ttf
/// 2) Windows 시스템 폰트(맑은 고딕 등)
/// 3) 리눅스/맥 CJK 폰트
/// 모두 실패하면 Err (기본 폰트로 라틴/불어 문자는 그대로 표시된다).
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<std::path::PathBuf> = vec![
        "assets/fonts/malgun.ttf".into(),
        "assets/fonts/NanumGothic.ttf".into(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc"] {
            candidates.push(fonts.join(cand));
        }
    }
    candidates.extend(
        [
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        ]
        .iter()
        .map(std::path::PathBuf::from),
    );

    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read font file ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "cjk_font");
            return Ok(());
        }
    }
    Err("CJK font not found; Korean labels may not render.".into())
}

fn color32(c: report::BarColor) -> egui::Color32 {
    let [r, g, b] = c.rgb();
    egui::Color32::from_rgb(r, g, b)
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    city: City,
    panel_type: PanelType,
    weather: Weather,
    panel_count: u32,
    show_settings_modal: bool,
    lang_input: String,
    save_preset_on_save: bool,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, lang: &str) -> Self {
        let tr = i18n::Translator::new_with_pack(lang, config.language_pack_dir.as_deref());
        let preset = config.preset.to_input();
        Self {
            lang_input: config.language.clone(),
            config,
            tr,
            city: preset.city(),
            panel_type: preset.panel_type(),
            weather: preset.weather(),
            panel_count: preset.panel_count(),
            show_settings_modal: false,
            save_preset_on_save: false,
            status: None,
        }
    }

    /// 슬라이더 밖 값이 들어와도 잘라서 유효한 입력을 만든다.
    fn current_input(&self) -> SimulationInput {
        let count = self.panel_count.clamp(MIN_PANEL_COUNT, MAX_PANEL_COUNT);
        SimulationInput::new(self.city, self.panel_type, self.weather, count).unwrap_or_default()
    }

    fn txt(&self, key: &str, default: &str) -> String {
        self.tr.lookup(key).unwrap_or_else(|| default.to_string())
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.heading(txt("gui.inputs", "Inputs"));
        ui.add_space(8.0);

        ui.label(txt("gui.city", "City"));
        egui::ComboBox::from_id_source("city_choice")
            .selected_text(self.city.name())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for city in City::ALL {
                    let label = format!("{} ({:.0} kWh/m²)", city.name(), city.irradiation_kwh_per_m2());
                    ui.selectable_value(&mut self.city, city, label);
                }
            });
        ui.add_space(6.0);

        ui.label(txt("gui.panel_type", "Solar panel type"));
        egui::ComboBox::from_id_source("panel_choice")
            .selected_text(tr.panel_name(self.panel_type))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for panel in PanelType::ALL {
                    ui.selectable_value(&mut self.panel_type, panel, tr.panel_name(panel));
                }
            });
        ui.add_space(6.0);

        ui.label(txt("gui.weather", "Weather conditions"));
        for weather in Weather::ALL {
            let label = format!("{} {}", weather.icon(), tr.weather_name(weather));
            ui.radio_value(&mut self.weather, weather, label);
        }
        ui.add_space(6.0);

        ui.label(txt("gui.panel_count", "Number of panels"));
        ui.add(egui::Slider::new(
            &mut self.panel_count,
            MIN_PANEL_COUNT..=MAX_PANEL_COUNT,
        ));
    }

    fn ui_results(&mut self, ui: &mut egui::Ui) {
        let result = estimator::estimate(&self.current_input());
        let report = Report::build(
            &result,
            &self.tr,
            &self.config.display_units,
            &self.config.currency_symbol,
        );

        ui.heading(report.heading.as_str());
        ui.label(egui::RichText::new(&report.city_line).strong());
        ui.add_space(8.0);

        for row in [&report.headline, &report.secondary] {
            ui.columns(2, |cols| {
                for (col, metric) in cols.iter_mut().zip(row.iter()) {
                    col.label(egui::RichText::new(&metric.label).small());
                    col.label(egui::RichText::new(&metric.value).size(22.0).strong());
                }
            });
            ui.add_space(6.0);
        }
        ui.label(egui::RichText::new(&report.efficiency_line).strong());
        ui.separator();

        ui.heading(report.split_heading.as_str());
        energy_chart(
            ui,
            &report.bars,
            &report.chart_title,
            &report.y_axis_label,
            report.energy_unit.decimals(),
        );
        ui.separator();
        ui.small(report.footer.as_str());
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings_modal;
        let title = self.txt("gui.settings", "Settings");
        egui::Window::new(title)
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                let tr = self.tr.clone();
                let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());

                ui.label(txt("gui.settings_language", "Language"));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.as_str())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.lang_input,
                            "auto".into(),
                            txt("gui.settings_lang_auto", "System"),
                        );
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                        ui.selectable_value(&mut self.lang_input, "fr-fr".into(), "Français");
                        ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                    });
                ui.separator();

                ui.label(txt("gui.settings_energy_unit", "Energy unit"));
                ui.horizontal(|ui| {
                    for unit in EnergyUnit::ALL {
                        ui.selectable_value(&mut self.config.display_units.energy, unit, unit.label());
                    }
                });
                ui.label(txt("gui.settings_area_unit", "Area unit"));
                ui.horizontal(|ui| {
                    for unit in AreaUnit::ALL {
                        ui.selectable_value(&mut self.config.display_units.area, unit, unit.label());
                    }
                });
                ui.separator();

                ui.label(txt("gui.settings_currency", "Currency symbol"));
                ui.text_edit_singleline(&mut self.config.currency_symbol);
                ui.checkbox(
                    &mut self.save_preset_on_save,
                    txt("gui.settings_save_preset", "Use current selection as default"),
                );
                ui.separator();

                if ui.button(txt("gui.settings_save", "Save settings")).clicked() {
                    self.save_settings();
                }
                if let Some(msg) = &self.status {
                    ui.label(msg.as_str());
                }
            });
        self.show_settings_modal = open;
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        if self.save_preset_on_save {
            self.config.preset = config::Preset::from_input(&self.current_input());
        }
        // 즉시 번역기 반영
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.status = Some(match self.config.save() {
            Ok(()) => self.txt("gui.settings_saved", "Saved."),
            Err(e) => format!("Save error: {e}"),
        });
    }

    fn export_results(&mut self) {
        let Some(path) = FileDialog::new()
            .set_file_name("pv_estimation.toml")
            .add_filter("TOML", &["toml"])
            .save_file()
        else {
            return;
        };
        let result = estimator::estimate(&self.current_input());
        let written = toml::to_string_pretty(&result)
            .map_err(|e| e.to_string())
            .and_then(|text| fs::write(&path, text).map_err(|e| e.to_string()));
        self.status = Some(match written {
            Ok(()) => i18n::fill_template(
                &self.txt("gui.exported", "Results exported to {path}"),
                &[("path", path.display().to_string())],
            ),
            Err(e) => format!("Export error: {e}"),
        });
    }
}

/// 에너지 분배 막대그래프를 그린다. y축은 보기 좋은 값으로 올림한다.
fn energy_chart(ui: &mut egui::Ui, bars: &[ChartBar], title: &str, y_label: &str, decimals: usize) {
    let size = egui::vec2(ui.available_width().min(640.0), 300.0);
    let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = response.rect;
    let text_color = ui.visuals().text_color();
    let grid_color = ui.visuals().weak_text_color().linear_multiply(0.4);
    let font = egui::FontId::proportional(12.0);

    let plot = egui::Rect::from_min_max(
        egui::pos2(rect.left() + 64.0, rect.top() + 40.0),
        egui::pos2(rect.right() - 12.0, rect.bottom() - 28.0),
    );
    let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);
    let top = report::axis_ceiling(max);

    painter.text(
        egui::pos2(rect.center().x, rect.top() + 2.0),
        egui::Align2::CENTER_TOP,
        title,
        egui::FontId::proportional(14.0),
        text_color,
    );
    painter.text(
        egui::pos2(rect.left() + 2.0, rect.top() + 20.0),
        egui::Align2::LEFT_TOP,
        y_label,
        font.clone(),
        text_color,
    );

    const TICKS: usize = 4;
    for i in 0..=TICKS {
        let frac = i as f32 / TICKS as f32;
        let y = plot.bottom() - plot.height() * frac;
        painter.line_segment(
            [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
            egui::Stroke::new(1.0, grid_color),
        );
        painter.text(
            egui::pos2(plot.left() - 6.0, y),
            egui::Align2::RIGHT_CENTER,
            report::format_thousands(top * f64::from(frac), 0),
            font.clone(),
            text_color,
        );
    }

    if bars.is_empty() {
        return;
    }
    let slot = plot.width() / bars.len() as f32;
    let bar_width = slot * 0.6;
    let mut hovered: Option<String> = None;
    for (i, bar) in bars.iter().enumerate() {
        let cx = plot.left() + slot * (i as f32 + 0.5);
        let h = (plot.height() as f64 * (bar.value / top)) as f32;
        let bar_rect = egui::Rect::from_min_max(
            egui::pos2(cx - bar_width / 2.0, plot.bottom() - h),
            egui::pos2(cx + bar_width / 2.0, plot.bottom()),
        );
        painter.rect_filled(bar_rect, 0.0, color32(bar.color));
        painter.text(
            egui::pos2(cx, plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            &bar.label,
            font.clone(),
            text_color,
        );
        if let Some(pos) = response.hover_pos() {
            if bar_rect.contains(pos) {
                hovered = Some(format!(
                    "{}: {}",
                    bar.label,
                    report::format_thousands(bar.value, decimals)
                ));
            }
        }
    }
    if let Some(text) = hovered {
        response.on_hover_text(text);
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!(
                    "☀️ {}",
                    self.txt("gui.app_title", "Residential PV Simulation")
                ));
                ui.separator();
                if ui.button(self.txt("gui.settings", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(self.txt("gui.export", "Export results…")).clicked() {
                    self.export_results();
                }
            });
            ui.small(self.txt(
                "gui.subtitle",
                "Estimate production, yield and grid injection for your panel type, weather, city and panel count.",
            ));
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            if let Some(msg) = &self.status {
                ui.small(msg.as_str());
            }
        });

        // 좌측 입력 + 본문 결과
        egui::SidePanel::left("inputs")
            .resizable(true)
            .min_width(180.0)
            .default_width(240.0)
            .max_width(400.0)
            .show(ctx, |ui| {
                self.ui_inputs(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.ui_results(ui));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_starts_from_config_preset() {
        let mut cfg = config::Config::default();
        cfg.preset.city = City::Lille;
        cfg.preset.weather = Weather::Cloudy;
        cfg.preset.panel_count = 12;
        let app = GuiApp::new(cfg, "en-us");
        assert_eq!(app.city, City::Lille);
        assert_eq!(app.weather, Weather::Cloudy);
        assert_eq!(app.panel_count, 12);
    }

    #[test]
    fn current_input_clamps_panel_count() {
        let mut app = GuiApp::new(config::Config::default(), "en-us");
        app.panel_count = 99;
        assert_eq!(app.current_input().panel_count(), MAX_PANEL_COUNT);
    }

    #[test]
    fn chart_colors_follow_split_order() {
        let result = estimator::estimate(&SimulationInput::default());
        let app = GuiApp::new(config::Config::default(), "en-us");
        let report = Report::build(
            &result,
            &app.tr,
            &app.config.display_units,
            &app.config.currency_symbol,
        );
        let colors: Vec<egui::Color32> = report.bars.iter().map(|b| color32(b.color)).collect();
        assert_eq!(
            colors,
            vec![
                egui::Color32::from_rgb(0, 128, 0),
                egui::Color32::from_rgb(255, 165, 0),
                egui::Color32::from_rgb(255, 0, 0),
            ]
        );
    }
}

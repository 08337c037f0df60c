use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use solar_pv_estimator::{app, config, estimator, i18n, report::Report};

/// 주택용 태양광 발전량 추정기 (CLI).
///
/// 선택 옵션(--city/--panel/--weather/--panels) 중 하나라도 주면 한 번 계산하고 종료하며,
/// 없으면 대화형 메뉴를 띄운다. 빠진 옵션은 설정 파일의 프리셋 값을 쓴다.
#[derive(Debug, Parser)]
#[command(name = "solar_pv_estimator_cli", version)]
struct Cli {
    /// 언어 코드 (auto/ko/en-us/fr-fr)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 도시 이름 (예: Marseille)
    #[arg(long)]
    city: Option<String>,
    /// 패널 종류 (예: Monocrystalline, Bifacial)
    #[arg(long)]
    panel: Option<String>,
    /// 날씨 (Sunny/Cloudy/Rainy)
    #[arg(long)]
    weather: Option<String>,
    /// 패널 수 (0-25)
    #[arg(long, allow_negative_numbers = true)]
    panels: Option<i64>,
}

impl Cli {
    fn is_one_shot(&self) -> bool {
        self.city.is_some() || self.panel.is_some() || self.weather.is_some() || self.panels.is_some()
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut tr = i18n::Translator::new_with_pack(&i18n::resolve_language(&cli.lang, None), None);
    match try_run(&cli, &mut tr) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: &Cli, tr: &mut i18n::Translator) -> Result<(), app::AppError> {
    let mut cfg = config::load_or_default_from(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    *tr = i18n::Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    if cli.is_one_shot() {
        let input = cfg.preset.merge_selection(
            cli.city.as_deref(),
            cli.panel.as_deref(),
            cli.weather.as_deref(),
            cli.panels,
        )?;
        let result = estimator::estimate(&input);
        let report = Report::build(&result, tr, &cfg.display_units, &cfg.currency_symbol);
        for line in report.lines(40) {
            println!("{line}");
        }
        return Ok(());
    }

    app::run(&mut cfg, tr)
}

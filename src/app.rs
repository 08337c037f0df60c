use crate::config::Config;
use crate::estimator::EstimationError;
use crate::i18n::{keys, Translator};
use crate::ui_cli;
use crate::ui_cli::{MenuChoice, SettingsOutcome};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 입력 선택/범위 오류
    Estimation(EstimationError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::Config(e) => write!(f, "{e}"),
            AppError::Estimation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<EstimationError> for AppError {
    fn from(value: EstimationError) -> Self {
        AppError::Estimation(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &mut Translator) -> Result<(), AppError> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    loop {
        match ui_cli::main_menu(tr, &mut input)? {
            MenuChoice::Estimate => ui_cli::handle_estimate(tr, config, &mut input)?,
            MenuChoice::ReferenceTables => ui_cli::handle_reference_tables(tr),
            MenuChoice::Settings => match ui_cli::handle_settings(tr, config, &mut input)? {
                SettingsOutcome::Unchanged => {}
                SettingsOutcome::Changed => config.save()?,
                SettingsOutcome::LanguageChanged => {
                    *tr = Translator::new_with_pack(
                        &crate::i18n::resolve_language(&config.language, None),
                        config.language_pack_dir.as_deref(),
                    );
                    config.save()?;
                }
            },
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

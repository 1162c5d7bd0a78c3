use std::collections::HashMap;
use std::fs;
use std::io::BufRead;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::cli::Command;
use crate::config::{Config, ConfigError};
use crate::conversion::{self, ConversionError};
use crate::i18n::{self, Translator};
use crate::process::derive_metrics;
use crate::report;
use crate::ui_cli::{self, MenuChoice};
use crate::verification::{generate_verification_specs, VerificationNominals};
use crate::wafer_map::{parse_wafer_map, WaferMapSummary};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 표준 입출력(콘솔) 오류
    #[error("콘솔 입출력 오류: {0}")]
    Console(std::io::Error),
    /// 표준 입력이 닫힘(EOF)
    #[error("입력이 종료되었습니다")]
    InputClosed,
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 단위 변환 오류
    #[error("단위 변환 오류: {0}")]
    Conversion(#[from] ConversionError),
}

impl AppError {
    /// 대화형 세션을 더 이어갈 수 없는 오류인지. 콘솔이 끊긴 경우만 해당한다.
    pub fn ends_session(&self) -> bool {
        matches!(self, AppError::Console(_) | AppError::InputClosed)
    }

    /// 표시 언어에 맞춘 오류 메시지.
    pub fn localized(&self, tr: &Translator) -> String {
        use i18n::keys;
        match self {
            AppError::Io(e) => format!("{}: {e}", tr.t(keys::ERROR_IO)),
            AppError::Console(e) => format!("{}: {e}", tr.t(keys::ERROR_CONSOLE)),
            AppError::InputClosed => tr.t(keys::ERROR_INPUT_CLOSED),
            AppError::Config(e) => e.localized(tr),
            AppError::Conversion(e) => e.localized(tr),
        }
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 메뉴 항목에서 난 오류는 출력하고 메뉴로 돌아간다. 입력이 끊기면 설정을 저장하고
/// 끝낸다. EOF는 정상 종료로 본다.
pub fn run(
    config: &mut Config,
    config_path: &Path,
    tr: &Translator,
    input: &mut impl BufRead,
) -> Result<(), AppError> {
    loop {
        match run_menu_once(config, config_path, tr, input) {
            Ok(true) => continue,
            Ok(false) => break,
            Err(err) if err.ends_session() => {
                crate::config::save_to(config, config_path)?;
                if matches!(err, AppError::InputClosed) {
                    println!();
                    println!("{}", tr.t(i18n::keys::APP_EXIT));
                    break;
                }
                return Err(err);
            }
            Err(err) => {
                warn!(error = %err, "menu action failed");
                println!("{}: {}", tr.t(i18n::keys::ERROR_PREFIX), err.localized(tr));
            }
        }
    }
    Ok(())
}

/// 메뉴 한 번을 처리한다. 종료를 골랐으면 `false`.
fn run_menu_once(
    config: &mut Config,
    config_path: &Path,
    tr: &Translator,
    input: &mut impl BufRead,
) -> Result<bool, AppError> {
    match ui_cli::main_menu(tr, input)? {
        MenuChoice::ProcessSetup => ui_cli::handle_process(tr, config, input)?,
        MenuChoice::DieLayout => ui_cli::handle_die_layout(tr, config, input)?,
        MenuChoice::WaferMap => ui_cli::handle_wafer_map(tr, input)?,
        MenuChoice::Verification => ui_cli::handle_verification(tr, config, input)?,
        MenuChoice::UnitConversion => ui_cli::handle_unit_conversion(tr, input)?,
        MenuChoice::Export => ui_cli::handle_export(tr, config, input)?,
        MenuChoice::Settings => {
            ui_cli::handle_settings(tr, config, input)?;
            crate::config::save_to(config, config_path)?;
        }
        MenuChoice::Exit => {
            crate::config::save_to(config, config_path)?;
            println!("{}", tr.t(i18n::keys::APP_EXIT));
            return Ok(false);
        }
    }
    Ok(true)
}

/// 비대화형 서브커맨드를 실행한다.
pub fn run_command(command: Command, config: &Config, tr: &Translator) -> Result<(), AppError> {
    match command {
        Command::Derive { process } => {
            let inputs = process.apply(&config.process).sanitized();
            let metrics = derive_metrics(&inputs);
            ui_cli::print_metrics(tr, &metrics);
        }
        Command::Dies { process } => {
            let inputs = process.apply(&config.process).sanitized();
            ui_cli::print_layout(tr, &inputs.die_layout());
        }
        Command::WaferMap { path } => {
            let text = fs::read_to_string(&path)?;
            let records = parse_wafer_map(&text);
            ui_cli::print_wafer_summary(tr, &WaferMapSummary::from_records(&records));
        }
        Command::Verify {
            process,
            vacuum,
            measured,
        } => {
            let inputs = process.apply(&config.process).sanitized();
            let metrics = derive_metrics(&inputs);
            let nominals = VerificationNominals::from_process(
                &inputs,
                &metrics,
                vacuum.unwrap_or(config.vacuum_kpa),
            );
            let specs = generate_verification_specs(&nominals);
            let measurements: HashMap<_, _> = measured.into_iter().collect();
            ui_cli::print_verification(&specs, &measurements);
        }
        Command::Export { path, process } => {
            let inputs = process.apply(&config.process).sanitized();
            let metrics = derive_metrics(&inputs);
            let rows = report::export_rows(
                &inputs,
                &metrics,
                &inputs.die_layout(),
                config.csv_decimals,
            );
            fs::write(&path, report::rows_to_csv(&rows))?;
            info!(path = %path.display(), rows = rows.len(), "exported CSV");
            println!("{} {}", tr.t(i18n::keys::EXPORT_SAVED), path.display());
        }
        Command::Sop { out, process } => {
            let inputs = process.apply(&config.process).sanitized();
            let sop = sop_for(&inputs, config);
            match out {
                Some(path) => {
                    fs::write(&path, sop)?;
                    info!(path = %path.display(), "wrote SOP");
                    println!("{} {}", tr.t(i18n::keys::EXPORT_SAVED), path.display());
                }
                None => print!("{sop}"),
            }
        }
        Command::Convert {
            kind,
            value,
            from,
            to,
        } => {
            let result = conversion::convert_named(&kind, value, &from, &to)?;
            println!(
                "{} {} {}",
                tr.t(i18n::keys::UNIT_CONVERSION_RESULT),
                result,
                to.trim()
            );
        }
    }
    Ok(())
}

/// 입력값에서 SOP 문서를 만든다.
pub fn sop_for(inputs: &crate::process::ProcessInputs, config: &Config) -> String {
    let metrics = derive_metrics(inputs);
    let layout = inputs.die_layout();
    let nominals = VerificationNominals::from_process(inputs, &metrics, config.vacuum_kpa);
    let specs = generate_verification_specs(&nominals);
    report::generate_sop(inputs, &metrics, &layout, &specs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_console_failures_end_the_session() {
        assert!(AppError::InputClosed.ends_session());
        assert!(AppError::Console(std::io::ErrorKind::BrokenPipe.into()).ends_session());
        assert!(!AppError::Io(std::io::ErrorKind::NotFound.into()).ends_session());
        let unit = AppError::Conversion(ConversionError::UnknownUnit("furlong".into()));
        assert!(!unit.ends_session());
    }

    #[test]
    fn messages_follow_display_language() {
        let en = Translator::new("en");
        let ko = Translator::new("ko");
        let err = AppError::Conversion(ConversionError::UnknownUnit("furlong".into()));
        assert_eq!(err.localized(&en), "Unknown unit: furlong");
        assert_eq!(err.localized(&ko), "알 수 없는 단위: furlong");
        assert_eq!(AppError::InputClosed.localized(&en), "Input closed.");
        let io = AppError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.localized(&en), "I/O error: gone");
    }
}

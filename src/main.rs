use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, Level};

use wafer_dicing_toolbox::cli::Cli;
use wafer_dicing_toolbox::i18n::{keys, resolve_language, Translator};
use wafer_dicing_toolbox::{app, config, logging};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 서브커맨드 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    logging::init_logging(Level::WARN);
    let cli = Cli::parse();

    let cli_lang = cli.lang.as_deref().unwrap_or("auto");

    let mut cfg = match config::load_from(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(path = %cli.config.display(), error = %err, "config load failed");
            let tr = Translator::new(&resolve_language(cli_lang, None));
            eprintln!("{}: {}", tr.t(keys::ERROR_PREFIX), err.localized(&tr));
            return ExitCode::FAILURE;
        }
    };

    let lang = resolve_language(cli_lang, Some(&cfg.language));
    let tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());

    let result = match cli.command {
        Some(command) => app::run_command(command, &cfg, &tr),
        None => app::run(&mut cfg, &cli.config, &tr, &mut io::stdin().lock()),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("{}: {}", tr.t(keys::ERROR_PREFIX), err.localized(&tr));
            ExitCode::FAILURE
        }
    }
}

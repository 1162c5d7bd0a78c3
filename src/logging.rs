//! tracing 구독자 초기화.

use tracing::Level;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// 로그 출력을 초기화한다.
///
/// - `RUST_LOG`가 있으면 그 필터를 따르고, 없으면 `default_level`을 쓴다.
/// - 표준 출력은 계산 결과용이므로 로그는 stderr로 보낸다.
/// - 이미 초기화되어 있으면 아무것도 하지 않는다.
pub fn init_logging(default_level: Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}

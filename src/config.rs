use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::i18n::{keys, Translator};
use crate::process::ProcessInputs;
use crate::verification::DEFAULT_VACUUM_KPA;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/ko/en …)
    pub language: String,
    /// `<lang>.toml` 언어팩 디렉터리
    pub language_pack_dir: Option<String>,
    /// GUI 창 투명도(0.3~1.0)
    pub window_alpha: f32,
    /// CSV 내보내기 소수점 자릿수
    pub csv_decimals: usize,
    /// 척 진공도 공칭값(kPa)
    pub vacuum_kpa: f64,
    /// 폼 초기값으로 쓰는 공정 입력
    pub process: ProcessInputs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            language_pack_dir: None,
            window_alpha: 1.0,
            csv_decimals: 3,
            vacuum_kpa: DEFAULT_VACUUM_KPA,
            process: ProcessInputs::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// 표시 언어에 맞춘 오류 메시지.
    pub fn localized(&self, tr: &Translator) -> String {
        match self {
            ConfigError::Io(e) => format!("{}: {e}", tr.t(keys::ERROR_CONFIG_IO)),
            ConfigError::Serde(e) => format!("{}: {e}", tr.t(keys::ERROR_CONFIG_PARSE)),
            ConfigError::Serialize(e) => format!("{}: {e}", tr.t(keys::ERROR_CONFIG_SERIALIZE)),
        }
    }
}

/// 지정 경로의 설정을 로드하거나, 없으면 기본 설정을 만들어 저장한다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "loaded config");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_to(&cfg, path)?;
        info!(path = %path.display(), "wrote default config");
        Ok(cfg)
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(Path::new(DEFAULT_CONFIG_PATH))
}

pub fn save_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    info!(path = %path.display(), "saved config");
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_to(self, Path::new(DEFAULT_CONFIG_PATH))
    }

    /// GUI 투명도를 허용 범위로 보정한다.
    pub fn clamped_alpha(&self) -> f32 {
        self.window_alpha.clamp(0.3, 1.0)
    }
}

//! 다이싱 공정 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 쓰도록 한다.

pub mod app;
pub mod cli;
pub mod config;
pub mod conversion;
pub mod i18n;
pub mod logging;
pub mod material_db;
pub mod process;
pub mod quantity;
pub mod report;
pub mod ui_cli;
pub mod units;
pub mod verification;
pub mod wafer_map;

//! 핵심 계산 로직을 라이브러리로 분리하여 CLI와 GUI 양쪽에서 사용한다.

pub mod air;
pub mod app;
pub mod atmosphere;
pub mod chart;
pub mod config;
pub mod i18n;
pub mod ui_cli;

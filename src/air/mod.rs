//! 습공기 물성·상태·프로세스 계산 모듈 모음.

pub mod moist_air;
pub mod process;
pub mod properties;

pub use moist_air::{compute_state, HumiditySpec, MoistAirError, MoistAirState};
pub use process::{analyze, ProcessKind, ProcessSegment, ProcessTolerances};

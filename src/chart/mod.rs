//! 습공기 선도(차트) 영역과 곡선 생성 모듈 모음.

pub mod curves;
pub mod domain;

pub use curves::{generate, Curve, CurveFamily, SolveError, SolverSettings};
pub use domain::ChartDomain;

//! 두 습공기 상태 사이의 공조 프로세스 분류.
//! 표시용 휴리스틱 분류이며 열역학적 증명이 아니다. 유효한 상태 쌍에
//! 대해 절대 실패하지 않고, 최악의 경우 복합 프로세스로 분류한다.

use super::moist_air::MoistAirState;

/// 분류 판정 허용오차. 설정에서 조정 가능한 기본값이며 물리 법칙이 아니다.
#[derive(Debug, Clone, Copy)]
pub struct ProcessTolerances {
    /// 건구온도 동일 판정 [°C]
    pub temperature_c: f64,
    /// 습도비 동일 판정 [kg/kg]
    pub humidity_ratio: f64,
    /// 엔탈피 동일 판정 [kJ/kg]
    pub enthalpy_kj_per_kg: f64,
}

impl Default for ProcessTolerances {
    fn default() -> Self {
        Self {
            temperature_c: 0.2,
            humidity_ratio: 2e-4,
            enthalpy_kj_per_kg: 1.0,
        }
    }
}

/// 프로세스 분류 결과.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessKind {
    /// 현열 가열 (습도비 불변, 온도 상승)
    SensibleHeating,
    /// 현열 냉각 (습도비 불변, 온도 하강)
    SensibleCooling,
    /// 가습 (온도 불변, 습도비 증가)
    Humidification,
    /// 감습 (온도 불변, 습도비 감소)
    Dehumidification,
    /// 단열 혼합/증발 냉각 (엔탈피 거의 일정)
    Adiabatic,
    /// 복합 프로세스 (개별 라벨 없이 변화량만 보고)
    Combined,
}

/// 분석 결과. 선택 쌍마다 일시적으로 생성되며 저장되지 않는다.
#[derive(Debug, Clone, Copy)]
pub struct ProcessSegment {
    pub state_a: MoistAirState,
    pub state_b: MoistAirState,
    pub kind: ProcessKind,
    /// 건구온도 변화 [°C]
    pub delta_temperature_c: f64,
    /// 습도비 변화 [kg/kg]
    pub delta_humidity_ratio: f64,
    /// 비엔탈피 변화 [kJ/kg 건공기]
    pub delta_enthalpy_kj_per_kg: f64,
    /// 건공기 1 kg/s 기준 열량 [kW]
    pub heat_duty_kw_per_kg_s: f64,
}

/// 상태 A→B의 프로세스를 분류하고 변화량을 계산한다.
///
/// 분류는 순서대로 첫 일치를 취한다:
/// 1) 습도비 불변 + 온도 변화 → 현열 가열/냉각
/// 2) 온도 불변 + 습도비 변화 → 가습/감습
/// 3) 둘 다 변화 + 엔탈피 거의 일정 → 단열 프로세스
/// 4) 그 외 → 복합 프로세스
pub fn analyze(
    state_a: &MoistAirState,
    state_b: &MoistAirState,
    tolerances: &ProcessTolerances,
) -> ProcessSegment {
    let delta_t = state_b.dry_bulb_c - state_a.dry_bulb_c;
    let delta_w = state_b.humidity_ratio - state_a.humidity_ratio;
    let delta_h = state_b.enthalpy_kj_per_kg - state_a.enthalpy_kj_per_kg;

    let same_w = delta_w.abs() <= tolerances.humidity_ratio;
    let same_t = delta_t.abs() <= tolerances.temperature_c;
    let same_h = delta_h.abs() <= tolerances.enthalpy_kj_per_kg;

    let kind = if same_w && !same_t {
        if delta_t > 0.0 {
            ProcessKind::SensibleHeating
        } else {
            ProcessKind::SensibleCooling
        }
    } else if same_t && !same_w {
        if delta_w > 0.0 {
            ProcessKind::Humidification
        } else {
            ProcessKind::Dehumidification
        }
    } else if !same_t && !same_w && same_h {
        ProcessKind::Adiabatic
    } else {
        ProcessKind::Combined
    };

    ProcessSegment {
        state_a: *state_a,
        state_b: *state_b,
        kind,
        delta_temperature_c: delta_t,
        delta_humidity_ratio: delta_w,
        delta_enthalpy_kj_per_kg: delta_h,
        heat_duty_kw_per_kg_s: delta_h,
    }
}

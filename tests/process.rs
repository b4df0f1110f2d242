//! 프로세스 분류 회귀 테스트. 분류는 표시용 휴리스틱이며 어떤 유효한
//! 상태 쌍에서도 실패하지 않아야 한다.
use psychrometric_toolbox::air::{
    analyze, compute_state, HumiditySpec, MoistAirState, ProcessKind, ProcessTolerances,
};

const P_ATM: f64 = 101_325.0;

fn state(t_c: f64, w: f64) -> MoistAirState {
    compute_state(P_ATM, t_c, &HumiditySpec::from_humidity_ratio(w)).expect("valid state")
}

#[test]
fn same_humidity_ratio_heating_is_sensible() {
    let a = state(10.0, 0.008);
    let b = state(30.0, 0.008);
    let segment = analyze(&a, &b, &ProcessTolerances::default());
    assert_eq!(segment.kind, ProcessKind::SensibleHeating);
    assert!((segment.delta_temperature_c - 20.0).abs() < 1e-9);
    assert!(segment.delta_humidity_ratio.abs() < 1e-12);
    assert!(segment.delta_enthalpy_kj_per_kg > 0.0);
}

#[test]
fn reverse_direction_is_sensible_cooling() {
    let a = state(30.0, 0.008);
    let b = state(10.0, 0.008);
    let segment = analyze(&a, &b, &ProcessTolerances::default());
    assert_eq!(segment.kind, ProcessKind::SensibleCooling);
    assert!(segment.heat_duty_kw_per_kg_s < 0.0);
}

#[test]
fn constant_temperature_moisture_gain_is_humidification() {
    let a = state(25.0, 0.008);
    let b = state(25.0, 0.012);
    let segment = analyze(&a, &b, &ProcessTolerances::default());
    assert_eq!(segment.kind, ProcessKind::Humidification);

    let reverse = analyze(&b, &a, &ProcessTolerances::default());
    assert_eq!(reverse.kind, ProcessKind::Dehumidification);
}

#[test]
fn constant_enthalpy_change_is_adiabatic() {
    // h ≈ 50 kJ/kg 등엔탈피 선 위의 두 점 (증발냉각 방향)
    let a = state(30.0, 0.007_752);
    let b = state(22.0, 0.010_964);
    let segment = analyze(&a, &b, &ProcessTolerances::default());
    assert!(
        segment.delta_enthalpy_kj_per_kg.abs() < 1.0,
        "test states must sit on one enthalpy line, got Δh={}",
        segment.delta_enthalpy_kj_per_kg
    );
    assert_eq!(segment.kind, ProcessKind::Adiabatic);
}

#[test]
fn general_change_falls_through_to_combined() {
    let a = state(20.0, 0.005);
    let b = state(35.0, 0.012);
    let segment = analyze(&a, &b, &ProcessTolerances::default());
    assert_eq!(segment.kind, ProcessKind::Combined);
    // 분류 불가여도 변화량은 그대로 보고한다
    assert!((segment.delta_temperature_c - 15.0).abs() < 1e-9);
    assert!((segment.delta_humidity_ratio - 0.007).abs() < 1e-12);
}

#[test]
fn identical_states_do_not_panic() {
    let a = state(25.0, 0.01);
    let segment = analyze(&a, &a, &ProcessTolerances::default());
    assert_eq!(segment.kind, ProcessKind::Combined);
    assert_eq!(segment.delta_enthalpy_kj_per_kg, 0.0);
}

#[test]
fn duty_equals_enthalpy_delta_for_unit_flow() {
    let a = state(15.0, 0.006);
    let b = state(28.0, 0.009);
    let segment = analyze(&a, &b, &ProcessTolerances::default());
    assert_eq!(
        segment.heat_duty_kw_per_kg_s,
        segment.delta_enthalpy_kj_per_kg
    );
}

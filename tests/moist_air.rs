//! 습공기 상태 계산 회귀 테스트. ASHRAE 기준점과 왕복 일관성을 확인한다.
use psychrometric_toolbox::air::{compute_state, HumiditySpec, MoistAirError};

const P_ATM: f64 = 101_325.0;

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

#[test]
fn reference_point_25c_50pct() {
    let state = compute_state(P_ATM, 25.0, &HumiditySpec::from_relative_humidity(0.5))
        .expect("25°C / 50%");
    assert_close("humidity_ratio", state.humidity_ratio, 0.009_88, 2e-4);
    assert_close("enthalpy", state.enthalpy_kj_per_kg, 50.4, 1.0);
    assert_close("relative_humidity", state.relative_humidity, 0.5, 1e-9);
    assert_close(
        "specific_volume",
        state.specific_volume_m3_per_kg,
        0.858,
        5e-3,
    );
    assert!(!state.supersaturated);
    assert!(state.humidity_ratio <= state.saturation_humidity_ratio);
}

#[test]
fn relative_humidity_round_trip() {
    let from_rh = compute_state(P_ATM, 18.0, &HumiditySpec::from_relative_humidity(0.37))
        .expect("from rh");
    let from_w = compute_state(
        P_ATM,
        18.0,
        &HumiditySpec::from_humidity_ratio(from_rh.humidity_ratio),
    )
    .expect("from w");
    assert_close("rh round trip", from_w.relative_humidity, 0.37, 1e-9);
    assert_close(
        "enthalpy agrees",
        from_w.enthalpy_kj_per_kg,
        from_rh.enthalpy_kj_per_kg,
        1e-12,
    );
}

#[test]
fn wet_bulb_equal_to_dry_bulb_means_saturation() {
    let state = compute_state(P_ATM, 20.0, &HumiditySpec::from_wet_bulb(20.0))
        .expect("saturated wet bulb");
    assert_close("rh at saturation", state.relative_humidity, 1.0, 1e-6);
    assert_close(
        "w equals ws",
        state.humidity_ratio,
        state.saturation_humidity_ratio,
        1e-9,
    );
}

#[test]
fn wet_bulb_descriptor_round_trip() {
    let from_wb =
        compute_state(P_ATM, 30.0, &HumiditySpec::from_wet_bulb(20.0)).expect("from wet bulb");
    // 30°C/습구 20°C 구간의 통상값 범위
    assert!(
        from_wb.humidity_ratio > 0.009 && from_wb.humidity_ratio < 0.012,
        "w = {}",
        from_wb.humidity_ratio
    );
    let from_w = compute_state(
        P_ATM,
        30.0,
        &HumiditySpec::from_humidity_ratio(from_wb.humidity_ratio),
    )
    .expect("from w");
    assert_close(
        "rh agrees",
        from_w.relative_humidity,
        from_wb.relative_humidity,
        1e-9,
    );
}

#[test]
fn ambiguous_humidity_input_rejected() {
    let double = HumiditySpec {
        relative_humidity: Some(0.5),
        humidity_ratio: Some(0.01),
        wet_bulb_c: None,
    };
    assert_eq!(
        compute_state(P_ATM, 25.0, &double),
        Err(MoistAirError::AmbiguousHumidityInput)
    );
    assert_eq!(
        compute_state(P_ATM, 25.0, &HumiditySpec::default()),
        Err(MoistAirError::AmbiguousHumidityInput)
    );
}

#[test]
fn supersaturation_is_flagged_not_rejected() {
    let state = compute_state(P_ATM, 25.0, &HumiditySpec::from_relative_humidity(1.2))
        .expect("supersaturated query must still return a state");
    assert!(state.supersaturated);
    assert_close("rh preserved", state.relative_humidity, 1.2, 1e-9);
    assert!(state.humidity_ratio > state.saturation_humidity_ratio);
}

#[test]
fn negative_humidity_ratio_floored_to_dry_air() {
    let state = compute_state(P_ATM, 25.0, &HumiditySpec::from_humidity_ratio(-0.004))
        .expect("dry air");
    assert_eq!(state.humidity_ratio, 0.0);
    assert_eq!(state.relative_humidity, 0.0);
    assert!(state.dew_point_c.is_none());
}

#[test]
fn out_of_range_temperature_rejected() {
    assert_eq!(
        compute_state(P_ATM, 80.0, &HumiditySpec::from_relative_humidity(0.5)),
        Err(MoistAirError::OutOfRangeTemperature(80.0))
    );
    assert_eq!(
        compute_state(P_ATM, -70.0, &HumiditySpec::from_relative_humidity(0.5)),
        Err(MoistAirError::OutOfRangeTemperature(-70.0))
    );
}

#[test]
fn sub_zero_states_use_ice_branch() {
    let state = compute_state(P_ATM, -10.0, &HumiditySpec::from_relative_humidity(0.8))
        .expect("-10°C");
    // 빙면 포화수증기압 ~260 Pa 기준의 포화 습도비
    assert_close(
        "ws at -10°C",
        state.saturation_humidity_ratio,
        0.001_6,
        2e-4,
    );
    assert!(state.humidity_ratio > 0.0);
    assert!(!state.supersaturated);
}

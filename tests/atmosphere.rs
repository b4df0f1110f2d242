//! ICAO 표준대기 고도-기압 변환 회귀 테스트.
use psychrometric_toolbox::atmosphere::{
    pressure_from_altitude, AtmosphereError, MAX_ALTITUDE_M, MIN_ALTITUDE_M,
};

#[test]
fn sea_level_reference_pressure() {
    let p = pressure_from_altitude(0.0).expect("sea level");
    assert!(
        (p - 101_325.0).abs() < 10.0,
        "expected ~101325 Pa, got {p:.1}"
    );
}

#[test]
fn altitude_3000m_reference_pressure() {
    // 표준대기 3000 m 기준값
    let p = pressure_from_altitude(3_000.0).expect("3000 m");
    assert!(
        (p - 70_109.0).abs() < 50.0,
        "expected ~70109 Pa, got {p:.1}"
    );
}

#[test]
fn pressure_strictly_decreases_with_altitude() {
    let mut prev = pressure_from_altitude(MIN_ALTITUDE_M).expect("band start");
    let mut h = MIN_ALTITUDE_M + 100.0;
    while h <= MAX_ALTITUDE_M {
        let p = pressure_from_altitude(h).expect("in band");
        assert!(
            p < prev,
            "pressure must decrease: p({h}) = {p:.1} >= {prev:.1}"
        );
        prev = p;
        h += 100.0;
    }
}

#[test]
fn out_of_band_altitude_rejected() {
    assert_eq!(
        pressure_from_altitude(-600.0),
        Err(AtmosphereError::OutOfRangeAltitude(-600.0))
    );
    assert_eq!(
        pressure_from_altitude(12_000.0),
        Err(AtmosphereError::OutOfRangeAltitude(12_000.0))
    );
    assert!(pressure_from_altitude(f64::NAN).is_err());
}

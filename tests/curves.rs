//! 곡선 생성기 회귀 테스트. 패밀리 간 일관성과 경계 동작을 확인한다.
use psychrometric_toolbox::air::properties;
use psychrometric_toolbox::chart::{
    curves::bisect_increasing, generate, ChartDomain, CurveFamily, SolveError, SolverSettings,
};

const P_ATM: f64 = 101_325.0;
const SAMPLES: usize = 100;

fn default_domain() -> ChartDomain {
    ChartDomain::for_pressure(-10.0, 50.0, P_ATM)
}

#[test]
fn saturation_curve_matches_direct_saturation_ratio() {
    let domain = default_domain();
    let curve = generate(
        CurveFamily::Saturation,
        1.0,
        P_ATM,
        &domain,
        SAMPLES,
        &SolverSettings::default(),
    );
    assert!(!curve.is_empty());
    for (t, w) in &curve.points {
        let ws = properties::saturation_humidity_ratio(*t, P_ATM).expect("no boiling here");
        assert_eq!(*w, ws, "saturation curve and clip boundary must agree at t={t}");
    }
}

#[test]
fn rh_one_coincides_with_saturation_curve() {
    let domain = default_domain();
    let solver = SolverSettings::default();
    let saturation = generate(CurveFamily::Saturation, 1.0, P_ATM, &domain, SAMPLES, &solver);
    let rh_one = generate(
        CurveFamily::RelativeHumidity,
        1.0,
        P_ATM,
        &domain,
        SAMPLES,
        &solver,
    );
    assert_eq!(saturation.points.len(), rh_one.points.len());
    for ((t_s, w_s), (t_r, w_r)) in saturation.points.iter().zip(rh_one.points.iter()) {
        assert!((t_s - t_r).abs() < 1e-12);
        assert!(
            (w_s - w_r).abs() < 1e-12,
            "rh=1.0 must ride the saturation curve at t={t_s}"
        );
    }
}

#[test]
fn generation_is_idempotent() {
    let domain = default_domain();
    let solver = SolverSettings::default();
    for (family, parameter) in [
        (CurveFamily::Saturation, 1.0),
        (CurveFamily::RelativeHumidity, 0.5),
        (CurveFamily::Isotherm, 20.0),
        (CurveFamily::Enthalpy, 50.0),
        (CurveFamily::SpecificVolume, 0.86),
        (CurveFamily::HumidityRatio, 0.01),
    ] {
        let first = generate(family, parameter, P_ATM, &domain, SAMPLES, &solver);
        let second = generate(family, parameter, P_ATM, &domain, SAMPLES, &solver);
        assert_eq!(first, second, "same inputs must yield identical sequences");
    }
}

#[test]
fn curve_entirely_above_saturation_is_empty_not_error() {
    // 저온 영역에서 터무니없이 높은 등엔탈피 값
    let cold = ChartDomain::for_pressure(-10.0, 0.0, P_ATM);
    let curve = generate(
        CurveFamily::Enthalpy,
        150.0,
        P_ATM,
        &cold,
        SAMPLES,
        &SolverSettings::default(),
    );
    assert!(curve.is_empty());
    assert_eq!(curve.family, CurveFamily::Enthalpy);
    assert_eq!(curve.parameter, 150.0);
}

#[test]
fn generated_points_stay_inside_domain_and_below_saturation() {
    let domain = default_domain();
    let solver = SolverSettings::default();
    for (family, parameter) in [
        (CurveFamily::RelativeHumidity, 0.8),
        (CurveFamily::Enthalpy, 40.0),
        (CurveFamily::SpecificVolume, 0.88),
    ] {
        let curve = generate(family, parameter, P_ATM, &domain, SAMPLES, &solver);
        assert!(!curve.is_empty());
        for (t, w) in &curve.points {
            assert!(domain.contains(*t, *w), "point outside domain: ({t}, {w})");
            let ws = properties::saturation_humidity_ratio(*t, P_ATM).unwrap();
            assert!(
                *w <= ws + 1e-9,
                "supersaturated point must be dropped: ({t}, {w}), ws={ws}"
            );
        }
    }
}

#[test]
fn enthalpy_curve_points_satisfy_target() {
    let domain = default_domain();
    let curve = generate(
        CurveFamily::Enthalpy,
        50.0,
        P_ATM,
        &domain,
        SAMPLES,
        &SolverSettings::default(),
    );
    for (t, w) in &curve.points {
        let h = properties::moist_air_enthalpy(*t, *w);
        assert!(
            (h - 50.0).abs() < 1e-4,
            "implicit solve off target at t={t}: h={h}"
        );
    }
}

#[test]
fn specific_volume_curve_points_satisfy_target() {
    let domain = default_domain();
    let curve = generate(
        CurveFamily::SpecificVolume,
        0.86,
        P_ATM,
        &domain,
        SAMPLES,
        &SolverSettings::default(),
    );
    assert!(!curve.is_empty());
    for (t, w) in &curve.points {
        let v = properties::moist_air_specific_volume(*t, *w, P_ATM);
        assert!(
            (v - 0.86).abs() < 1e-6,
            "implicit solve off target at t={t}: v={v}"
        );
    }
}

#[test]
fn isotherm_is_axis_to_saturation_segment() {
    let domain = default_domain();
    let curve = generate(
        CurveFamily::Isotherm,
        20.0,
        P_ATM,
        &domain,
        SAMPLES,
        &SolverSettings::default(),
    );
    assert_eq!(curve.points.len(), 2);
    let (t0, w0) = curve.points[0];
    let (t1, w1) = curve.points[1];
    assert_eq!(t0, 20.0);
    assert_eq!(t1, 20.0);
    assert_eq!(w0, 0.0);
    let ws = properties::saturation_humidity_ratio(20.0, P_ATM).unwrap();
    assert!((w1 - ws.min(domain.w_max)).abs() < 1e-12);
}

#[test]
fn humidity_ratio_line_starts_at_saturation_intersection() {
    let domain = default_domain();
    let curve = generate(
        CurveFamily::HumidityRatio,
        0.01,
        P_ATM,
        &domain,
        SAMPLES,
        &SolverSettings::default(),
    );
    assert_eq!(curve.points.len(), 2);
    let (t_start, w_start) = curve.points[0];
    let (t_end, w_end) = curve.points[1];
    assert_eq!(w_start, 0.01);
    assert_eq!(w_end, 0.01);
    assert_eq!(t_end, domain.t_max_c);
    // 교점에서는 포화 습도비가 목표 습도비와 일치해야 한다
    let ws = properties::saturation_humidity_ratio(t_start, P_ATM).unwrap();
    assert!(
        (ws - 0.01).abs() < 1e-6,
        "intersection off saturation: t={t_start}, ws={ws}"
    );

    // 축 상한보다 큰 습도비는 빈 곡선
    let above = generate(
        CurveFamily::HumidityRatio,
        domain.w_max * 2.0,
        P_ATM,
        &domain,
        SAMPLES,
        &SolverSettings::default(),
    );
    assert!(above.is_empty());
}

#[test]
fn sweep_is_evenly_spaced_in_temperature() {
    let domain = default_domain();
    let curve = generate(
        CurveFamily::Saturation,
        1.0,
        P_ATM,
        &domain,
        SAMPLES,
        &SolverSettings::default(),
    );
    let expected_step = (domain.t_max_c - domain.t_min_c) / (SAMPLES - 1) as f64;
    for pair in curve.points.windows(2) {
        let step = pair[1].0 - pair[0].0;
        assert!(
            (step - expected_step).abs() < 1e-9,
            "uneven sweep step: {step}"
        );
    }
}

#[test]
fn solver_iteration_cap_reports_nonconvergence() {
    let strict = SolverSettings {
        tolerance: 1e-15,
        max_iterations: 3,
    };
    let result = bisect_increasing(0.0, 1.0, |x| x - 0.123_456, &strict);
    assert_eq!(
        result,
        Err(SolveError::NonConvergentSolve { iterations: 3 })
    );

    // 충분한 반복 한도에서는 같은 문제를 푼다
    let relaxed = SolverSettings {
        tolerance: 1e-12,
        max_iterations: 100,
    };
    let root = bisect_increasing(0.0, 1.0, |x| x - 0.123_456, &relaxed).expect("converges");
    assert!((root - 0.123_456).abs() < 1e-9);
}

#[test]
fn domain_clip_drops_outside_points_without_clamping() {
    let domain = ChartDomain::new(-10.0, 50.0, 0.030);
    let clipped = domain.clip(&[
        (20.0, 0.010),
        (-20.0, 0.010),
        (20.0, 0.040),
        (20.0, -0.001),
        (55.0, 0.010),
    ]);
    assert_eq!(clipped, vec![(20.0, 0.010)]);
}

#[test]
fn altitude_change_shifts_saturation_geometry() {
    // 같은 온도에서 압력이 낮아지면 포화 습도비가 커진다. 압력이 바뀌면
    // 이전 곡선을 재사용할 수 없다는 사실의 근거.
    let p_high_altitude = 70_109.0;
    let sea = properties::saturation_humidity_ratio(20.0, P_ATM).unwrap();
    let high = properties::saturation_humidity_ratio(20.0, p_high_altitude).unwrap();
    assert!(high > sea);
}

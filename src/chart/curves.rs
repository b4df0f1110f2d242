//! 습공기 선도 곡선 패밀리 생성.
//! 각 패밀리는 선언된 독립변수를 등간격으로 스윕하면서 상태 계산을
//! 호출해 (건구온도, 습도비) 점열을 만든다. 개별 샘플 실패는 스윕을
//! 중단시키지 않고 해당 점만 버린다.

use crate::air::{moist_air, properties, HumiditySpec};
use crate::chart::domain::ChartDomain;

/// 지원하는 곡선 패밀리.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveFamily {
    /// 포화 곡선 (상대습도 1.0). 차트의 물리적 상한 경계.
    Saturation,
    /// 상대습도 일정 곡선. 파라미터 ∈ (0, 1].
    RelativeHumidity,
    /// 건구 등온선. 파라미터는 온도(°C)이며 축에서 포화 곡선까지의 세로 선분.
    Isotherm,
    /// 비엔탈피 일정 곡선. 파라미터는 kJ/kg 건공기.
    Enthalpy,
    /// 비체적 일정 곡선. 파라미터는 m³/kg 건공기.
    SpecificVolume,
    /// 습도비 일정 곡선. 파라미터는 kg/kg, 포화 교점부터의 가로 선분.
    HumidityRatio,
}

/// 이름 붙은 곡선: 패밀리 + 파라미터 + 차트 좌표 점열.
///
/// 점열은 스윕 변수에 대해 단조이고 전부 영역 안에 있다. 클리핑으로
/// 모든 점을 잃은 곡선은 생략되지 않고 빈 점열로 반환된다.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub family: CurveFamily,
    pub parameter: f64,
    /// (건구온도 °C, 습도비 kg/kg) 점열
    pub points: Vec<(f64, f64)>,
}

impl Curve {
    fn empty(family: CurveFamily, parameter: f64) -> Self {
        Self {
            family,
            parameter,
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// 음해법(이분법) 설정. 숨은 상수가 아니라 설정으로 전달한다.
#[derive(Debug, Clone, Copy)]
pub struct SolverSettings {
    /// 수렴 판정 구간 폭 (해 변수 단위)
    pub tolerance: f64,
    /// 반복 횟수 상한
    pub max_iterations: u32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 100,
        }
    }
}

/// 음해법 풀이 오류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// 반복 한도 안에 수렴하지 못함
    NonConvergentSolve { iterations: u32 },
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::NonConvergentSolve { iterations } => {
                write!(f, "이분법이 {iterations}회 반복 안에 수렴하지 못했습니다.")
            }
        }
    }
}

impl std::error::Error for SolveError {}

/// 단조 증가 함수 f에 대해 f(x)=0 을 이분법으로 푼다.
/// f(lo) ≤ 0 ≤ f(hi) 를 전제한다.
pub fn bisect_increasing(
    mut lo: f64,
    mut hi: f64,
    f: impl Fn(f64) -> f64,
    settings: &SolverSettings,
) -> Result<f64, SolveError> {
    for _ in 0..settings.max_iterations {
        let mid = 0.5 * (lo + hi);
        if hi - lo <= settings.tolerance {
            return Ok(mid);
        }
        if f(mid) <= 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Err(SolveError::NonConvergentSolve {
        iterations: settings.max_iterations,
    })
}

/// 영역 온도 범위를 등간격 스윕한 온도 목록. 픽셀 간격이 아니라
/// 독립변수 간격이 균일하다.
fn temperature_sweep(domain: &ChartDomain, sample_count: usize) -> Vec<f64> {
    let n = sample_count.max(2);
    let step = (domain.t_max_c - domain.t_min_c) / (n - 1) as f64;
    (0..n).map(|i| domain.t_min_c + step * i as f64).collect()
}

/// 한 곡선을 생성한다.
///
/// 모든 점은 영역 검사, 비포화 패밀리는 추가로 포화 경계 검사를 거쳐
/// 탈락 시 버려진다(경계로 붙이지 않는다). 같은 입력에 대한 생성 결과는
/// 항상 동일하다.
pub fn generate(
    family: CurveFamily,
    parameter: f64,
    pressure_pa: f64,
    domain: &ChartDomain,
    sample_count: usize,
    solver: &SolverSettings,
) -> Curve {
    match family {
        CurveFamily::Saturation => saturation_curve(pressure_pa, domain, sample_count),
        CurveFamily::RelativeHumidity => {
            relative_humidity_curve(parameter, pressure_pa, domain, sample_count)
        }
        CurveFamily::Isotherm => isotherm_curve(parameter, pressure_pa, domain),
        CurveFamily::Enthalpy => implicit_curve(
            CurveFamily::Enthalpy,
            parameter,
            pressure_pa,
            domain,
            sample_count,
            solver,
            |t, w, _p| properties::moist_air_enthalpy(t, w),
        ),
        CurveFamily::SpecificVolume => implicit_curve(
            CurveFamily::SpecificVolume,
            parameter,
            pressure_pa,
            domain,
            sample_count,
            solver,
            properties::moist_air_specific_volume,
        ),
        CurveFamily::HumidityRatio => {
            humidity_ratio_curve(parameter, pressure_pa, domain, solver)
        }
    }
}

fn saturation_curve(pressure_pa: f64, domain: &ChartDomain, sample_count: usize) -> Curve {
    let points = temperature_sweep(domain, sample_count)
        .into_iter()
        .filter_map(|t| {
            properties::saturation_humidity_ratio(t, pressure_pa).map(|w| (t, w))
        })
        .filter(|(t, w)| domain.contains(*t, *w))
        .collect();
    Curve {
        family: CurveFamily::Saturation,
        parameter: 1.0,
        points,
    }
}

fn relative_humidity_curve(
    rh: f64,
    pressure_pa: f64,
    domain: &ChartDomain,
    sample_count: usize,
) -> Curve {
    let spec = HumiditySpec::from_relative_humidity(rh);
    let points = temperature_sweep(domain, sample_count)
        .into_iter()
        .filter_map(|t| {
            // 샘플 단위 실패(온도 범위, 비등)는 해당 점만 건너뛴다.
            let state = moist_air::compute_state(pressure_pa, t, &spec).ok()?;
            if state.supersaturated {
                return None;
            }
            Some((t, state.humidity_ratio))
        })
        .filter(|(t, w)| domain.contains(*t, *w))
        .collect();
    Curve {
        family: CurveFamily::RelativeHumidity,
        parameter: rh,
        points,
    }
}

fn isotherm_curve(t_c: f64, pressure_pa: f64, domain: &ChartDomain) -> Curve {
    if t_c < domain.t_min_c || t_c > domain.t_max_c {
        return Curve::empty(CurveFamily::Isotherm, t_c);
    }
    let Some(w_sat) = properties::saturation_humidity_ratio(t_c, pressure_pa) else {
        return Curve::empty(CurveFamily::Isotherm, t_c);
    };
    let w_top = w_sat.min(domain.w_max);
    Curve {
        family: CurveFamily::Isotherm,
        parameter: t_c,
        points: vec![(t_c, 0.0), (t_c, w_top)],
    }
}

/// 엔탈피·비체적처럼 습도비에 대해 단조 증가하는 물성의 일정값 곡선.
/// 온도를 스윕하며 목표값을 만족하는 습도비를 [0, 포화] 구간에서
/// 이분법으로 푼다. 해가 포화 위에 있으면 그 샘플은 버린다.
fn implicit_curve(
    family: CurveFamily,
    target: f64,
    pressure_pa: f64,
    domain: &ChartDomain,
    sample_count: usize,
    solver: &SolverSettings,
    property: impl Fn(f64, f64, f64) -> f64,
) -> Curve {
    let points = temperature_sweep(domain, sample_count)
        .into_iter()
        .filter_map(|t| {
            let w_sat = properties::saturation_humidity_ratio(t, pressure_pa)?;
            let at_dry = property(t, 0.0, pressure_pa);
            let at_sat = property(t, w_sat, pressure_pa);
            if target < at_dry || target > at_sat {
                return None;
            }
            let w = bisect_increasing(
                0.0,
                w_sat,
                |w| property(t, w, pressure_pa) - target,
                solver,
            )
            .ok()?;
            Some((t, w))
        })
        .filter(|(t, w)| domain.contains(*t, *w))
        .collect();
    Curve {
        family,
        parameter: target,
        points,
    }
}

fn humidity_ratio_curve(
    w: f64,
    pressure_pa: f64,
    domain: &ChartDomain,
    solver: &SolverSettings,
) -> Curve {
    if w <= 0.0 || w > domain.w_max {
        return Curve::empty(CurveFamily::HumidityRatio, w);
    }
    let Some(w_sat_at_max) =
        properties::saturation_humidity_ratio(domain.t_max_c, pressure_pa)
    else {
        return Curve::empty(CurveFamily::HumidityRatio, w);
    };
    if w > w_sat_at_max {
        // 선 전체가 포화 곡선 위에 있어 표시할 구간이 없다.
        return Curve::empty(CurveFamily::HumidityRatio, w);
    }
    let w_sat_at_min = properties::saturation_humidity_ratio(domain.t_min_c, pressure_pa);
    let t_start = match w_sat_at_min {
        Some(ws_min) if w <= ws_min => domain.t_min_c,
        _ => {
            // 포화 곡선과의 교점 온도. Ws(t)는 t에 대해 단조 증가.
            match bisect_increasing(
                domain.t_min_c,
                domain.t_max_c,
                |t| {
                    properties::saturation_humidity_ratio(t, pressure_pa)
                        .map_or(f64::MAX, |ws| ws - w)
                },
                solver,
            ) {
                Ok(t) => t,
                Err(_) => return Curve::empty(CurveFamily::HumidityRatio, w),
            }
        }
    };
    Curve {
        family: CurveFamily::HumidityRatio,
        parameter: w,
        points: vec![(t_start, w), (domain.t_max_c, w)],
    }
}

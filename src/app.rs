use crate::air::MoistAirError;
use crate::atmosphere::{self, AtmosphereError};
use crate::chart::{self, Curve, CurveFamily, ChartDomain};
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 고도-기압 변환 오류
    Atmosphere(AtmosphereError),
    /// 습공기 상태 계산 오류
    MoistAir(MoistAirError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Atmosphere(e) => write!(f, "대기압 계산 오류: {e}"),
            AppError::MoistAir(e) => write!(f, "습공기 상태 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<AtmosphereError> for AppError {
    fn from(value: AtmosphereError) -> Self {
        AppError::Atmosphere(value)
    }
}

impl From<MoistAirError> for AppError {
    fn from(value: MoistAirError) -> Self {
        AppError::MoistAir(value)
    }
}

/// 설정과 압력 스냅샷으로 표준 곡선 세트를 생성한다.
///
/// 영역과 모든 곡선은 호출 시점의 압력에 묶인다. 고도가 바뀌면 전체를
/// 다시 생성해야 하며, 한 곡선 안에 두 압력을 섞지 않는다.
pub fn build_chart(cfg: &Config, pressure_pa: f64) -> (ChartDomain, Vec<Curve>) {
    let domain = ChartDomain::for_pressure(cfg.chart.t_min_c, cfg.chart.t_max_c, pressure_pa);
    let solver = cfg.solver_settings();
    let samples = cfg.chart.samples_per_curve;
    let mut curves = Vec::new();

    curves.push(chart::generate(
        CurveFamily::Saturation,
        1.0,
        pressure_pa,
        &domain,
        samples,
        &solver,
    ));
    for &w in &cfg.chart.humidity_ratio_values(domain.w_max) {
        curves.push(chart::generate(
            CurveFamily::HumidityRatio,
            w,
            pressure_pa,
            &domain,
            samples,
            &solver,
        ));
    }
    for &rh in &cfg.chart.relative_humidity_values {
        curves.push(chart::generate(
            CurveFamily::RelativeHumidity,
            rh,
            pressure_pa,
            &domain,
            samples,
            &solver,
        ));
    }
    // 건구 등온선은 1°C 간격으로 깔아준다.
    let mut t = cfg.chart.t_min_c.ceil();
    while t <= cfg.chart.t_max_c {
        curves.push(chart::generate(
            CurveFamily::Isotherm,
            t,
            pressure_pa,
            &domain,
            samples,
            &solver,
        ));
        t += 1.0;
    }
    for &h in &cfg.chart.enthalpy_values_kj_per_kg {
        curves.push(chart::generate(
            CurveFamily::Enthalpy,
            h,
            pressure_pa,
            &domain,
            samples,
            &solver,
        ));
    }
    for &v in &cfg.chart.specific_volume_values_m3_per_kg {
        curves.push(chart::generate(
            CurveFamily::SpecificVolume,
            v,
            pressure_pa,
            &domain,
            samples,
            &solver,
        ));
    }
    (domain, curves)
}

/// 설정의 기본 고도에서 기준 압력을 계산한다.
pub fn pressure_for_config(cfg: &Config) -> Result<f64, AppError> {
    Ok(atmosphere::pressure_from_altitude(cfg.altitude_m)?)
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    loop {
        let outcome = match ui_cli::main_menu(tr)? {
            MenuChoice::StateQuery => ui_cli::handle_state_query(tr, config),
            MenuChoice::ProcessAnalysis => ui_cli::handle_process_analysis(tr, config),
            MenuChoice::ChartSummary => ui_cli::handle_chart_summary(tr, config),
            MenuChoice::Settings => {
                let res = ui_cli::handle_settings(tr, config);
                if res.is_ok() {
                    config.save()?;
                    println!("{}", tr.t(keys::SETTINGS_SAVED));
                }
                res
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        };
        // 입력 단계의 엔진 오류는 메뉴를 종료시키지 않고 보고만 한다.
        if let Err(e) = outcome {
            eprintln!("{}: {e}", tr.t(keys::ERROR_PREFIX));
        }
    }
    Ok(())
}

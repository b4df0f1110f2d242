use std::io::{self, Write};

use crate::air::{self, HumiditySpec, MoistAirState};
use crate::app::{self, AppError};
use crate::atmosphere;
use crate::chart::CurveFamily;
use crate::config::Config;
use crate::i18n::{keys, Translator};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    StateQuery,
    ProcessAnalysis,
    ChartSummary,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_STATE_QUERY));
    println!("{}", tr.t(keys::MAIN_MENU_PROCESS));
    println!("{}", tr.t(keys::MAIN_MENU_CHART_SUMMARY));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::StateQuery),
            "2" => return Ok(MenuChoice::ProcessAnalysis),
            "3" => return Ok(MenuChoice::ChartSummary),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 습공기 상태 계산 메뉴를 처리한다.
pub fn handle_state_query(tr: &Translator, _cfg: &Config) -> Result<(), AppError> {
    let state = read_state(tr)?;
    print_state(tr, &state);
    Ok(())
}

/// 프로세스 분석 메뉴를 처리한다.
pub fn handle_process_analysis(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PROCESS_HEADING));
    println!("{}", tr.t(keys::PROCESS_POINT_A));
    let state_a = read_state(tr)?;
    println!("{}", tr.t(keys::PROCESS_POINT_B));
    let state_b = read_state(tr)?;

    let segment = air::analyze(&state_a, &state_b, &cfg.process_tolerances());
    println!("→ {}", process_kind_label(tr, segment.kind));
    println!(
        "{} {:+.2} °C",
        tr.t(keys::PROCESS_DELTA_T),
        segment.delta_temperature_c
    );
    println!(
        "{} {:+.5} kg/kg",
        tr.t(keys::PROCESS_DELTA_W),
        segment.delta_humidity_ratio
    );
    println!(
        "{} {:+.2} kJ/kg",
        tr.t(keys::PROCESS_DELTA_H),
        segment.delta_enthalpy_kj_per_kg
    );
    println!(
        "{} {:+.2} kW",
        tr.t(keys::PROCESS_DUTY),
        segment.heat_duty_kw_per_kg_s
    );
    Ok(())
}

/// 선도 곡선 요약 메뉴를 처리한다. 설정된 기준 고도의 압력으로 전체
/// 곡선 세트를 생성하고 패밀리별 점 수를 보고한다.
pub fn handle_chart_summary(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::CHART_HEADING));
    let pressure = app::pressure_for_config(cfg)?;
    println!("{} {:.0} Pa", tr.t(keys::CHART_PRESSURE_LINE), pressure);

    let (_domain, curves) = app::build_chart(cfg, pressure);
    for curve in &curves {
        let label = family_label(tr, curve.family);
        if curve.is_empty() {
            println!(
                "  {label} {:.4} {}",
                curve.parameter,
                tr.t(keys::CHART_EMPTY_CURVE)
            );
        } else {
            println!("  {label} {:.4}: {} pts", curve.parameter, curve.points.len());
        }
    }
    Ok(())
}

/// 설정 메뉴를 처리한다. 엔터 입력은 기존 값을 유지한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} altitude={:.0} m, t=[{:.0}, {:.0}] °C, lang={}",
        tr.t(keys::SETTINGS_CURRENT),
        cfg.altitude_m,
        cfg.chart.t_min_c,
        cfg.chart.t_max_c,
        cfg.language
    );
    if let Some(alt) = read_f64_or_keep(tr, tr.t(keys::SETTINGS_PROMPT_ALTITUDE))? {
        // 저장 전에 지원 범위를 검증해 엔진까지 내려가지 않게 한다.
        atmosphere::pressure_from_altitude(alt)?;
        cfg.altitude_m = alt;
    }
    if let Some(t_min) = read_f64_or_keep(tr, tr.t(keys::SETTINGS_PROMPT_T_MIN))? {
        cfg.chart.t_min_c = t_min;
    }
    if let Some(t_max) = read_f64_or_keep(tr, tr.t(keys::SETTINGS_PROMPT_T_MAX))? {
        cfg.chart.t_max_c = t_max;
    }
    let lang = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
    if !lang.trim().is_empty() {
        cfg.language = lang.trim().to_string();
    }
    Ok(())
}

fn read_state(tr: &Translator) -> Result<MoistAirState, AppError> {
    let altitude = read_f64(tr, tr.t(keys::PROMPT_ALTITUDE))?;
    let pressure = atmosphere::pressure_from_altitude(altitude)?;
    let dry_bulb = read_f64(tr, tr.t(keys::PROMPT_DRY_BULB))?;
    let humidity = loop {
        let sel = read_line(tr.t(keys::PROMPT_HUMIDITY_KIND))?;
        match sel.trim() {
            "1" => {
                let rh_pct = read_f64(tr, tr.t(keys::PROMPT_RH_VALUE))?;
                break HumiditySpec::from_relative_humidity(rh_pct / 100.0);
            }
            "2" => {
                let w = read_f64(tr, tr.t(keys::PROMPT_W_VALUE))?;
                break HumiditySpec::from_humidity_ratio(w);
            }
            "3" => {
                let wet_bulb = read_f64(tr, tr.t(keys::PROMPT_WET_BULB_VALUE))?;
                break HumiditySpec::from_wet_bulb(wet_bulb);
            }
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    };
    Ok(air::compute_state(pressure, dry_bulb, &humidity)?)
}

fn print_state(tr: &Translator, state: &MoistAirState) {
    println!("{}", tr.t(keys::STATE_HEADING));
    println!("{} {:.0} Pa", tr.t(keys::STATE_PRESSURE), state.pressure_pa);
    println!(
        "{} {:.5} kg/kg",
        tr.t(keys::STATE_HUMIDITY_RATIO),
        state.humidity_ratio
    );
    println!(
        "{} {:.1} %",
        tr.t(keys::STATE_RELATIVE_HUMIDITY),
        state.relative_humidity * 100.0
    );
    println!(
        "{} {:.5} kg/kg",
        tr.t(keys::STATE_SATURATION_RATIO),
        state.saturation_humidity_ratio
    );
    println!(
        "{} {:.2} kJ/kg",
        tr.t(keys::STATE_ENTHALPY),
        state.enthalpy_kj_per_kg
    );
    println!(
        "{} {:.4} m³/kg",
        tr.t(keys::STATE_SPECIFIC_VOLUME),
        state.specific_volume_m3_per_kg
    );
    if let Some(dew) = state.dew_point_c {
        println!("{} {:.1} °C", tr.t(keys::STATE_DEW_POINT), dew);
    }
    if state.supersaturated {
        println!("{}", tr.t(keys::STATE_SUPERSATURATED));
    }
}

fn process_kind_label(tr: &Translator, kind: air::ProcessKind) -> &'static str {
    match kind {
        air::ProcessKind::SensibleHeating => tr.t(keys::PROCESS_KIND_SENSIBLE_HEATING),
        air::ProcessKind::SensibleCooling => tr.t(keys::PROCESS_KIND_SENSIBLE_COOLING),
        air::ProcessKind::Humidification => tr.t(keys::PROCESS_KIND_HUMIDIFICATION),
        air::ProcessKind::Dehumidification => tr.t(keys::PROCESS_KIND_DEHUMIDIFICATION),
        air::ProcessKind::Adiabatic => tr.t(keys::PROCESS_KIND_ADIABATIC),
        air::ProcessKind::Combined => tr.t(keys::PROCESS_KIND_COMBINED),
    }
}

fn family_label(tr: &Translator, family: CurveFamily) -> &'static str {
    match family {
        CurveFamily::Saturation => tr.t(keys::FAMILY_SATURATION),
        CurveFamily::RelativeHumidity => tr.t(keys::FAMILY_RELATIVE_HUMIDITY),
        CurveFamily::Isotherm => tr.t(keys::FAMILY_ISOTHERM),
        CurveFamily::Enthalpy => tr.t(keys::FAMILY_ENTHALPY),
        CurveFamily::SpecificVolume => tr.t(keys::FAMILY_SPECIFIC_VOLUME),
        CurveFamily::HumidityRatio => tr.t(keys::FAMILY_HUMIDITY_RATIO),
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let line = read_line(prompt)?;
        match line.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 빈 입력이면 None(기존 값 유지), 아니면 숫자를 반환한다.
fn read_f64_or_keep(tr: &Translator, prompt: &str) -> Result<Option<f64>, AppError> {
    loop {
        let line = read_line(prompt)?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 차트 구성 설정. 축 범위, 샘플 밀도, 표시할 곡선 파라미터 집합을 담는다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// 온도 축 하한 [°C]
    pub t_min_c: f64,
    /// 온도 축 상한 [°C]
    pub t_max_c: f64,
    /// 곡선당 샘플 수 (밀도/비용 트레이드오프)
    pub samples_per_curve: usize,
    /// 그릴 상대습도 곡선 값 목록 [0..1]
    pub relative_humidity_values: Vec<f64>,
    /// 그릴 비엔탈피 곡선 값 목록 [kJ/kg]
    pub enthalpy_values_kj_per_kg: Vec<f64>,
    /// 그릴 비체적 곡선 값 목록 [m³/kg]
    pub specific_volume_values_m3_per_kg: Vec<f64>,
    /// 습도비 일정선 간격 [kg/kg]
    pub humidity_ratio_step: f64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            t_min_c: -10.0,
            t_max_c: 50.0,
            samples_per_curve: 100,
            relative_humidity_values: (1..10).map(|i| i as f64 / 10.0).collect(),
            enthalpy_values_kj_per_kg: (0..=5).map(|i| (i * 20) as f64).collect(),
            specific_volume_values_m3_per_kg: (0..9)
                .map(|i| 0.80 + 0.02 * i as f64)
                .collect(),
            humidity_ratio_step: 0.001,
        }
    }
}

impl ChartSettings {
    /// 습도비 일정선 파라미터 목록 (간격 기반, 축 상한까지).
    pub fn humidity_ratio_values(&self, w_max: f64) -> Vec<f64> {
        let step = self.humidity_ratio_step;
        if step <= 0.0 {
            return Vec::new();
        }
        let mut values = Vec::new();
        let mut w = step;
        while w <= w_max + 1e-12 {
            values.push(w);
            w += step;
        }
        values
    }
}

/// 음해법(이분법) 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 100,
        }
    }
}

/// 프로세스 분류 허용오차 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConfig {
    pub temperature_tolerance_c: f64,
    pub humidity_ratio_tolerance: f64,
    pub enthalpy_tolerance_kj_per_kg: f64,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            temperature_tolerance_c: 0.2,
            humidity_ratio_tolerance: 2e-4,
            enthalpy_tolerance_kj_per_kg: 1.0,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// UI 언어 (auto/ko/en)
    pub language: String,
    /// 기본 고도 [m]
    pub altitude_m: f64,
    pub chart: ChartSettings,
    pub solver: SolverConfig,
    pub process: ProcessConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            altitude_m: 0.0,
            chart: ChartSettings::default(),
            solver: SolverConfig::default(),
            process: ProcessConfig::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new("config.toml");
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write("config.toml", content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self)
    }

    /// 솔버 설정을 엔진 타입으로 변환한다.
    pub fn solver_settings(&self) -> crate::chart::SolverSettings {
        crate::chart::SolverSettings {
            tolerance: self.solver.tolerance,
            max_iterations: self.solver.max_iterations,
        }
    }

    /// 프로세스 허용오차를 엔진 타입으로 변환한다.
    pub fn process_tolerances(&self) -> crate::air::ProcessTolerances {
        crate::air::ProcessTolerances {
            temperature_c: self.process.temperature_tolerance_c,
            humidity_ratio: self.process.humidity_ratio_tolerance,
            enthalpy_kj_per_kg: self.process.enthalpy_tolerance_kj_per_kg,
        }
    }
}

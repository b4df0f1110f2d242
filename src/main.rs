use clap::Parser;
use psychrometric_toolbox::{app, config, i18n};

/// 습공기 선도 분석기 CLI.
#[derive(Debug, Parser)]
#[command(name = "psychrometric_toolbox_cli")]
struct Cli {
    /// UI 언어 (auto/ko/en)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 기본 고도 [m] (설정값 대신 사용)
    #[arg(long)]
    altitude: Option<f64>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    if let Some(altitude) = cli.altitude {
        cfg.altitude_m = altitude;
    }
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, None);
    app::run(&mut cfg, &tr)?;
    Ok(())
}

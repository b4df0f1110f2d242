#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.
//! 엔진이 생성한 곡선 점열을 그대로 그리고, 클릭 좌표를 데이터 공간으로
//! 역변환해 상태/프로세스 질의로 넘긴다.

use eframe::{egui, App, Frame};
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use std::{env, fs};

use psychrometric_toolbox::{
    air::{self, properties, HumiditySpec, MoistAirState, ProcessSegment},
    app as engine,
    atmosphere,
    chart::{ChartDomain, Curve, CurveFamily},
    config,
    i18n::{self, keys},
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/ko/en)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let viewport = egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "Psychrometric Analyzer",
        native_options,
        Box::new(move |cc| {
            setup_fonts(&cc.egui_ctx);
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

/// 한글 글리프가 있는 시스템 폰트를 찾아 등록한다. 없으면 기본 폰트를 쓴다.
fn setup_fonts(ctx: &egui::Context) {
    let candidates = [
        "assets/fonts/malgun.ttf",
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        "C:\\Windows\\Fonts\\malgun.ttf",
    ];
    for path in candidates {
        if Path::new(path).exists() {
            if let Ok(bytes) = fs::read(path) {
                let mut fonts = egui::FontDefinitions::default();
                fonts
                    .font_data
                    .insert("korean_font".to_string(), egui::FontData::from_owned(bytes));
                for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                    fonts
                        .families
                        .entry(family)
                        .or_default()
                        .insert(0, "korean_font".to_string());
                }
                ctx.set_fonts(fonts);
                return;
            }
        }
    }
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    status: Option<String>,
    // 수동 입력
    altitude_in: f64,
    dry_bulb_in: f64,
    rh_pct_in: f64,
    // 압력 스냅샷과 곡선 캐시. 고도가 바뀌면 통째로 재생성한다.
    pressure_pa: f64,
    domain: ChartDomain,
    curves: Vec<Curve>,
    current_state: Option<MoistAirState>,
    // 프로세스 점 선택
    selected_points: Vec<(f64, f64)>,
    segments: Vec<ProcessSegment>,
    process_log: String,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let tr = i18n::Translator::new_with_pack(&config.language, None);
        let altitude_in = config.altitude_m;
        let mut app = Self {
            config,
            tr,
            status: None,
            altitude_in,
            dry_bulb_in: 25.0,
            rh_pct_in: 50.0,
            pressure_pa: atmosphere::SEA_LEVEL_PRESSURE_PA,
            domain: ChartDomain::new(-10.0, 50.0, 0.030),
            curves: Vec::new(),
            current_state: None,
            selected_points: Vec::new(),
            segments: Vec::new(),
            process_log: String::new(),
        };
        app.regenerate_chart();
        app.update_current_state();
        app
    }

    /// 고도에서 압력을 재계산하고 영역/곡선 캐시를 전부 다시 만든다.
    /// 선택 점과 프로세스 선은 이전 압력에 묶여 있으므로 함께 버린다.
    fn regenerate_chart(&mut self) {
        match atmosphere::pressure_from_altitude(self.altitude_in) {
            Ok(pressure) => {
                self.pressure_pa = pressure;
                self.config.altitude_m = self.altitude_in;
                let (domain, curves) = engine::build_chart(&self.config, pressure);
                self.domain = domain;
                self.curves = curves;
                self.selected_points.clear();
                self.segments.clear();
                self.status = None;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn update_current_state(&mut self) {
        let spec = HumiditySpec::from_relative_humidity(self.rh_pct_in / 100.0);
        match air::compute_state(self.pressure_pa, self.dry_bulb_in, &spec) {
            Ok(state) => {
                self.current_state = Some(state);
                self.status = None;
            }
            Err(e) => {
                self.current_state = None;
                self.status = Some(e.to_string());
            }
        }
    }

    fn handle_chart_click(&mut self, t_c: f64, w: f64) {
        if !self.domain.contains(t_c, w) {
            return;
        }
        // 포화 곡선 위 클릭은 거부한다.
        let Some(w_sat) = properties::saturation_humidity_ratio(t_c, self.pressure_pa) else {
            return;
        };
        if w > w_sat {
            self.status = Some(self.tr.t(keys::GUI_POINT_REJECTED).to_string());
            return;
        }
        self.selected_points.push((t_c, w));
        if self.selected_points.len() == 2 {
            self.analyze_selected();
            self.selected_points.clear();
        }
    }

    fn analyze_selected(&mut self) {
        let (t_a, w_a) = self.selected_points[0];
        let (t_b, w_b) = self.selected_points[1];
        let spec_a = HumiditySpec::from_humidity_ratio(w_a);
        let spec_b = HumiditySpec::from_humidity_ratio(w_b);
        let (state_a, state_b) = match (
            air::compute_state(self.pressure_pa, t_a, &spec_a),
            air::compute_state(self.pressure_pa, t_b, &spec_b),
        ) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(e), _) | (_, Err(e)) => {
                self.status = Some(e.to_string());
                return;
            }
        };
        let segment = air::analyze(&state_a, &state_b, &self.config.process_tolerances());
        self.process_log.push_str(&format!(
            "{}\nA: {:.1} °C / {:.4} kg/kg\nB: {:.1} °C / {:.4} kg/kg\n{} {:+.2} kJ/kg\n{} {:+.2} kW\n--------------------\n",
            process_kind_label(&self.tr, segment.kind),
            t_a,
            w_a,
            t_b,
            w_b,
            self.tr.t(keys::PROCESS_DELTA_H),
            segment.delta_enthalpy_kj_per_kg,
            self.tr.t(keys::PROCESS_DUTY),
            segment.heat_duty_kw_per_kg_s,
        ));
        self.segments.push(segment);
    }

    fn export_png(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("psychrometric_chart.png")
            .save_file()
        else {
            return;
        };
        match render_chart_png(&path, &self.curves, &self.domain) {
            Ok(()) => {
                self.status = Some(format!(
                    "{} {}",
                    self.tr.t(keys::GUI_EXPORT_SAVED),
                    path.display()
                ));
            }
            Err(e) => {
                self.status = Some(format!("{} {e}", self.tr.t(keys::GUI_EXPORT_ERROR)));
            }
        }
    }

    fn side_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::GUI_INPUT_GROUP));
        ui.add_space(4.0);

        ui.label(self.tr.t(keys::GUI_ALTITUDE));
        let altitude_resp = ui.add(
            egui::DragValue::new(&mut self.altitude_in)
                .speed(10.0)
                .clamp_range(atmosphere::MIN_ALTITUDE_M..=atmosphere::MAX_ALTITUDE_M),
        );
        if altitude_resp.changed() {
            self.regenerate_chart();
            self.update_current_state();
        }

        ui.label(self.tr.t(keys::GUI_DRY_BULB));
        let t_resp = ui.add(
            egui::DragValue::new(&mut self.dry_bulb_in)
                .speed(0.5)
                .clamp_range(self.domain.t_min_c..=self.domain.t_max_c),
        );
        ui.label(self.tr.t(keys::GUI_RELATIVE_HUMIDITY));
        let rh_resp = ui.add(
            egui::DragValue::new(&mut self.rh_pct_in)
                .speed(1.0)
                .clamp_range(0.0..=100.0),
        );
        if t_resp.changed() || rh_resp.changed() {
            self.update_current_state();
        }

        if let Some(state) = &self.current_state {
            ui.add_space(6.0);
            ui.label(format!(
                "{}: {:.1} °C / {:.1} %",
                self.tr.t(keys::GUI_CURRENT_POINT),
                state.dry_bulb_c,
                state.relative_humidity * 100.0
            ));
            ui.label(format!(
                "{} {:.5} kg/kg",
                self.tr.t(keys::STATE_HUMIDITY_RATIO),
                state.humidity_ratio
            ));
            ui.label(format!(
                "{} {:.2} kJ/kg",
                self.tr.t(keys::STATE_ENTHALPY),
                state.enthalpy_kj_per_kg
            ));
            ui.label(format!(
                "{} {:.4} m³/kg",
                self.tr.t(keys::STATE_SPECIFIC_VOLUME),
                state.specific_volume_m3_per_kg
            ));
            if let Some(dew) = state.dew_point_c {
                ui.label(format!("{} {:.1} °C", self.tr.t(keys::STATE_DEW_POINT), dew));
            }
        }

        ui.separator();
        ui.label(self.tr.t(keys::GUI_PROCESS_LOG));
        ui.small(self.tr.t(keys::GUI_CLICK_HINT));
        egui::ScrollArea::vertical()
            .max_height(240.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.process_log.as_str())
                        .desired_width(f32::INFINITY),
                );
            });
        if ui.button(self.tr.t(keys::GUI_CLEAR_POINTS)).clicked() {
            self.selected_points.clear();
            self.segments.clear();
            self.process_log.clear();
        }

        ui.separator();
        if ui.button(self.tr.t(keys::GUI_EXPORT_PNG)).clicked() {
            self.export_png();
        }

        ui.separator();
        egui::ComboBox::from_label("Language")
            .selected_text(self.config.language.clone())
            .show_ui(ui, |ui| {
                for lang in ["auto", "ko", "en"] {
                    ui.selectable_value(&mut self.config.language, lang.to_string(), lang);
                }
            });
        if ui.button(self.tr.t(keys::GUI_SAVE_SETTINGS)).clicked() {
            let resolved =
                i18n::resolve_language(&self.config.language, Some(self.config.language.as_str()));
            self.tr = i18n::Translator::new_with_pack(&resolved, None);
            if let Err(e) = self.config.save() {
                self.status = Some(e.to_string());
            } else {
                self.status = Some(self.tr.t(keys::SETTINGS_SAVED).to_string());
            }
        }

        if let Some(status) = &self.status {
            ui.add_space(6.0);
            ui.colored_label(egui::Color32::LIGHT_RED, status);
        }
    }

    fn chart_panel(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let rect = response.rect;
        let plot = plot_rect(rect);

        painter.rect_filled(rect, 0.0, egui::Color32::WHITE);
        painter.text(
            egui::pos2(plot.center().x, rect.top() + 12.0),
            egui::Align2::CENTER_CENTER,
            format!("Psychrometric Chart - {:.0} Pa", self.pressure_pa),
            egui::FontId::proportional(14.0),
            egui::Color32::DARK_GRAY,
        );

        draw_axes(&painter, plot, &self.domain);
        for curve in &self.curves {
            draw_curve(&painter, plot, &self.domain, curve);
        }

        // 선택 점과 프로세스 선 (주황)
        for (t, w) in &self.selected_points {
            let pos = to_screen(plot, &self.domain, *t, *w);
            painter.circle_filled(pos, 4.0, egui::Color32::from_rgb(255, 140, 0));
        }
        for segment in &self.segments {
            let a = to_screen(
                plot,
                &self.domain,
                segment.state_a.dry_bulb_c,
                segment.state_a.humidity_ratio,
            );
            let b = to_screen(
                plot,
                &self.domain,
                segment.state_b.dry_bulb_c,
                segment.state_b.humidity_ratio,
            );
            painter.line_segment(
                [a, b],
                egui::Stroke::new(2.0, egui::Color32::from_rgb(255, 140, 0)),
            );
            painter.circle_filled(a, 4.0, egui::Color32::from_rgb(255, 140, 0));
            painter.circle_filled(b, 4.0, egui::Color32::from_rgb(255, 140, 0));
        }

        // 수동 입력 점 (파랑)
        if let Some(state) = &self.current_state {
            if self.domain.contains(state.dry_bulb_c, state.humidity_ratio) {
                let pos = to_screen(
                    plot,
                    &self.domain,
                    state.dry_bulb_c,
                    state.humidity_ratio,
                );
                painter.circle(
                    pos,
                    6.0,
                    egui::Color32::from_rgb(30, 90, 220),
                    egui::Stroke::new(1.5, egui::Color32::WHITE),
                );
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if plot.contains(pos) {
                    let (t, w) = from_screen(plot, &self.domain, pos);
                    self.handle_chart_click(t, w);
                }
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::SidePanel::left("inputs")
            .default_width(260.0)
            .show(ctx, |ui| self.side_panel(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.chart_panel(ui));
    }
}

/// 차트 여백을 제외한 실제 플롯 영역.
fn plot_rect(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(rect.left() + 16.0, rect.top() + 24.0),
        egui::pos2(rect.right() - 64.0, rect.bottom() - 28.0),
    )
}

fn to_screen(plot: egui::Rect, domain: &ChartDomain, t_c: f64, w: f64) -> egui::Pos2 {
    let fx = (t_c - domain.t_min_c) / (domain.t_max_c - domain.t_min_c);
    let fy = w / domain.w_max;
    egui::pos2(
        plot.left() + fx as f32 * plot.width(),
        plot.bottom() - fy as f32 * plot.height(),
    )
}

fn from_screen(plot: egui::Rect, domain: &ChartDomain, pos: egui::Pos2) -> (f64, f64) {
    let fx = ((pos.x - plot.left()) / plot.width()) as f64;
    let fy = ((plot.bottom() - pos.y) / plot.height()) as f64;
    (
        domain.t_min_c + fx * (domain.t_max_c - domain.t_min_c),
        fy * domain.w_max,
    )
}

fn draw_axes(painter: &egui::Painter, plot: egui::Rect, domain: &ChartDomain) {
    let frame_stroke = egui::Stroke::new(1.0, egui::Color32::GRAY);
    painter.rect_stroke(plot, 0.0, frame_stroke);

    // 온도 눈금 (10 °C 간격)
    let mut t = (domain.t_min_c / 10.0).ceil() * 10.0;
    while t <= domain.t_max_c {
        let pos = to_screen(plot, domain, t, 0.0);
        painter.text(
            egui::pos2(pos.x, plot.bottom() + 12.0),
            egui::Align2::CENTER_CENTER,
            format!("{t:.0}"),
            egui::FontId::proportional(11.0),
            egui::Color32::DARK_GRAY,
        );
        t += 10.0;
    }
    // 습도비 눈금 (0.005 간격, 오른쪽)
    let mut w = 0.0;
    while w <= domain.w_max + 1e-9 {
        let pos = to_screen(plot, domain, domain.t_max_c, w);
        painter.text(
            egui::pos2(plot.right() + 30.0, pos.y),
            egui::Align2::CENTER_CENTER,
            format!("{w:.3}"),
            egui::FontId::proportional(11.0),
            egui::Color32::DARK_GRAY,
        );
        w += 0.005;
    }
}

/// 패밀리별 선 스타일. 원본 선도의 관례색을 따른다.
fn family_stroke(family: CurveFamily) -> egui::Stroke {
    match family {
        CurveFamily::Saturation => egui::Stroke::new(2.0, egui::Color32::from_rgb(105, 105, 105)),
        CurveFamily::HumidityRatio => {
            egui::Stroke::new(0.8, egui::Color32::from_rgb(211, 211, 211))
        }
        CurveFamily::RelativeHumidity => {
            egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(40, 70, 220, 120))
        }
        CurveFamily::Isotherm => {
            egui::Stroke::new(0.5, egui::Color32::from_rgba_unmultiplied(128, 128, 128, 70))
        }
        CurveFamily::Enthalpy => {
            egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(30, 140, 60, 90))
        }
        CurveFamily::SpecificVolume => {
            egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(190, 40, 190, 110))
        }
    }
}

fn draw_curve(painter: &egui::Painter, plot: egui::Rect, domain: &ChartDomain, curve: &Curve) {
    if curve.is_empty() {
        return;
    }
    let screen_points: Vec<egui::Pos2> = curve
        .points
        .iter()
        .map(|(t, w)| to_screen(plot, domain, *t, *w))
        .collect();
    let stroke = family_stroke(curve.family);
    painter.add(egui::Shape::line(screen_points.clone(), stroke));

    // 상대습도는 중앙에 %, 엔탈피/비체적은 시작점에 값 라벨을 단다.
    match curve.family {
        CurveFamily::RelativeHumidity => {
            let mid = screen_points[screen_points.len() / 2];
            painter.text(
                mid,
                egui::Align2::LEFT_CENTER,
                format!(" {:.0}%", curve.parameter * 100.0),
                egui::FontId::proportional(10.0),
                egui::Color32::from_rgb(40, 70, 220),
            );
        }
        CurveFamily::Enthalpy => {
            painter.text(
                screen_points[0],
                egui::Align2::RIGHT_BOTTOM,
                format!("{:.0}", curve.parameter),
                egui::FontId::proportional(10.0),
                egui::Color32::from_rgb(30, 140, 60),
            );
        }
        CurveFamily::SpecificVolume => {
            painter.text(
                screen_points[0],
                egui::Align2::LEFT_BOTTOM,
                format!(" {:.2}", curve.parameter),
                egui::FontId::proportional(10.0),
                egui::Color32::from_rgb(190, 40, 190),
            );
        }
        _ => {}
    }
}

fn process_kind_label(tr: &i18n::Translator, kind: air::ProcessKind) -> &'static str {
    match kind {
        air::ProcessKind::SensibleHeating => tr.t(keys::PROCESS_KIND_SENSIBLE_HEATING),
        air::ProcessKind::SensibleCooling => tr.t(keys::PROCESS_KIND_SENSIBLE_COOLING),
        air::ProcessKind::Humidification => tr.t(keys::PROCESS_KIND_HUMIDIFICATION),
        air::ProcessKind::Dehumidification => tr.t(keys::PROCESS_KIND_DEHUMIDIFICATION),
        air::ProcessKind::Adiabatic => tr.t(keys::PROCESS_KIND_ADIABATIC),
        air::ProcessKind::Combined => tr.t(keys::PROCESS_KIND_COMBINED),
    }
}

/// 곡선 세트를 오프스크린 래스터로 그려 PNG로 저장한다.
/// 축 틀과 곡선 기하만 포함하며 텍스트 라벨은 화면 전용이다.
fn render_chart_png(
    path: &PathBuf,
    curves: &[Curve],
    domain: &ChartDomain,
) -> Result<(), String> {
    const WIDTH: u32 = 2400;
    const HEIGHT: u32 = 1800;
    const MARGIN: u32 = 80;

    let mut img = image::RgbaImage::from_pixel(WIDTH, HEIGHT, image::Rgba([255, 255, 255, 255]));

    let to_px = |t_c: f64, w: f64| -> (f32, f32) {
        let fx = (t_c - domain.t_min_c) / (domain.t_max_c - domain.t_min_c);
        let fy = w / domain.w_max;
        (
            MARGIN as f32 + fx as f32 * (WIDTH - 2 * MARGIN) as f32,
            (HEIGHT - MARGIN) as f32 - fy as f32 * (HEIGHT - 2 * MARGIN) as f32,
        )
    };

    // 축 틀
    let frame = image::Rgba([90, 90, 90, 255]);
    let (x0, y1) = to_px(domain.t_min_c, 0.0);
    let (x1, y0) = to_px(domain.t_max_c, domain.w_max);
    draw_line(&mut img, x0, y0, x0, y1, frame);
    draw_line(&mut img, x1, y0, x1, y1, frame);
    draw_line(&mut img, x0, y0, x1, y0, frame);
    draw_line(&mut img, x0, y1, x1, y1, frame);

    for curve in curves {
        let color = family_rgba(curve.family);
        for pair in curve.points.windows(2) {
            let (ax, ay) = to_px(pair[0].0, pair[0].1);
            let (bx, by) = to_px(pair[1].0, pair[1].1);
            draw_line(&mut img, ax, ay, bx, by, color);
        }
    }

    img.save(path).map_err(|e| e.to_string())
}

fn family_rgba(family: CurveFamily) -> image::Rgba<u8> {
    match family {
        CurveFamily::Saturation => image::Rgba([105, 105, 105, 255]),
        CurveFamily::HumidityRatio => image::Rgba([211, 211, 211, 255]),
        CurveFamily::RelativeHumidity => image::Rgba([40, 70, 220, 255]),
        CurveFamily::Isotherm => image::Rgba([200, 200, 200, 255]),
        CurveFamily::Enthalpy => image::Rgba([30, 140, 60, 255]),
        CurveFamily::SpecificVolume => image::Rgba([190, 40, 190, 255]),
    }
}

/// 단순 선분 래스터라이저. 긴 축을 따라 한 픽셀씩 찍는다.
fn draw_line(img: &mut image::RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32, color: image::Rgba<u8>) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil() as usize;
    if steps == 0 {
        put_pixel_checked(img, x0, y0, color);
        return;
    }
    for i in 0..=steps {
        let f = i as f32 / steps as f32;
        put_pixel_checked(img, x0 + (x1 - x0) * f, y0 + (y1 - y0) * f, color);
    }
}

fn put_pixel_checked(img: &mut image::RgbaImage, x: f32, y: f32, color: image::Rgba<u8>) {
    let (xi, yi) = (x.round() as i64, y.round() as i64);
    if xi >= 0 && yi >= 0 && (xi as u32) < img.width() && (yi as u32) < img.height() {
        img.put_pixel(xi as u32, yi as u32, color);
    }
}

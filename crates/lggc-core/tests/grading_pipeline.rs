//! End-to-end checks: decoded image → session → graded image and curve plot.

use image::{DynamicImage, Rgba, RgbaImage};

use lggc_core::plot::curve::MARGIN;
use lggc_core::{
    Channel, ChannelParameters, Control, ControlPanel, CpuCurveBackend, GradeParameters,
    GradingImage, GradingSession, ParameterKind, TransferTables, build_tables, plot_curve,
};

/// Horizontal 8-bit grey ramp covering every level once.
fn grey_ramp() -> DynamicImage {
    let buf = RgbaImage::from_fn(256, 1, |x, _| {
        let v = x as u8;
        Rgba([v, v, v, 255])
    });
    DynamicImage::ImageRgba8(buf)
}

#[test]
fn test_neutral_grade_round_trips_8bit_image() {
    let source = grey_ramp();
    let image = GradingImage::from_dynamic(&source);
    let backend = CpuCurveBackend::new(1024).unwrap();
    let session = GradingSession::new(backend, &image, 256, 128).unwrap();

    let out = session.graded().to_dynamic().unwrap().to_rgba8();
    assert_eq!(out, source.to_rgba8());
}

#[test]
fn test_preset_grade_matches_tables_per_level() {
    let preset = r#"{
        "global": { "lift": 0.05, "gamma": 1.3, "gain": 1.1, "contrast": 0.25 },
        "blue":   { "lift": 0.0,  "gamma": -0.2, "gain": 0.0, "contrast": 0.0 }
    }"#;
    let params = GradeParameters::from_json(preset).unwrap();

    let image = GradingImage::from_dynamic(&grey_ramp());
    let backend = CpuCurveBackend::new(1024).unwrap();
    let mut session = GradingSession::new(backend, &image, 256, 128).unwrap();
    session.update(params.clone()).unwrap();

    let tables = session.tables();
    for (level, px) in session.graded().pixels.iter().enumerate() {
        let level = level as u8;
        assert!((px[0] - tables.red.output(level)).abs() < 1e-5);
        assert!((px[1] - tables.green.output(level)).abs() < 1e-5);
        assert!((px[2] - tables.blue.output(level)).abs() < 1e-5);
    }
    // Red and green share the global values; blue has its own gamma.
    assert_eq!(tables.red, tables.green);
    assert_ne!(tables.red, tables.blue);
}

#[test]
fn test_outputs_bounded_across_parameter_grid() {
    let lifts = [-1.0, -0.2, 0.0, 0.3, 1.5];
    let gammas = [0.05, 0.5, 1.0, 2.2, 8.0];
    let gains = [0.0, 0.5, 1.0, 4.0];
    let contrasts = [0.0, 0.5, 1.0];

    for &lift in &lifts {
        for &gamma in &gammas {
            for &gain in &gains {
                for &contrast in &contrasts {
                    let p = ChannelParameters {
                        lift,
                        gamma,
                        gain,
                        contrast,
                    };
                    let tables = build_tables(&p, &p, &p).unwrap();
                    for entry in tables.red.entries() {
                        assert!(entry.output.is_finite());
                        assert!((0.0..=1.0).contains(&entry.output), "{p:?}");
                    }
                }
            }
        }
    }
}

#[test]
fn test_plot_tracks_table_outputs() {
    let mut panel = ControlPanel::new();
    panel.set(Control::global(ParameterKind::Contrast), 1.0);
    let tables = TransferTables::from_parameters(&panel.to_parameters()).unwrap();

    let (w, h) = (400.0, 300.0);
    let points = plot_curve(tables.get(Channel::Green), w, h);
    let usable_h = h - 2.0 * MARGIN;
    for (point, entry) in points.iter().zip(tables.green.entries()) {
        let expected = MARGIN + usable_h - usable_h * entry.output;
        assert!((point.y - expected).abs() < 1e-3);
    }
    assert!((points[0].x - MARGIN).abs() < 1e-4);
    assert!((points[255].x - (w - MARGIN)).abs() < 1e-3);
}

#[test]
fn test_rendered_plot_saves_as_png() {
    let image = GradingImage::from_dynamic(&grey_ramp());
    let backend = CpuCurveBackend::new(1024).unwrap();
    let session = GradingSession::new(backend, &image, 64, 32).unwrap();

    let png = session.render_plot().to_rgba8();
    let mut bytes = std::io::Cursor::new(Vec::new());
    png.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
    let decoded = image::load_from_memory(bytes.get_ref()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 32));
}

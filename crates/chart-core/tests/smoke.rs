// File: crates/chart-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG frame and the animated SVG.

use usage_chart_core::{ChartConfig, ChartState, Dataset, RenderOptions};

#[test]
fn render_smoke_png_and_svg() {
    let data = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/social-media-uk.csv");
    let ds = Dataset::from_path(data).expect("sample data");
    let state = ChartState::build(&ds, &ChartConfig::default(), 0.0);

    let mut opts = RenderOptions::default();
    opts.draw_labels = false;
    let dir = tempfile::tempdir().expect("tempdir");

    let out = dir.path().join("frames/frame_1500.png");
    state.render_to_png(&state.frame(1500.0), &opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = state.render_to_png_bytes(&state.frame(1500.0), &opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let decoded = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!(decoded.dimensions(), (1000, 800));

    let svg = dir.path().join("chart.svg");
    state.render_to_svg(&opts, &svg).expect("svg");
    let text = std::fs::read_to_string(&svg).expect("read svg");
    assert!(text.starts_with("<?xml"));
}

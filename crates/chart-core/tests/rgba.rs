// File: crates/chart-core/tests/rgba.rs
// Purpose: Validate RGBA rendering buffer shape, background pixels and animation progress.

use usage_chart_core::{ChartConfig, ChartState, Dataset, RenderOptions};

fn state() -> ChartState {
    let csv = "social_media_app,age_group,men_percent,women_percent\n\
               Youtube,16 - 20,88,82\nYoutube,26 - 30,80,70\nYoutube,36 - 40,72,60\n";
    let ds = Dataset::from_reader(csv.as_bytes()).expect("dataset");
    ChartState::build(&ds, &ChartConfig::default(), 0.0)
}

fn opts() -> RenderOptions {
    let mut opts = RenderOptions::default();
    opts.draw_labels = false; // avoid font variance
    opts
}

#[test]
fn render_rgba8_buffer() {
    let state = state();
    let opts = opts();
    let (px, w, h, stride) = state.render_to_rgba8(&state.frame(0.0), &opts).expect("rgba render");
    assert_eq!((w, h), (1000, 800));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // top-left pixel is the dark background, fully opaque
    assert_eq!(&px[..4], &[0x1a, 0x1a, 0x1a, 255]);
}

#[test]
fn drawn_frame_differs_from_initial_frame() {
    let state = state();
    let opts = opts();
    let (blank, ..) = state.render_to_rgba8(&state.frame(0.0), &opts).expect("t=0");
    let (drawn, ..) = state.render_to_rgba8(&state.frame(5000.0), &opts).expect("t=5000");
    let changed = blank.chunks_exact(4).zip(drawn.chunks_exact(4)).filter(|(a, b)| a != b).count();
    assert!(changed > 100, "only {changed} pixels changed");
}

#[test]
fn legend_can_be_left_out() {
    let state = state();
    let mut opts = opts();
    opts.draw_legend = false;
    let (px, w, _, stride) = state.render_to_rgba8(&state.frame(5000.0), &opts).expect("rgba");
    // inside the legend panel, below the replay button
    let (x, y) = (w as usize - 20, 780usize);
    let i = y * stride + x * 4;
    assert_eq!(&px[i..i + 4], &[0x1a, 0x1a, 0x1a, 255]);
}

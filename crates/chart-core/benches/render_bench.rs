use anyhow::Result;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use usage_chart_core::{ChartConfig, ChartState, Dataset, RenderOptions};

fn build_state() -> Result<ChartState> {
    let data = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/social-media-uk.csv");
    let ds = Dataset::from_path(data)?;
    Ok(ChartState::build(&ds, &ChartConfig::default(), 0.0))
}

fn bench_render(c: &mut Criterion) {
    let state = build_state().expect("sample data");
    let mut opts = RenderOptions::default();
    opts.draw_labels = false;

    let mut group = c.benchmark_group("render_frame");
    for &at in &[1500.0f64, 5000.0] {
        let frame = state.frame(at);
        group.bench_function(format!("rgba_t{at}"), |b| {
            b.iter(|| -> Result<()> {
                let px = state.render_to_rgba8(&frame, &opts)?;
                black_box(px);
                Ok(())
            });
        });
    }
    group.bench_function("svg", |b| {
        b.iter(|| -> Result<()> {
            black_box(state.to_svg_string(&opts)?);
            Ok(())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use usage_chart_core::{Point, RevealSchedule};

fn wavy(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let x = 60.0 + i as f64 * (690.0 / n.max(1) as f64);
            let y = 400.0 + (i as f64 * 0.7).sin() * 250.0;
            Point::new(x, y)
        })
        .collect()
}

fn bench_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("reveal_schedule");
    for &n in &[5usize, 50, 200] {
        let points = wavy(n);
        group.bench_function(format!("points_{n}"), |b| {
            b.iter(|| black_box(RevealSchedule::compute(black_box(&points), 3000.0)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reveal);
criterion_main!(benches);

// File: crates/chart-core/tests/ticks.rs
// Purpose: Nice tick generation and linear scale mapping for the percentage axes.

use usage_chart_core::grid::ticks;
use usage_chart_core::scale::LinearScale;

#[test]
fn percent_domain_gets_ten_point_steps() {
    let want: Vec<f64> = (0..=10).map(|i| i as f64 * 10.0).collect();
    assert_eq!(ticks(0.0, 100.0, 10), want);
}

#[test]
fn decimal_ticks_are_exact() {
    assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    assert_eq!(ticks(0.0, 1.0, 10)[3], 0.3);
}

#[test]
fn reversed_and_degenerate_domains() {
    assert_eq!(ticks(10.0, 0.0, 2), vec![10.0, 5.0, 0.0]);
    assert_eq!(ticks(3.0, 3.0, 10), vec![3.0]);
    assert!(ticks(0.0, 1.0, 0).is_empty());
    assert!(ticks(0.0, f64::NAN, 10).is_empty());
}

#[test]
fn inverted_range_maps_up() {
    let y = LinearScale::new((0.0, 100.0), (750.0, 50.0));
    assert_eq!(y.apply(0.0), 750.0);
    assert_eq!(y.apply(100.0), 50.0);
    assert_eq!(y.apply(50.0), 400.0);
    assert!((y.invert(400.0) - 50.0).abs() < 1e-12);
}

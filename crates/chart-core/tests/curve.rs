// File: crates/chart-core/tests/curve.rs
// Purpose: Catmull-Rom path construction and arc length.

use usage_chart_core::curve::{cubic_length, CurvePath, Segment};
use usage_chart_core::Point;

#[test]
fn empty_and_single_point_paths() {
    let empty = CurvePath::catmull_rom(&[]);
    assert!(empty.is_empty());
    assert_eq!(empty.length(), 0.0);
    assert_eq!(empty.to_svg_d(), "");

    let single = CurvePath::catmull_rom(&[Point::new(1.0, 2.0)]);
    assert!(!single.is_empty());
    assert!(single.segments.is_empty());
    assert_eq!(single.length(), 0.0);
    assert_eq!(single.to_svg_d(), "M1,2");
}

#[test]
fn two_points_make_a_straight_line() {
    let path = CurvePath::catmull_rom(&[Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
    assert_eq!(path.segments, vec![Segment::Line { to: Point::new(3.0, 4.0) }]);
    assert!((path.length() - 5.0).abs() < 1e-12);
    assert_eq!(path.to_svg_d(), "M0,0L3,4");
}

#[test]
fn curve_passes_through_every_point() {
    let points = [
        Point::new(10.0, 10.0),
        Point::new(50.0, 80.0),
        Point::new(90.0, 20.0),
        Point::new(140.0, 60.0),
        Point::new(200.0, 5.0),
    ];
    let path = CurvePath::catmull_rom(&points);
    assert_eq!(path.start, Some(points[0]));
    assert_eq!(path.segments.len(), points.len() - 1);
    for (seg, want) in path.segments.iter().zip(&points[1..]) {
        match seg {
            Segment::Cubic { to, .. } => assert_eq!(to, want),
            other => panic!("expected cubic, got {other:?}"),
        }
    }
    assert_eq!(path.end(), Some(points[4]));

    let chord: f64 = points.windows(2).map(|w| w[0].distance(w[1])).sum();
    assert!(path.length() >= chord - 1e-9);
}

#[test]
fn collinear_points_measure_their_span() {
    let points: Vec<Point> = (0..5).map(|i| Point::new(i as f64 * 25.0, 100.0)).collect();
    let path = CurvePath::catmull_rom(&points);
    assert!((path.length() - 100.0).abs() < 1e-6, "length {}", path.length());
}

#[test]
fn cubic_length_of_known_shapes() {
    let straight = cubic_length(
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(2.0, 0.0),
        Point::new(3.0, 0.0),
    );
    assert!((straight - 3.0).abs() < 1e-9);

    // quarter circle approximation with the usual 0.5523 handle length
    let k = 0.552_284_749_8;
    let arc = cubic_length(
        Point::new(1.0, 0.0),
        Point::new(1.0, k),
        Point::new(k, 1.0),
        Point::new(0.0, 1.0),
    );
    assert!((arc - std::f64::consts::FRAC_PI_2).abs() < 1e-3, "arc {arc}");
}

#[test]
fn svg_path_data_rounds_coordinates() {
    let path = CurvePath::catmull_rom(&[Point::new(0.12345, 1.0), Point::new(2.0, 3.98765)]);
    assert_eq!(path.to_svg_d(), "M0.123,1L2,3.988");
}

#[test]
fn right_angle_matches_d3_catmull_rom() {
    let path = CurvePath::catmull_rom(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]);
    assert_eq!(path.to_svg_d(), "M0,0C0,0,8.333,-1.667,10,0C11.667,1.667,10,10,10,10");
}

#[test]
fn repeated_point_keeps_control_points_finite() {
    let points = [Point::new(0.0, 0.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
    let path = CurvePath::catmull_rom(&points);

    assert_eq!(path.segments.len(), 2);
    assert_eq!(path.to_svg_d(), "M0,0C0,0,0,0,0,0C0,0,10,0,10,0");
    for seg in &path.segments {
        let Segment::Cubic { c1, c2, to } = *seg else { panic!("expected cubic, got {seg:?}") };
        assert!([c1, c2, to].iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
    assert!((path.length() - 10.0).abs() < 1e-9, "length {}", path.length());
}

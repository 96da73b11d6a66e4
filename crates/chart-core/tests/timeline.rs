// File: crates/chart-core/tests/timeline.rs
// Purpose: Timeline sampling, track precedence and interruption.

use usage_chart_core::timeline::{Channel, Easing, Element, Property, Timeline, Track};
use usage_chart_core::SeriesId;

fn radius() -> Channel {
    Channel::new(Element::Marker(SeriesId(0), 0), Property::Radius)
}

fn track(from: f64, to: f64, start: f64, duration: f64) -> Track {
    Track { channel: radius(), from, to, start, duration, easing: Easing::Linear }
}

#[test]
fn samples_base_then_track_then_frozen_end() {
    let mut tl = Timeline::new();
    tl.set(radius(), 0.0);
    tl.schedule(track(0.0, 10.0, 100.0, 200.0));

    assert_eq!(tl.value(radius(), 50.0), Some(0.0));
    assert_eq!(tl.value(radius(), 100.0), Some(0.0));
    assert_eq!(tl.value(radius(), 200.0), Some(5.0));
    assert_eq!(tl.value(radius(), 300.0), Some(10.0));
    assert_eq!(tl.value(radius(), 10_000.0), Some(10.0));
    assert!(!tl.is_settled(250.0));
    assert!(tl.is_settled(300.0));
    assert_eq!(tl.end_time(), 300.0);
}

#[test]
fn latest_started_track_wins() {
    let mut tl = Timeline::new();
    tl.set(radius(), 0.0);
    tl.schedule(track(0.0, 10.0, 0.0, 1000.0));
    tl.schedule(track(20.0, 30.0, 500.0, 100.0));

    assert_eq!(tl.value(radius(), 250.0), Some(2.5));
    assert_eq!(tl.value(radius(), 550.0), Some(25.0));
    assert_eq!(tl.value(radius(), 2000.0), Some(30.0));
}

#[test]
fn interrupt_bakes_current_value_and_drops_pending_tracks() {
    let mut tl = Timeline::new();
    let stroke = Channel::new(Element::Marker(SeriesId(0), 0), Property::StrokeWidth);
    let other = Channel::new(Element::Marker(SeriesId(0), 1), Property::Radius);
    tl.schedule(track(0.0, 10.0, 0.0, 100.0));
    tl.schedule(track(10.0, 0.0, 500.0, 100.0));
    tl.set(stroke, 2.5);
    tl.schedule(Track { channel: other, from: 0.0, to: 8.0, start: 0.0, duration: 100.0, easing: Easing::Linear });

    tl.interrupt(Element::Marker(SeriesId(0), 0), 50.0);

    assert_eq!(tl.base(radius()), Some(5.0));
    assert_eq!(tl.value(radius(), 1000.0), Some(5.0));
    assert_eq!(tl.value(stroke, 1000.0), Some(2.5));
    assert_eq!(tl.value(other, 1000.0), Some(8.0));
}

#[test]
fn cubic_in_out_is_symmetric() {
    let e = Easing::CubicInOut;
    assert_eq!(e.apply(0.0), 0.0);
    assert_eq!(e.apply(0.5), 0.5);
    assert_eq!(e.apply(1.0), 1.0);
    assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-12);
    assert_eq!(e.apply(2.0), 1.0);
}

#[test]
fn unknown_channel_has_no_value() {
    let tl = Timeline::new();
    assert_eq!(tl.value(radius(), 0.0), None);
    assert!(tl.is_settled(0.0));
}

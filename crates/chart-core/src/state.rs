// File: crates/chart-core/src/state.rs
// Summary: Chart state (scales, visuals, timeline) and the controller driving replay, hover and legend highlight.
// Notes:
// - `ChartState` is built once per render pass from the immutable dataset; replay drops it
//   and builds a new one, so no in-flight transition survives a replay.
// - Visual handles are addressed by `SeriesId` index; there is no name-based lookup.

use std::sync::Arc;

use skia_safe as skia;

use crate::axis::{Axis, Orientation};
use crate::config::ChartConfig;
use crate::curve::CurvePath;
use crate::data::{Dataset, Sample, SeriesId, UsageSeries};
use crate::frame::{Frame, MarkerFrame, SeriesFrame, Tooltip};
use crate::geometry::Point;
use crate::layout::Layout;
use crate::reveal::RevealSchedule;
use crate::scale::LinearScale;
use crate::timeline::{Channel, Easing, Element, Property, Timeline, Track};
use crate::types::Millis;

pub const X_LABEL: &str = "Men's Usage (%)";
pub const Y_LABEL: &str = "Women's Usage (%)";
const PERCENT_DOMAIN: (f64, f64) = (0.0, 100.0);

#[derive(Clone, Debug)]
pub struct MarkerVisual {
    pub center: Point,
    /// Radius at rest.
    pub radius: f64,
    pub sample: Sample,
}

#[derive(Clone, Debug)]
pub struct SeriesVisual {
    pub id: SeriesId,
    pub name: String,
    pub color: skia::Color,
    /// Sample positions in drawing space.
    pub points: Vec<Point>,
    pub curve: CurvePath,
    pub length: f64,
    pub markers: Vec<MarkerVisual>,
}

impl SeriesVisual {
    fn new(id: SeriesId, series: &UsageSeries, x: &LinearScale, y: &LinearScale) -> Self {
        let points: Vec<Point> = series
            .samples
            .iter()
            .map(|s| Point::new(x.apply(s.men), y.apply(s.women)))
            .collect();
        let curve = CurvePath::catmull_rom(&points);
        let length = curve.length();
        let markers = series
            .samples
            .iter()
            .zip(&points)
            .map(|(sample, &center)| MarkerVisual {
                center,
                radius: sample.age_group.marker_radius(),
                sample: *sample,
            })
            .collect();
        Self { id, name: series.name.clone(), color: series.color, points, curve, length, markers }
    }

    pub fn line(&self) -> Element {
        Element::Line(self.id)
    }

    pub fn marker(&self, index: usize) -> Element {
        Element::Marker(self.id, index)
    }

    /// Every element owned by this series: the line, then its markers.
    pub fn handles(&self) -> impl Iterator<Item = Element> + '_ {
        std::iter::once(self.line()).chain((0..self.markers.len()).map(|i| self.marker(i)))
    }
}

/// Tracks drawing `visual`'s line from nothing over `draw_ms`, starting at `start`,
/// and growing each marker over `reveal_ms` once the stroke reaches it.
pub fn reveal_tracks(visual: &SeriesVisual, start: Millis, draw_ms: Millis, reveal_ms: Millis) -> Vec<Track> {
    if visual.points.is_empty() {
        return Vec::new();
    }
    let schedule = RevealSchedule::compute(&visual.points, draw_ms);
    let mut tracks = Vec::with_capacity(visual.markers.len() + 1);
    tracks.push(Track {
        channel: Channel::new(visual.line(), Property::DashLength),
        from: 0.0,
        to: visual.length,
        start,
        duration: draw_ms,
        easing: Easing::Linear,
    });
    for (index, (marker, delay)) in visual.markers.iter().zip(schedule.delays()).enumerate() {
        tracks.push(Track {
            channel: Channel::new(visual.marker(index), Property::Radius),
            from: 0.0,
            to: marker.radius,
            start: start + delay,
            duration: reveal_ms,
            easing: Easing::CubicInOut,
        });
    }
    tracks
}

#[derive(Clone, Debug)]
pub struct ChartState {
    /// Time the render pass started.
    pub origin: Millis,
    pub config: ChartConfig,
    pub layout: Layout,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<SeriesVisual>,
    pub timeline: Timeline,
    pub highlight: Option<SeriesId>,
}

impl ChartState {
    /// Build the chart and schedule the staggered initial reveal from `origin`.
    pub fn build(dataset: &Dataset, config: &ChartConfig, origin: Millis) -> Self {
        let layout = Layout::new(config, dataset);
        let x_scale = LinearScale::new(PERCENT_DOMAIN, (layout.plot.left, layout.plot.right));
        let y_scale = LinearScale::new(PERCENT_DOMAIN, (layout.plot.bottom, layout.plot.top));

        let series: Vec<SeriesVisual> = dataset
            .ids()
            .zip(dataset.series.iter())
            .map(|(id, s)| SeriesVisual::new(id, s, &x_scale, &y_scale))
            .collect();

        let anim = config.animation;
        let mut timeline = Timeline::new();
        for (order, visual) in series.iter().enumerate() {
            if visual.points.is_empty() {
                log::warn!("series `{}` has no samples; skipping", visual.name);
                continue;
            }
            timeline.set(Channel::new(visual.line(), Property::DashLength), 0.0);
            for element in visual.handles().skip(1) {
                timeline.set(Channel::new(element, Property::Radius), 0.0);
                timeline.set(Channel::new(element, Property::StrokeWidth), config.style.marker_stroke_width);
            }
            let start = origin + order as f64 * anim.stagger_ms;
            for track in reveal_tracks(visual, start, anim.draw_ms, anim.reveal_ms) {
                timeline.schedule(track);
            }
        }
        log::debug!("built chart state with {} series at t={origin}", series.len());

        Self {
            origin,
            config: config.clone(),
            layout,
            x_axis: Axis::new(X_LABEL, Orientation::Bottom, x_scale),
            y_axis: Axis::new(Y_LABEL, Orientation::Left, y_scale),
            series,
            timeline,
            highlight: None,
        }
    }

    pub fn x_scale(&self) -> &LinearScale {
        &self.x_axis.scale
    }

    pub fn y_scale(&self) -> &LinearScale {
        &self.y_axis.scale
    }

    pub fn series(&self, id: SeriesId) -> Option<&SeriesVisual> {
        self.series.get(id.0)
    }

    pub fn opacity(&self, id: SeriesId) -> f64 {
        match self.highlight {
            Some(focused) if focused != id => self.config.style.dim_opacity,
            _ => 1.0,
        }
    }

    /// Focus one series: dim the rest and replay its drawing with the highlight timings.
    pub fn highlight(&mut self, id: SeriesId, now: Millis) {
        let Some(visual) = self.series.get(id.0) else { return };
        self.highlight = Some(id);
        let anim = self.config.animation;

        for element in visual.handles() {
            self.timeline.interrupt(element, now);
        }
        self.timeline.set(Channel::new(visual.line(), Property::DashLength), 0.0);
        for index in 0..visual.markers.len() {
            self.timeline.set(Channel::new(visual.marker(index), Property::Radius), 0.0);
        }
        for track in reveal_tracks(visual, now, anim.highlight_draw_ms, anim.highlight_reveal_ms) {
            self.timeline.schedule(track);
        }
        log::debug!("highlight `{}` at t={now}", visual.name);
    }

    /// Back to uniform full opacity. Drawn state is left as is.
    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    pub fn hover_marker(&mut self, id: SeriesId, index: usize, now: Millis) {
        let style = self.config.style;
        self.transition_marker(id, index, now, style.hover_scale, style.hover_stroke_width);
    }

    pub fn unhover_marker(&mut self, id: SeriesId, index: usize, now: Millis) {
        let style = self.config.style;
        self.transition_marker(id, index, now, 1.0, style.marker_stroke_width);
    }

    fn transition_marker(&mut self, id: SeriesId, index: usize, now: Millis, scale: f64, stroke: f64) {
        let Some(marker) = self.series.get(id.0).and_then(|v| v.markers.get(index)) else { return };
        let element = Element::Marker(id, index);
        let duration = self.config.animation.hover_ms;
        let targets = [
            (Property::Radius, marker.radius * scale),
            (Property::StrokeWidth, stroke),
        ];

        self.timeline.interrupt(element, now);
        for (property, to) in targets {
            let channel = Channel::new(element, property);
            let from = self.timeline.value(channel, now).unwrap_or(to);
            self.timeline.schedule(Track {
                channel,
                from,
                to,
                start: now,
                duration,
                easing: Easing::CubicInOut,
            });
        }
    }

    pub fn marker_radius(&self, id: SeriesId, index: usize, now: Millis) -> f64 {
        self.timeline
            .value(Channel::new(Element::Marker(id, index), Property::Radius), now)
            .unwrap_or(0.0)
    }

    /// Topmost visible marker under `(x, y)`. Later series draw on top.
    pub fn marker_at(&self, x: f64, y: f64, now: Millis) -> Option<(SeriesId, usize)> {
        let p = Point::new(x, y);
        for visual in self.series.iter().rev() {
            for (index, marker) in visual.markers.iter().enumerate().rev() {
                let r = self.marker_radius(visual.id, index, now);
                if r > 0.0 && marker.center.distance(p) <= r {
                    return Some((visual.id, index));
                }
            }
        }
        None
    }

    pub fn is_animating(&self, now: Millis) -> bool {
        !self.timeline.is_settled(now)
    }

    /// Resolve every animated property at `now`.
    pub fn frame(&self, now: Millis) -> Frame {
        let series = self
            .series
            .iter()
            .map(|visual| {
                let drawn = self
                    .timeline
                    .value(Channel::new(visual.line(), Property::DashLength), now)
                    .unwrap_or(0.0);
                let markers = visual
                    .markers
                    .iter()
                    .enumerate()
                    .map(|(index, marker)| {
                        let element = visual.marker(index);
                        MarkerFrame {
                            center: marker.center,
                            radius: self.marker_radius(visual.id, index, now),
                            stroke_width: self
                                .timeline
                                .value(Channel::new(element, Property::StrokeWidth), now)
                                .unwrap_or(self.config.style.marker_stroke_width),
                        }
                    })
                    .collect();
                SeriesFrame {
                    id: visual.id,
                    color: visual.color,
                    opacity: self.opacity(visual.id),
                    drawn,
                    length: visual.length,
                    markers,
                }
            })
            .collect();
        Frame { time: now, series, highlight: self.highlight, tooltip: None }
    }
}

/// Owns the dataset and the current render pass, and translates pointer input
/// into state changes.
pub struct ChartController {
    dataset: Arc<Dataset>,
    config: ChartConfig,
    state: ChartState,
    pointer: Option<Point>,
    hovered_marker: Option<(SeriesId, usize)>,
    hovered_legend: Option<SeriesId>,
    passes: u64,
}

impl ChartController {
    pub fn new(dataset: Arc<Dataset>, config: ChartConfig, now: Millis) -> Self {
        let state = ChartState::build(&dataset, &config, now);
        Self {
            dataset,
            config,
            state,
            pointer: None,
            hovered_marker: None,
            hovered_legend: None,
            passes: 1,
        }
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Number of render passes so far (1 + replays).
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Discard the current render pass and start a new one at `now`.
    pub fn replay(&mut self, now: Millis) {
        self.state = ChartState::build(&self.dataset, &self.config, now);
        // the legend is not rebuilt, so a pointer resting on it stays "entered"
        self.hovered_marker = None;
        self.passes += 1;
        log::info!("replay #{} at t={now}", self.passes - 1);
    }

    pub fn legend_enter(&mut self, id: SeriesId, now: Millis) {
        if self.hovered_legend == Some(id) {
            return;
        }
        self.hovered_legend = Some(id);
        self.state.highlight(id, now);
    }

    pub fn legend_leave(&mut self) {
        if self.hovered_legend.take().is_some() {
            self.state.clear_highlight();
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, now: Millis) {
        self.pointer = Some(Point::new(x, y));

        let marker = self.state.marker_at(x, y, now);
        if marker != self.hovered_marker {
            if let Some((id, index)) = self.hovered_marker.take() {
                self.state.unhover_marker(id, index, now);
            }
            if let Some((id, index)) = marker {
                self.state.hover_marker(id, index, now);
            }
            self.hovered_marker = marker;
        }

        match self.state.layout.legend_at(x, y) {
            Some(id) if self.hovered_legend != Some(id) => {
                self.legend_leave();
                self.legend_enter(id, now);
            }
            Some(_) => {}
            None => self.legend_leave(),
        }
    }

    pub fn pointer_leave(&mut self, now: Millis) {
        self.pointer = None;
        if let Some((id, index)) = self.hovered_marker.take() {
            self.state.unhover_marker(id, index, now);
        }
        self.legend_leave();
    }

    /// Returns true when the click hit the replay button.
    pub fn click(&mut self, x: f64, y: f64, now: Millis) -> bool {
        if self.state.layout.is_replay_button(x, y) {
            self.replay(now);
            return true;
        }
        false
    }

    /// Last pointer position, if the pointer is over the chart.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn hovered_marker(&self) -> Option<(SeriesId, usize)> {
        self.hovered_marker
    }

    pub fn tooltip(&self) -> Option<Tooltip> {
        let (id, index) = self.hovered_marker?;
        let pointer = self.pointer?;
        let visual = self.state.series(id)?;
        let marker = visual.markers.get(index)?;
        let (dx, dy) = self.config.style.tooltip_offset;
        Some(Tooltip::for_sample(&visual.name, &marker.sample, Point::new(pointer.x + dx, pointer.y + dy)))
    }

    pub fn frame(&self, now: Millis) -> Frame {
        let mut frame = self.state.frame(now);
        frame.tooltip = self.tooltip();
        frame
    }

    pub fn is_animating(&self, now: Millis) -> bool {
        self.state.is_animating(now)
    }
}

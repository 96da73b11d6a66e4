// File: crates/chart-core/src/timeline.rs
// Summary: Explicit animation timeline: channels (element, property) with a base value and scheduled tracks.
// Behavior:
// - A channel's value at time t comes from its latest-started track, frozen at the
//   track's end value once finished; before any track starts, the base value applies.
// - Interrupting an element bakes its current values into the base and drops every
//   track on it, started or pending.

use std::collections::BTreeMap;

use crate::data::SeriesId;
use crate::types::Millis;

/// A visual element whose properties can be animated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    Line(SeriesId),
    /// Marker `index` of a series, in sample order.
    Marker(SeriesId, usize),
}

impl Element {
    pub fn series(self) -> SeriesId {
        match self {
            Element::Line(id) | Element::Marker(id, _) => id,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    /// Drawn length of a line; the dash pattern is `drawn, total`.
    DashLength,
    Radius,
    StrokeWidth,
}

impl Property {
    /// SVG attribute animated for this property.
    pub fn svg_attribute(self) -> &'static str {
        match self {
            Property::DashLength => "stroke-dasharray",
            Property::Radius => "r",
            Property::StrokeWidth => "stroke-width",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel {
    pub element: Element,
    pub property: Property,
}

impl Channel {
    pub const fn new(element: Element, property: Property) -> Self {
        Self { element, property }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }

    /// Cubic Bezier control points approximating the easing, for SMIL `keySplines`.
    pub fn key_spline(self) -> &'static str {
        match self {
            Easing::Linear => "0 0 1 1",
            Easing::CubicInOut => "0.645 0.045 0.355 1",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Track {
    pub channel: Channel,
    pub from: f64,
    pub to: f64,
    pub start: Millis,
    pub duration: Millis,
    pub easing: Easing,
}

impl Track {
    pub fn end(&self) -> Millis {
        self.start + self.duration.max(0.0)
    }

    pub fn value_at(&self, now: Millis) -> f64 {
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            (now - self.start) / self.duration
        };
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

#[derive(Clone, Debug)]
struct ChannelState {
    base: f64,
    tracks: Vec<Track>,
}

impl ChannelState {
    fn value(&self, now: Millis) -> f64 {
        let mut active: Option<&Track> = None;
        for track in self.tracks.iter().filter(|t| t.start <= now) {
            if active.map_or(true, |a| track.start >= a.start) {
                active = Some(track);
            }
        }
        active.map_or(self.base, |t| t.value_at(now))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Timeline {
    channels: BTreeMap<Channel, ChannelState>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a channel's value immediately, cancelling its tracks.
    pub fn set(&mut self, channel: Channel, value: f64) {
        self.channels.insert(channel, ChannelState { base: value, tracks: Vec::new() });
    }

    /// Add a transition. A channel seen for the first time starts at `track.from`.
    pub fn schedule(&mut self, track: Track) {
        self.channels
            .entry(track.channel)
            .or_insert_with(|| ChannelState { base: track.from, tracks: Vec::new() })
            .tracks
            .push(track);
    }

    pub fn value(&self, channel: Channel, now: Millis) -> Option<f64> {
        self.channels.get(&channel).map(|c| c.value(now))
    }

    pub fn base(&self, channel: Channel) -> Option<f64> {
        self.channels.get(&channel).map(|c| c.base)
    }

    /// Freeze every channel of `element` at its value at `now` and drop its tracks.
    pub fn interrupt(&mut self, element: Element, now: Millis) {
        for (channel, state) in self.channels.iter_mut() {
            if channel.element == element {
                state.base = state.value(now);
                state.tracks.clear();
            }
        }
    }

    /// Time at which the last scheduled track finishes.
    pub fn end_time(&self) -> Millis {
        self.tracks().map(Track::end).fold(f64::NEG_INFINITY, f64::max)
    }

    /// True when no track is running or pending at `now`.
    pub fn is_settled(&self, now: Millis) -> bool {
        self.tracks().all(|t| t.end() <= now)
    }

    /// All tracks, grouped by channel in channel order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> + '_ {
        self.channels.values().flat_map(|c| c.tracks.iter())
    }

    pub fn channels(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.keys().copied()
    }
}

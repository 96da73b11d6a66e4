// File: crates/chart-core/src/frame.rs
// Summary: Visual state of the chart resolved at one instant, plus the hover tooltip.

use skia_safe as skia;

use crate::data::{Sample, SeriesId};
use crate::geometry::Point;
use crate::types::Millis;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerFrame {
    pub center: Point,
    pub radius: f64,
    pub stroke_width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SeriesFrame {
    pub id: SeriesId,
    pub color: skia::Color,
    pub opacity: f64,
    /// Drawn length of the line.
    pub drawn: f64,
    /// Total line length.
    pub length: f64,
    pub markers: Vec<MarkerFrame>,
}

impl SeriesFrame {
    /// SVG `stroke-dasharray` equivalent of the drawn state.
    pub fn dash_array(&self) -> String {
        format!("{},{}", self.drawn, self.length)
    }

    pub fn is_fully_drawn(&self) -> bool {
        self.drawn >= self.length
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub anchor: Point,
    pub title: String,
    pub lines: Vec<String>,
}

impl Tooltip {
    pub fn for_sample(series_name: &str, sample: &Sample, anchor: Point) -> Self {
        Self {
            anchor,
            title: series_name.to_string(),
            lines: vec![
                format!("Age: {}", sample.age_group),
                format!("Men: {}%", sample.men),
                format!("Women: {}%", sample.women),
            ],
        }
    }

    /// Single-string form, one field per line.
    pub fn text(&self) -> String {
        std::iter::once(self.title.as_str())
            .chain(self.lines.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub time: Millis,
    /// In drawing order.
    pub series: Vec<SeriesFrame>,
    pub highlight: Option<SeriesId>,
    pub tooltip: Option<Tooltip>,
}

impl Frame {
    pub fn series(&self, id: SeriesId) -> Option<&SeriesFrame> {
        self.series.iter().find(|s| s.id == id)
    }
}

// File: crates/chart-core/src/axis.rs
// Summary: Axis model with label, orientation and scale.

use crate::scale::LinearScale;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Bottom,
    Left,
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub orientation: Orientation,
    pub scale: LinearScale,
    pub tick_count: usize,
}

impl Axis {
    pub fn new(label: impl Into<String>, orientation: Orientation, scale: LinearScale) -> Self {
        Self { label: label.into(), orientation, scale, tick_count: 10 }
    }

    /// Tick values paired with their pixel position along the axis.
    pub fn tick_positions(&self) -> Vec<(f64, f64)> {
        self.scale
            .ticks(self.tick_count)
            .into_iter()
            .map(|v| (v, self.scale.apply(v)))
            .collect()
    }
}

/// Tick label text: integers print without a fractional part.
pub fn format_tick(v: f64) -> String {
    format!("{v}")
}

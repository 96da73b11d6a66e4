// File: crates/chart-core/src/config.rs
// Summary: Chart configuration (canvas size, animation timings, stroke styles); JSON loadable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};
use crate::types::{Insets, Millis, HEIGHT, WIDTH};

/// Timings of the reveal, highlight and hover transitions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration of the full line-drawing animation on first render.
    pub draw_ms: Millis,
    /// Start offset between consecutive series on first render.
    pub stagger_ms: Millis,
    /// Duration of a single marker growing from radius 0.
    pub reveal_ms: Millis,
    /// Duration of the line-drawing replay triggered by legend hover.
    pub highlight_draw_ms: Millis,
    /// Marker growth duration during a legend-triggered replay.
    pub highlight_reveal_ms: Millis,
    /// Marker hover enlarge/shrink duration.
    pub hover_ms: Millis,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            draw_ms: 3000.0,
            stagger_ms: 200.0,
            reveal_ms: 300.0,
            highlight_draw_ms: 2000.0,
            highlight_reveal_ms: 200.0,
            hover_ms: 200.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub line_width: f64,
    pub marker_stroke_width: f64,
    pub hover_stroke_width: f64,
    /// Radius multiplier applied to a hovered marker.
    pub hover_scale: f64,
    /// Opacity of the series that are not highlighted from the legend.
    pub dim_opacity: f64,
    /// Tooltip offset from the pointer, in pixels.
    pub tooltip_offset: (f64, f64),
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            line_width: 2.5,
            marker_stroke_width: 2.5,
            hover_stroke_width: 3.0,
            hover_scale: 1.5,
            dim_opacity: 0.1,
            tooltip_offset: (10.0, -10.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart area width (the legend panel is laid out to its right).
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub legend_width: i32,
    pub animation: AnimationConfig,
    pub style: StyleConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            legend_width: 200,
            animation: AnimationConfig::default(),
            style: StyleConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Load a config from a JSON file; absent fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ChartError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Full canvas width including the legend panel.
    pub fn canvas_width(&self) -> i32 {
        self.width + self.legend_width
    }
}

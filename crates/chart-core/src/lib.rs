// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the dataset, reveal scheduling, timeline and rendering API.

pub mod types;
pub mod error;
pub mod config;
pub mod data;
pub mod theme;
pub mod scale;
pub mod grid;
pub mod geometry;
pub mod axis;
pub mod curve;
pub mod reveal;
pub mod timeline;
pub mod layout;
pub mod frame;
pub mod state;
pub mod chart;
pub mod svg;

pub use axis::Axis;
pub use chart::RenderOptions;
pub use config::{AnimationConfig, ChartConfig, StyleConfig};
pub use curve::CurvePath;
pub use data::{AgeGroup, Dataset, Sample, SeriesId, UsageSeries};
pub use error::{ChartError, Result};
pub use frame::{Frame, Tooltip};
pub use geometry::Point;
pub use reveal::RevealSchedule;
pub use state::{ChartController, ChartState};
pub use theme::Theme;
pub use timeline::Timeline;
pub use types::Millis;

// File: crates/chart-core/src/layout.rs
// Summary: Canvas layout: plot area, legend panel entries and the replay button, with hit testing.

use crate::config::ChartConfig;
use crate::data::{Dataset, SeriesId};
use crate::geometry::Rect;

const LEGEND_TOP_PAD: f64 = 10.0;
const LEGEND_ROW_HEIGHT: f64 = 26.0;
const LEGEND_SIDE_PAD: f64 = 16.0;
const SWATCH_SIZE: f64 = 14.0;
const BUTTON_WIDTH: f64 = 96.0;
const BUTTON_HEIGHT: f64 = 30.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    pub id: SeriesId,
    pub label: String,
    /// Hover target covering the whole row.
    pub rect: Rect,
    pub swatch: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub canvas_width: i32,
    pub canvas_height: i32,
    /// Chart area (plot plus margins).
    pub chart: Rect,
    /// Plot area inside the margins.
    pub plot: Rect,
    pub legend_panel: Rect,
    pub legend_items: Vec<LegendItem>,
    pub replay_button: Rect,
}

impl Layout {
    pub fn new(config: &ChartConfig, dataset: &Dataset) -> Self {
        let w = config.width as f64;
        let h = config.height as f64;
        let insets = config.insets;
        let chart = Rect::from_ltwh(0.0, 0.0, w, h);
        let plot = Rect::from_ltrb(
            insets.left as f64,
            insets.top as f64,
            w - insets.right as f64,
            h - insets.bottom as f64,
        );
        let legend_panel = Rect::from_ltwh(w, 0.0, config.legend_width.max(0) as f64, h);

        let mut y = plot.top + LEGEND_TOP_PAD;
        let legend_items = dataset
            .ids()
            .zip(dataset.series.iter())
            .map(|(id, series)| {
                let rect = Rect::from_ltwh(
                    legend_panel.left + LEGEND_SIDE_PAD * 0.5,
                    y,
                    legend_panel.width() - LEGEND_SIDE_PAD,
                    LEGEND_ROW_HEIGHT,
                );
                let swatch = Rect::from_ltwh(
                    legend_panel.left + LEGEND_SIDE_PAD,
                    y + (LEGEND_ROW_HEIGHT - SWATCH_SIZE) * 0.5,
                    SWATCH_SIZE,
                    SWATCH_SIZE,
                );
                y += LEGEND_ROW_HEIGHT;
                LegendItem { id, label: series.name.clone(), rect, swatch }
            })
            .collect();

        let replay_button = Rect::from_ltwh(
            legend_panel.left + LEGEND_SIDE_PAD,
            y + LEGEND_ROW_HEIGHT * 0.75,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        );

        Self {
            canvas_width: config.canvas_width(),
            canvas_height: config.height,
            chart,
            plot,
            legend_panel,
            legend_items,
            replay_button,
        }
    }

    pub fn legend_at(&self, x: f64, y: f64) -> Option<SeriesId> {
        self.legend_items.iter().find(|item| item.rect.contains(x, y)).map(|item| item.id)
    }

    pub fn is_replay_button(&self, x: f64, y: f64) -> bool {
        self.replay_button.contains(x, y)
    }
}

// File: crates/chart-core/src/chart.rs
// Summary: Headless rendering of a chart frame using Skia CPU raster surfaces (RGBA buffer, PNG bytes, PNG file).

use std::io::Cursor;
use std::path::Path;

use skia_safe as skia;

use crate::axis::{format_tick, Axis};
use crate::config::ChartConfig;
use crate::error::{ChartError, Result};
use crate::frame::{Frame, SeriesFrame, Tooltip};
use crate::geometry::Rect;
use crate::state::{ChartState, SeriesVisual};
use crate::theme::Theme;

const TICK_SIZE: f32 = 6.0;
const TICK_FONT: f32 = 10.0;
const LABEL_FONT: f32 = 12.0;
const ANNOTATION_FONT: f32 = 13.0;
const LEGEND_FONT: f32 = 13.0;
const TOOLTIP_FONT: f32 = 12.0;
const TOOLTIP_PAD: f32 = 8.0;

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub theme: Theme,
    /// Text is platform-font dependent; tests turn it off for deterministic pixels.
    pub draw_labels: bool,
    pub draw_legend: bool,
}

impl RenderOptions {
    pub fn for_config(config: &ChartConfig) -> Self {
        Self {
            width: config.canvas_width(),
            height: config.height,
            theme: Theme::dark(),
            draw_labels: true,
            draw_legend: true,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::for_config(&ChartConfig::default())
    }
}

impl ChartState {
    /// Render `frame` and read the pixels back as unpremultiplied RGBA8.
    /// Returns (pixels, width, height, row stride in bytes).
    pub fn render_to_rgba8(&self, frame: &Frame, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let (w, h) = (opts.width.max(1), opts.height.max(1));
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or(ChartError::Surface { width: w, height: h })?;

        self.draw(surface.canvas(), frame, opts);

        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(ChartError::ReadPixels);
        }
        Ok((pixels, w as u32, h as u32, stride))
    }

    pub fn render_to_png_bytes(&self, frame: &Frame, opts: &RenderOptions) -> Result<Vec<u8>> {
        let (pixels, w, h, _) = self.render_to_rgba8(frame, opts)?;
        let image = image::RgbaImage::from_raw(w, h, pixels).ok_or(ChartError::ReadPixels)?;
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, image::ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    /// Render `frame` to a PNG at `output_png_path`, creating parent directories.
    pub fn render_to_png(&self, frame: &Frame, opts: &RenderOptions, output_png_path: impl AsRef<Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(frame, opts)?;
        write_file(path, &bytes)
    }

    fn draw(&self, canvas: &skia::Canvas, frame: &Frame, opts: &RenderOptions) {
        let theme = &opts.theme;
        let fonts = Fonts::new(opts.draw_labels);
        canvas.clear(theme.background);

        let plot = self.layout.plot;
        draw_grid(canvas, theme, plot, &self.x_axis, &self.y_axis);
        draw_diagonal(canvas, theme, self);
        if let Some(fonts) = &fonts {
            draw_annotations(canvas, theme, fonts, self);
        }
        draw_axes(canvas, theme, fonts.as_ref(), plot, &self.x_axis, &self.y_axis);

        for series_frame in &frame.series {
            if let Some(visual) = self.series(series_frame.id) {
                draw_series(canvas, theme, visual, series_frame, self.config.style.line_width as f32);
            }
        }

        if opts.draw_legend {
            draw_legend(canvas, theme, fonts.as_ref(), self, frame);
        }
        if let (Some(fonts), Some(tooltip)) = (&fonts, &frame.tooltip) {
            draw_tooltip(canvas, theme, fonts, tooltip, opts);
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ChartError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, bytes).map_err(|source| ChartError::Write { path: path.to_path_buf(), source })
}

// ---- helpers ----------------------------------------------------------------

struct Fonts {
    regular: Option<skia::Typeface>,
    bold: Option<skia::Typeface>,
}

impl Fonts {
    fn new(enabled: bool) -> Option<Self> {
        if !enabled {
            return None;
        }
        let mgr = skia::FontMgr::default();
        Some(Self {
            regular: mgr.legacy_make_typeface(None, skia::FontStyle::normal()),
            bold: mgr.legacy_make_typeface(None, skia::FontStyle::bold()),
        })
    }

    fn font(&self, size: f32, bold: bool) -> skia::Font {
        let typeface = if bold { self.bold.clone().or_else(|| self.regular.clone()) } else { self.regular.clone() };
        match typeface {
            Some(tf) => skia::Font::from_typeface(tf, size),
            None => {
                let mut font = skia::Font::default();
                font.set_size(size);
                font
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Anchor {
    Start,
    Middle,
    End,
}

fn draw_text(canvas: &skia::Canvas, text: &str, x: f32, y: f32, font: &skia::Font, color: skia::Color, anchor: Anchor) {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(color);
    let width = font.measure_str(text, Some(&paint)).0;
    let x = match anchor {
        Anchor::Start => x,
        Anchor::Middle => x - width * 0.5,
        Anchor::End => x - width,
    };
    canvas.draw_str(text, (x, y), font, &paint);
}

fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

fn sk_rect(r: Rect) -> skia::Rect {
    skia::Rect::from_ltrb(r.left as f32, r.top as f32, r.right as f32, r.bottom as f32)
}

fn draw_grid(canvas: &skia::Canvas, theme: &Theme, plot: Rect, x: &Axis, y: &Axis) {
    let paint = stroke_paint(theme.grid, 1.0);
    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);

    // verticals
    for (_, px) in x.tick_positions() {
        canvas.draw_line((px as f32, t), (px as f32, b), &paint);
    }
    // horizontals
    for (_, py) in y.tick_positions() {
        canvas.draw_line((l, py as f32), (r, py as f32), &paint);
    }
}

fn draw_diagonal(canvas: &skia::Canvas, theme: &Theme, state: &ChartState) {
    let (x, y) = (state.x_scale(), state.y_scale());
    let mut paint = stroke_paint(theme.diagonal, 2.0);
    paint.set_path_effect(skia::PathEffect::dash(&[5.0, 5.0], 0.0));
    canvas.draw_line(
        (x.apply(0.0) as f32, y.apply(0.0) as f32),
        (x.apply(100.0) as f32, y.apply(100.0) as f32),
        &paint,
    );
}

fn draw_annotations(canvas: &skia::Canvas, theme: &Theme, fonts: &Fonts, state: &ChartState) {
    let (x, y) = (state.x_scale(), state.y_scale());
    let font = fonts.font(ANNOTATION_FONT, false);
    let line_gap = ANNOTATION_FONT * 1.2;
    let notes = [
        (15.0, 85.0, "among women", Anchor::Start),
        (85.0, 15.0, "among men", Anchor::End),
    ];
    for (vx, vy, second, anchor) in notes {
        let (px, py) = (x.apply(vx) as f32, y.apply(vy) as f32);
        draw_text(canvas, "More popular", px, py, &font, theme.annotation, anchor);
        draw_text(canvas, second, px, py + line_gap, &font, theme.annotation, anchor);
    }
}

fn draw_axes(canvas: &skia::Canvas, theme: &Theme, fonts: Option<&Fonts>, plot: Rect, x: &Axis, y: &Axis) {
    let axis_paint = stroke_paint(theme.axis_line, 1.0);
    let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);

    // X and Y axis lines
    canvas.draw_line((l, b), (r, b), &axis_paint);
    canvas.draw_line((l, t), (l, b), &axis_paint);

    for (_, px) in x.tick_positions() {
        canvas.draw_line((px as f32, b), (px as f32, b + TICK_SIZE), &axis_paint);
    }
    for (_, py) in y.tick_positions() {
        canvas.draw_line((l - TICK_SIZE, py as f32), (l, py as f32), &axis_paint);
    }

    let Some(fonts) = fonts else { return };
    let tick_font = fonts.font(TICK_FONT, false);
    for (v, px) in x.tick_positions() {
        draw_text(canvas, &format_tick(v), px as f32, b + TICK_SIZE + 12.0, &tick_font, theme.tick, Anchor::Middle);
    }
    for (v, py) in y.tick_positions() {
        draw_text(canvas, &format_tick(v), l - TICK_SIZE - 3.0, py as f32 + 3.5, &tick_font, theme.tick, Anchor::End);
    }

    let label_font = fonts.font(LABEL_FONT, true);
    draw_text(canvas, &x.label, r, b - 10.0, &label_font, theme.axis_label, Anchor::End);
    draw_text(canvas, &y.label, l + 10.0, t - 10.0, &label_font, theme.axis_label, Anchor::Start);
}

fn draw_series(canvas: &skia::Canvas, theme: &Theme, visual: &SeriesVisual, frame: &SeriesFrame, line_width: f32) {
    let alpha = frame.opacity.clamp(0.0, 1.0) as f32;

    if frame.drawn > 0.0 && !visual.curve.is_empty() {
        let mut stroke = stroke_paint(visual.color, line_width);
        stroke.set_stroke_cap(skia::paint::Cap::Round);
        stroke.set_stroke_join(skia::paint::Join::Round);
        stroke.set_alpha_f(alpha);
        if !frame.is_fully_drawn() {
            let on = frame.drawn as f32;
            let off = frame.length.max(1e-3) as f32;
            stroke.set_path_effect(skia::PathEffect::dash(&[on, off], 0.0));
        }
        canvas.draw_path(&visual.curve.to_skia(), &stroke);
    }

    for marker in &frame.markers {
        if marker.radius <= 0.0 {
            continue;
        }
        let center = (marker.center.x as f32, marker.center.y as f32);
        let radius = marker.radius as f32;

        let mut fill = fill_paint(theme.background);
        fill.set_alpha_f(alpha);
        canvas.draw_circle(center, radius, &fill);

        let mut ring = stroke_paint(visual.color, marker.stroke_width as f32);
        ring.set_alpha_f(alpha);
        canvas.draw_circle(center, radius, &ring);
    }
}

fn draw_legend(canvas: &skia::Canvas, theme: &Theme, fonts: Option<&Fonts>, state: &ChartState, frame: &Frame) {
    let layout = &state.layout;
    canvas.draw_rect(sk_rect(layout.legend_panel), &fill_paint(theme.legend_panel));

    let font = fonts.map(|f| f.font(LEGEND_FONT, false));
    for item in &layout.legend_items {
        let color = state.series(item.id).map_or(theme.legend_label, |v| v.color);
        let mut swatch = fill_paint(color);
        if frame.highlight.is_some_and(|h| h != item.id) {
            swatch.set_alpha_f(0.4);
        }
        canvas.draw_rect(sk_rect(item.swatch), &swatch);
        if let Some(font) = &font {
            let x = (item.swatch.right + 8.0) as f32;
            let y = (item.swatch.bottom - 2.0) as f32;
            draw_text(canvas, &item.label, x, y, font, theme.legend_label, Anchor::Start);
        }
    }

    let button = sk_rect(layout.replay_button);
    canvas.draw_round_rect(button, 4.0, 4.0, &fill_paint(theme.button_fill));
    if let Some(font) = &font {
        let cx = button.center_x();
        let cy = button.center_y() + LEGEND_FONT * 0.35;
        draw_text(canvas, "Replay", cx, cy, font, theme.button_label, Anchor::Middle);
    }
}

fn draw_tooltip(canvas: &skia::Canvas, theme: &Theme, fonts: &Fonts, tooltip: &Tooltip, opts: &RenderOptions) {
    let title_font = fonts.font(TOOLTIP_FONT, true);
    let body_font = fonts.font(TOOLTIP_FONT, false);
    let line_height = TOOLTIP_FONT * 1.4;

    let mut width = title_font.measure_str(&tooltip.title, None).0;
    for line in &tooltip.lines {
        width = width.max(body_font.measure_str(line, None).0);
    }
    let box_w = width + TOOLTIP_PAD * 2.0;
    let box_h = line_height * (tooltip.lines.len() + 1) as f32 + TOOLTIP_PAD * 2.0 - (line_height - TOOLTIP_FONT);

    // keep the box on the canvas
    let left = (tooltip.anchor.x as f32).min(opts.width as f32 - box_w - 1.0).max(0.0);
    let top = (tooltip.anchor.y as f32).min(opts.height as f32 - box_h - 1.0).max(0.0);
    let rect = skia::Rect::from_xywh(left, top, box_w, box_h);

    canvas.draw_round_rect(rect, 4.0, 4.0, &fill_paint(theme.tooltip_fill));
    canvas.draw_round_rect(rect, 4.0, 4.0, &stroke_paint(theme.tooltip_border, 1.0));

    let x = left + TOOLTIP_PAD;
    let mut y = top + TOOLTIP_PAD + TOOLTIP_FONT;
    draw_text(canvas, &tooltip.title, x, y, &title_font, theme.tooltip_label, Anchor::Start);
    for line in &tooltip.lines {
        y += line_height;
        draw_text(canvas, line, x, y, &body_font, theme.tooltip_label, Anchor::Start);
    }
}

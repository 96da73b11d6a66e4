// File: crates/chart-core/src/svg.rs
// Summary: Animated SVG export. The timeline is handed to SMIL: each track becomes an <animate>.
// Behavior:
// - The render pass reveal starts on load and restarts when the Replay button is clicked;
//   every animation holds its start value during its delay, so a restart shows no
//   leftover drawn state.
// - Hovering a legend entry dims the other series and replays that series' reveal
//   with the highlight timings; leaving restores full opacity.
// - Hovering a marker enlarges it; its <title> carries the tooltip text.

use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::axis::format_tick;
use crate::chart::RenderOptions;
use crate::curve::num;
use crate::error::{ChartError, Result};
use crate::frame::Tooltip;
use crate::state::{reveal_tracks, ChartState, SeriesVisual};
use crate::theme::{hex, Theme};
use crate::timeline::{Property, Track};
use crate::types::Millis;

const REPLAY_ID: &str = "replay";

type Attrs = Vec<(&'static str, String)>;

fn legend_id(index: usize) -> String {
    format!("legend-{index}")
}

fn marker_id(series: usize, index: usize) -> String {
    format!("marker-{series}-{index}")
}

fn ms(v: Millis) -> String {
    format!("{}ms", num(v.max(0.0)))
}

struct SvgWriter {
    inner: Writer<Vec<u8>>,
}

impl SvgWriter {
    fn new() -> Self {
        Self { inner: Writer::new_with_indent(Vec::new(), b' ', 2) }
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.inner.write_event(event).map_err(|e| ChartError::Svg(e.to_string()))
    }

    fn element(name: &str, attrs: &[(&'static str, String)]) -> BytesStart<'static> {
        let mut elem = BytesStart::new(name.to_string());
        for (key, value) in attrs {
            elem.push_attribute((*key, value.as_str()));
        }
        elem
    }

    fn start(&mut self, name: &str, attrs: &[(&'static str, String)]) -> Result<()> {
        self.event(Event::Start(Self::element(name, attrs)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&'static str, String)]) -> Result<()> {
        self.event(Event::Empty(Self::element(name, attrs)))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name.to_string())))
    }

    fn text_element(&mut self, name: &str, attrs: &[(&'static str, String)], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.inner.into_inner()).map_err(|e| ChartError::Svg(e.to_string()))
    }
}

impl ChartState {
    /// Serialize this render pass as a self-animating SVG document.
    pub fn to_svg_string(&self, opts: &RenderOptions) -> Result<String> {
        let theme = &opts.theme;
        let (w, h) = (self.layout.canvas_width, self.layout.canvas_height);
        let mut svg = SvgWriter::new();

        svg.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        svg.start(
            "svg",
            &[
                ("xmlns", "http://www.w3.org/2000/svg".into()),
                ("width", w.to_string()),
                ("height", h.to_string()),
                ("viewBox", format!("0 0 {w} {h}")),
                ("font-family", "sans-serif".into()),
            ],
        )?;
        svg.empty(
            "rect",
            &[("width", w.to_string()), ("height", h.to_string()), ("fill", hex(theme.background))],
        )?;

        self.write_grid(&mut svg, theme)?;
        self.write_reference(&mut svg, theme, opts.draw_labels)?;
        self.write_axes(&mut svg, theme, opts.draw_labels)?;
        for visual in &self.series {
            self.write_series(&mut svg, theme, visual)?;
        }
        if opts.draw_legend {
            self.write_legend(&mut svg, theme, opts.draw_labels)?;
        }

        svg.end("svg")?;
        svg.finish()
    }

    pub fn render_to_svg(&self, opts: &RenderOptions, output_svg_path: impl AsRef<Path>) -> Result<()> {
        let path = output_svg_path.as_ref();
        let doc = self.to_svg_string(opts)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|source| ChartError::Write { path: parent.to_path_buf(), source })?;
        }
        std::fs::write(path, doc).map_err(|source| ChartError::Write { path: path.to_path_buf(), source })
    }

    fn write_grid(&self, svg: &mut SvgWriter, theme: &Theme) -> Result<()> {
        let plot = self.layout.plot;
        svg.start("g", &[("stroke", hex(theme.grid)), ("stroke-width", "1".into())])?;
        for (_, x) in self.x_axis.tick_positions() {
            svg.empty(
                "line",
                &[("x1", num(x)), ("x2", num(x)), ("y1", num(plot.top)), ("y2", num(plot.bottom))],
            )?;
        }
        for (_, y) in self.y_axis.tick_positions() {
            svg.empty(
                "line",
                &[("x1", num(plot.left)), ("x2", num(plot.right)), ("y1", num(y)), ("y2", num(y))],
            )?;
        }
        svg.end("g")
    }

    fn write_reference(&self, svg: &mut SvgWriter, theme: &Theme, labels: bool) -> Result<()> {
        let (x, y) = (self.x_scale(), self.y_scale());
        svg.empty(
            "line",
            &[
                ("x1", num(x.apply(0.0))),
                ("y1", num(y.apply(0.0))),
                ("x2", num(x.apply(100.0))),
                ("y2", num(y.apply(100.0))),
                ("stroke", hex(theme.diagonal)),
                ("stroke-width", "2".into()),
                ("stroke-dasharray", "5,5".into()),
            ],
        )?;
        if !labels {
            return Ok(());
        }
        for (vx, vy, anchor, second) in [(15.0, 85.0, "start", "among women"), (85.0, 15.0, "end", "among men")] {
            let px = num(x.apply(vx));
            svg.start(
                "text",
                &[
                    ("x", px.clone()),
                    ("y", num(y.apply(vy))),
                    ("fill", hex(theme.annotation)),
                    ("font-size", "13px".into()),
                    ("text-anchor", anchor.into()),
                ],
            )?;
            svg.event(Event::Text(BytesText::new("More popular")))?;
            svg.text_element("tspan", &[("x", px), ("dy", "1.2em".into())], second)?;
            svg.end("text")?;
        }
        Ok(())
    }

    fn write_axes(&self, svg: &mut SvgWriter, theme: &Theme, labels: bool) -> Result<()> {
        let plot = self.layout.plot;
        let stroke = hex(theme.axis_line);
        svg.start("g", &[("stroke", stroke), ("fill", hex(theme.tick)), ("font-size", "10px".into())])?;
        svg.empty(
            "line",
            &[("x1", num(plot.left)), ("x2", num(plot.right)), ("y1", num(plot.bottom)), ("y2", num(plot.bottom))],
        )?;
        svg.empty(
            "line",
            &[("x1", num(plot.left)), ("x2", num(plot.left)), ("y1", num(plot.top)), ("y2", num(plot.bottom))],
        )?;
        for (v, x) in self.x_axis.tick_positions() {
            svg.empty(
                "line",
                &[("x1", num(x)), ("x2", num(x)), ("y1", num(plot.bottom)), ("y2", num(plot.bottom + 6.0))],
            )?;
            if labels {
                svg.text_element(
                    "text",
                    &[
                        ("x", num(x)),
                        ("y", num(plot.bottom + 18.0)),
                        ("stroke", "none".into()),
                        ("text-anchor", "middle".into()),
                    ],
                    &format_tick(v),
                )?;
            }
        }
        for (v, y) in self.y_axis.tick_positions() {
            svg.empty(
                "line",
                &[("x1", num(plot.left - 6.0)), ("x2", num(plot.left)), ("y1", num(y)), ("y2", num(y))],
            )?;
            if labels {
                svg.text_element(
                    "text",
                    &[
                        ("x", num(plot.left - 9.0)),
                        ("y", num(y + 3.5)),
                        ("stroke", "none".into()),
                        ("text-anchor", "end".into()),
                    ],
                    &format_tick(v),
                )?;
            }
        }
        svg.end("g")?;

        if labels {
            let label = |x: f64, y: f64, anchor: &str| -> Attrs {
                vec![
                    ("x", num(x)),
                    ("y", num(y)),
                    ("fill", hex(theme.axis_label)),
                    ("font-weight", "bold".into()),
                    ("font-size", "12px".into()),
                    ("text-anchor", anchor.to_string()),
                ]
            };
            svg.text_element("text", &label(plot.right, plot.bottom - 10.0, "end"), &self.x_axis.label)?;
            svg.text_element("text", &label(plot.left + 10.0, plot.top - 10.0, "start"), &self.y_axis.label)?;
        }
        Ok(())
    }

    fn write_series(&self, svg: &mut SvgWriter, theme: &Theme, visual: &SeriesVisual) -> Result<()> {
        let series_index = visual.id.0;
        let color = hex(visual.color);
        let style = self.config.style;
        let anim = self.config.animation;
        let replay_trigger = format!("0s;{REPLAY_ID}.click");
        let legend_trigger = format!("{}.mouseover", legend_id(series_index));
        let highlight = reveal_tracks(visual, 0.0, anim.highlight_draw_ms, anim.highlight_reveal_ms);
        let pass: Vec<&Track> = self.timeline.tracks().filter(|t| t.channel.element.series() == visual.id).collect();

        svg.start("g", &[("id", format!("series-{series_index}"))])?;
        for other in self.layout.legend_items.iter().filter(|item| item.id != visual.id) {
            svg.empty(
                "set",
                &[
                    ("attributeName", "opacity".into()),
                    ("to", num(style.dim_opacity)),
                    ("begin", format!("{}.mouseover", legend_id(other.id.0))),
                    ("end", format!("{}.mouseout", legend_id(other.id.0))),
                ],
            )?;
        }

        svg.start(
            "path",
            &[
                ("d", visual.curve.to_svg_d()),
                ("fill", "none".into()),
                ("stroke", color.clone()),
                ("stroke-width", num(style.line_width)),
                ("stroke-linejoin", "round".into()),
                ("stroke-linecap", "round".into()),
                ("stroke-dasharray", format!("0,{}", num(visual.length))),
            ],
        )?;
        for track in pass.iter().filter(|t| t.channel.element == visual.line()) {
            write_animate(svg, track, self.origin, &replay_trigger, visual.length)?;
        }
        for track in highlight.iter().filter(|t| t.channel.element == visual.line()) {
            write_animate(svg, track, 0.0, &legend_trigger, visual.length)?;
        }
        svg.end("path")?;

        for (index, marker) in visual.markers.iter().enumerate() {
            let id = marker_id(series_index, index);
            let element = visual.marker(index);
            svg.start(
                "circle",
                &[
                    ("id", id.clone()),
                    ("cx", num(marker.center.x)),
                    ("cy", num(marker.center.y)),
                    ("r", "0".into()),
                    ("fill", hex(theme.background)),
                    ("stroke", color.clone()),
                    ("stroke-width", num(style.marker_stroke_width)),
                ],
            )?;
            let tooltip = Tooltip::for_sample(&visual.name, &marker.sample, marker.center);
            svg.text_element("title", &[], &tooltip.text())?;

            for track in pass.iter().filter(|t| t.channel.element == element) {
                write_animate(svg, track, self.origin, &replay_trigger, visual.length)?;
            }
            for track in highlight.iter().filter(|t| t.channel.element == element) {
                write_animate(svg, track, 0.0, &legend_trigger, visual.length)?;
            }
            let hover = [
                ("mouseover", marker.radius * style.hover_scale, style.hover_stroke_width),
                ("mouseout", marker.radius, style.marker_stroke_width),
            ];
            for (event, radius, stroke) in hover {
                for (attribute, to) in [("r", radius), ("stroke-width", stroke)] {
                    svg.empty(
                        "animate",
                        &[
                            ("attributeName", attribute.into()),
                            ("to", num(to)),
                            ("dur", ms(anim.hover_ms)),
                            ("begin", format!("{id}.{event}")),
                            ("fill", "freeze".into()),
                        ],
                    )?;
                }
            }
            svg.end("circle")?;
        }
        svg.end("g")
    }

    fn write_legend(&self, svg: &mut SvgWriter, theme: &Theme, labels: bool) -> Result<()> {
        let layout = &self.layout;
        let panel = layout.legend_panel;
        svg.empty(
            "rect",
            &[
                ("x", num(panel.left)),
                ("y", num(panel.top)),
                ("width", num(panel.width())),
                ("height", num(panel.height())),
                ("fill", hex(theme.legend_panel)),
            ],
        )?;

        for item in &layout.legend_items {
            let color = self.series(item.id).map_or(theme.legend_label, |v| v.color);
            svg.empty(
                "rect",
                &[
                    ("x", num(item.swatch.left)),
                    ("y", num(item.swatch.top)),
                    ("width", num(item.swatch.width())),
                    ("height", num(item.swatch.height())),
                    ("fill", hex(color)),
                ],
            )?;
            if labels {
                svg.text_element(
                    "text",
                    &[
                        ("x", num(item.swatch.right + 8.0)),
                        ("y", num(item.swatch.bottom - 2.0)),
                        ("fill", hex(theme.legend_label)),
                        ("font-size", "13px".into()),
                    ],
                    &item.label,
                )?;
            }
            // transparent hover target on top so child elements don't re-fire mouseover
            svg.empty(
                "rect",
                &[
                    ("id", legend_id(item.id.0)),
                    ("x", num(item.rect.left)),
                    ("y", num(item.rect.top)),
                    ("width", num(item.rect.width())),
                    ("height", num(item.rect.height())),
                    ("fill", "transparent".into()),
                    ("pointer-events", "all".into()),
                    ("cursor", "pointer".into()),
                ],
            )?;
        }

        let button = layout.replay_button;
        svg.empty(
            "rect",
            &[
                ("x", num(button.left)),
                ("y", num(button.top)),
                ("width", num(button.width())),
                ("height", num(button.height())),
                ("rx", "4".into()),
                ("fill", hex(theme.button_fill)),
            ],
        )?;
        if labels {
            svg.text_element(
                "text",
                &[
                    ("x", num(button.left + button.width() * 0.5)),
                    ("y", num(button.top + button.height() * 0.5 + 4.5)),
                    ("fill", hex(theme.button_label)),
                    ("font-size", "13px".into()),
                    ("text-anchor", "middle".into()),
                ],
                "Replay",
            )?;
        }
        svg.empty(
            "rect",
            &[
                ("id", REPLAY_ID.into()),
                ("x", num(button.left)),
                ("y", num(button.top)),
                ("width", num(button.width())),
                ("height", num(button.height())),
                ("fill", "transparent".into()),
                ("pointer-events", "all".into()),
                ("cursor", "pointer".into()),
            ],
        )
    }
}

/// One track as a SMIL <animate> relative to `trigger`. The start delay becomes a
/// held first key so the start value applies from the moment the trigger fires.
fn write_animate(svg: &mut SvgWriter, track: &Track, origin: Millis, trigger: &str, line_length: f64) -> Result<()> {
    let delay = (track.start - origin).max(0.0);
    let total = delay + track.duration.max(0.0);
    let value = |v: f64| match track.channel.property {
        Property::DashLength => format!("{},{}", num(v), num(line_length)),
        Property::Radius | Property::StrokeWidth => num(v),
    };
    let spline = track.easing.key_spline();

    let (values, key_times, key_splines) = if delay <= 0.0 || total <= 0.0 {
        (format!("{};{}", value(track.from), value(track.to)), "0;1".to_string(), spline.to_string())
    } else {
        (
            format!("{0};{0};{1}", value(track.from), value(track.to)),
            format!("0;{};1", num(delay / total)),
            format!("0 0 1 1;{spline}"),
        )
    };

    let attribute = track.channel.property.svg_attribute();
    svg.empty(
        "animate",
        &[
            ("attributeName", attribute.into()),
            ("begin", trigger.to_string()),
            ("dur", ms(total.max(1.0))),
            ("values", values),
            ("keyTimes", key_times),
            ("calcMode", "spline".into()),
            ("keySplines", key_splines),
            ("fill", "freeze".into()),
        ],
    )
}

// File: crates/chart-core/src/theme.rs
// Summary: Dark chart theme colors and the ordinal app color palette.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub diagonal: skia::Color,
    pub annotation: skia::Color,
    pub legend_panel: skia::Color,
    pub legend_label: skia::Color,
    pub button_fill: skia::Color,
    pub button_label: skia::Color,
    pub tooltip_fill: skia::Color,
    pub tooltip_border: skia::Color,
    pub tooltip_label: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 0x1a, 0x1a, 0x1a),
            grid: skia::Color::from_argb(255, 0x33, 0x33, 0x33),
            axis_line: skia::Color::from_argb(255, 0x99, 0x99, 0x99),
            axis_label: skia::Color::from_argb(255, 0xdd, 0xdd, 0xdd),
            tick: skia::Color::from_argb(255, 0x99, 0x99, 0x99),
            diagonal: skia::Color::from_argb(255, 0x66, 0x66, 0x66),
            annotation: skia::Color::from_argb(255, 0x77, 0x77, 0x77),
            legend_panel: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            legend_label: skia::Color::from_argb(255, 0xdd, 0xdd, 0xdd),
            button_fill: skia::Color::from_argb(255, 0x3a, 0x3a, 0x3a),
            button_label: skia::Color::from_argb(255, 0xee, 0xee, 0xee),
            tooltip_fill: skia::Color::from_argb(235, 0x10, 0x10, 0x10),
            tooltip_border: skia::Color::from_argb(255, 0x55, 0x55, 0x55),
            tooltip_label: skia::Color::from_argb(255, 0xf0, 0xf0, 0xf0),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// `#rrggbb` form of a color, alpha dropped.
pub fn hex(color: skia::Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Ordinal color scale: known names map to fixed colors; unknown names take
/// the next palette slot in order of first use, cycling through the range.
#[derive(Clone, Debug)]
pub struct Palette {
    domain: Vec<String>,
    range: Vec<skia::Color>,
}

const APP_COLORS: [(&str, u32); 8] = [
    ("Instagram", 0x1f77b4),
    ("Youtube", 0xff7f0e),
    ("TikTok", 0x2ca02c),
    ("Facebook", 0xd62728),
    ("Twitter/X", 0x9467bd),
    ("Reddit", 0x8c564b),
    ("Threads", 0xe377c2),
    ("Bluesky", 0x7f7f7f),
];

impl Palette {
    pub fn apps() -> Self {
        Self {
            domain: APP_COLORS.iter().map(|(name, _)| name.to_string()).collect(),
            range: APP_COLORS
                .iter()
                .map(|&(_, rgb)| {
                    skia::Color::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
                })
                .collect(),
        }
    }

    pub fn color_for(&mut self, name: &str) -> skia::Color {
        let idx = match self.domain.iter().position(|d| d == name) {
            Some(i) => i,
            None => {
                log::debug!("no fixed color for `{name}`; assigning next palette slot");
                self.domain.push(name.to_string());
                self.domain.len() - 1
            }
        };
        self.range[idx % self.range.len()]
    }
}

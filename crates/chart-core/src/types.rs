// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (sizes, margins, time units).

/// Default chart area width in logical pixels.
pub const WIDTH: i32 = 800;
/// Default chart area height in logical pixels.
pub const HEIGHT: i32 = 800;

/// Milliseconds on the animation clock.
pub type Millis = f64;

/// Screen margins around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(60, 50, 50, 50)
    }
}

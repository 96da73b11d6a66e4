// File: crates/chart-core/src/reveal.rs
// Summary: Path-timed reveal scheduling: per-point delays proportional to arc length along the curve.
// Notes:
// - The length up to point i is measured on the spline re-built through points [0..=i],
//   not on the full curve, so a marker appears when a stroke animated to the same
//   fraction of its length would reach it.
// - Prefix re-construction is quadratic in the number of points; series here have
//   five points.

use crate::curve::CurvePath;
use crate::geometry::Point;
use crate::types::Millis;

const DEGENERATE_LENGTH: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealEntry {
    pub index: usize,
    /// Arc length of the sub-curve through points `[0..=index]`.
    pub prefix_length: f64,
    /// `prefix_length / total_length`, in `[0, 1]`.
    pub ratio: f64,
    /// `ratio * duration`, relative to the start of the line animation.
    pub delay: Millis,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RevealSchedule {
    pub total_length: f64,
    pub duration: Millis,
    pub entries: Vec<RevealEntry>,
}

impl RevealSchedule {
    /// Schedule the reveal of each point of the curve through `points` over a
    /// stroke animation lasting `duration`.
    ///
    /// Guarantees: `delay(0) == 0`, `delay(n - 1) == duration` for `n >= 2`,
    /// and delays never decrease with the index. A single point has ratio 1
    /// (fully drawn at once) and delay 0. When every point coincides the
    /// ratios fall back to even spacing by index.
    pub fn compute(points: &[Point], duration: Millis) -> Self {
        let n = points.len();
        let total_length = CurvePath::catmull_rom(points).length();
        let degenerate = total_length <= DEGENERATE_LENGTH;

        let mut entries = Vec::with_capacity(n);
        let mut longest = 0.0f64;
        for index in 0..n {
            let entry = if index == 0 {
                RevealEntry {
                    index,
                    prefix_length: 0.0,
                    ratio: if n == 1 { 1.0 } else { 0.0 },
                    delay: 0.0,
                }
            } else if index == n - 1 {
                RevealEntry { index, prefix_length: total_length, ratio: 1.0, delay: duration }
            } else {
                let prefix = CurvePath::catmull_rom(&points[..=index]).length();
                // re-built prefixes bend differently at their open end; keep the sequence monotone
                longest = longest.max(prefix).min(total_length);
                let ratio = if degenerate {
                    index as f64 / (n - 1) as f64
                } else {
                    (longest / total_length).clamp(0.0, 1.0)
                };
                RevealEntry { index, prefix_length: longest, ratio, delay: ratio * duration }
            };
            entries.push(entry);
        }

        Self { total_length, duration, entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn delay(&self, index: usize) -> Option<Millis> {
        self.entries.get(index).map(|e| e.delay)
    }

    pub fn delays(&self) -> impl Iterator<Item = Millis> + '_ {
        self.entries.iter().map(|e| e.delay)
    }
}

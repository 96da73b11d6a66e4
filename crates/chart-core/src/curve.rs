// File: crates/chart-core/src/curve.rs
// Summary: Centripetal Catmull-Rom spline through points as a cubic Bezier path, plus arc length.

use skia_safe as skia;

use crate::geometry::Point;

const EPSILON: f64 = 1e-12;
/// Centripetal parameterization.
const ALPHA: f64 = 0.5;

/// Subdivision stops once control polygon and chord agree to this many pixels.
const LENGTH_TOLERANCE: f64 = 1e-7;
const MAX_SUBDIVISION_DEPTH: u32 = 24;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    Line { to: Point },
    Cubic { c1: Point, c2: Point, to: Point },
}

/// A path of line and cubic segments starting at `start`. An empty path has
/// no start point; a single-point path has a start and no segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CurvePath {
    pub start: Option<Point>,
    pub segments: Vec<Segment>,
}

impl CurvePath {
    /// Smooth curve through `points`: 2 points give a straight line, 3 or more
    /// give one cubic per gap with end tangents derived from the neighbours.
    pub fn catmull_rom(points: &[Point]) -> Self {
        let mut builder = CatmullRom::new(ALPHA);
        for &p in points {
            builder.point(p);
        }
        builder.finish()
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    /// Total length measured along the path.
    pub fn length(&self) -> f64 {
        let Some(mut cursor) = self.start else { return 0.0 };
        let mut total = 0.0;
        for seg in &self.segments {
            match *seg {
                Segment::Line { to } => {
                    total += cursor.distance(to);
                    cursor = to;
                }
                Segment::Cubic { c1, c2, to } => {
                    total += cubic_length(cursor, c1, c2, to);
                    cursor = to;
                }
            }
        }
        total
    }

    pub fn end(&self) -> Option<Point> {
        match self.segments.last() {
            Some(Segment::Line { to }) | Some(Segment::Cubic { to, .. }) => Some(*to),
            None => self.start,
        }
    }

    /// SVG path data, coordinates rounded to 3 decimals.
    pub fn to_svg_d(&self) -> String {
        let Some(start) = self.start else { return String::new() };
        let mut d = format!("M{},{}", num(start.x), num(start.y));
        for seg in &self.segments {
            let part = match *seg {
                Segment::Line { to } => format!("L{},{}", num(to.x), num(to.y)),
                Segment::Cubic { c1, c2, to } => format!(
                    "C{},{},{},{},{},{}",
                    num(c1.x),
                    num(c1.y),
                    num(c2.x),
                    num(c2.y),
                    num(to.x),
                    num(to.y)
                ),
            };
            d.push_str(&part);
        }
        d
    }

    pub fn to_skia(&self) -> skia::Path {
        let mut path = skia::Path::new();
        let Some(start) = self.start else { return path };
        path.move_to(pt(start));
        for seg in &self.segments {
            match *seg {
                Segment::Line { to } => {
                    path.line_to(pt(to));
                }
                Segment::Cubic { c1, c2, to } => {
                    path.cubic_to(pt(c1), pt(c2), pt(to));
                }
            }
        }
        path
    }
}

#[inline]
fn pt(p: Point) -> (f32, f32) {
    (p.x as f32, p.y as f32)
}

/// Coordinate text rounded to 3 decimals, without a negative zero.
pub(crate) fn num(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0 + 0.0;
    format!("{r}")
}

/// Arc length of the cubic Bezier `p0..p3` by adaptive de Casteljau subdivision.
pub fn cubic_length(p0: Point, p1: Point, p2: Point, p3: Point) -> f64 {
    cubic_length_rec(p0, p1, p2, p3, 0)
}

fn cubic_length_rec(p0: Point, p1: Point, p2: Point, p3: Point, depth: u32) -> f64 {
    let chord = p0.distance(p3);
    let polygon = p0.distance(p1) + p1.distance(p2) + p2.distance(p3);
    if polygon - chord <= LENGTH_TOLERANCE || depth >= MAX_SUBDIVISION_DEPTH {
        return (chord + polygon) * 0.5;
    }
    let p01 = p0.lerp(p1, 0.5);
    let p12 = p1.lerp(p2, 0.5);
    let p23 = p2.lerp(p3, 0.5);
    let p012 = p01.lerp(p12, 0.5);
    let p123 = p12.lerp(p23, 0.5);
    let mid = p012.lerp(p123, 0.5);
    cubic_length_rec(p0, p01, p012, mid, depth + 1) + cubic_length_rec(mid, p123, p23, p3, depth + 1)
}

/// Streaming Catmull-Rom to cubic converter. Keeps the last three points and
/// the alpha-powered chord lengths between them.
struct CatmullRom {
    alpha: f64,
    p0: Point,
    p1: Point,
    p2: Point,
    l01_a: f64,
    l12_a: f64,
    l23_a: f64,
    l01_2a: f64,
    l12_2a: f64,
    l23_2a: f64,
    count: usize,
    path: CurvePath,
}

impl CatmullRom {
    fn new(alpha: f64) -> Self {
        Self {
            alpha,
            p0: Point::default(),
            p1: Point::default(),
            p2: Point::default(),
            l01_a: 0.0,
            l12_a: 0.0,
            l23_a: 0.0,
            l01_2a: 0.0,
            l12_2a: 0.0,
            l23_2a: 0.0,
            count: 0,
            path: CurvePath::default(),
        }
    }

    fn point(&mut self, p: Point) {
        if self.count > 0 {
            let dx = self.p2.x - p.x;
            let dy = self.p2.y - p.y;
            self.l23_2a = (dx * dx + dy * dy).powf(self.alpha);
            self.l23_a = self.l23_2a.sqrt();
        }

        match self.count {
            0 => {
                self.path.start = Some(p);
                self.count = 1;
            }
            1 => self.count = 2,
            _ => {
                self.count = 3;
                self.emit(p);
            }
        }

        self.l01_a = self.l12_a;
        self.l12_a = self.l23_a;
        self.l01_2a = self.l12_2a;
        self.l12_2a = self.l23_2a;
        self.p0 = self.p1;
        self.p1 = self.p2;
        self.p2 = p;
    }

    /// Emit the cubic from `p1` to `p2`, with `next` as the point after `p2`.
    fn emit(&mut self, next: Point) {
        let mut c1 = self.p1;
        let mut c2 = self.p2;

        if self.l01_a > EPSILON {
            let a = 2.0 * self.l01_2a + 3.0 * self.l01_a * self.l12_a + self.l12_2a;
            let n = 3.0 * self.l01_a * (self.l01_a + self.l12_a);
            c1 = Point::new(
                (self.p1.x * a - self.p0.x * self.l12_2a + self.p2.x * self.l01_2a) / n,
                (self.p1.y * a - self.p0.y * self.l12_2a + self.p2.y * self.l01_2a) / n,
            );
        }

        if self.l23_a > EPSILON {
            let b = 2.0 * self.l23_2a + 3.0 * self.l23_a * self.l12_a + self.l12_2a;
            let m = 3.0 * self.l23_a * (self.l23_a + self.l12_a);
            c2 = Point::new(
                (self.p2.x * b + self.p1.x * self.l23_2a - next.x * self.l12_2a) / m,
                (self.p2.y * b + self.p1.y * self.l23_2a - next.y * self.l12_2a) / m,
            );
        }

        self.path.segments.push(Segment::Cubic { c1, c2, to: self.p2 });
    }

    fn finish(mut self) -> CurvePath {
        match self.count {
            2 => self.path.segments.push(Segment::Line { to: self.p2 }),
            3 => {
                let last = self.p2;
                self.point(last);
            }
            _ => {}
        }
        self.path
    }
}

//! Canvas-space geometry: points, boundary segments and the nearest-point query
//! used for snapping.

use serde::{Deserialize, Serialize};

/// A location on the measurement canvas (egui points, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl From<[f64; 2]> for Point {
    fn from(p: [f64; 2]) -> Self {
        Point::new(p[0], p[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// One edge of a traced outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Projection parameter of `query` onto this segment, clamped to `[0, 1]`.
    ///
    /// A zero-length segment always yields `0.0`.
    pub fn project(&self, query: Point) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len_sq = dx * dx + dy * dy;
        if len_sq <= 0.0 {
            return 0.0;
        }
        let t = ((query.x - self.start.x) * dx + (query.y - self.start.y) * dy) / len_sq;
        t.clamp(0.0, 1.0)
    }

    /// Point at parameter `t` along the segment.
    pub fn at(&self, t: f64) -> Point {
        Point::new(
            self.start.x + t * (self.end.x - self.start.x),
            self.start.y + t * (self.end.y - self.start.y),
        )
    }

    /// Closest point on the finite segment to `query`.
    pub fn closest_point(&self, query: Point) -> Point {
        self.at(self.project(query))
    }

    fn translated(&self, dx: f64, dy: f64) -> Segment {
        Segment::new(self.start.offset(dx, dy), self.end.offset(dx, dy))
    }
}

/// Axis-aligned bounds of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    fn include(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }
}

/// Closest point on any segment of `boundary` to `query`.
///
/// Ties go to the first segment in iteration order. Returns `None` only for an
/// empty boundary.
pub fn nearest_point(boundary: &[Segment], query: Point) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;
    for segment in boundary {
        let candidate = segment.closest_point(query);
        let d = query.distance(candidate);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((candidate, d)),
        }
    }
    best.map(|(p, _)| p)
}

/// The loaded outline: an unordered collection of segments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Boundary {
    segments: Vec<Segment>,
}

impl Boundary {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn nearest(&self, query: Point) -> Option<Point> {
        nearest_point(&self.segments, query)
    }

    /// Tight bounding box over every segment endpoint.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.segments.first()?;
        let mut bounds = Bounds {
            min: first.start,
            max: first.start,
        };
        for s in &self.segments {
            bounds.include(s.start);
            bounds.include(s.end);
        }
        Some(bounds)
    }

    /// Translate the outline so its bounding box starts at the origin.
    ///
    /// Returns the translated boundary and the canvas size that fits it exactly,
    /// or no size when the boundary is empty.
    pub fn normalized(self) -> (Boundary, Option<[f64; 2]>) {
        let Some(bounds) = self.bounds() else {
            return (self, None);
        };
        let (dx, dy) = (-bounds.min.x, -bounds.min.y);
        let segments = self
            .segments
            .iter()
            .map(|s| s.translated(dx, dy))
            .collect();
        (
            Boundary { segments },
            Some([bounds.width(), bounds.height()]),
        )
    }
}

impl From<Vec<Segment>> for Boundary {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn project_clamps_to_segment_ends() {
        let s = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(s.project(Point::new(-5.0, 3.0)), 0.0);
        assert_eq!(s.project(Point::new(25.0, -1.0)), 1.0);
        assert!((s.project(Point::new(4.0, 7.0)) - 0.4).abs() < EPS);
    }

    #[test]
    fn zero_length_segment_projects_to_start() {
        let p = Point::new(2.0, 2.0);
        let s = Segment::new(p, p);
        assert_eq!(s.project(Point::new(100.0, -3.0)), 0.0);
        assert_eq!(s.closest_point(Point::new(100.0, -3.0)), p);
    }

    #[test]
    fn bounds_cover_both_endpoints() {
        let b = Boundary::new(vec![
            Segment::new(Point::new(3.0, 9.0), Point::new(-1.0, 4.0)),
            Segment::new(Point::new(7.0, 2.0), Point::new(5.0, 5.0)),
        ]);
        let bounds = b.bounds().expect("non-empty");
        assert_eq!(bounds.min, Point::new(-1.0, 2.0));
        assert_eq!(bounds.max, Point::new(7.0, 9.0));
    }
}

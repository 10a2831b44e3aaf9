use super::calibration::{Calibration, Reading};
use super::geometry::Point;

/// Which step of the two-click cycle the selection is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Pending,
    Complete,
}

/// Anchors picked for the current measurement (zero, one or two).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Pending([Point; 1]),
    Complete([Point; 2]),
}

impl Selection {
    /// Handle an anchor click. A third click starts a fresh measurement.
    pub fn click(&mut self, point: Point) {
        *self = match *self {
            Selection::Idle | Selection::Complete(_) => Selection::Pending([point]),
            Selection::Pending([first]) => Selection::Complete([first, point]),
        };
    }

    pub fn phase(&self) -> Phase {
        match self {
            Selection::Idle => Phase::Idle,
            Selection::Pending(_) => Phase::Pending,
            Selection::Complete(_) => Phase::Complete,
        }
    }

    pub fn anchors(&self) -> &[Point] {
        match self {
            Selection::Idle => &[],
            Selection::Pending(a) => a,
            Selection::Complete(a) => a,
        }
    }

    /// The finished pair, if both anchors are set.
    pub fn completed(&self) -> Option<Measurement> {
        match *self {
            Selection::Complete([start, end]) => Some(Measurement::new(start, end)),
            _ => None,
        }
    }

    /// Measurement to show right now: the finished pair, or the live line from
    /// the pending anchor to `hover`.
    pub fn live(&self, hover: Option<Point>) -> Option<Measurement> {
        match *self {
            Selection::Idle => None,
            Selection::Pending([start]) => hover.map(|end| Measurement::new(start, end)),
            Selection::Complete([start, end]) => Some(Measurement::new(start, end)),
        }
    }
}

/// A line between two canvas points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub start: Point,
    pub end: Point,
}

impl Measurement {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    pub fn length_px(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Distance under `calibration`; always computed from the value passed in.
    pub fn reading(&self, calibration: Calibration) -> Reading {
        calibration.reading(self.length_px())
    }
}

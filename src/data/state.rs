//! The application-state record and the single transition function that
//! mutates it.
//!
//! Everything the UI shows is derived from [`AppState`]; the egui layer only
//! turns input into [`MeasureEvent`]s and paints the resulting
//! [`Scene`](crate::scene::Scene).

use super::calibration::{Calibration, Reading};
use super::geometry::{Boundary, Point};
use super::measurement::{Measurement, Phase, Selection};

/// Canvas size used until a non-empty boundary is loaded.
pub const DEFAULT_CANVAS_SIZE: [f64; 2] = [800.0, 600.0];

/// Decoded background bitmap (RGBA8, row-major).
#[derive(Clone, PartialEq)]
pub struct BackgroundImage {
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for BackgroundImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundImage")
            .field("size", &self.size)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// Inputs to [`AppState::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureEvent {
    /// Pointer moved to a raw canvas position.
    PointerMoved(Point),
    /// Primary click at a raw canvas position.
    Clicked(Point),
    BoundaryLoaded(Boundary),
    ImageLoaded(BackgroundImage),
    CalibrationLoaded(Calibration),
    SnapToggled(bool),
}

/// What a call to [`AppState::handle`] changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Unchanged,
    Updated,
    /// The second anchor was placed.
    Completed(Measurement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub boundary: Boundary,
    pub canvas_size: [f64; 2],
    pub image: Option<BackgroundImage>,
    /// Bumped on every image load so texture caches know to re-upload.
    pub image_generation: u64,
    pub calibration: Calibration,
    pub snap_enabled: bool,
    pub selection: Selection,
    /// Last raw pointer position over the canvas.
    pub pointer: Option<Point>,
    /// Last resolved pointer position (snapped or raw).
    pub hover: Option<Point>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            boundary: Boundary::default(),
            canvas_size: DEFAULT_CANVAS_SIZE,
            image: None,
            image_generation: 0,
            calibration: Calibration::default(),
            snap_enabled: true,
            selection: Selection::Idle,
            pointer: None,
            hover: None,
        }
    }
}

impl AppState {
    /// Resolve a raw pointer position according to the snap mode.
    ///
    /// In snap mode an empty boundary resolves to nothing.
    pub fn resolve(&self, raw: Point) -> Option<Point> {
        if self.snap_enabled {
            self.boundary.nearest(raw)
        } else {
            Some(raw)
        }
    }

    pub fn phase(&self) -> Phase {
        self.selection.phase()
    }

    /// The measurement currently on screen: live preview while pending, the
    /// fixed pair once complete.
    pub fn live_measurement(&self) -> Option<Measurement> {
        self.selection.live(self.hover)
    }

    /// Reading of [`live_measurement`](Self::live_measurement) under the
    /// current calibration.
    pub fn readout(&self) -> Option<Reading> {
        self.live_measurement()
            .map(|m| m.reading(self.calibration))
    }

    fn refresh_hover(&mut self) {
        self.hover = self.pointer.and_then(|p| self.resolve(p));
    }

    /// Apply one event. This is the only place state changes.
    pub fn handle(&mut self, event: MeasureEvent) -> Transition {
        match event {
            MeasureEvent::PointerMoved(raw) => {
                self.pointer = Some(raw);
                let before = self.hover;
                self.refresh_hover();
                if before == self.hover {
                    Transition::Unchanged
                } else {
                    Transition::Updated
                }
            }
            MeasureEvent::Clicked(raw) => {
                self.pointer = Some(raw);
                self.refresh_hover();
                let Some(anchor) = self.resolve(raw) else {
                    log::debug!("click at ({:.1}, {:.1}) ignored: nothing to snap to", raw.x, raw.y);
                    return Transition::Unchanged;
                };
                self.selection.click(anchor);
                match self.selection.completed() {
                    Some(m) => Transition::Completed(m),
                    None => Transition::Updated,
                }
            }
            MeasureEvent::BoundaryLoaded(boundary) => {
                let (boundary, size) = boundary.normalized();
                log::info!("boundary loaded: {} segments", boundary.len());
                self.boundary = boundary;
                if let Some(size) = size {
                    self.canvas_size = size;
                }
                self.refresh_hover();
                Transition::Updated
            }
            MeasureEvent::ImageLoaded(image) => {
                log::info!("background image loaded: {}x{}", image.size[0], image.size[1]);
                self.image = Some(image);
                self.image_generation = self.image_generation.wrapping_add(1);
                Transition::Updated
            }
            MeasureEvent::CalibrationLoaded(calibration) => {
                log::info!(
                    "Calibration loaded: {} mm per pixel",
                    calibration.mm_per_pixel()
                );
                self.calibration = calibration;
                Transition::Updated
            }
            MeasureEvent::SnapToggled(enabled) => {
                if self.snap_enabled == enabled {
                    return Transition::Unchanged;
                }
                self.snap_enabled = enabled;
                self.refresh_hover();
                Transition::Updated
            }
        }
    }
}

/// Value-style wrapper around [`AppState::handle`].
pub fn handle(mut state: AppState, event: MeasureEvent) -> AppState {
    state.handle(event);
    state
}

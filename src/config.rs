//! Configuration for the measurement window.

use std::path::PathBuf;

use crate::controllers::MeasurementController;
use crate::data::calibration::Calibration;
use crate::data::state::DEFAULT_CANVAS_SIZE;
use crate::loader::LoadKind;
use crate::scene::SceneStyle;

/// Files to load before the first frame.
#[derive(Debug, Clone, Default)]
pub struct Preload {
    pub boundary: Option<PathBuf>,
    pub image: Option<PathBuf>,
    pub calibration: Option<PathBuf>,
}

impl Preload {
    /// Requested loads in application order: boundary first so the canvas is
    /// sized before the image stretches over it.
    pub fn entries(&self) -> Vec<(LoadKind, PathBuf)> {
        [
            (LoadKind::Boundary, &self.boundary),
            (LoadKind::Image, &self.image),
            (LoadKind::Calibration, &self.calibration),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.clone().map(|p| (kind, p)))
        .collect()
    }
}

/// Startup options for [`run_measure`](crate::run_measure) and
/// [`MeasureApp`](crate::MeasureApp).
pub struct MeasureConfig {
    /// Window title.
    pub title: String,
    /// Calibration in effect until a calibration file is loaded.
    pub calibration: Calibration,
    /// Whether clicks snap to the boundary at startup.
    pub snap_enabled: bool,
    /// Canvas size before any boundary is loaded.
    pub canvas_size: [f64; 2],
    pub style: SceneStyle,
    pub preload: Preload,
    /// Optional handle for observing results from outside the UI.
    pub controller: Option<MeasurementController>,
    /// Optional eframe native options.
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            title: "Snap Measure".to_string(),
            calibration: Calibration::default(),
            snap_enabled: true,
            canvas_size: DEFAULT_CANVAS_SIZE,
            style: SceneStyle::default(),
            preload: Preload::default(),
            controller: None,
            native_options: None,
        }
    }
}

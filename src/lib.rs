//! Snap Measure crate root: re-exports and module wiring.
//!
//! An egui/eframe tool for measuring distances on a traced outline:
//! - `data`: geometry, calibration, the two-click selection and the
//!   application-state record with its transition function
//! - `loader`: boundary/calibration JSON and background image loading
//! - `scene`: pure description of what the canvas shows for a given state
//! - `panels`: toolbar and canvas widgets
//! - `controllers`: observe results and send requests from external code
//! - `config`: startup options

pub mod app;
pub mod config;
pub mod controllers;
pub mod data;
pub mod loader;
pub mod panels;
pub mod scene;

pub use app::{run_measure, MeasureApp};
pub use config::{MeasureConfig, Preload};
pub use controllers::{MeasureRequest, MeasurementController, MeasurementInfo};
pub use data::calibration::{Calibration, Reading};
pub use data::geometry::{nearest_point, Boundary, Point, Segment};
pub use data::measurement::{Measurement, Phase, Selection};
pub use data::state::{handle, AppState, BackgroundImage, MeasureEvent, Transition};
pub use loader::{LoadError, LoadKind};
pub use scene::{Primitive, Scene, SceneStyle};

pub mod calibration;
pub mod geometry;
pub mod measurement;
pub mod state;

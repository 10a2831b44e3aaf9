//! Application wiring for the measurement window.
//!
//! | Sub-module        | Responsibility |
//! | ----------------- | -------------- |
//! | [`measure_app`]   | [`MeasureApp`]: owns the state, dispatches events, loads files, implements [`eframe::App`] |
//! | [`run`]           | Top-level [`run_measure()`] entry point and icon loading |

mod measure_app;
mod run;

pub use measure_app::MeasureApp;
pub use run::run_measure;

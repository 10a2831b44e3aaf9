//! Controller for interacting with the measurement UI from external code.
//!
//! The controller exposes the last finished measurement and a subscription
//! mechanism so non-UI code can observe results, and it records simple
//! requests (snap mode, file loads) that the UI applies on its next
//! frame.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::data::calibration::Calibration;
use crate::data::geometry::Point;
use crate::data::measurement::Measurement;
use crate::loader::LoadKind;

/// A finished measurement as published to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementInfo {
    pub start: Point,
    pub end: Point,
    pub pixels: f64,
    /// Millimeters, rounded to two decimals.
    pub millimeters: f64,
    /// The on-canvas label, e.g. `"4.2 cm"`.
    pub label: String,
}

impl MeasurementInfo {
    pub fn new(m: &Measurement, calibration: Calibration) -> Self {
        let reading = m.reading(calibration);
        Self {
            start: m.start,
            end: m.end,
            pixels: m.length_px(),
            millimeters: reading.millimeters(),
            label: reading.to_string(),
        }
    }
}

/// Requests recorded by the controller and drained by the UI once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasureRequest {
    SetSnap(bool),
    Load(LoadKind, PathBuf),
}

/// Cloneable handle to observe and steer a running measurement window.
#[derive(Clone, Default)]
pub struct MeasurementController {
    pub(crate) inner: Arc<Mutex<MeasureCtrlInner>>,
}

#[derive(Default)]
pub(crate) struct MeasureCtrlInner {
    pub(crate) last: Option<MeasurementInfo>,
    pub(crate) requests: Vec<MeasureRequest>,
    pub(crate) listeners: Vec<Sender<MeasurementInfo>>,
}

impl MeasurementController {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MeasureCtrlInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The most recent completed measurement, if any.
    pub fn last_measurement(&self) -> Option<MeasurementInfo> {
        self.lock().last.clone()
    }

    /// Subscribe to completed measurements.
    pub fn subscribe(&self) -> Receiver<MeasurementInfo> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.lock().listeners.push(tx);
        rx
    }

    pub fn request_snap(&self, enabled: bool) {
        self.lock().requests.push(MeasureRequest::SetSnap(enabled));
    }

    /// Ask the UI to load a file into the given slot.
    pub fn request_load<P: Into<PathBuf>>(&self, kind: LoadKind, path: P) {
        self.lock()
            .requests
            .push(MeasureRequest::Load(kind, path.into()));
    }

    /// Record a completed measurement and notify subscribers. Dropped
    /// receivers are pruned.
    pub(crate) fn publish(&self, info: MeasurementInfo) {
        let mut inner = self.lock();
        inner.listeners.retain(|s| s.send(info.clone()).is_ok());
        inner.last = Some(info);
    }

    pub(crate) fn take_requests(&self) -> Vec<MeasureRequest> {
        std::mem::take(&mut self.lock().requests)
    }
}

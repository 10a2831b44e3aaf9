//! Standalone application wrapper for the measurement tool.
//!
//! [`MeasureApp`] owns the single [`AppState`] record and is the only caller of
//! [`AppState::handle`]. Panels describe what the user did; the app turns
//! that into events, runs the file loaders, and forwards completed
//! measurements to an optional [`MeasurementController`].

use std::path::{Path, PathBuf};

use eframe::egui;

use crate::config::MeasureConfig;
use crate::controllers::{MeasureRequest, MeasurementController, MeasurementInfo};
use crate::data::state::{AppState, MeasureEvent, Transition};
use crate::loader::{self, LoadKind};
use crate::panels::{CanvasPanel, Panel, PanelRequest, ToolbarPanel};
use crate::scene::SceneStyle;

pub struct MeasureApp {
    pub state: AppState,
    pub style: SceneStyle,
    pub controller: Option<MeasurementController>,
    toolbar: ToolbarPanel,
    canvas: CanvasPanel,
}

impl MeasureApp {
    /// Build the app from `cfg` and run any configured preloads.
    pub fn new(cfg: MeasureConfig) -> Self {
        let state = AppState {
            calibration: cfg.calibration,
            snap_enabled: cfg.snap_enabled,
            canvas_size: cfg.canvas_size,
            ..AppState::default()
        };
        let mut app = Self {
            state,
            style: cfg.style,
            controller: cfg.controller,
            toolbar: ToolbarPanel::default(),
            canvas: CanvasPanel::default(),
        };
        for (kind, path) in cfg.preload.entries() {
            app.ingest(kind, &path);
        }
        app
    }

    /// Apply one event and publish the result if it completed a measurement.
    pub fn dispatch(&mut self, event: MeasureEvent) -> Transition {
        let transition = self.state.handle(event);
        if let Transition::Completed(m) = &transition {
            let info = MeasurementInfo::new(m, self.state.calibration);
            log::info!(
                "measured {:.2} px = {:.2} mm ({})",
                info.pixels,
                info.millimeters,
                info.label
            );
            if let Some(ctrl) = &self.controller {
                ctrl.publish(info);
            }
        }
        transition
    }

    /// Load `path` into `kind`'s slot. Failures are logged and leave the
    /// state untouched.
    pub fn ingest(&mut self, kind: LoadKind, path: &Path) -> bool {
        match loader::load(kind, path) {
            Ok(event) => {
                self.dispatch(event);
                true
            }
            Err(e) => {
                log::error!("Error loading {} from {}: {e}", kind.label(), path.display());
                false
            }
        }
    }

    /// Load a file dropped onto the window into whichever slot it fits.
    pub fn ingest_dropped(&mut self, path: &Path) -> bool {
        match loader::load_dropped(path) {
            Ok(event) => {
                self.dispatch(event);
                true
            }
            Err(e) => {
                log::error!("Ignoring dropped file {}: {e}", path.display());
                false
            }
        }
    }

    /// Apply requests recorded on the controller since the last frame.
    pub fn apply_controller(&mut self) -> bool {
        let Some(ctrl) = &self.controller else {
            return false;
        };
        let requests = ctrl.take_requests();
        let mut changed = false;
        for request in requests {
            changed |= match request {
                MeasureRequest::SetSnap(enabled) => {
                    self.dispatch(MeasureEvent::SnapToggled(enabled)) != Transition::Unchanged
                }
                MeasureRequest::Load(kind, path) => self.ingest(kind, &path),
            };
        }
        changed
    }

    fn pick_file(kind: LoadKind) -> Option<PathBuf> {
        let (name, extensions) = kind.filter();
        rfd::FileDialog::new()
            .set_title(format!("Open {}", kind.label()))
            .add_filter(name, extensions)
            .pick_file()
    }

    fn apply_panel_requests(&mut self, requests: Vec<PanelRequest>) -> bool {
        let mut changed = false;
        for request in requests {
            changed |= match request {
                PanelRequest::Event(event) => self.dispatch(event) != Transition::Unchanged,
                PanelRequest::PickFile(kind) => match Self::pick_file(kind) {
                    Some(path) => self.ingest(kind, &path),
                    None => false,
                },
            };
        }
        changed
    }
}

impl eframe::App for MeasureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut changed = self.apply_controller();

        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        for path in dropped {
            changed |= self.ingest_dropped(&path);
        }

        let mut requests = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar
                .render_panel(ui, &self.state, &self.style, &mut requests);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas
                .render_panel(ui, &self.state, &self.style, &mut requests);
        });

        changed |= self.apply_panel_requests(requests);
        if changed {
            ctx.request_repaint();
        }
    }
}

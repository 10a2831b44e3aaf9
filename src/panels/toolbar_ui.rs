use egui::Ui;
use egui_phosphor::regular::{FOLDER_OPEN, IMAGE, MAGNET, RULER};

use super::panel_trait::{Panel, PanelRequest, PanelState};
use crate::data::measurement::Phase;
use crate::data::state::{AppState, MeasureEvent};
use crate::loader::LoadKind;
use crate::scene::SceneStyle;

/// Top bar: file pickers, snap toggle and the current readout.
pub struct ToolbarPanel {
    state: PanelState,
}

impl Default for ToolbarPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Toolbar"),
        }
    }
}

impl ToolbarPanel {
    pub const LOAD_BOUNDARY_LABEL: &'static str = "Load outline";
    pub const LOAD_IMAGE_LABEL: &'static str = "Load image";
    pub const LOAD_CALIBRATION_LABEL: &'static str = "Load calibration";
    pub const SNAP_LABEL: &'static str = "Snap to outline";

    /// Status text for the right side of the bar.
    pub fn status_text(state: &AppState) -> String {
        let phase = match state.phase() {
            Phase::Idle => "Click to place the first point",
            Phase::Pending => "Click to place the second point",
            Phase::Complete => "Measured",
        };
        match state.readout() {
            Some(reading) => format!("{phase}: {reading}"),
            None => phase.to_string(),
        }
    }
}

impl Panel for ToolbarPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn render_panel(
        &mut self,
        ui: &mut Ui,
        state: &AppState,
        _style: &SceneStyle,
        requests: &mut Vec<PanelRequest>,
    ) {
        ui.horizontal(|ui| {
            if ui
                .button(format!("{FOLDER_OPEN} {}", Self::LOAD_BOUNDARY_LABEL))
                .on_hover_text("JSON array of {start, end} segments")
                .clicked()
            {
                requests.push(PanelRequest::PickFile(LoadKind::Boundary));
            }
            if ui
                .button(format!("{IMAGE} {}", Self::LOAD_IMAGE_LABEL))
                .clicked()
            {
                requests.push(PanelRequest::PickFile(LoadKind::Image));
            }
            if ui
                .button(format!("{RULER} {}", Self::LOAD_CALIBRATION_LABEL))
                .on_hover_text("JSON number: millimeters per pixel")
                .clicked()
            {
                requests.push(PanelRequest::PickFile(LoadKind::Calibration));
            }
            ui.separator();

            let mut snap = state.snap_enabled;
            if ui
                .checkbox(&mut snap, format!("{MAGNET} {}", Self::SNAP_LABEL))
                .changed()
            {
                requests.push(PanelRequest::Event(MeasureEvent::SnapToggled(snap)));
            }
            ui.separator();

            ui.label(format!(
                "{:.4} mm/px",
                state.calibration.mm_per_pixel()
            ));
            ui.separator();
            ui.label(Self::status_text(state));
        });
    }
}

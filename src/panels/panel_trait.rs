use egui::Ui;

use crate::data::state::{AppState, MeasureEvent};
use crate::loader::LoadKind;
use crate::scene::SceneStyle;

#[derive(Debug, Clone, Copy)]
pub struct PanelState {
    pub title: &'static str,
}

impl PanelState {
    pub fn new(title: &'static str) -> Self {
        Self { title }
    }
}

/// Something a panel wants the app to do after the frame's UI pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelRequest {
    /// Feed an event into the state machine.
    Event(MeasureEvent),
    /// Open a file dialog for the given slot.
    PickFile(LoadKind),
}

pub trait Panel {
    fn state(&self) -> &PanelState;

    fn title(&self) -> &'static str {
        self.state().title
    }

    /// Draw the panel for the current state. Panels never mutate the state
    /// directly; they push requests that the app applies afterwards.
    fn render_panel(
        &mut self,
        ui: &mut Ui,
        state: &AppState,
        style: &SceneStyle,
        requests: &mut Vec<PanelRequest>,
    );
}

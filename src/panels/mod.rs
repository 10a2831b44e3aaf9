pub mod canvas_ui;
pub mod panel_trait;
pub mod toolbar_ui;

pub use canvas_ui::CanvasPanel;
pub use panel_trait::{Panel, PanelRequest, PanelState};
pub use toolbar_ui::ToolbarPanel;

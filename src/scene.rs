//! Pure rendering description of the canvas.
//!
//! [`Scene::build`] turns an [`AppState`] into an ordered list of primitives;
//! the canvas panel paints them with egui. Keeping this step free of any
//! painter makes the visual rules testable without a window.

use egui::Color32;

use crate::data::geometry::Point;
use crate::data::measurement::Measurement;
use crate::data::state::AppState;

/// Visual parameters for the canvas overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStyle {
    pub hover_radius: f64,
    pub hover_color: Color32,
    pub line_width: f64,
    pub line_color: Color32,
    pub label_size: f64,
    pub label_color: Color32,
    /// Label position relative to the measurement midpoint.
    pub label_offset: [f64; 2],
    pub show_outline: bool,
    pub outline_width: f64,
    pub outline_color: Color32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            hover_radius: 10.0,
            hover_color: Color32::from_rgb(0x00, 0xFF, 0x00),
            line_width: 3.0,
            line_color: Color32::from_rgb(0x00, 0xFF, 0x00),
            label_size: 40.0,
            label_color: Color32::RED,
            label_offset: [-200.0, 200.0],
            show_outline: false,
            outline_width: 1.0,
            outline_color: Color32::BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Background bitmap stretched over the whole canvas.
    Background,
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Color32,
    },
    Disc {
        center: Point,
        radius: f64,
        color: Color32,
    },
    /// Text whose bottom-left corner sits at `pos`.
    Label {
        pos: Point,
        text: String,
        size: f64,
        color: Color32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: [f64; 2],
    pub items: Vec<Primitive>,
}

impl Scene {
    pub fn build(state: &AppState, style: &SceneStyle) -> Scene {
        let size = state.canvas_size;
        let mut items = Vec::new();

        if state.image.is_some() {
            items.push(Primitive::Background);
        }

        if style.show_outline {
            items.extend(state.boundary.segments().iter().map(|s| Primitive::Line {
                from: s.start,
                to: s.end,
                width: style.outline_width,
                color: style.outline_color,
            }));
        }

        if state.snap_enabled {
            if let Some(hover) = state.hover {
                items.push(Primitive::Disc {
                    center: hover,
                    radius: style.hover_radius,
                    color: style.hover_color,
                });
            }
        }

        if let Some(m) = state.live_measurement() {
            items.push(Primitive::Line {
                from: m.start,
                to: m.end,
                width: style.line_width,
                color: style.line_color,
            });
            items.push(Primitive::Label {
                pos: label_anchor(&m, style, size),
                text: m.reading(state.calibration).to_string(),
                size: style.label_size,
                color: style.label_color,
            });
        }

        Scene { size, items }
    }

    pub fn label(&self) -> Option<&str> {
        self.items.iter().find_map(|p| match p {
            Primitive::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn hover_marker(&self) -> Option<Point> {
        self.items.iter().find_map(|p| match p {
            Primitive::Disc { center, .. } => Some(*center),
            _ => None,
        })
    }
}

// Keep the label on the canvas even when the offset would push it off an edge.
fn label_anchor(m: &Measurement, style: &SceneStyle, size: [f64; 2]) -> Point {
    let mid = m.midpoint();
    let raw = mid.offset(style.label_offset[0], style.label_offset[1]);
    let max_x = size[0].max(0.0);
    let min_y = style.label_size.min(size[1]).max(0.0);
    let max_y = size[1].max(min_y);
    Point::new(raw.x.clamp(0.0, max_x), raw.y.clamp(min_y, max_y))
}

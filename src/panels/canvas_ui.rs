use egui::{
    pos2, vec2, Align2, Color32, ColorImage, FontId, Pos2, Rect, Sense, Stroke, TextureHandle,
    TextureOptions, Ui,
};

use image::imageops::{self, FilterType};

use super::panel_trait::{Panel, PanelRequest, PanelState};
use crate::data::geometry::Point;
use crate::data::state::{AppState, BackgroundImage, MeasureEvent};
use crate::scene::{Primitive, Scene, SceneStyle};

/// The measuring surface: paints the scene and turns pointer input into events.
pub struct CanvasPanel {
    state: PanelState,
    /// Uploaded background texture and the image generation it was built from.
    texture: Option<(u64, TextureHandle)>,
}

impl Default for CanvasPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Canvas"),
            texture: None,
        }
    }
}

fn to_canvas(origin: Pos2, pos: Pos2) -> Point {
    Point::new((pos.x - origin.x) as f64, (pos.y - origin.y) as f64)
}

fn to_screen(origin: Pos2, p: Point) -> Pos2 {
    pos2(origin.x + p.x as f32, origin.y + p.y as f32)
}

/// Pixel data ready for upload, shrunk to fit within `max_side` on both axes.
///
/// The background is stretched over the canvas anyway, so an oversized image
/// only loses detail the GPU could not hold.
fn texture_image(image: &BackgroundImage, max_side: usize) -> Option<ColorImage> {
    let [w, h] = image.size;
    if w <= max_side && h <= max_side {
        return Some(ColorImage::from_rgba_unmultiplied(image.size, &image.rgba));
    }
    let scale = max_side as f64 / w.max(h) as f64;
    let fit = |side: usize| ((side as f64 * scale).round() as u32).clamp(1, max_side as u32);
    let (nw, nh) = (fit(w), fit(h));
    let src = image::RgbaImage::from_raw(w as u32, h as u32, image.rgba.clone())?;
    let small = imageops::resize(&src, nw, nh, FilterType::Triangle);
    log::debug!("background {w}x{h} downscaled to {nw}x{nh}");
    Some(ColorImage::from_rgba_unmultiplied(
        [nw as usize, nh as usize],
        small.as_raw(),
    ))
}

impl CanvasPanel {
    fn background_texture(
        &mut self,
        ui: &Ui,
        generation: u64,
        image: &BackgroundImage,
    ) -> Option<&TextureHandle> {
        let stale = !matches!(&self.texture, Some((g, _)) if *g == generation);
        if stale {
            let max_side = ui.ctx().input(|i| i.max_texture_side);
            let color = texture_image(image, max_side)?;
            let handle = ui
                .ctx()
                .load_texture("background", color, TextureOptions::LINEAR);
            self.texture = Some((generation, handle));
        }
        self.texture.as_ref().map(|(_, handle)| handle)
    }

    fn paint(&mut self, ui: &Ui, rect: Rect, state: &AppState, scene: &Scene) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::WHITE);
        let origin = rect.min;
        for item in &scene.items {
            match item {
                Primitive::Background => {
                    let Some(image) = &state.image else { continue };
                    if let Some(tex) = self.background_texture(ui, state.image_generation, image) {
                        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
                        painter.image(tex.id(), rect, uv, Color32::WHITE);
                    }
                }
                Primitive::Line {
                    from,
                    to,
                    width,
                    color,
                } => {
                    painter.line_segment(
                        [to_screen(origin, *from), to_screen(origin, *to)],
                        Stroke::new(*width as f32, *color),
                    );
                }
                Primitive::Disc {
                    center,
                    radius,
                    color,
                } => {
                    painter.circle_filled(to_screen(origin, *center), *radius as f32, *color);
                }
                Primitive::Label {
                    pos,
                    text,
                    size,
                    color,
                } => {
                    painter.text(
                        to_screen(origin, *pos),
                        Align2::LEFT_BOTTOM,
                        text,
                        FontId::proportional(*size as f32),
                        *color,
                    );
                }
            }
        }
    }
}

impl Panel for CanvasPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn render_panel(
        &mut self,
        ui: &mut Ui,
        state: &AppState,
        style: &SceneStyle,
        requests: &mut Vec<PanelRequest>,
    ) {
        let scene = Scene::build(state, style);
        let size = vec2(scene.size[0] as f32, scene.size[1] as f32);
        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let (rect, response) = ui.allocate_exact_size(size, Sense::click());
                let origin = rect.min;

                if let Some(pos) = response.hover_pos() {
                    let p = to_canvas(origin, pos);
                    if state.pointer != Some(p) {
                        requests.push(PanelRequest::Event(MeasureEvent::PointerMoved(p)));
                    }
                }
                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        requests.push(PanelRequest::Event(MeasureEvent::Clicked(to_canvas(
                            origin, pos,
                        ))));
                    }
                }

                self.paint(ui, rect, state, &scene);
            });
    }
}

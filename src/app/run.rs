//! Top-level entry point for running the measurement tool as a native window.

use eframe::egui;

use crate::config::MeasureConfig;

use super::measure_app::MeasureApp;

/// Extra room around the canvas for the toolbar and panel margins.
const CHROME_SIZE: [f32; 2] = [32.0, 72.0];

/// Launch the measurement tool in a native window.
///
/// Builds a [`MeasureApp`] from `cfg` (running any preloads), opens a window
/// sized to the canvas and enters the eframe event loop. Blocks until the
/// window is closed.
pub fn run_measure(mut cfg: MeasureConfig) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    let app = MeasureApp::new(cfg);

    if opts.viewport.icon.is_none() {
        if let Some(icon) = load_app_icon_svg() {
            opts.viewport = opts.viewport.clone().with_icon(icon);
        }
    }

    if opts.viewport.inner_size.is_none() {
        let [w, h] = app.state.canvas_size;
        let size = egui::vec2(
            (w as f32 + CHROME_SIZE[0]).clamp(640.0, 1600.0),
            (h as f32 + CHROME_SIZE[1]).clamp(480.0, 1000.0),
        );
        opts.viewport = opts.viewport.clone().with_inner_size(size);
    }

    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}

/// Window icon, square, in pixels.
const ICON_SIDE: u32 = 64;

const ICON_SVG: &[u8] = include_bytes!("../../icon.svg");

fn load_app_icon_svg() -> Option<egui::IconData> {
    let icon = render_icon(ICON_SVG, ICON_SIDE);
    if icon.is_none() {
        log::debug!("window icon could not be rendered");
    }
    icon
}

/// Rasterize an SVG into a `side` x `side` icon, scaled to fit and centered.
fn render_icon(svg: &[u8], side: u32) -> Option<egui::IconData> {
    let tree = usvg::Tree::from_data(svg, &usvg::Options::default()).ok()?;
    let (w, h) = (tree.size().width(), tree.size().height());
    let scale = side as f32 / w.max(h);
    let transform = tiny_skia::Transform::from_scale(scale, scale).post_translate(
        (side as f32 - w * scale) / 2.0,
        (side as f32 - h * scale) / 2.0,
    );
    let mut pixmap = tiny_skia::Pixmap::new(side, side)?;
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Some(egui::IconData {
        rgba: pixmap.take(),
        width: side,
        height: side,
    })
}

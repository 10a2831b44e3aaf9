use std::path::PathBuf;

use clap::Parser;

use snapmeasure::{run_measure, Calibration, MeasureConfig, Preload};

/// Measure distances on a traced outline, snapping clicks to its segments.
#[derive(Debug, Parser)]
#[command(name = "snapmeasure", version, about)]
struct Cli {
    /// Boundary JSON: array of {"start": {x, y}, "end": {x, y}} segments.
    #[arg(long)]
    boundary: Option<PathBuf>,

    /// Background image stretched over the canvas.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Calibration JSON: a single number of millimeters per pixel.
    #[arg(long)]
    calibration: Option<PathBuf>,

    /// Initial calibration if no calibration file is given.
    #[arg(long, default_value_t = Calibration::DEFAULT_MM_PER_PIXEL)]
    mm_per_pixel: f64,

    /// Start with snapping disabled (raw pointer positions).
    #[arg(long)]
    no_snap: bool,

    /// Draw the boundary segments on the canvas.
    #[arg(long)]
    show_outline: bool,

    /// Window title.
    #[arg(long, default_value = "Snap Measure")]
    title: String,
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut cfg = MeasureConfig {
        title: cli.title,
        snap_enabled: !cli.no_snap,
        preload: Preload {
            boundary: cli.boundary,
            image: cli.image,
            calibration: cli.calibration,
        },
        ..MeasureConfig::default()
    };
    match Calibration::new(cli.mm_per_pixel) {
        Some(c) => cfg.calibration = c,
        None => log::warn!(
            "ignoring --mm-per-pixel {}: must be a positive number",
            cli.mm_per_pixel
        ),
    }
    cfg.style.show_outline = cli.show_outline;

    run_measure(cfg)
}

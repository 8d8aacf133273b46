use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use folio_engine::compositor::{render_frame, CameraUniform, ChromeStyle, Compositor};
use folio_engine::coords::{Vec2, Viewport};
use folio_engine::device::GpuInit;
use folio_engine::logging::{init_logging, LoggingConfig};
use folio_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::PhysicalSize;

mod app;
mod pages;

use app::{ViewState, ViewerApp};
use pages::PageImages;

/// Composites a document page, its annotation layer and the viewer chrome.
#[derive(Parser, Debug)]
#[command(name = "folio-viewer", version, about)]
struct Args {
    /// Rasterized page image (PNG or JPEG)
    page: PathBuf,

    /// Annotation layer, same size as the page; alpha drives the blend
    #[arg(long)]
    annotations: Option<PathBuf>,

    /// Zoom factor, clamped to [0.1, 5.0]
    #[arg(long, default_value_t = 1.0)]
    zoom: f32,

    /// Pan offset in clip space
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pan: Option<Vec<f32>>,

    /// Show the thumbnail side panel
    #[arg(long)]
    side_panel: bool,

    /// Keep toolbar buttons circular on non-square windows
    #[arg(long)]
    round_buttons: bool,

    /// Window (or snapshot) width in physical pixels
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Window (or snapshot) height in physical pixels
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Render with the CPU compositor into this PNG instead of opening a window
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Log filter in env_logger syntax; overrides RUST_LOG
    #[arg(long)]
    log: Option<String>,
}

impl Args {
    fn pan(&self) -> Vec2 {
        match self.pan.as_deref() {
            Some([x, y]) => Vec2::new(*x, *y),
            _ => Vec2::zero(),
        }
    }

    fn style(&self) -> ChromeStyle {
        let mut style = ChromeStyle::default();
        style.bottom_bar.correct_aspect = self.round_buttons;
        style
    }

    fn view(&self) -> ViewState {
        ViewState {
            zoom: self.zoom,
            pan: self.pan(),
            side_panel: self.side_panel,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logging = LoggingConfig::default();
    if let Some(filter) = &args.log {
        logging = logging.with_filter(filter.clone());
    }
    init_logging(logging);

    anyhow::ensure!(
        args.width > 0 && args.height > 0,
        "output size must be non-zero, got {}x{}",
        args.width,
        args.height
    );

    let pages = PageImages::load(&args.page, args.annotations.as_deref())?;

    match &args.snapshot {
        Some(out) => snapshot(&args, &pages, out),
        None => run_window(&args, pages),
    }
}

/// Headless path: CPU reference renderer, no GPU involved.
fn snapshot(args: &Args, pages: &PageImages, out: &Path) -> Result<()> {
    let layers = pages.cpu_layers()?;
    let view = args.view();
    let camera = CameraUniform::from_view(
        view.zoom,
        view.pan,
        Viewport::from_pixels(args.width, args.height),
        view.side_panel,
    );

    let frame = render_frame(
        &Compositor::new(args.style()),
        &layers,
        &camera,
        args.width,
        args.height,
    );

    frame
        .to_rgba_image()
        .save(out)
        .with_context(|| format!("failed to write snapshot {}", out.display()))?;

    log::info!("wrote {}x{} snapshot to {}", args.width, args.height, out.display());
    Ok(())
}

/// Same physical size as a snapshot, whatever the display scale factor.
fn window_config(args: &Args) -> RuntimeConfig {
    let title = match args.page.file_name() {
        Some(name) => format!("folio - {}", name.to_string_lossy()),
        None => "folio".to_string(),
    };

    RuntimeConfig {
        title,
        initial_size: PhysicalSize::new(args.width, args.height).into(),
    }
}

fn run_window(args: &Args, pages: PageImages) -> Result<()> {
    let config = window_config(args);
    let app = ViewerApp::new(pages, args.style(), args.view());
    Runtime::run(config, GpuInit::default(), app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_viewer_window() {
        let args = Args::try_parse_from(["folio-viewer", "page.png"]).unwrap();
        assert_eq!((args.width, args.height), (1200, 800));
        assert_eq!(args.zoom, 1.0);
        assert_eq!(args.pan(), Vec2::zero());
        assert!(!args.side_panel);
        assert!(!args.style().bottom_bar.correct_aspect);
        assert!(args.snapshot.is_none());
    }

    #[test]
    fn pan_accepts_negative_values() {
        let args =
            Args::try_parse_from(["folio-viewer", "page.png", "--pan", "-0.25", "0.5"]).unwrap();
        assert_eq!(args.pan(), Vec2::new(-0.25, 0.5));
    }

    #[test]
    fn view_flags_are_forwarded() {
        let args = Args::try_parse_from([
            "folio-viewer",
            "page.png",
            "--side-panel",
            "--round-buttons",
            "--zoom",
            "2",
            "--snapshot",
            "out.png",
        ])
        .unwrap();
        assert_eq!(
            args.view(),
            ViewState { zoom: 2.0, pan: Vec2::zero(), side_panel: true }
        );
        assert!(args.style().bottom_bar.correct_aspect);
        assert_eq!(args.snapshot.as_deref(), Some(Path::new("out.png")));
    }

    #[test]
    fn window_uses_snapshot_pixel_size() {
        let args =
            Args::try_parse_from(["folio-viewer", "pages/p1.png", "--width", "640", "--height", "480"])
                .unwrap();
        let config = window_config(&args);
        assert_eq!(config.title, "folio - p1.png");
        assert_eq!(config.initial_size, winit::dpi::Size::Physical(PhysicalSize::new(640, 480)));
    }

    #[test]
    fn pan_needs_two_values() {
        assert!(Args::try_parse_from(["folio-viewer", "page.png", "--pan", "0.5"]).is_err());
    }
}

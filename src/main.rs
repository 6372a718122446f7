//! Ivolution desktop application entry point.

use eframe::egui::ViewportBuilder;
use ivolution::config::{IvolutionConfig, WindowMode};
use ivolution::constants::APP_NAME;
use ivolution::gui::app::IvolutionApp;
use ivolution::logger::{self, log};
use ivolution::resources;

/// Set up logging, load the configuration and run the main window event loop.
///
/// A logger failure is reported on stderr but does not prevent the window from
/// opening; the application exits with code 0 when the window is closed.
fn main() -> eframe::Result<()> {
    if let Err(e) = logger::init_logger() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = IvolutionConfig::load();
    log::info!("Starting {} ({:?} window)", APP_NAME, config.window_mode);

    let (size, min_size) = match config.window_mode {
        WindowMode::Full => ((640.0, 520.0), (480.0, 400.0)),
        WindowMode::Minimal => ((200.0, 100.0), (200.0, 100.0)),
    };

    let mut viewport = ViewportBuilder::default()
        .with_inner_size(size)
        .with_title(APP_NAME)
        .with_min_inner_size(min_size);
    if let Some(icon) = resources::load_window_icon(&config.root_folder) {
        viewport = viewport.with_icon(icon);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(IvolutionApp::new(cc, config)))),
    )
}

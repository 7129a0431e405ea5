mod analysis;
mod app;
mod cli;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::YieldSniperApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = cli::parse_cli_args();
    log::debug!("Starting with {settings:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Yield Sniper",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can fetch and render listing photos.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(YieldSniperApp::new(settings)))
        }),
    )
}

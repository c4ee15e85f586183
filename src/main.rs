mod app;
mod cli;
mod color;
mod data;
mod figure;
mod state;
mod ui;

use app::DashboardApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();
    let args = cli::Cli::parse();

    // A missing or broken data file is reported in the UI; the user can
    // still open another file from the menu.
    let mut state = AppState::default();
    ui::panels::load_into(&mut state, &args.data);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
}

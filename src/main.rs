mod app;
mod charts;
mod color;
mod config;
mod dashboard;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::FinDashApp;
use config::Config;
use dashboard::DashboardContext;
use eframe::egui;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env();
    log::debug!("{config:?}");

    // A missing or malformed data file is fatal before any window opens.
    let dataset = data::loader::load_file(&config.data_path)
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    let context = DashboardContext::new(dataset, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Financial Analysis",
        options,
        Box::new(|cc| Ok(Box::new(FinDashApp::new(cc, context)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}

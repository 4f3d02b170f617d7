mod aggregate;
mod app;
mod chart;
mod color;
mod config;
mod data;
mod pipeline;
mod state;
mod ui;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use app::DashboardApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load(Path::new(CONFIG_FILE))?;

    // A dataset that cannot be loaded at startup is fatal.
    let state = AppState::open(&config.data_path, config.chart_height)
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "AQI Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}

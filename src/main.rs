mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use app::SalaryDashboardApp;
use config::{Args, Config};
use data::loader::{DatasetCache, Source};
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = Config::load(&args)?;
    let vocabulary = config.dashboard.vocabulary;

    // Without data there is nothing to show, so a failed load ends the session.
    let cache = DatasetCache::new(Source::parse(&config.source.location), vocabulary);
    let table = cache.get().inspect_err(|e| log::error!("{e}")).with_context(|| {
        format!("Failed to load salary data from {}", cache.source())
    })?;
    if table.is_empty() {
        log::warn!("{} has no rows with a work year", cache.source());
    }

    let state = AppState::new(
        cache.source().clone(),
        table,
        vocabulary,
        config.dashboard.top_titles,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        vocabulary.text(data::labels::UiText::Title),
        options,
        Box::new(|_cc| Ok(Box::new(SalaryDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}

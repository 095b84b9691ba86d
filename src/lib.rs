pub mod classifier;
pub mod dashboard;
pub mod history;
pub mod models;
pub mod server;
pub mod settings;
pub mod stream;
mod utils;

use std::sync::Arc;

use anyhow::{Context, Result};

use dashboard::DashboardController;
use settings::DashboardSettings;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: DashboardController,
    pub settings: Arc<DashboardSettings>,
}

impl AppState {
    pub fn new(settings: DashboardSettings) -> Self {
        Self {
            dashboard: DashboardController::new(&settings),
            settings: Arc::new(settings),
        }
    }
}

pub fn run() -> Result<()> {
    // Initialize logging: RUST_LOG wins, otherwise info (debug with FRESHWATCH_DEBUG)
    utils::logging::builder(env_logger::Env::default(), settings::debug_mode()).init();

    log::info!("Freshwatch starting up...");

    let settings = DashboardSettings::load()?;
    log::info!(
        "Simulated stream ticks every {}ms, keeping {} readings",
        settings.tick_interval_ms,
        settings.history_capacity
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(server::run_server(AppState::new(settings)))
}

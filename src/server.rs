//! HTTP surface: the embedded dashboard page plus the JSON API it polls.

use anyhow::{Context, Result};
use axum::{
    extract::State,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use log::info;

use crate::{dashboard::commands, AppState};

pub const SERVICE_NAME: &str = "Food Spoilage Detection";

const INDEX_HTML: &str = include_str!("../static/index.html");

async fn handle_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn handle_index(State(state): State<AppState>) -> Json<serde_json::Value> {
    let options = state.dashboard.options();

    Json(serde_json::json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "tickIntervalMs": state.settings.tick_interval_ms,
        "historyCapacity": state.settings.history_capacity,
        "serialPorts": options.serial_ports,
        "models": options.models,
        "endpoints": {
            "GET /": "Dashboard page",
            "GET /api": "This API index",
            "GET /api/snapshot": "Session, reading, verdict and history in one payload",
            "GET /api/reading": "Current reading",
            "GET /api/verdict": "Verdict for the current reading",
            "GET /api/history": "Recent readings, oldest first",
            "GET /api/options": "Port and model options",
            "POST /api/connect": "Connect (starts the simulated stream in simulation mode)",
            "POST /api/disconnect": "Disconnect and stop the simulated stream",
            "POST /api/source": "Body {\"source\": \"simulation\" | \"manual\"}",
            "POST /api/manual": "Body {\"mq3\", \"mq4\", \"mq8\", \"mq135\"}; blank or non-numeric fields count as 0",
            "POST /api/manual/randomize": "Propose random manual values without applying them",
            "POST /api/port": "Body {\"port\": \"..\"}",
            "POST /api/model": "Body {\"model\": \"..\"}",
        }
    }))
}

/// Build the axum router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_page))
        .route("/api", get(handle_index))
        .route("/api/snapshot", get(commands::get_snapshot))
        .route("/api/reading", get(commands::get_reading))
        .route("/api/verdict", get(commands::get_verdict))
        .route("/api/history", get(commands::get_history))
        .route("/api/options", get(commands::get_options))
        .route("/api/connect", post(commands::connect))
        .route("/api/disconnect", post(commands::disconnect))
        .route("/api/source", post(commands::set_source))
        .route("/api/manual", post(commands::inject_manual))
        .route("/api/manual/randomize", post(commands::randomize_manual))
        .route("/api/port", post(commands::set_port))
        .route("/api/model", post(commands::set_model))
        .with_state(state)
}

/// Serve until Ctrl-C, then stop the generator.
pub async fn run_server(state: AppState) -> Result<()> {
    let addr = state.settings.bind_addr();
    let dashboard = state.dashboard.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Dashboard listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    dashboard.shutdown().await;
    info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

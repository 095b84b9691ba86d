//! HTTP handlers for the dashboard page. Each one is a thin call into the controller.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    classifier::Verdict,
    dashboard::{
        DashboardController, DashboardSnapshot, DataSource, ManualForm, ManualInput,
        SelectorOptions, SessionState,
    },
    models::{HistoryEntry, Reading},
    AppState,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Controller errors surface as `400` with a JSON body.
pub struct CommandError(anyhow::Error);

impl From<anyhow::Error> for CommandError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

type CommandResult<T> = Result<Json<T>, CommandError>;

#[derive(Debug, Deserialize)]
pub struct SourceRequest {
    pub source: DataSource,
}

#[derive(Debug, Deserialize)]
pub struct PortRequest {
    pub port: String,
}

#[derive(Debug, Deserialize)]
pub struct ModelRequest {
    pub model: String,
}

fn controller_from_state(state: &AppState) -> DashboardController {
    state.dashboard.clone()
}

pub async fn get_snapshot(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    Json(controller_from_state(&state).snapshot().await)
}

pub async fn get_reading(State(state): State<AppState>) -> Json<Reading> {
    Json(controller_from_state(&state).current_reading().await)
}

pub async fn get_verdict(State(state): State<AppState>) -> Json<Verdict> {
    Json(controller_from_state(&state).verdict().await)
}

pub async fn get_history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(controller_from_state(&state).history().await)
}

pub async fn get_options(State(state): State<AppState>) -> Json<SelectorOptions> {
    Json(controller_from_state(&state).options())
}

pub async fn connect(State(state): State<AppState>) -> CommandResult<SessionState> {
    let session = controller_from_state(&state).connect().await?;
    Ok(Json(session))
}

pub async fn disconnect(State(state): State<AppState>) -> CommandResult<SessionState> {
    let session = controller_from_state(&state).disconnect().await?;
    Ok(Json(session))
}

pub async fn set_source(
    State(state): State<AppState>,
    Json(request): Json<SourceRequest>,
) -> CommandResult<SessionState> {
    let session = controller_from_state(&state)
        .set_source(request.source)
        .await?;
    Ok(Json(session))
}

pub async fn inject_manual(
    State(state): State<AppState>,
    Json(input): Json<ManualInput>,
) -> CommandResult<Reading> {
    let reading = controller_from_state(&state).inject_manual(input).await?;
    Ok(Json(reading))
}

pub async fn randomize_manual(State(state): State<AppState>) -> Json<ManualForm> {
    Json(controller_from_state(&state).randomize_manual_form())
}

pub async fn set_port(
    State(state): State<AppState>,
    Json(request): Json<PortRequest>,
) -> CommandResult<SessionState> {
    let session = controller_from_state(&state).set_port(&request.port).await?;
    Ok(Json(session))
}

pub async fn set_model(
    State(state): State<AppState>,
    Json(request): Json<ModelRequest>,
) -> CommandResult<SessionState> {
    let session = controller_from_state(&state)
        .set_model(&request.model)
        .await?;
    Ok(Json(session))
}

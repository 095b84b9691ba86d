use std::sync::Arc;

use anyhow::{bail, Result};
use log::{error, info};
use serde::Serialize;
use tokio::sync::{watch, Mutex};

use crate::{
    classifier::Verdict,
    models::{HistoryEntry, Reading},
    settings::DashboardSettings,
    stream::StreamController,
};

use super::manual::{ManualForm, ManualInput};
use super::state::{DashboardSnapshot, DashboardState, DataSource, SessionState};

/// The fixed option lists behind the port and model selectors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorOptions {
    pub serial_ports: Vec<String>,
    pub models: Vec<String>,
}

/// Owns the dashboard session and the generator lifecycle.
///
/// Every transition takes the stream lock first, so start/stop decisions are serialized
/// and at most one generator task exists.
#[derive(Clone)]
pub struct DashboardController {
    state: Arc<Mutex<DashboardState>>,
    stream: Arc<Mutex<StreamController>>,
    updates: Arc<watch::Sender<u64>>,
    options: Arc<SelectorOptions>,
}

impl DashboardController {
    pub fn new(settings: &DashboardSettings) -> Self {
        let session = SessionState::new(settings.default_port(), settings.default_model());
        let (updates, _) = watch::channel(0);

        Self {
            state: Arc::new(Mutex::new(DashboardState::new(
                session,
                settings.history_capacity,
            ))),
            stream: Arc::new(Mutex::new(StreamController::new(
                settings.tick_interval(),
                settings.simulation_seed,
            ))),
            updates: Arc::new(updates),
            options: Arc::new(SelectorOptions {
                serial_ports: settings.serial_ports.clone(),
                models: settings.models.clone(),
            }),
        }
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn current_reading(&self) -> Reading {
        self.state.lock().await.reading()
    }

    pub async fn verdict(&self) -> Verdict {
        self.state.lock().await.verdict()
    }

    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.state.lock().await.history().entries()
    }

    pub async fn session(&self) -> SessionState {
        self.state.lock().await.session.clone()
    }

    pub fn options(&self) -> SelectorOptions {
        self.options.as_ref().clone()
    }

    /// Receives the state revision after every change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.updates.subscribe()
    }

    /// Connecting always means simulating: a session left in manual mode is switched back.
    pub async fn connect(&self) -> Result<SessionState> {
        let mut stream = self.stream.lock().await;

        let session = {
            let mut state = self.state.lock().await;
            if !state.session.connected {
                state.session.connected = true;
                state.session.source = DataSource::Simulation;
                let revision = state.touch();
                self.publish(revision);
                info!("Connected on {} (simulation mode)", state.session.port);
            }
            state.session.clone()
        };

        if session.is_simulating() && !stream.is_running() {
            stream.start(self.state.clone(), self.updates.clone())?;
        }

        Ok(session)
    }

    pub async fn disconnect(&self) -> Result<SessionState> {
        let mut stream = self.stream.lock().await;

        let session = {
            let mut state = self.state.lock().await;
            if state.session.connected {
                state.session.connected = false;
                let revision = state.touch();
                self.publish(revision);
                info!("Disconnected from {}", state.session.port);
            }
            state.session.clone()
        };

        stop_stream(&mut stream).await;
        Ok(session)
    }

    /// Switching to manual also disconnects, so a connected session is always simulating.
    pub async fn set_source(&self, source: DataSource) -> Result<SessionState> {
        let mut stream = self.stream.lock().await;

        let session = {
            let mut state = self.state.lock().await;
            let disconnect = source == DataSource::Manual && state.session.connected;
            if state.session.source != source || disconnect {
                state.session.source = source;
                if disconnect {
                    state.session.connected = false;
                }
                let revision = state.touch();
                self.publish(revision);
                info!("Data source switched to {}", source.as_str());
            }
            state.session.clone()
        };

        if session.is_simulating() {
            if !stream.is_running() {
                stream.start(self.state.clone(), self.updates.clone())?;
            }
        } else {
            stop_stream(&mut stream).await;
        }

        Ok(session)
    }

    /// Replace the current reading with operator values. Forces manual mode and disconnects.
    pub async fn inject_manual(&self, input: ManualInput) -> Result<Reading> {
        let reading = input.to_reading();
        let mut stream = self.stream.lock().await;

        {
            let mut state = self.state.lock().await;
            state.session.source = DataSource::Manual;
            state.session.connected = false;
            let revision = state.record(reading);
            self.publish(revision);
        }

        stop_stream(&mut stream).await;

        info!(
            "Manual reading injected: mq3={} mq4={} mq8={} mq135={}",
            reading.mq3, reading.mq4, reading.mq8, reading.mq135
        );
        Ok(reading)
    }

    /// Propose random values for the manual form. The active reading is untouched.
    pub fn randomize_manual_form(&self) -> ManualForm {
        ManualForm::random(&mut rand::thread_rng())
    }

    pub async fn set_port(&self, port: &str) -> Result<SessionState> {
        if !self.options.serial_ports.iter().any(|p| p == port) {
            bail!("unknown port '{port}'");
        }

        let mut state = self.state.lock().await;
        if state.session.port != port {
            state.session.port = port.to_string();
            let revision = state.touch();
            self.publish(revision);
        }
        Ok(state.session.clone())
    }

    pub async fn set_model(&self, model: &str) -> Result<SessionState> {
        if !self.options.models.iter().any(|m| m == model) {
            bail!("unknown model '{model}'");
        }

        let mut state = self.state.lock().await;
        if state.session.model != model {
            state.session.model = model.to_string();
            let revision = state.touch();
            self.publish(revision);
        }
        Ok(state.session.clone())
    }

    /// Stop the generator without touching the session flags.
    pub async fn shutdown(&self) {
        let mut stream = self.stream.lock().await;
        stop_stream(&mut stream).await;
    }

    pub async fn generator_running(&self) -> bool {
        self.stream.lock().await.is_running()
    }

    fn publish(&self, revision: u64) {
        self.updates.send_replace(revision);
    }
}

/// The session flags are already updated by the time we get here, so a failed join is
/// only worth a log line.
async fn stop_stream(stream: &mut StreamController) {
    if let Err(e) = stream.stop().await {
        error!("Failed to stop simulated stream: {e:#}");
    }
}

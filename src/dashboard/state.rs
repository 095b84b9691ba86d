use serde::{Deserialize, Serialize};

use crate::classifier::{classify, Verdict};
use crate::history::HistoryBuffer;
use crate::models::{HistoryEntry, Reading};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DataSource {
    Simulation,
    Manual,
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Simulation
    }
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Simulation => "simulation",
            DataSource::Manual => "manual",
        }
    }
}

/// Operator-facing session flags. Port and model are display-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub connected: bool,
    pub source: DataSource,
    pub port: String,
    pub model: String,
}

impl SessionState {
    pub fn new(port: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            connected: false,
            source: DataSource::Simulation,
            port: port.into(),
            model: model.into(),
        }
    }

    /// The generator may only produce readings in this state.
    pub fn is_simulating(&self) -> bool {
        self.connected && self.source == DataSource::Simulation
    }
}

/// Everything the presentation layer renders, captured at one instant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub session: SessionState,
    pub reading: Reading,
    pub verdict: Verdict,
    pub history: Vec<HistoryEntry>,
    pub revision: u64,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    pub session: SessionState,
    reading: Reading,
    history: HistoryBuffer,
    /// Bumped on every observable change.
    revision: u64,
}

impl DashboardState {
    pub fn new(session: SessionState, history_capacity: usize) -> Self {
        Self {
            session,
            reading: Reading::default(),
            history: HistoryBuffer::with_capacity(history_capacity),
            revision: 0,
        }
    }

    pub fn reading(&self) -> Reading {
        self.reading
    }

    pub fn verdict(&self) -> Verdict {
        classify(&self.reading)
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    pub fn is_simulating(&self) -> bool {
        self.session.is_simulating()
    }

    /// Replace the current reading and append it to the history.
    pub fn record(&mut self, reading: Reading) -> u64 {
        self.reading = reading;
        self.history.push(HistoryEntry::now(reading));
        self.touch()
    }

    pub fn touch(&mut self) -> u64 {
        self.revision = self.revision.wrapping_add(1);
        self.revision
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            session: self.session.clone(),
            reading: self.reading,
            verdict: self.verdict(),
            history: self.history.entries(),
            revision: self.revision,
        }
    }
}

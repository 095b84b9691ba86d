use chrono::Local;
use serde::{Deserialize, Serialize};

use super::Reading;

const DISPLAY_TIME_FORMAT: &str = "%H:%M:%S";

/// A reading stamped with the wall-clock time it was recorded, as shown on the chart axis.
///
/// Serializes flat (`{time, mq3, mq4, mq8, mq135}`) so chart series can read it directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub time: String,
    #[serde(flatten)]
    pub reading: Reading,
}

impl HistoryEntry {
    pub fn new(time: impl Into<String>, reading: Reading) -> Self {
        Self {
            time: time.into(),
            reading,
        }
    }

    /// Stamps `reading` with the current local time.
    pub fn now(reading: Reading) -> Self {
        Self::new(Local::now().format(DISPLAY_TIME_FORMAT).to_string(), reading)
    }
}

use serde::{Deserialize, Serialize};

use crate::classifier::config::ClassifierConfig;
use crate::models::Reading;

const SPOILED_LABEL: &str = "Spoiled";
const SPOILED_DETAILS: &str =
    "High alcohol/VOC concentration detected. The food is likely no longer safe to eat.";
const FRESH_LABEL: &str = "Fresh";
const FRESH_DETAILS: &str = "Gas levels are within the normal range. The food is safe to eat.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictStatus {
    Spoiled,
    Fresh,
}

/// Spoilage classification derived from a single reading. Never stored; recompute it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub status: VerdictStatus,
    pub label: String,
    /// Percentage in `[0, cap]`, rounded to hundredths.
    pub confidence_score: f64,
    pub details: String,
}

impl Verdict {
    /// Confidence rendered with exactly two decimals, e.g. `"85.10"`.
    pub fn confidence_display(&self) -> String {
        format!("{:.2}", self.confidence_score)
    }

    pub fn is_spoiled(&self) -> bool {
        self.status == VerdictStatus::Spoiled
    }
}

/// Classify a reading with the default thresholds.
pub fn classify(reading: &Reading) -> Verdict {
    classify_with(reading, &ClassifierConfig::default())
}

/// Classify a reading. Only the primary `mq3` channel is consulted.
pub fn classify_with(reading: &Reading, config: &ClassifierConfig) -> Verdict {
    let level = reading.mq3;
    let threshold = config.spoiled_threshold;

    let (status, raw_confidence) = if level > threshold {
        (
            VerdictStatus::Spoiled,
            config.spoiled_base + (level - threshold) * config.spoiled_slope,
        )
    } else {
        (
            VerdictStatus::Fresh,
            config.fresh_base + (threshold - level) * config.fresh_slope,
        )
    };

    let (label, details) = match status {
        VerdictStatus::Spoiled => (SPOILED_LABEL, SPOILED_DETAILS),
        VerdictStatus::Fresh => (FRESH_LABEL, FRESH_DETAILS),
    };

    Verdict {
        status,
        label: label.to_string(),
        confidence_score: round_hundredths(clamp_confidence(raw_confidence, config)),
        details: details.to_string(),
    }
}

fn clamp_confidence(raw: f64, config: &ClassifierConfig) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, config.confidence_cap)
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

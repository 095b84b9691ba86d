//! Gas-sensor reading data model.
//!
//! A single four-channel snapshot. Readings are replaced wholesale on every
//! generator tick or manual injection, never patched field by field.

use serde::{Deserialize, Serialize};

/// Four independent gas-sensor channels. Every channel is kept `>= 0`.
///
/// `mq3` (alcohol/VOC) is the primary channel the verdict is computed from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub mq3: f64,
    pub mq4: f64,
    pub mq8: f64,
    pub mq135: f64,
}

impl Default for Reading {
    fn default() -> Self {
        Self {
            mq3: 150.0,
            mq4: 200.0,
            mq8: 150.0,
            mq135: 300.0,
        }
    }
}

impl Reading {
    /// Builds a reading, flooring every channel at zero. NaN collapses to zero as well.
    pub fn clamped(mq3: f64, mq4: f64, mq8: f64, mq135: f64) -> Self {
        Self {
            mq3: floor_zero(mq3),
            mq4: floor_zero(mq4),
            mq8: floor_zero(mq8),
            mq135: floor_zero(mq135),
        }
    }

    pub fn channels(&self) -> [f64; 4] {
        [self.mq3, self.mq4, self.mq8, self.mq135]
    }

    pub fn is_valid(&self) -> bool {
        self.channels().iter().all(|v| *v >= 0.0)
    }
}

fn floor_zero(value: f64) -> f64 {
    // f64::max returns the non-NaN operand
    value.max(0.0)
}

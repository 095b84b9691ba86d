//! Operator-supplied readings.
//!
//! Manual input is deliberately lenient: anything that is not a finite number becomes 0.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Reading;

const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// Exclusive upper bounds for proposed form values, per channel.
pub const MQ3_FORM_MAX: u32 = 500;
pub const MQ4_FORM_MAX: u32 = 400;
pub const MQ8_FORM_MAX: u32 = 300;
pub const MQ135_FORM_MAX: u32 = 600;

/// One raw form field as typed by the operator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ManualField {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl ManualField {
    pub fn coerce(&self) -> Option<f64> {
        let value = match self {
            ManualField::Number(n) => Some(*n),
            ManualField::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            ManualField::Other(_) => None,
        };
        value.filter(|v| v.is_finite())
    }
}

impl From<f64> for ManualField {
    fn from(value: f64) -> Self {
        ManualField::Number(value)
    }
}

impl From<&str> for ManualField {
    fn from(value: &str) -> Self {
        ManualField::Text(value.to_string())
    }
}

/// The four manual form fields. Missing fields count as blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ManualInput {
    pub mq3: Option<ManualField>,
    pub mq4: Option<ManualField>,
    pub mq8: Option<ManualField>,
    pub mq135: Option<ManualField>,
}

impl ManualInput {
    pub fn new(
        mq3: impl Into<ManualField>,
        mq4: impl Into<ManualField>,
        mq8: impl Into<ManualField>,
        mq135: impl Into<ManualField>,
    ) -> Self {
        Self {
            mq3: Some(mq3.into()),
            mq4: Some(mq4.into()),
            mq8: Some(mq8.into()),
            mq135: Some(mq135.into()),
        }
    }

    pub fn to_reading(&self) -> Reading {
        Reading::clamped(
            coerce_field("mq3", self.mq3.as_ref()),
            coerce_field("mq4", self.mq4.as_ref()),
            coerce_field("mq8", self.mq8.as_ref()),
            coerce_field("mq135", self.mq135.as_ref()),
        )
    }
}

fn coerce_field(name: &str, field: Option<&ManualField>) -> f64 {
    match field {
        None => 0.0,
        Some(raw) => raw.coerce().unwrap_or_else(|| {
            if !matches!(raw, ManualField::Text(t) if t.trim().is_empty()) {
                log_warn!("manual field {} is not numeric ({:?}); using 0", name, raw);
            }
            0.0
        }),
    }
}

/// Proposed manual values for the operator to review before injecting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManualForm {
    pub mq3: u32,
    pub mq4: u32,
    pub mq8: u32,
    pub mq135: u32,
}

impl ManualForm {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            mq3: rng.gen_range(0..MQ3_FORM_MAX),
            mq4: rng.gen_range(0..MQ4_FORM_MAX),
            mq8: rng.gen_range(0..MQ8_FORM_MAX),
            mq135: rng.gen_range(0..MQ135_FORM_MAX),
        }
    }
}

impl From<ManualForm> for ManualInput {
    fn from(form: ManualForm) -> Self {
        ManualInput::new(
            f64::from(form.mq3),
            f64::from(form.mq4),
            f64::from(form.mq8),
            f64::from(form.mq135),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn blank_and_garbage_become_zero() {
        let input = ManualInput::new("abc", "50", "", "10");
        assert_eq!(input.to_reading(), Reading::clamped(0.0, 50.0, 0.0, 10.0));
    }

    #[test]
    fn missing_fields_become_zero() {
        let input: ManualInput = serde_json::from_str(r#"{"mq4": 12.5}"#).unwrap();
        assert_eq!(input.to_reading(), Reading::clamped(0.0, 12.5, 0.0, 0.0));
    }

    #[test]
    fn accepts_numbers_strings_and_junk_in_json() {
        let input: ManualInput =
            serde_json::from_str(r#"{"mq3": "320", "mq4": 40, "mq8": true, "mq135": null}"#)
                .unwrap();
        assert_eq!(input.to_reading(), Reading::clamped(320.0, 40.0, 0.0, 0.0));
    }

    #[test]
    fn negative_and_non_finite_are_floored() {
        let input = ManualInput::new("-30", f64::INFINITY, " 7 ", "NaN");
        assert_eq!(input.to_reading(), Reading::clamped(0.0, 0.0, 7.0, 0.0));
    }

    #[test]
    fn random_form_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1_000 {
            let form = ManualForm::random(&mut rng);
            assert!(form.mq3 < MQ3_FORM_MAX);
            assert!(form.mq4 < MQ4_FORM_MAX);
            assert!(form.mq8 < MQ8_FORM_MAX);
            assert!(form.mq135 < MQ135_FORM_MAX);
        }
    }

    #[test]
    fn form_converts_to_input() {
        let form = ManualForm {
            mq3: 310,
            mq4: 20,
            mq8: 0,
            mq135: 599,
        };
        let reading = ManualInput::from(form).to_reading();
        assert_eq!(reading, Reading::clamped(310.0, 20.0, 0.0, 599.0));
    }
}

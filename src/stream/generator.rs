//! Random-walk step for the simulated sensor stream.
//!
//! Only the primary channel walks; the secondaries are redrawn around fixed centres on
//! every step and never look at their previous value.

use rand::Rng;

use crate::models::Reading;

/// A uniform draw above this value turns the step into a spike (15% of steps).
pub const SPIKE_CUTOFF: f64 = 0.85;
/// Half-width of the primary channel's ordinary step.
pub const WALK_STEP: f64 = 20.0;
/// Below this level a spike jumps up toward the spoilage threshold, otherwise it falls back.
pub const SPIKE_PIVOT: f64 = 200.0;
pub const SPIKE_RISE: f64 = 150.0;
pub const SPIKE_FALL: f64 = -100.0;

/// Centre and half-width of a secondary channel's uniform band.
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub center: f64,
    pub spread: f64,
}

pub const MQ4_BAND: Band = Band {
    center: 200.0,
    spread: 10.0,
};
pub const MQ8_BAND: Band = Band {
    center: 150.0,
    spread: 7.5,
};
pub const MQ135_BAND: Band = Band {
    center: 300.0,
    spread: 15.0,
};

/// Produce the reading that follows `previous`.
pub fn next_reading<R: Rng + ?Sized>(previous: &Reading, rng: &mut R) -> Reading {
    let is_spike = rng.gen::<f64>() > SPIKE_CUTOFF;
    let delta = if is_spike {
        spike_delta(previous.mq3)
    } else {
        rng.gen_range(-WALK_STEP..WALK_STEP)
    };

    Reading::clamped(
        previous.mq3 + delta,
        sample_band(rng, MQ4_BAND),
        sample_band(rng, MQ8_BAND),
        sample_band(rng, MQ135_BAND),
    )
}

/// Fixed jump applied to the primary channel on a spike.
pub fn spike_delta(previous_primary: f64) -> f64 {
    if previous_primary < SPIKE_PIVOT {
        SPIKE_RISE
    } else {
        SPIKE_FALL
    }
}

fn sample_band<R: Rng + ?Sized>(rng: &mut R, band: Band) -> f64 {
    band.center + rng.gen_range(-band.spread..band.spread)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn spike_direction_depends_on_pivot() {
        assert_eq!(spike_delta(0.0), SPIKE_RISE);
        assert_eq!(spike_delta(199.9), SPIKE_RISE);
        assert_eq!(spike_delta(200.0), SPIKE_FALL);
        assert_eq!(spike_delta(750.0), SPIKE_FALL);
    }

    #[test]
    fn primary_moves_by_step_or_spike() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut previous = Reading::default();

        for _ in 0..2_000 {
            let next = next_reading(&previous, &mut rng);
            let delta = next.mq3 - previous.mq3;
            let ordinary = delta.abs() <= WALK_STEP + 1e-9;
            let spike = (delta - SPIKE_RISE).abs() < 1e-9 || (delta - SPIKE_FALL).abs() < 1e-9;
            // flooring at zero can shorten a downward move
            let floored = next.mq3 == 0.0;
            assert!(ordinary || spike || floored, "unexpected delta {delta}");
            previous = next;
        }
    }

    #[test]
    fn secondaries_stay_in_their_bands() {
        let mut rng = StdRng::seed_from_u64(11);
        let previous = Reading::clamped(900.0, 9_000.0, 9_000.0, 9_000.0);

        for _ in 0..1_000 {
            let next = next_reading(&previous, &mut rng);
            for (value, band) in [
                (next.mq4, MQ4_BAND),
                (next.mq8, MQ8_BAND),
                (next.mq135, MQ135_BAND),
            ] {
                assert!(value >= band.center - band.spread);
                assert!(value < band.center + band.spread);
            }
        }
    }

    #[test]
    fn spikes_occur_at_roughly_fifteen_percent() {
        let mut rng = StdRng::seed_from_u64(3);
        let previous = Reading::clamped(100.0, 0.0, 0.0, 0.0);
        let trials = 20_000;
        let spikes = (0..trials)
            .filter(|_| next_reading(&previous, &mut rng).mq3 == 100.0 + SPIKE_RISE)
            .count();
        let rate = spikes as f64 / trials as f64;
        assert!((0.12..0.18).contains(&rate), "spike rate {rate}");
    }

    #[test]
    fn walk_never_goes_negative_from_zero() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut reading = Reading::clamped(0.0, 0.0, 0.0, 0.0);
        for _ in 0..5_000 {
            reading = next_reading(&reading, &mut rng);
            assert!(reading.is_valid());
        }
    }
}

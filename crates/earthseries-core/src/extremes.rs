//! Extreme event intensity
//!
//! Each year an extreme event occurs with a probability that grows by 0.1
//! percentage points per year from 10% in 1850, capped at 80%. An event's
//! intensity grows by 0.5 per century from the same reference year.

use crate::cycle::TREND_REFERENCE_YEAR;
use crate::noise::NoiseSource;

const BASE_PROBABILITY: f64 = 0.1;
const PROBABILITY_PER_YEAR: f64 = 0.001;
const MAX_PROBABILITY: f64 = 0.8;
const INTENSITY_PER_CENTURY: f64 = 0.5;

/// Intensity of a year without an extreme event.
pub const NO_EVENT: f64 = 1.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtremeEventModel;

impl ExtremeEventModel {
    pub fn probability(&self, year: i32) -> f64 {
        let elapsed = f64::from(year - TREND_REFERENCE_YEAR);
        (BASE_PROBABILITY + PROBABILITY_PER_YEAR * elapsed).clamp(0.0, MAX_PROBABILITY)
    }

    /// Intensity of an event occurring in `year`. Never below [`NO_EVENT`].
    pub fn event_intensity(&self, year: i32) -> f64 {
        let elapsed = f64::from(year - TREND_REFERENCE_YEAR);
        (NO_EVENT + INTENSITY_PER_CENTURY * elapsed / 100.0).max(NO_EVENT)
    }

    /// Draw one uniform sample and return the year's intensity.
    pub fn intensity(&self, year: i32, noise: &mut dyn NoiseSource) -> f64 {
        if noise.uniform() < self.probability(year) {
            self.event_intensity(year)
        } else {
            NO_EVENT
        }
    }
}

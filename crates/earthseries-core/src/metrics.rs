//! Derived metrics
//!
//! Everything in a [`YearRecord`](crate::record::YearRecord) other than the
//! cycle value, the trend factors and the extreme event intensity is derived
//! here. All metrics are pure functions of the year and the profile, except:
//!
//! - smoothing, which reads the neighbouring years' cycle values and so runs as
//!   a second pass once the whole cycle sequence exists;
//! - the future projection, which draws from the projection noise source for
//!   years after the projection start.

use crate::config::GeneratorConfig;
use crate::cycle::TREND_REFERENCE_YEAR;
use crate::noise::NoiseSource;
use crate::profile::{TrendDirection, VariableKind, VariableProfile};
use std::f64::consts::TAU;
use std::ops::RangeInclusive;

/// Upper bound of the risk score.
pub const MAX_RISK: f64 = 100.0;

const INDEX_CYCLE_WEIGHT: f64 = 0.6;
const INDEX_TREND_WEIGHT: f64 = 0.4;
const RISK_PER_IMPACT: f64 = 20.0;
const RISK_PER_EXTREME: f64 = 50.0;
const UNCERTAINTY_PER_YEAR: f64 = 0.03;

/// Multiplicative bounds of the seasonal range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalEnvelope {
    pub min_factor: f64,
    pub max_factor: f64,
}

#[derive(Debug, Clone)]
pub struct DerivedMetricsEngine {
    kind: VariableKind,
    base_value: f64,
    trend: TrendDirection,
    start_year: i32,
    record_month: u32,
    smoothing_half_window: usize,
    projection_start_year: i32,
}

impl DerivedMetricsEngine {
    pub fn new(kind: VariableKind, profile: &VariableProfile, config: &GeneratorConfig) -> Self {
        Self {
            kind,
            base_value: profile.base_value,
            trend: profile.trend,
            start_year: config.start_year,
            record_month: config.record_month,
            smoothing_half_window: config.smoothing_half_window,
            projection_start_year: config.projection_start_year,
        }
    }

    /// Position of the record within its year, in `[0, 1)`.
    ///
    /// Records are annual, so this is always 0 for integer years. It is kept
    /// as a column so a sub-annual sampling can fill it in later.
    pub fn annual_phase(&self, year: i32) -> f64 {
        f64::from(year - self.start_year).rem_euclid(1.0)
    }

    pub fn seasonal_envelope(&self, phase: f64) -> SeasonalEnvelope {
        if self.kind == VariableKind::Temperature {
            // Winter in the first and last quarter, summer in the middle half
            let summer = (0.25..=0.75).contains(&phase);
            SeasonalEnvelope {
                min_factor: if phase < 0.25 || phase > 0.75 { 0.7 } else { 1.0 },
                max_factor: if summer { 1.0 } else { 0.8 },
            }
        } else {
            let swing = 0.2 * (TAU * phase).sin();
            SeasonalEnvelope {
                min_factor: 0.8 + swing,
                max_factor: 1.0 + swing,
            }
        }
    }

    /// Indices averaged for position `index` in a sequence of `len` values.
    ///
    /// The window is centred and inclusive, clipped at both ends of the sequence.
    pub fn smoothing_window(&self, index: usize, len: usize) -> RangeInclusive<usize> {
        let start = index.saturating_sub(self.smoothing_half_window);
        let end = index
            .saturating_add(self.smoothing_half_window)
            .min(len.saturating_sub(1));
        start..=end
    }

    /// Centred moving average of `values`.
    pub fn smooth(&self, values: &[f64]) -> Vec<f64> {
        (0..values.len())
            .map(|i| {
                let window = &values[self.smoothing_window(i, values.len())];
                window.iter().sum::<f64>() / window.len() as f64
            })
            .collect()
    }

    /// Seasonal modulation for the record's month stamp.
    pub fn monthly_variation(&self) -> f64 {
        1.0 + 0.1 * (TAU * f64::from(self.record_month - 1) / 12.0).sin()
    }

    pub fn decadal_variation(&self, year: i32) -> f64 {
        1.0 + 0.05 * (TAU * f64::from(year - TREND_REFERENCE_YEAR) / 10.0).sin()
    }

    pub fn environmental_index(&self, cycle_value: f64, climate_trend: f64) -> f64 {
        INDEX_CYCLE_WEIGHT * cycle_value + INDEX_TREND_WEIGHT * climate_trend * self.base_value
    }

    /// Risk score in `[0, 100]`.
    pub fn risk_level(&self, human_impact: f64, extreme_intensity: f64) -> f64 {
        (human_impact * RISK_PER_IMPACT + (extreme_intensity - 1.0) * RISK_PER_EXTREME)
            .clamp(0.0, MAX_RISK)
    }

    /// Standard deviation of the projection noise, zero up to the projection start.
    pub fn projection_uncertainty(&self, year: i32) -> f64 {
        let horizon = year - self.projection_start_year;
        if horizon > 0 {
            UNCERTAINTY_PER_YEAR * f64::from(horizon)
        } else {
            0.0
        }
    }

    /// Projected value for `year`.
    ///
    /// Up to the projection start this is the cycle value itself and no noise
    /// is drawn. Afterwards one normal sample is drawn with a spread growing
    /// linearly with the horizon.
    pub fn future_projection(
        &self,
        year: i32,
        cycle_value: f64,
        climate_trend: f64,
        noise: &mut dyn NoiseSource,
    ) -> f64 {
        if year <= self.projection_start_year {
            return cycle_value;
        }

        let uncertainty = self.projection_uncertainty(year);
        match self.trend {
            TrendDirection::Increasing => {
                cycle_value * climate_trend * (1.0 + noise.normal(0.02, uncertainty))
            }
            TrendDirection::Decreasing => {
                cycle_value * climate_trend * (1.0 - noise.normal(0.01, uncertainty))
            }
            TrendDirection::Variable => cycle_value * (1.0 + noise.normal(0.0, uncertainty)),
        }
    }
}

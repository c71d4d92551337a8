//! Primary cycle signal
//!
//! The cycle value of a year is a sinusoid around a slowly drifting base level,
//! plus Gaussian noise scaled to the profile amplitude:
//!
//! $$ v(y) = B \cdot f_{trend}(y) + A \sin\left(\frac{2\pi (y - y_0)}{P}\right) + \epsilon,\quad \epsilon \sim N(0, 0.05A) $$

use crate::noise::NoiseSource;
use crate::profile::{TrendDirection, VariableProfile};
use std::f64::consts::TAU;
use std::ops::RangeInclusive;

/// Year the linear base drift is measured from, independent of where a series starts.
pub const TREND_REFERENCE_YEAR: i32 = 1850;

/// Drift of the base level: 1% per century.
const DRIFT_PER_YEAR: f64 = 0.0001;

/// Noise standard deviation as a fraction of the amplitude.
const NOISE_FRACTION: f64 = 0.05;

#[derive(Debug, Clone)]
pub struct CycleGenerator {
    base_value: f64,
    cycle_years: f64,
    amplitude: f64,
    trend: TrendDirection,
    start_year: i32,
}

impl CycleGenerator {
    /// The profile is expected to be validated; `cycle_years` must be positive.
    pub fn new(profile: &VariableProfile, start_year: i32) -> Self {
        Self {
            base_value: profile.base_value,
            cycle_years: profile.cycle_years,
            amplitude: profile.amplitude,
            trend: profile.trend,
            start_year,
        }
    }

    /// Oscillation term in `[-1, 1]`.
    pub fn phase(&self, year: i32) -> f64 {
        (TAU * f64::from(year - self.start_year) / self.cycle_years).sin()
    }

    /// Multiplier applied to the base level for the profile's trend direction.
    pub fn trend_factor(&self, year: i32) -> f64 {
        let drift = DRIFT_PER_YEAR * f64::from(year - TREND_REFERENCE_YEAR);
        match self.trend {
            TrendDirection::Increasing => 1.0 + drift,
            TrendDirection::Decreasing => 1.0 - drift,
            TrendDirection::Variable => 1.0,
        }
    }

    /// Cycle value without noise.
    pub fn deterministic_value(&self, year: i32) -> f64 {
        self.base_value * self.trend_factor(year) + self.amplitude * self.phase(year)
    }

    pub fn noise_std_dev(&self) -> f64 {
        self.amplitude * NOISE_FRACTION
    }

    /// Cycle value for one year, drawing one normal sample from `noise`.
    pub fn value(&self, year: i32, noise: &mut dyn NoiseSource) -> f64 {
        self.deterministic_value(year) + noise.normal(0.0, self.noise_std_dev())
    }

    /// Cycle values for every year in `years`, in order.
    pub fn generate(&self, years: RangeInclusive<i32>, noise: &mut dyn NoiseSource) -> Vec<f64> {
        years.map(|year| self.value(year, noise)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{ConstantNoise, SeededNoise};
    use crate::profile::VariableKind;
    use approx::assert_relative_eq;

    #[test]
    fn test_integer_years_sit_on_zero_phase_for_annual_cycles() {
        let generator = CycleGenerator::new(&VariableKind::Temperature.profile(), 1850);
        for year in [1850, 1900, 2025] {
            assert!(generator.phase(year).abs() < 1e-9);
        }
    }

    #[test]
    fn test_decadal_cycle_oscillates() {
        let generator = CycleGenerator::new(&VariableKind::Glaciers.profile(), 1850);
        assert_relative_eq!(generator.phase(1852), (TAU * 0.2).sin(), epsilon = 1e-12);
        assert!(generator.phase(1852) > 0.9);
        assert!(generator.phase(1857) < -0.9);
    }

    #[test]
    fn test_trend_factor_follows_direction() {
        let increasing = CycleGenerator::new(&VariableKind::Co2.profile(), 1850);
        let decreasing = CycleGenerator::new(&VariableKind::Glaciers.profile(), 1850);
        let variable = CycleGenerator::new(&VariableKind::Precipitation.profile(), 1850);

        assert_relative_eq!(increasing.trend_factor(1950), 1.01, epsilon = 1e-12);
        assert_relative_eq!(decreasing.trend_factor(1950), 0.99, epsilon = 1e-12);
        assert_eq!(variable.trend_factor(1950), 1.0);
        assert_eq!(increasing.trend_factor(TREND_REFERENCE_YEAR), 1.0);
    }

    #[test]
    fn test_trend_reference_does_not_move_with_start_year() {
        let generator = CycleGenerator::new(&VariableKind::Co2.profile(), 1900);
        assert_relative_eq!(generator.trend_factor(1950), 1.01, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_noise_yields_deterministic_value() {
        let generator = CycleGenerator::new(&VariableKind::Co2.profile(), 1850);
        let mut noise = ConstantNoise::default();
        let values = generator.generate(1850..=1860, &mut noise);

        assert_eq!(values.len(), 11);
        for (year, value) in (1850..=1860).zip(values) {
            assert_eq!(value, generator.deterministic_value(year));
        }
    }

    #[test]
    fn test_noise_is_scaled_to_amplitude() {
        let profile = VariableKind::Precipitation.profile();
        let generator = CycleGenerator::new(&profile, 1850);
        let mut noise = SeededNoise::from_seed_stream(11, 0);

        let residuals: Vec<f64> = (0..2000)
            .map(|_| generator.value(1850, &mut noise) - generator.deterministic_value(1850))
            .collect();
        let mean = residuals.iter().sum::<f64>() / residuals.len() as f64;
        let var = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
            / (residuals.len() - 1) as f64;

        // amplitude 300 -> std dev 15
        assert_relative_eq!(var.sqrt(), 15.0, max_relative = 0.1);
        assert!(mean.abs() < 1.5);
    }
}

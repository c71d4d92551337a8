//! Series builder
//!
//! Orchestrates the generators into a complete record sequence:
//!
//! 1. cycle values for every year (cycle noise)
//! 2. smoothing over the full cycle sequence
//! 3. per-year trend factors, extreme events (extreme noise) and derived metrics,
//!    including the projection (projection noise)
//! 4. the historical event overlay
//!
//! All validation happens in [`SeriesBuilder::new`]; generation itself cannot
//! fail, so a caller either gets no builder or a complete sequence.

use crate::config::GeneratorConfig;
use crate::cycle::CycleGenerator;
use crate::errors::SeriesResult;
use crate::extremes::ExtremeEventModel;
use crate::metrics::DerivedMetricsEngine;
use crate::noise::{NoiseStreams, SeededStreams};
use crate::overlay::EventOverlay;
use crate::profile::{VariableKind, VariableProfile};
use crate::record::YearRecord;
use crate::trend::TrendCurve;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SeriesBuilder {
    kind: VariableKind,
    profile: VariableProfile,
    config: GeneratorConfig,
    climate_trend: TrendCurve,
    human_impact: TrendCurve,
    extremes: ExtremeEventModel,
    overlay: EventOverlay,
}

impl SeriesBuilder {
    /// Create a builder for `kind`, validating the configuration and profile.
    ///
    /// A profile in the configuration replaces the built-in profile of `kind`;
    /// `kind` still decides the seasonal envelope and which historical events apply.
    pub fn new(kind: VariableKind, config: GeneratorConfig) -> SeriesResult<Self> {
        config.validate()?;

        let profile = match &config.profile {
            Some(profile) => {
                warn!(
                    kind = %kind,
                    description = %profile.description,
                    "overriding built-in profile"
                );
                profile.clone()
            }
            None => kind.profile(),
        };
        profile.validate()?;

        Ok(Self {
            kind,
            profile,
            overlay: EventOverlay::new(config.overlay_mode),
            config,
            climate_trend: TrendCurve::climate(),
            human_impact: TrendCurve::human_impact(),
            extremes: ExtremeEventModel,
        })
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn profile(&self) -> &VariableProfile {
        &self.profile
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn overlay(&self) -> &EventOverlay {
        &self.overlay
    }

    /// Generate the series with independent seeded streams for each noise source.
    pub fn generate(&self, seed: u64) -> Vec<YearRecord> {
        let mut streams = SeededStreams::from_seed(seed);
        self.generate_with(&mut streams.as_streams())
    }

    /// Generate the series, drawing from the supplied noise sources.
    pub fn generate_with(&self, noise: &mut NoiseStreams<'_>) -> Vec<YearRecord> {
        let records = self.generate_without_overlay(noise);

        debug!(mode = ?self.overlay.mode(), "applying historical events");
        let records = self.overlay.apply(&records, self.kind);

        info!(
            kind = %self.kind,
            records = records.len(),
            "generated series {}..={}",
            self.config.start_year,
            self.config.end_year
        );
        records
    }

    /// Every field computed, before the historical event overlay.
    pub fn generate_without_overlay(&self, noise: &mut NoiseStreams<'_>) -> Vec<YearRecord> {
        let cycle = CycleGenerator::new(&self.profile, self.config.start_year);
        let metrics = DerivedMetricsEngine::new(self.kind, &self.profile, &self.config);

        debug!(kind = %self.kind, years = self.config.year_count(), "generating cycle values");
        let cycle_values = cycle.generate(self.config.years(), &mut *noise.cycle);

        debug!(
            half_window = self.config.smoothing_half_window,
            "smoothing cycle values"
        );
        let smoothed = metrics.smooth(&cycle_values);
        let monthly_variation = metrics.monthly_variation();

        debug!("deriving metrics");
        self.config
            .years()
            .zip(cycle_values.iter().zip(&smoothed))
            .map(|(year, (&value, &smoothed_value))| {
                let climate_trend = self.climate_trend.at(year);
                let human_impact = self.human_impact.at(year);
                let extreme = self.extremes.intensity(year, &mut *noise.extremes);
                let phase = metrics.annual_phase(year);
                let envelope = metrics.seasonal_envelope(phase);

                YearRecord {
                    year,
                    base_value: value,
                    seasonal_min_factor: envelope.min_factor,
                    seasonal_max_factor: envelope.max_factor,
                    annual_cycle_phase: phase,
                    climate_trend_factor: climate_trend,
                    extreme_event_intensity: extreme,
                    human_impact_factor: human_impact,
                    smoothed_value,
                    monthly_variation_factor: monthly_variation,
                    decadal_variation_factor: metrics.decadal_variation(year),
                    environmental_index: metrics.environmental_index(value, climate_trend),
                    risk_level: metrics.risk_level(human_impact, extreme),
                    future_projection: metrics.future_projection(
                        year,
                        value,
                        climate_trend,
                        &mut *noise.projection,
                    ),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SeriesError;
    use crate::noise::ConstantNoise;

    #[test]
    fn test_rejects_invalid_override_at_construction() {
        let mut profile = VariableKind::Co2.profile();
        profile.cycle_years = -1.0;
        let config = GeneratorConfig {
            profile: Some(profile),
            ..GeneratorConfig::default()
        };

        let err = SeriesBuilder::new(VariableKind::Co2, config).unwrap_err();
        assert!(matches!(err, SeriesError::InvalidProfile { .. }));
    }

    #[test]
    fn test_rejects_empty_range() {
        let config = GeneratorConfig {
            start_year: 2000,
            end_year: 1999,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            SeriesBuilder::new(VariableKind::Co2, config),
            Err(SeriesError::EmptyYearRange { .. })
        ));
    }

    #[test]
    fn test_rejects_years_that_would_overflow_generation() {
        let config = GeneratorConfig {
            start_year: i32::MIN,
            end_year: i32::MIN + 1,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            SeriesBuilder::new(VariableKind::Co2, config),
            Err(SeriesError::InvalidConfig(_))
        ));

        let config = GeneratorConfig {
            end_year: i32::MAX,
            ..GeneratorConfig::default()
        };
        assert!(SeriesBuilder::new(VariableKind::Co2, config).is_err());
    }

    #[test]
    fn test_override_replaces_profile() {
        let mut profile = VariableKind::Co2.profile();
        profile.base_value = 400.0;
        let config = GeneratorConfig {
            profile: Some(profile),
            ..GeneratorConfig::default()
        };
        let builder = SeriesBuilder::new(VariableKind::Co2, config).unwrap();
        assert_eq!(builder.profile().base_value, 400.0);
        assert_eq!(builder.kind(), VariableKind::Co2);
    }

    #[test]
    fn test_single_year_range() {
        let config = GeneratorConfig {
            start_year: 1900,
            end_year: 1900,
            ..GeneratorConfig::default()
        };
        let builder = SeriesBuilder::new(VariableKind::SeaLevel, config).unwrap();
        let records = builder.generate(3);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, 1900);
        assert_eq!(records[0].smoothed_value, records[0].base_value);
    }

    #[test]
    fn test_quiet_noise_matches_closed_form() {
        let builder = SeriesBuilder::new(VariableKind::Co2, GeneratorConfig::default()).unwrap();
        let (mut cycle, mut extremes, mut projection) = (
            ConstantNoise::default(),
            ConstantNoise::default(),
            ConstantNoise::default(),
        );
        let mut noise = NoiseStreams::new(&mut cycle, &mut extremes, &mut projection);
        let records = builder.generate_without_overlay(&mut noise);

        let generator = CycleGenerator::new(builder.profile(), 1850);
        for record in &records {
            let year = record.year;
            let value = generator.deterministic_value(year);
            assert_eq!(record.base_value, value);
            assert_eq!(record.extreme_event_intensity, 1.0);
            assert_eq!(record.climate_trend_factor, TrendCurve::climate().at(year));
            assert_eq!(record.human_impact_factor, TrendCurve::human_impact().at(year));
            assert_eq!(record.risk_level, (record.human_impact_factor * 20.0).min(100.0));
            assert_eq!(record.seasonal_min_factor, 0.8);
            assert_eq!(record.seasonal_max_factor, 1.0);
            if year <= 2020 {
                assert_eq!(record.future_projection, value);
            } else {
                let expected = value * record.climate_trend_factor * (1.0 + 0.02);
                assert!((record.future_projection - expected).abs() < 1e-9);
            }
        }
    }
}

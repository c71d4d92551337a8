//! Generator configuration
//!
//! Run settings for [`SeriesBuilder`](crate::builder::SeriesBuilder). Every
//! field has a default, so a TOML file only needs to list what it changes:
//!
//! ```toml
//! start_year = 1800
//! overlay_mode = "legacy"
//!
//! [profile]
//! base_value = 5.0
//! cycle_years = 11.0
//! amplitude = 1.5
//! trend = "variable"
//! unit = "W/m^2"
//! description = "Solar irradiance anomaly"
//! ```

use crate::errors::{SeriesError, SeriesResult};
use crate::overlay::OverlayMode;
use crate::profile::VariableProfile;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Earliest year a configuration may name.
pub const MIN_YEAR: i32 = 1000;

/// Latest year a configuration may name.
pub const MAX_YEAR: i32 = 3000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// First generated year.
    /// Default: 1850
    pub start_year: i32,

    /// Last generated year, inclusive.
    /// Default: 2025
    pub end_year: i32,

    /// Years averaged on each side of a point by the smoothing pass.
    /// Default: 5 (an 11-year window)
    pub smoothing_half_window: usize,

    /// Last year whose projection equals the cycle value. Later years are projected with noise.
    /// Default: 2020
    pub projection_start_year: i32,

    /// Month (1-12) annual records are stamped with.
    /// Default: 12, records represent the year end
    pub record_month: u32,

    /// Matching of single-year historical events.
    /// Default: corrected
    pub overlay_mode: OverlayMode,

    /// Replaces the built-in profile of the selected variable.
    pub profile: Option<VariableProfile>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            start_year: 1850,
            end_year: 2025,
            smoothing_half_window: 5,
            projection_start_year: 2020,
            record_month: 12,
            overlay_mode: OverlayMode::Corrected,
            profile: None,
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> SeriesResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| SeriesError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }

    /// Number of records a run produces. Zero for a reversed range.
    pub fn year_count(&self) -> usize {
        let span = i64::from(self.end_year) - i64::from(self.start_year) + 1;
        usize::try_from(span).unwrap_or(0)
    }

    pub fn validate(&self) -> SeriesResult<()> {
        for (field, year) in [
            ("start_year", self.start_year),
            ("end_year", self.end_year),
            ("projection_start_year", self.projection_start_year),
        ] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(SeriesError::InvalidConfig(format!(
                    "{field} must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
                )));
            }
        }
        if self.start_year > self.end_year {
            return Err(SeriesError::EmptyYearRange {
                start: self.start_year,
                end: self.end_year,
            });
        }
        if !(1..=12).contains(&self.record_month) {
            return Err(SeriesError::InvalidConfig(format!(
                "record_month must be between 1 and 12, got {}",
                self.record_month
            )));
        }
        if let Some(profile) = &self.profile {
            profile.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::TrendDirection;

    #[test]
    fn test_default_covers_1850_to_2025() {
        let config = GeneratorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.year_count(), 176);
        assert_eq!(config.years().next(), Some(1850));
        assert_eq!(config.years().last(), Some(2025));
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(GeneratorConfig::from_toml_str("").unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            start_year = 1800
            overlay_mode = "legacy"

            [profile]
            base_value = 5.0
            cycle_years = 11.0
            amplitude = 1.5
            trend = "variable"
            unit = "W/m^2"
            description = "Solar irradiance anomaly"
            "#,
        )
        .unwrap();

        assert_eq!(config.start_year, 1800);
        assert_eq!(config.end_year, 2025);
        assert_eq!(config.overlay_mode, OverlayMode::Legacy);
        assert_eq!(config.profile.unwrap().trend, TrendDirection::Variable);
    }

    #[test]
    fn test_rejects_reversed_range() {
        let err = GeneratorConfig::from_toml_str("start_year = 2030").unwrap_err();
        assert!(matches!(
            err,
            SeriesError::EmptyYearRange {
                start: 2030,
                end: 2025
            }
        ));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(GeneratorConfig::from_toml_str("record_month = 13").is_err());
        assert!(GeneratorConfig::from_toml_str("record_month = 0").is_err());
        assert!(GeneratorConfig::from_toml_str("unknown_key = 1").is_err());
        assert!(GeneratorConfig::from_toml_str("overlay_mode = \"sometimes\"").is_err());

        let err = GeneratorConfig::from_toml_str(
            r#"
            [profile]
            base_value = 1.0
            cycle_years = 0.0
            amplitude = 1.0
            trend = "increasing"
            unit = "x"
            description = "broken"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SeriesError::InvalidProfile { .. }));
    }

    #[test]
    fn test_rejects_years_outside_window() {
        let err = GeneratorConfig::from_toml_str(
            "start_year = -2147483648\nend_year = -2147483647",
        )
        .unwrap_err();
        assert!(matches!(err, SeriesError::InvalidConfig(ref msg) if msg.contains("start_year")));

        let err = GeneratorConfig::from_toml_str("end_year = 2147483647").unwrap_err();
        assert!(matches!(err, SeriesError::InvalidConfig(ref msg) if msg.contains("end_year")));

        let err = GeneratorConfig::from_toml_str("projection_start_year = -5").unwrap_err();
        assert!(
            matches!(err, SeriesError::InvalidConfig(ref msg) if msg.contains("projection_start_year"))
        );

        let widest = GeneratorConfig::from_toml_str(&format!(
            "start_year = {MIN_YEAR}\nend_year = {MAX_YEAR}"
        ))
        .unwrap();
        assert_eq!(widest.year_count(), 2001);
    }

    #[test]
    fn test_year_count_handles_extreme_unvalidated_ranges() {
        let full = GeneratorConfig {
            start_year: i32::MIN,
            end_year: i32::MAX,
            ..GeneratorConfig::default()
        };
        assert_eq!(full.year_count() as u64, 1 << 32);

        let reversed = GeneratorConfig {
            start_year: i32::MAX,
            end_year: i32::MIN,
            ..GeneratorConfig::default()
        };
        assert_eq!(reversed.year_count(), 0);
    }
}

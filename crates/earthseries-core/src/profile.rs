//! Variable profiles
//!
//! Each supported environmental variable has a fixed profile describing the
//! shape of its synthetic signal. Profiles are resolved through the closed
//! [`VariableKind`] registry; unknown keys resolve to [`VariableKind::Generic`]
//! rather than failing.

use crate::errors::{SeriesError, SeriesResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Long-run direction of a variable's drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    /// No long-run drift in the cycle; projections are centred on the cycle value.
    Variable,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Variable => "variable",
        };
        f.write_str(label)
    }
}

/// Static configuration of a synthetic signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableProfile {
    /// Level of the signal at the 1850 reference year, before oscillation.
    pub base_value: f64,
    /// Length of one oscillation in years. Must be positive.
    pub cycle_years: f64,
    /// Peak deviation of the oscillation from the trend line. Must be non-negative.
    pub amplitude: f64,
    pub trend: TrendDirection,
    pub unit: String,
    pub description: String,
}

impl VariableProfile {
    fn builtin(
        base_value: f64,
        cycle_years: f64,
        amplitude: f64,
        trend: TrendDirection,
        unit: &str,
        description: &str,
    ) -> Self {
        Self {
            base_value,
            cycle_years,
            amplitude,
            trend,
            unit: unit.to_string(),
            description: description.to_string(),
        }
    }

    /// Check the invariants the generators rely on.
    ///
    /// A zero or negative cycle length would divide by zero in the cycle phase,
    /// and a negative amplitude has no meaningful noise scale.
    pub fn validate(&self) -> SeriesResult<()> {
        let invalid = |field: &str, reason: String| {
            Err(SeriesError::InvalidProfile {
                field: field.to_string(),
                reason,
            })
        };

        if !self.base_value.is_finite() {
            return invalid("base_value", format!("must be finite, got {}", self.base_value));
        }
        if !self.cycle_years.is_finite() || self.cycle_years <= 0.0 {
            return invalid(
                "cycle_years",
                format!("must be positive and finite, got {}", self.cycle_years),
            );
        }
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return invalid(
                "amplitude",
                format!("must be non-negative and finite, got {}", self.amplitude),
            );
        }
        Ok(())
    }
}

/// The environmental variables a series can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    Temperature,
    Co2,
    SeaLevel,
    Precipitation,
    Glaciers,
    Biodiversity,
    AirQuality,
    OceanPh,
    /// Fallback for any unrecognised key.
    #[serde(rename = "default")]
    Generic,
}

/// Result of resolving an external selection string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub kind: VariableKind,
    /// True when the input was not a valid choice and the fallback was used.
    pub fell_back: bool,
}

impl VariableKind {
    /// Selectable kinds, in menu order. Selections are 1-based indexes into this list.
    pub const SELECTABLE: [VariableKind; 8] = [
        VariableKind::Temperature,
        VariableKind::Co2,
        VariableKind::SeaLevel,
        VariableKind::Precipitation,
        VariableKind::Glaciers,
        VariableKind::Biodiversity,
        VariableKind::AirQuality,
        VariableKind::OceanPh,
    ];

    /// Kind used when an external selection cannot be resolved.
    pub const FALLBACK: VariableKind = VariableKind::Temperature;

    pub fn key(&self) -> &'static str {
        match self {
            VariableKind::Temperature => "temperature",
            VariableKind::Co2 => "co2",
            VariableKind::SeaLevel => "sea_level",
            VariableKind::Precipitation => "precipitation",
            VariableKind::Glaciers => "glaciers",
            VariableKind::Biodiversity => "biodiversity",
            VariableKind::AirQuality => "air_quality",
            VariableKind::OceanPh => "ocean_ph",
            VariableKind::Generic => "default",
        }
    }

    /// Resolve a key, falling back to [`VariableKind::Generic`] for anything unknown.
    pub fn from_key(key: &str) -> Self {
        Self::SELECTABLE
            .into_iter()
            .find(|kind| kind.key() == key)
            .unwrap_or(VariableKind::Generic)
    }

    /// Resolve a 1-based menu selection.
    ///
    /// Anything that is not an integer in `1..=8` resolves to [`VariableKind::FALLBACK`].
    pub fn from_selection(input: &str) -> Selection {
        let chosen = input
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Self::SELECTABLE.get(i).copied());

        match chosen {
            Some(kind) => Selection {
                kind,
                fell_back: false,
            },
            None => Selection {
                kind: Self::FALLBACK,
                fell_back: true,
            },
        }
    }

    /// Built-in profile for this kind.
    pub fn profile(&self) -> VariableProfile {
        use TrendDirection::*;

        match self {
            VariableKind::Temperature => VariableProfile::builtin(
                14.0,
                1.0,
                15.0,
                Increasing,
                "°C",
                "Global mean temperature",
            ),
            VariableKind::Co2 => VariableProfile::builtin(
                280.0,
                1.0,
                10.0,
                Increasing,
                "ppm",
                "Atmospheric CO2 concentration",
            ),
            VariableKind::SeaLevel => {
                VariableProfile::builtin(0.0, 1.0, 5.0, Increasing, "mm", "Sea level rise")
            }
            VariableKind::Precipitation => VariableProfile::builtin(
                1000.0,
                1.0,
                300.0,
                Variable,
                "mm/yr",
                "Annual precipitation",
            ),
            VariableKind::Glaciers => {
                VariableProfile::builtin(100.0, 10.0, 30.0, Decreasing, "% of mass", "Glacier mass")
            }
            VariableKind::Biodiversity => VariableProfile::builtin(
                100.0,
                10.0,
                20.0,
                Decreasing,
                "diversity index",
                "Biological diversity",
            ),
            VariableKind::AirQuality => {
                VariableProfile::builtin(50.0, 1.0, 30.0, Variable, "AQI", "Air quality")
            }
            VariableKind::OceanPh => VariableProfile::builtin(
                8.1,
                10.0,
                0.3,
                Decreasing,
                "pH",
                "Ocean acidification",
            ),
            VariableKind::Generic => VariableProfile::builtin(
                100.0,
                1.0,
                20.0,
                Variable,
                "units",
                "Generic earth data",
            ),
        }
    }

    /// Consequences listed in the insight report for this kind.
    pub fn implications(&self) -> &'static [&'static str] {
        match self {
            VariableKind::Temperature => &[
                "Direct impact on ecosystems",
                "Increased risk of extreme events",
                "Implications for food security",
            ],
            VariableKind::Co2 => &[
                "Main driver of climate change",
                "Ocean acidification",
                "Impact on photosynthesis",
            ],
            VariableKind::SeaLevel => &[
                "Threat to coastal areas",
                "Population displacement",
                "Loss of territory",
            ],
            VariableKind::Biodiversity => &[
                "Ecosystem collapse",
                "Loss of ecosystem services",
                "Risk to food security",
            ],
            _ => &[],
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Look up the profile for a key. Total: unknown keys yield the default profile.
pub fn lookup(key: &str) -> VariableProfile {
    VariableKind::from_key(key).profile()
}

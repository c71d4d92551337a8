//! Summary statistics over a finished series.

use crate::record::YearRecord;
use std::fmt;

/// First year of the "recent" comparison window.
pub const RECENT_FROM_YEAR: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    pub fn from_risk(risk: f64) -> Self {
        if risk > 70.0 {
            RiskBand::High
        } else if risk > 40.0 {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskBand::Low => "LOW",
            RiskBand::Moderate => "MODERATE",
            RiskBand::High => "HIGH",
        };
        f.write_str(label)
    }
}

/// Percent changes are `None` when the reference value is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesInsights {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub current: f64,
    pub total_change_pct: Option<f64>,
    pub recent_change_pct: Option<f64>,
    pub current_risk: f64,
    pub recent_risk_change_pct: Option<f64>,
    pub risk_band: RiskBand,
    pub human_impact: f64,
    pub human_impact_growth_pct: Option<f64>,
    pub projected_change_pct: Option<f64>,
}

fn percent_change(from: f64, to: f64) -> Option<f64> {
    let change = (to / from - 1.0) * 100.0;
    (from != 0.0 && change.is_finite()).then_some(change)
}

impl SeriesInsights {
    /// Summarise `records`. Returns `None` for an empty series.
    pub fn from_records(records: &[YearRecord]) -> Option<Self> {
        let first = records.first()?;
        let last = records.last()?;
        let recent = records.iter().find(|r| r.year >= RECENT_FROM_YEAR);

        let values = records.iter().map(|r| r.base_value);
        let mean = values.clone().sum::<f64>() / records.len() as f64;
        let max = values.clone().fold(f64::NEG_INFINITY, f64::max);
        let min = values.fold(f64::INFINITY, f64::min);

        Some(Self {
            mean,
            max,
            min,
            current: last.base_value,
            total_change_pct: percent_change(first.base_value, last.base_value),
            recent_change_pct: recent.and_then(|r| percent_change(r.base_value, last.base_value)),
            current_risk: last.risk_level,
            recent_risk_change_pct: recent
                .and_then(|r| percent_change(r.risk_level, last.risk_level)),
            risk_band: RiskBand::from_risk(last.risk_level),
            human_impact: last.human_impact_factor,
            human_impact_growth_pct: percent_change(
                first.human_impact_factor,
                last.human_impact_factor,
            ),
            projected_change_pct: percent_change(last.base_value, last.future_projection),
        })
    }
}

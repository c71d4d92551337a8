use serde::{Deserialize, Serialize};

/// One year of a generated series.
///
/// Serialises with the export column names, in export order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Base_Value")]
    pub base_value: f64,
    #[serde(rename = "Seasonal_Min")]
    pub seasonal_min_factor: f64,
    #[serde(rename = "Seasonal_Max")]
    pub seasonal_max_factor: f64,
    #[serde(rename = "Annual_Cycle")]
    pub annual_cycle_phase: f64,
    #[serde(rename = "Climate_Trend")]
    pub climate_trend_factor: f64,
    #[serde(rename = "Extreme_Events")]
    pub extreme_event_intensity: f64,
    #[serde(rename = "Human_Impact")]
    pub human_impact_factor: f64,
    #[serde(rename = "Smoothed_Value")]
    pub smoothed_value: f64,
    #[serde(rename = "Monthly_Variation")]
    pub monthly_variation_factor: f64,
    #[serde(rename = "Decadal_Variation")]
    pub decadal_variation_factor: f64,
    #[serde(rename = "Environmental_Index")]
    pub environmental_index: f64,
    #[serde(rename = "Risk_Level")]
    pub risk_level: f64,
    #[serde(rename = "Future_Projection")]
    pub future_projection: f64,
}

impl YearRecord {
    pub const COLUMNS: [&'static str; 14] = [
        "Year",
        "Base_Value",
        "Seasonal_Min",
        "Seasonal_Max",
        "Annual_Cycle",
        "Climate_Trend",
        "Extreme_Events",
        "Human_Impact",
        "Smoothed_Value",
        "Monthly_Variation",
        "Decadal_Variation",
        "Environmental_Index",
        "Risk_Level",
        "Future_Projection",
    ];
}

//! Synthetic annual series for environmental variables.
//!
//! A series combines a cyclic base signal, piecewise historical trend curves,
//! human-impact and extreme-event modifiers and a table of historical event
//! overlays into one record per year, plus derived metrics such as a smoothed
//! trend, a risk score and a noisy future projection.
//!
//! ```
//! use earthseries_core::builder::SeriesBuilder;
//! use earthseries_core::config::GeneratorConfig;
//! use earthseries_core::profile::VariableKind;
//!
//! let builder = SeriesBuilder::new(VariableKind::Co2, GeneratorConfig::default()).unwrap();
//! let records = builder.generate(42);
//! assert_eq!(records.len(), 176);
//! assert_eq!(records, builder.generate(42));
//! ```

pub mod builder;
pub mod config;
pub mod cycle;
pub mod extremes;
pub mod insights;
pub mod metrics;
pub mod noise;
pub mod overlay;
pub mod profile;
pub mod record;
pub mod trend;

pub mod errors;

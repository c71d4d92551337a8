//! Historical event overlay
//!
//! A fixed table of historical episodes, each adjusting some fields of the
//! records inside its years. The overlay is applied after all other fields are
//! computed and produces a new record sequence.
//!
//! The spans in the table are disjoint and each record is adjusted by at most
//! one event: the first whose span contains the year. An event restricted to
//! some variable kinds still claims its years for other kinds, it just leaves
//! their records unchanged.

use crate::metrics::MAX_RISK;
use crate::profile::VariableKind;
use crate::record::YearRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// How single-year events are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayMode {
    /// Single-year events match only their own year.
    #[default]
    Corrected,
    /// Single-year events match any year not claimed by a range event.
    ///
    /// Only the first single-year event (2003) can then ever apply, and it
    /// applies to every year outside the range events. This reproduces the
    /// series exported by earlier versions of the generator.
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearSpan {
    Single(i32),
    /// Inclusive on both ends.
    Range(i32, i32),
}

impl YearSpan {
    pub fn contains(&self, year: i32) -> bool {
        match *self {
            YearSpan::Single(y) => year == y,
            YearSpan::Range(start, end) => (start..=end).contains(&year),
        }
    }
}

impl fmt::Display for YearSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearSpan::Single(year) => write!(f, "{year}"),
            YearSpan::Range(start, end) => write!(f, "{start}-{end}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    All,
    Only(&'static [VariableKind]),
}

impl KindFilter {
    pub fn matches(&self, kind: VariableKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(kinds) => kinds.contains(&kind),
        }
    }
}

/// Record fields an event can adjust.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BaseValue,
    RiskLevel,
    ExtremeEvents,
}

/// Multiply `field` by `factor`. Risk stays capped at [`MAX_RISK`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub field: Field,
    pub factor: f64,
}

impl Adjustment {
    fn apply(&self, record: &mut YearRecord) {
        match self.field {
            Field::BaseValue => record.base_value *= self.factor,
            Field::ExtremeEvents => record.extreme_event_intensity *= self.factor,
            Field::RiskLevel => record.risk_level = (record.risk_level * self.factor).min(MAX_RISK),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalEvent {
    pub name: &'static str,
    pub years: YearSpan,
    pub applies_to: KindFilter,
    pub adjustments: &'static [Adjustment],
}

pub static HISTORICAL_EVENTS: [HistoricalEvent; 9] = [
    HistoricalEvent {
        name: "Tambora eruption, the year without a summer",
        years: YearSpan::Range(1815, 1816),
        applies_to: KindFilter::All,
        adjustments: &[
            Adjustment { field: Field::BaseValue, factor: 0.9 },
            Adjustment { field: Field::RiskLevel, factor: 1.2 },
        ],
    },
    HistoricalEvent {
        name: "Dust Bowl drought",
        years: YearSpan::Range(1930, 1939),
        applies_to: KindFilter::Only(&[VariableKind::Temperature, VariableKind::Precipitation]),
        adjustments: &[
            Adjustment { field: Field::BaseValue, factor: 1.1 },
            Adjustment { field: Field::RiskLevel, factor: 1.3 },
        ],
    },
    HistoricalEvent {
        name: "El Niño 1982-83",
        years: YearSpan::Range(1982, 1983),
        applies_to: KindFilter::All,
        adjustments: &[
            Adjustment { field: Field::BaseValue, factor: 1.05 },
            Adjustment { field: Field::ExtremeEvents, factor: 1.5 },
        ],
    },
    HistoricalEvent {
        name: "El Niño 1997-98",
        years: YearSpan::Range(1997, 1998),
        applies_to: KindFilter::All,
        adjustments: &[
            Adjustment { field: Field::BaseValue, factor: 1.08 },
            Adjustment { field: Field::ExtremeEvents, factor: 1.8 },
        ],
    },
    HistoricalEvent {
        name: "European heatwave",
        years: YearSpan::Single(2003),
        applies_to: KindFilter::Only(&[VariableKind::Temperature]),
        adjustments: &[
            Adjustment { field: Field::BaseValue, factor: 1.1 },
            Adjustment { field: Field::RiskLevel, factor: 1.4 },
        ],
    },
    HistoricalEvent {
        name: "Hurricane Katrina",
        years: YearSpan::Single(2005),
        applies_to: KindFilter::All,
        adjustments: &[
            Adjustment { field: Field::ExtremeEvents, factor: 1.6 },
        ],
    },
    HistoricalEvent {
        name: "Texas drought and Fukushima",
        years: YearSpan::Single(2011),
        applies_to: KindFilter::All,
        adjustments: &[
            Adjustment { field: Field::RiskLevel, factor: 1.3 },
        ],
    },
    HistoricalEvent {
        name: "Australian bushfires",
        years: YearSpan::Single(2019),
        applies_to: KindFilter::Only(&[VariableKind::Temperature, VariableKind::AirQuality]),
        adjustments: &[
            Adjustment { field: Field::BaseValue, factor: 1.05 },
            Adjustment { field: Field::RiskLevel, factor: 1.2 },
        ],
    },
    HistoricalEvent {
        name: "Record global temperatures",
        years: YearSpan::Single(2020),
        applies_to: KindFilter::Only(&[VariableKind::Temperature]),
        adjustments: &[
            Adjustment { field: Field::BaseValue, factor: 1.02 },
        ],
    },
];

#[derive(Debug, Clone)]
pub struct EventOverlay {
    mode: OverlayMode,
    events: &'static [HistoricalEvent],
}

impl EventOverlay {
    pub fn new(mode: OverlayMode) -> Self {
        Self {
            mode,
            events: &HISTORICAL_EVENTS,
        }
    }

    pub fn mode(&self) -> OverlayMode {
        self.mode
    }

    pub fn events(&self) -> &'static [HistoricalEvent] {
        self.events
    }

    /// The event that claims `year`, if any.
    pub fn event_for(&self, year: i32) -> Option<&'static HistoricalEvent> {
        let events = self.events;
        match self.mode {
            OverlayMode::Corrected => events.iter().find(|e| e.years.contains(year)),
            OverlayMode::Legacy => events.iter().find(|e| match e.years {
                YearSpan::Single(_) => true,
                YearSpan::Range(..) => e.years.contains(year),
            }),
        }
    }

    /// Record with the claiming event's adjustments applied.
    pub fn adjust(&self, record: &YearRecord, kind: VariableKind) -> YearRecord {
        let mut adjusted = record.clone();
        if let Some(event) = self.event_for(record.year) {
            if event.applies_to.matches(kind) {
                trace!(year = record.year, event = event.name, "applying historical event");
                for adjustment in event.adjustments {
                    adjustment.apply(&mut adjusted);
                }
            }
        }
        adjusted
    }

    pub fn apply(&self, records: &[YearRecord], kind: VariableKind) -> Vec<YearRecord> {
        records.iter().map(|r| self.adjust(r, kind)).collect()
    }
}

impl Default for EventOverlay {
    fn default() -> Self {
        Self::new(OverlayMode::default())
    }
}

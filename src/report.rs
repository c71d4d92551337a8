//! Plain-text analytic report over a generated series.

use earthseries_core::builder::SeriesBuilder;
use earthseries_core::insights::SeriesInsights;
use earthseries_core::profile::TrendDirection;
use earthseries_core::record::YearRecord;
use std::fmt::Write;

const PREVIEW_ROWS: usize = 5;

fn pct(change: Option<f64>, precision: usize) -> String {
    match change {
        Some(change) => format!("{change:+.precision$}%"),
        None => "n/a".to_string(),
    }
}

pub fn render(builder: &SeriesBuilder, records: &[YearRecord]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, builder, records);
    out
}

fn write_report(
    out: &mut String,
    builder: &SeriesBuilder,
    records: &[YearRecord],
) -> std::fmt::Result {
    let profile = builder.profile();
    let unit = &profile.unit;

    writeln!(out, "\nPreview:")?;
    writeln!(
        out,
        "{:>6} {:>14} {:>10} {:>20}",
        "Year", "Base_Value", "Risk_Level", "Environmental_Index"
    )?;
    for r in records.iter().take(PREVIEW_ROWS) {
        writeln!(
            out,
            "{:>6} {:>14.3} {:>10.2} {:>20.3}",
            r.year, r.base_value, r.risk_level, r.environmental_index
        )?;
    }

    let Some(insights) = SeriesInsights::from_records(records) else {
        return writeln!(out, "\nNo records generated.");
    };

    writeln!(out, "\nINSIGHTS - {}", profile.description)?;
    writeln!(out, "{}", "=".repeat(70))?;

    writeln!(out, "\n1. Key statistics")?;
    writeln!(out, "Mean value: {:.2} {unit}", insights.mean)?;
    writeln!(out, "Maximum value: {:.2} {unit}", insights.max)?;
    writeln!(out, "Minimum value: {:.2} {unit}", insights.min)?;
    writeln!(out, "Current value: {:.2} {unit}", insights.current)?;

    writeln!(out, "\n2. Trends")?;
    writeln!(
        out,
        "Total change since {}: {}",
        builder.config().start_year,
        pct(insights.total_change_pct, 1)
    )?;
    writeln!(out, "Change since 2000: {}", pct(insights.recent_change_pct, 1))?;
    writeln!(out, "Main trend: {}", profile.trend)?;

    writeln!(out, "\n3. Environmental risk")?;
    writeln!(out, "Current risk level: {:.1}/100", insights.current_risk)?;
    writeln!(
        out,
        "Risk change since 2000: {}",
        pct(insights.recent_risk_change_pct, 1)
    )?;
    writeln!(out, "-> {} risk level", insights.risk_band)?;

    writeln!(out, "\n4. Notable climate events")?;
    for event in builder.overlay().events() {
        writeln!(out, "- {}: {}", event.years, event.name)?;
    }

    writeln!(out, "\n5. Human impact")?;
    writeln!(out, "Current human impact factor: {:.1}x", insights.human_impact)?;
    writeln!(
        out,
        "Growth since {}: {}",
        builder.config().start_year,
        pct(insights.human_impact_growth_pct, 0)
    )?;

    writeln!(out, "\n6. Projections")?;
    writeln!(
        out,
        "Projected change by {}: {}",
        builder.config().end_year,
        pct(insights.projected_change_pct, 1)
    )?;
    let outlook = match profile.trend {
        TrendDirection::Increasing => "Upward trend expected",
        TrendDirection::Decreasing => "Downward trend expected",
        TrendDirection::Variable => "Relative stability expected",
    };
    writeln!(out, "-> {outlook}")?;

    writeln!(out, "\n7. Environmental implications")?;
    for line in builder.kind().implications() {
        writeln!(out, "- {line}")?;
    }
    writeln!(out, "- Mitigation action is needed")?;
    writeln!(out, "- Climate adaptation matters")?;
    writeln!(out, "- Global governance is at stake")?;

    Ok(())
}

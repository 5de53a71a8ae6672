//! CSV and aligned-text rendering of trade measure reports.
//!
//! The engine is agnostic to report formatting; this module flattens
//! report rows into (trade, measure, value) records and renders them as
//! CSV or as an aligned text table. Failed measures render their cause
//! verbatim so gaps stay visible in the output.

use std::io::Write;

use risk_engine::runner::TradeMeasureReport;

// One flattened report line: trade, measure, first-scenario value or
// failure cause.
fn rows(reports: &[TradeMeasureReport]) -> Vec<(String, String, String)> {
    let mut out = Vec::new();
    for report in reports {
        for (measure, outcome) in report.measures() {
            let value = match outcome {
                Ok(results) => results
                    .get(0)
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "(no scenarios)".to_string()),
                Err(cause) => format!("FAILED: {}", cause),
            };
            out.push((
                report.trade_id().to_string(),
                measure.to_string(),
                value,
            ));
        }
    }
    out
}

/// Writes the reports as CSV.
pub fn write_csv<W: Write>(reports: &[TradeMeasureReport], writer: W) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["Trade", "Measure", "Value"])?;
    for (trade, measure, value) in rows(reports) {
        csv_writer.write_record([trade, measure, value])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Renders the reports as an aligned text table.
pub fn render_text(reports: &[TradeMeasureReport]) -> String {
    let rows = rows(reports);
    let trade_width = rows
        .iter()
        .map(|(t, _, _)| t.len())
        .chain(["Trade".len()])
        .max()
        .unwrap_or(5);
    let measure_width = rows
        .iter()
        .map(|(_, m, _)| m.len())
        .chain(["Measure".len()])
        .max()
        .unwrap_or(7);

    let mut out = format!(
        "{:<trade_width$}  {:<measure_width$}  Value\n",
        "Trade", "Measure",
    );
    for (trade, measure, value) in rows {
        out.push_str(&format!(
            "{:<trade_width$}  {:<measure_width$}  {}\n",
            trade, measure, value,
        ));
    }
    out
}

//! Text rendering of the projection summary

use std::fmt::Write;

use portsim_core::model::{PercentileRow, ScenarioSummary};

/// Format a currency value without cents
pub fn format_currency(value: f64) -> String {
    let abs_value = value.abs();
    let dollars = abs_value.round() as i64;

    // Add thousands separators
    let dollars_str = dollars.to_string();
    let mut result = String::new();
    for (i, c) in dollars_str.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let dollars_formatted: String = result.chars().rev().collect();

    if value >= 0.0 {
        format!("${dollars_formatted}")
    } else {
        format!("-${dollars_formatted}")
    }
}

/// Calendar year label for a simulation-relative year, anchored at today.
fn calendar_year(relative_year: i32) -> i16 {
    jiff::Zoned::now().date().year() + relative_year as i16
}

/// Render the summary as an aligned text table, one row per simulated year.
pub fn render_table(rows: &[PercentileRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:>15} {:>15} {:>15} {:>15}",
        "Year", "Contributed", "Pessimistic", "Median", "Optimistic"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<6} {:>15} {:>15} {:>15} {:>15}",
            calendar_year(row.year),
            format_currency(row.contributed_capital),
            format_currency(row.p10),
            format_currency(row.p50),
            format_currency(row.p90),
        );
    }
    out
}

/// One-line headline for the final simulated year.
pub fn render_headline(headline: &ScenarioSummary) -> String {
    format!(
        "Final year scenarios: pessimistic {}, average {}, optimistic {}",
        format_currency(headline.pessimistic),
        format_currency(headline.average),
        format_currency(headline.optimistic),
    )
}

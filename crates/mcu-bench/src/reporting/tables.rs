use crate::reporting::price::PriceComparison;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

fn fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{:.*}", decimals, v),
        _ => "nan".to_string(),
    }
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Render the price comparison as whitespace-aligned columns for pgfplots
///
/// The first section lists every line, the second repeats them grouped by
/// model for per-model bar charts.
pub fn format_price_listing(comparison: &PriceComparison) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "RAW DATA OVERVIEW (copyable for TikZ/pgfplots)");
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(
        out,
        "{:<10} {:<10} {:<12} {:<10} {:<12} {:<10}",
        "MCU", "Model", "Price(Eur)", "FPS", "Energy(uJ)", "FPS/Euro"
    );
    for row in &comparison.rows {
        let _ = writeln!(
            out,
            "{:<10} {:<10} {:<12} {:<10} {:<12} {:<10}",
            row.device_id,
            row.model_id,
            format!("{:.2}", row.price),
            fixed(row.throughput, 2),
            fixed(row.energy, 2),
            fixed(row.fps_per_euro, 4),
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "GROUPED BY MODEL (for separate plots)");
    let _ = writeln!(out, "{}", rule());

    for model in comparison.models() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Model: {}", model);
        let _ = writeln!(out, "MCU         FPS       Energy    FPS/Euro");
        for row in comparison.rows_for_model(model) {
            let _ = writeln!(
                out,
                "{:<10} {:<9} {:<9} {}",
                row.device_id,
                fixed(row.throughput, 2),
                fixed(row.energy, 2),
                fixed(row.fps_per_euro, 4),
            );
        }
    }

    out
}

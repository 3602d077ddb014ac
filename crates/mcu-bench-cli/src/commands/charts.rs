use anyhow::Result;
use mcu_bench::reporting::{MetricChartGenerator, ReportGenerator};
use mcu_bench::{DataFrameHandler, ExtractionScope, VizConfig};

use crate::commands::{load_results, print_written};

/// Bar charts per metric, with a preview of the averaged values
pub fn handle_charts(config: VizConfig, throughput_only: bool) -> Result<()> {
    let scope = if throughput_only {
        ExtractionScope::ThroughputOnly
    } else {
        ExtractionScope::All
    };

    let Some(table) = load_results(&config, scope) else {
        return Ok(());
    };

    println!("\nExtracted averages (preview):");
    println!("{}", DataFrameHandler::grouped_means(&table)?);
    println!("{}", "-".repeat(30));

    let written = MetricChartGenerator::new(config).generate(&table)?;
    print_written(&written);
    Ok(())
}

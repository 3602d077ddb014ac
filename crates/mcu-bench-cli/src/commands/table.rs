use anyhow::Result;
use mcu_bench::reporting::{PriceListingGenerator, ReportGenerator};
use mcu_bench::{ExtractionScope, VizConfig};

use crate::commands::load_results;

/// Print the pgfplots-ready price listing to stdout
pub fn handle_table(config: VizConfig) -> Result<()> {
    let Some(table) = load_results(&config, ExtractionScope::ThroughputAndEnergy) else {
        return Ok(());
    };

    PriceListingGenerator::new(&config).generate(&table)?;
    Ok(())
}

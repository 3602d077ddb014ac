use anyhow::Result;
use mcu_bench::reporting::{PriceChartGenerator, ReportGenerator};
use mcu_bench::{ExtractionScope, VizConfig};

use crate::commands::{load_results, print_written};

/// Price against throughput and energy, plus FPS per euro
pub fn handle_price(config: VizConfig) -> Result<()> {
    let Some(table) = load_results(&config, ExtractionScope::ThroughputAndEnergy) else {
        return Ok(());
    };

    let written = PriceChartGenerator::new(config).generate(&table)?;
    print_written(&written);
    Ok(())
}

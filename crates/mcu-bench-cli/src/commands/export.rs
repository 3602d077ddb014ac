use anyhow::Result;
use mcu_bench::reporting::{CsvReportGenerator, ReportGenerator};
use mcu_bench::{ExtractionScope, VizConfig};
use std::path::PathBuf;

use crate::commands::{load_results, print_written};

pub fn handle_export(config: VizConfig, output: PathBuf) -> Result<()> {
    let Some(table) = load_results(&config, ExtractionScope::All) else {
        return Ok(());
    };

    let written = CsvReportGenerator::new(output).generate(&table)?;
    print_written(&written);
    Ok(())
}

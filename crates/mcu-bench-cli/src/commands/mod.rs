pub mod charts;
pub mod export;
pub mod inspect;
pub mod price;
pub mod table;

use console::style;
use mcu_bench::{ExtractionScope, ResultExtractor, ResultTable, VizConfig};

/// Walk the configured data directory, `None` when nothing was found
///
/// A missing data directory counts as an empty tree.
pub fn load_results(config: &VizConfig, scope: ExtractionScope) -> Option<ResultTable> {
    println!("Scanning '{}'...", config.data_dir.display());

    let table = match ResultExtractor::new(scope).extract(&config.data_dir) {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!("Could not scan {}: {}", config.data_dir.display(), e);
            ResultTable::new()
        }
    };

    if table.is_empty() {
        println!(
            "{} (check the directory layout and file names)",
            style("No valid data found!").yellow()
        );
        return None;
    }

    Some(table)
}

pub fn print_written(paths: &[std::path::PathBuf]) {
    for path in paths {
        println!("Created: {}", path.display());
    }
}

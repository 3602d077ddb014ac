pub mod energy;
pub mod run_dir;
pub mod throughput;

pub use energy::{parse_energy_log, read_energy_log, EnergyReadings};
pub use run_dir::{RunDirectory, RunMode};
pub use throughput::extract_throughput;

use crate::errors::{util::ensure_dir_exists, BenchResult};
use crate::reporting::types::{Metric, ResultRow, ResultTable};
use std::fs;
use std::path::{Path, PathBuf};

/// Which metrics an extraction emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionScope {
    /// Throughput, energy and power
    #[default]
    All,
    /// Only performance directories are read
    ThroughputOnly,
    /// Throughput and energy, power readings are ignored
    ThroughputAndEnergy,
}

impl ExtractionScope {
    pub fn includes(&self, metric: Metric) -> bool {
        match self {
            ExtractionScope::All => true,
            ExtractionScope::ThroughputOnly => metric == Metric::Throughput,
            ExtractionScope::ThroughputAndEnergy => metric != Metric::Power,
        }
    }
}

/// Walks a benchmark tree and turns its result files into a [`ResultTable`]
pub struct ResultExtractor {
    scope: ExtractionScope,
}

impl Default for ResultExtractor {
    fn default() -> Self {
        Self::new(ExtractionScope::All)
    }
}

impl ResultExtractor {
    pub fn new(scope: ExtractionScope) -> Self {
        Self { scope }
    }

    /// Extract rows from every run directory below `root`, `root` included
    ///
    /// Only a missing root is an error. Unreadable directories and result
    /// files are logged and skipped.
    pub fn extract(&self, root: &Path) -> BenchResult<ResultTable> {
        ensure_dir_exists(root)?;
        tracing::info!("Scanning benchmark directory: {}", root.display());

        let mut table = ResultTable::new();
        let mut pending: Vec<PathBuf> = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            table.extend(self.process_directory(&dir));

            match Self::child_directories(&dir) {
                Ok(mut children) => {
                    // reversed so the stack pops children in name order
                    children.reverse();
                    pending.extend(children);
                }
                Err(e) => {
                    tracing::warn!("Could not list directory {}: {}", dir.display(), e);
                }
            }
        }

        tracing::info!("Extracted {} rows from {}", table.len(), root.display());
        Ok(table)
    }

    /// Rows contributed by a single directory, ignoring its children
    pub fn process_directory(&self, dir: &Path) -> Vec<ResultRow> {
        let Some(name) = dir.file_name().map(|n| n.to_string_lossy().to_string()) else {
            return Vec::new();
        };
        let Some(run) = RunDirectory::parse(&name) else {
            return Vec::new();
        };

        tracing::debug!(
            "Classified {} as {} run of {} on {}",
            dir.display(),
            run.mode,
            run.model_id,
            run.device_id
        );

        let results_file = dir.join(run.mode.results_file());
        if !results_file.is_file() {
            tracing::debug!("No {} in {}", run.mode.results_file(), dir.display());
            return Vec::new();
        }

        match run.mode {
            RunMode::Performance => self.performance_rows(&run, &results_file),
            RunMode::Energy => self.energy_rows(&run, &results_file),
        }
    }

    fn performance_rows(&self, run: &RunDirectory, results_file: &Path) -> Vec<ResultRow> {
        if !self.scope.includes(Metric::Throughput) {
            return Vec::new();
        }

        match extract_throughput(results_file) {
            Ok(Some(value)) => vec![ResultRow::new(
                &run.device_id,
                &run.model_id,
                Metric::Throughput,
                value,
            )],
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Error in {}: {}", results_file.display(), e);
                Vec::new()
            }
        }
    }

    fn energy_rows(&self, run: &RunDirectory, results_file: &Path) -> Vec<ResultRow> {
        if !self.scope.includes(Metric::Energy) && !self.scope.includes(Metric::Power) {
            return Vec::new();
        }

        let readings = match read_energy_log(results_file) {
            Ok(readings) => readings,
            Err(e) => {
                tracing::warn!("Could not read {}: {}", results_file.display(), e);
                return Vec::new();
            }
        };

        let mut rows = Vec::new();
        if self.scope.includes(Metric::Energy) {
            if let Some(value) = readings.mean_energy() {
                rows.push(ResultRow::new(&run.device_id, &run.model_id, Metric::Energy, value));
            }
        }
        if self.scope.includes(Metric::Power) {
            if let Some(value) = readings.mean_power() {
                rows.push(ResultRow::new(&run.device_id, &run.model_id, Metric::Power, value));
            }
        }
        rows
    }

    fn child_directories(dir: &Path) -> BenchResult<Vec<PathBuf>> {
        let mut children: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| {
                let entry = entry.ok()?;
                // symlinked directories are not descended into
                if entry.file_type().ok()?.is_dir() {
                    Some(entry.path())
                } else {
                    None
                }
            })
            .collect();
        children.sort();
        Ok(children)
    }
}

/// Extract every metric below `root` with the default scope
pub fn extract_results(root: &Path) -> BenchResult<ResultTable> {
    ResultExtractor::default().extract(root)
}

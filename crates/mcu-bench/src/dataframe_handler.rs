use crate::errors::{BenchError, BenchResult};
use crate::reporting::types::ResultTable;
use polars::{io::csv::QuoteStyle, prelude::*};
use std::fs;
use std::path::{Path, PathBuf};

/// Handles DataFrame operations for extracted result tables
pub struct DataFrameHandler;

impl DataFrameHandler {
    /// Converts a result table to a DataFrame with `mcu`, `model`, `metric` and `value` columns
    pub fn rows_to_dataframe(table: &ResultTable) -> BenchResult<DataFrame> {
        let rows = table.rows();

        let mcu_values: Vec<&str> = rows.iter().map(|row| row.device_id.as_str()).collect();
        let model_values: Vec<&str> = rows.iter().map(|row| row.model_id.as_str()).collect();
        let metric_values: Vec<&str> = rows.iter().map(|row| row.metric.label()).collect();
        let values: Vec<f64> = rows.iter().map(|row| row.value).collect();

        DataFrame::new(vec![
            Series::new("mcu", mcu_values),
            Series::new("model", model_values),
            Series::new("metric", metric_values),
            Series::new("value", values),
        ])
        .map_err(|e| BenchError::DataFrameError(format!("Failed to create DataFrame: {}", e)))
    }

    /// Mean value per device, model and metric, ordered by those keys
    pub fn grouped_means(table: &ResultTable) -> BenchResult<DataFrame> {
        let df = Self::rows_to_dataframe(&table.sorted())?;

        df.lazy()
            .group_by_stable([col("mcu"), col("model"), col("metric")])
            .agg([col("value").mean()])
            .collect()
            .map_err(|e| BenchError::DataFrameError(format!("Failed to aggregate metrics: {}", e)))
    }

    /// Writes the raw rows to a CSV file
    pub fn write_csv(table: &ResultTable, file_path: &Path) -> BenchResult<()> {
        let mut df = Self::rows_to_dataframe(&table.sorted())?;

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write to CSV atomically using a temporary file
        let temp_path: PathBuf = file_path.with_extension("csv.tmp");
        let file = fs::File::create(&temp_path)?;

        CsvWriter::new(&file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_style(QuoteStyle::NonNumeric)
            .finish(&mut df)
            .map_err(|e| BenchError::DataFrameError(format!("Failed to write CSV: {}", e)))?;

        fs::rename(&temp_path, file_path)?;

        tracing::info!(
            "Wrote {} rows to {}",
            df.height(),
            file_path.display()
        );
        Ok(())
    }
}

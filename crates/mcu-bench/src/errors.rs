use polars::error::PolarsError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for result extraction and reporting
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Failed to parse configuration: {0}")]
    ConfigError(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("DataFrame error: {0}")]
    DataFrameError(String),

    #[error("Chart rendering error: {0}")]
    ChartError(String),
}

/// Result type for extraction and reporting operations
pub type BenchResult<T> = Result<T, BenchError>;

/// Utility functions for working with BenchError
pub mod util {
    use super::*;
    use std::path::Path;

    /// Check if a file exists, returning a FileNotFound error if it doesn't
    pub fn ensure_file_exists<P: AsRef<Path>>(path: P) -> BenchResult<()> {
        let path_ref = path.as_ref();
        if !path_ref.is_file() {
            return Err(BenchError::FileNotFound(path_ref.to_path_buf()));
        }
        Ok(())
    }

    /// Check if a directory exists, returning a FileNotFound error if it doesn't
    pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> BenchResult<()> {
        let path_ref = path.as_ref();
        if !path_ref.is_dir() {
            return Err(BenchError::FileNotFound(path_ref.to_path_buf()));
        }
        Ok(())
    }

    /// Convert a plotting backend error to a BenchError
    pub fn to_chart_error<E: fmt::Display>(e: E) -> BenchError {
        BenchError::ChartError(e.to_string())
    }
}

impl From<PolarsError> for BenchError {
    fn from(err: PolarsError) -> Self {
        BenchError::DataFrameError(err.to_string())
    }
}

impl From<config::ConfigError> for BenchError {
    fn from(err: config::ConfigError) -> Self {
        BenchError::ConfigError(err.to_string())
    }
}

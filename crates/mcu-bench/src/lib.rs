pub mod config;
pub mod dataframe_handler;
pub mod errors;
pub mod extractor;
pub mod inspect;
pub mod reporting;

// Re-export main components for easier use
pub use config::{ChartFormat, VizConfig};
pub use dataframe_handler::DataFrameHandler;
pub use errors::{BenchError, BenchResult};
pub use extractor::{extract_results, ExtractionScope, ResultExtractor};
pub use reporting::{Metric, ResultRow, ResultTable};

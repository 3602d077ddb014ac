pub mod charts;
pub mod price;
pub mod report_generators;
pub mod tables;
pub mod types;

pub use price::{PriceComparison, PriceComparisonRow, PriceTable};
pub use report_generators::{
    CsvReportGenerator, MetricChartGenerator, PriceChartGenerator, PriceListingGenerator,
    ReportGenerator,
};
pub use types::{Metric, ResultRow, ResultTable};

use crate::config::VizConfig;
use crate::dataframe_handler::DataFrameHandler;
use crate::errors::BenchResult;
use crate::reporting::charts::{render_metric_charts, render_price_charts};
use crate::reporting::price::{PriceComparison, PriceTable};
use crate::reporting::tables::format_price_listing;
use crate::reporting::types::ResultTable;
use std::path::PathBuf;

/// Trait for report generators
pub trait ReportGenerator {
    /// Produce the report and return the files written
    fn generate(&self, table: &ResultTable) -> BenchResult<Vec<PathBuf>>;
}

/// Generates one grouped bar chart per metric
pub struct MetricChartGenerator {
    config: VizConfig,
}

impl MetricChartGenerator {
    pub fn new(config: VizConfig) -> Self {
        Self { config }
    }
}

impl ReportGenerator for MetricChartGenerator {
    fn generate(&self, table: &ResultTable) -> BenchResult<Vec<PathBuf>> {
        render_metric_charts(table, &self.config)
    }
}

/// Generates the price/performance charts
pub struct PriceChartGenerator {
    config: VizConfig,
    prices: PriceTable,
}

impl PriceChartGenerator {
    pub fn new(config: VizConfig) -> Self {
        let prices = PriceTable::from(&config.chart_prices);
        Self { config, prices }
    }
}

impl ReportGenerator for PriceChartGenerator {
    fn generate(&self, table: &ResultTable) -> BenchResult<Vec<PathBuf>> {
        self.prices.warn_unpriced(table);
        render_price_charts(table, &self.prices, &self.config)
    }
}

/// Prints the price comparison as aligned text
pub struct PriceListingGenerator {
    prices: PriceTable,
}

impl PriceListingGenerator {
    pub fn new(config: &VizConfig) -> Self {
        Self {
            prices: PriceTable::from(&config.listing_prices),
        }
    }

    pub fn render(&self, table: &ResultTable) -> String {
        format_price_listing(&PriceComparison::build(table, &self.prices))
    }
}

impl ReportGenerator for PriceListingGenerator {
    fn generate(&self, table: &ResultTable) -> BenchResult<Vec<PathBuf>> {
        print!("{}", self.render(table));
        Ok(Vec::new())
    }
}

/// Writes the raw rows to a CSV file
pub struct CsvReportGenerator {
    path: PathBuf,
}

impl CsvReportGenerator {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ReportGenerator for CsvReportGenerator {
    fn generate(&self, table: &ResultTable) -> BenchResult<Vec<PathBuf>> {
        DataFrameHandler::write_csv(table, &self.path)?;
        Ok(vec![self.path.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::types::{Metric, ResultRow};

    fn table() -> ResultTable {
        vec![
            ResultRow::new("esp32", "kws", Metric::Throughput, 20.0),
            ResultRow::new("esp32", "kws", Metric::Energy, 55.5),
            ResultRow::new("esp32", "kws", Metric::Power, 140.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_listing_uses_listing_prices() {
        let generator = PriceListingGenerator::new(&VizConfig::default());
        let listing = generator.render(&table());
        assert!(listing.contains("esp32      kws        10.00        20.00      55.50        2.0000"));
    }

    #[test]
    fn test_csv_generator_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let written = CsvReportGenerator::new(path.clone())
            .generate(&table())
            .unwrap();
        assert_eq!(written, vec![path.clone()]);
        assert!(path.exists());
    }

    #[test]
    fn test_chart_generators_skip_empty_tables() {
        let dir = tempfile::tempdir().unwrap();
        let config = VizConfig {
            output_dir: dir.path().to_path_buf(),
            ..VizConfig::default()
        };
        let generators: Vec<Box<dyn ReportGenerator>> = vec![
            Box::new(MetricChartGenerator::new(config.clone())),
            Box::new(PriceChartGenerator::new(config)),
        ];
        for generator in generators {
            assert!(generator.generate(&ResultTable::new()).unwrap().is_empty());
        }
    }
}

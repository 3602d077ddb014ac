use crate::errors::{BenchError, BenchResult};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Prefix for environment overrides, e.g. `MCU_BENCH_DATA_DIR`
pub const ENV_PREFIX: &str = "MCU_BENCH";
/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_NAME: &str = "mcu-bench";

/// Image format for rendered charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    Png,
    Svg,
}

impl ChartFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ChartFormat::Png => "png",
            ChartFormat::Svg => "svg",
        }
    }
}

impl FromStr for ChartFormat {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ChartFormat::Png),
            "svg" => Ok(ChartFormat::Svg),
            other => Err(BenchError::ConfigError(format!(
                "Unsupported chart format '{}', expected png or svg",
                other
            ))),
        }
    }
}

impl fmt::Display for ChartFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Settings shared by every report
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VizConfig {
    /// Root of the benchmark result tree
    pub data_dir: PathBuf,
    /// Where chart images are written
    pub output_dir: PathBuf,
    /// `png` or `svg`
    pub save_format: String,
    /// Fixed x-axis order of models in charts
    pub model_order: Vec<String>,
    /// Fixed legend order of devices in charts
    pub mcu_order: Vec<String>,
    /// Unit prices in EUR used by the price charts
    pub chart_prices: HashMap<String, f64>,
    /// Unit prices in EUR used by the price listing
    pub listing_prices: HashMap<String, f64>,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("Data"),
            output_dir: PathBuf::from("."),
            save_format: "png".to_string(),
            model_order: vec!["kws".into(), "ic".into(), "vww".into()],
            mcu_order: vec!["esp32".into(), "s3".into(), "giga".into(), "teensy".into()],
            chart_prices: HashMap::from([
                ("esp32".to_string(), 6.00),
                ("s3".to_string(), 20.00),
                ("teensy".to_string(), 25.00),
                ("giga".to_string(), 75.00),
            ]),
            listing_prices: HashMap::from([
                ("esp32".to_string(), 10.00),
                ("s3".to_string(), 19.80),
                ("teensy".to_string(), 29.50),
                ("giga".to_string(), 63.80),
            ]),
        }
    }
}

impl VizConfig {
    /// Load defaults, then a config file, then `MCU_BENCH_*` environment variables
    ///
    /// Without an explicit path, `mcu-bench.toml` in the working directory is
    /// used when it exists.
    pub fn load(config_file: Option<&Path>) -> BenchResult<Self> {
        let file_source = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config = Config::builder()
            .add_source(file_source)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("model_order")
                    .with_list_parse_key("mcu_order")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Self = config.try_deserialize()?;
        settings.chart_format()?;
        Ok(settings)
    }

    pub fn chart_format(&self) -> BenchResult<ChartFormat> {
        self.save_format.parse()
    }
}

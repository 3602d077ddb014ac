use crate::config::{ChartFormat, VizConfig};
use crate::errors::{util::to_chart_error, BenchResult};
use crate::reporting::price::{fps_per_euro, PriceTable};
use crate::reporting::types::{mean, Metric, ResultTable};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const CHART_SIZE: (u32, u32) = (1000, 600);

// Ten evenly spaced samples of the viridis colormap
const VIRIDIS: [RGBColor; 10] = [
    RGBColor(0x44, 0x01, 0x54),
    RGBColor(0x48, 0x28, 0x78),
    RGBColor(0x3e, 0x49, 0x89),
    RGBColor(0x31, 0x68, 0x8e),
    RGBColor(0x26, 0x82, 0x8e),
    RGBColor(0x1f, 0x9e, 0x89),
    RGBColor(0x35, 0xb7, 0x79),
    RGBColor(0x6e, 0xce, 0x58),
    RGBColor(0xb5, 0xde, 0x2b),
    RGBColor(0xfd, 0xe7, 0x25),
];

/// Colour for series `index` of `count`, spread across the palette
pub fn palette_color(index: usize, count: usize) -> RGBColor {
    if count <= 1 {
        return VIRIDIS[0];
    }
    let last = VIRIDIS.len() - 1;
    VIRIDIS[(index.min(count - 1) * last) / (count - 1)]
}

/// Orders `present` by `preferred`, appending the rest alphabetically
pub fn ordered(present: &[String], preferred: &[String]) -> Vec<String> {
    let mut result: Vec<String> = preferred
        .iter()
        .filter(|p| present.contains(p))
        .cloned()
        .collect();
    let mut rest: Vec<String> = present
        .iter()
        .filter(|p| !preferred.contains(p))
        .cloned()
        .collect();
    rest.sort();
    rest.dedup();
    result.extend(rest);
    result
}

pub fn metric_chart_filename(metric: Metric, format: ChartFormat) -> String {
    format!("{}_chart.{}", metric.file_prefix(), format.extension())
}

pub fn price_scatter_filename(metric: Metric, format: ChartFormat) -> String {
    format!("Scatter_Price_{}.{}", metric.file_prefix(), format.extension())
}

pub fn fps_per_euro_filename(format: ChartFormat) -> String {
    format!("Bar_FPS_per_Euro.{}", format.extension())
}

/// One legend entry of a grouped bar chart, one value slot per category
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Bars grouped by category (model) with one series per device
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedBars {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

impl GroupedBars {
    /// Mean value per model and device; each bar averages repeated rows
    pub fn from_table(table: &ResultTable, config: &VizConfig) -> Self {
        let categories = ordered(&table.models(), &config.model_order);
        let devices = ordered(&table.devices(), &config.mcu_order);

        let series = devices
            .into_iter()
            .map(|device| {
                let values = categories
                    .iter()
                    .map(|model| {
                        mean(
                            table
                                .rows()
                                .iter()
                                .filter(|r| r.device_id == device && &r.model_id == model)
                                .map(|r| r.value),
                        )
                    })
                    .collect();
                BarSeries {
                    name: device,
                    values,
                }
            })
            .collect();

        Self {
            title: String::new(),
            x_desc: "Model".to_string(),
            y_desc: String::new(),
            categories,
            series,
        }
    }

    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .fold(0.0, |acc: f64, v| acc.max(*v))
    }

    fn category_label(&self, x: f64) -> String {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        self.categories
            .get(idx as usize)
            .cloned()
            .unwrap_or_default()
    }
}

/// A single marker of a price scatter plot
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub device_id: String,
    pub model_id: String,
    pub price: f64,
    pub value: f64,
}

/// Price on the x axis against a metric, coloured by device
#[derive(Debug, Clone, PartialEq)]
pub struct PriceScatter {
    pub title: String,
    pub y_desc: String,
    pub devices: Vec<String>,
    pub points: Vec<ScatterPoint>,
}

impl PriceScatter {
    pub fn from_table(table: &ResultTable, prices: &PriceTable, config: &VizConfig) -> Self {
        let points = table
            .rows()
            .iter()
            .map(|row| ScatterPoint {
                device_id: row.device_id.clone(),
                model_id: row.model_id.clone(),
                price: prices.price_or_zero(&row.device_id),
                value: row.value,
            })
            .collect();

        Self {
            title: String::new(),
            y_desc: String::new(),
            devices: ordered(&table.devices(), &config.mcu_order),
            points,
        }
    }
}

/// Something that can draw itself on any plotters backend
pub trait Chart {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> BenchResult<()>;
}

impl Chart for GroupedBars {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> BenchResult<()> {
        root.fill(&WHITE).map_err(to_chart_error)?;

        let y_max = match self.max_value() {
            m if m > 0.0 => m * 1.1,
            _ => 1.0,
        };
        let n = self.categories.len().max(1) as f64;

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, ("sans-serif", 30).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..(n - 0.5), 0f64..y_max)
            .map_err(to_chart_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(self.categories.len().max(1))
            .x_label_formatter(&|x| self.category_label(*x))
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .draw()
            .map_err(to_chart_error)?;

        let group_width = 0.8;
        let bar_width = group_width / self.series.len().max(1) as f64;

        for (s_idx, series) in self.series.iter().enumerate() {
            let color = palette_color(s_idx, self.series.len());
            let bars = series.values.iter().enumerate().filter_map(|(c_idx, value)| {
                let value = (*value)?;
                let x0 = c_idx as f64 - group_width / 2.0 + s_idx as f64 * bar_width;
                Some(Rectangle::new(
                    [(x0, 0.0), (x0 + bar_width, value)],
                    color.filled(),
                ))
            });

            chart
                .draw_series(bars)
                .map_err(to_chart_error)?
                .label(series.name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(to_chart_error)?;

        root.present().map_err(to_chart_error)?;
        Ok(())
    }
}

impl Chart for PriceScatter {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> BenchResult<()> {
        root.fill(&WHITE).map_err(to_chart_error)?;

        let upper = |values: Vec<f64>| match values.into_iter().fold(0.0, f64::max) {
            m if m > 0.0 => m * 1.15,
            _ => 1.0,
        };
        let x_max = upper(self.points.iter().map(|p| p.price).collect());
        let y_max = upper(self.points.iter().map(|p| p.value).collect());

        let mut chart = ChartBuilder::on(root)
            .caption(&self.title, ("sans-serif", 30).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..x_max, 0f64..y_max)
            .map_err(to_chart_error)?;

        chart
            .configure_mesh()
            .x_desc("Price (EUR)")
            .y_desc(self.y_desc.as_str())
            .draw()
            .map_err(to_chart_error)?;

        for (d_idx, device) in self.devices.iter().enumerate() {
            let color = palette_color(d_idx, self.devices.len());
            let markers = self
                .points
                .iter()
                .filter(|p| &p.device_id == device)
                .map(|p| {
                    EmptyElement::at((p.price, p.value))
                        + Circle::new((0, 0), 6, color.filled())
                        + Text::new(p.model_id.clone(), (8, -8), ("sans-serif", 15).into_font())
                });

            chart
                .draw_series(markers)
                .map_err(to_chart_error)?
                .label(device.as_str())
                .legend(move |(x, y)| Circle::new((x + 5, y), 5, color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(to_chart_error)?;

        root.present().map_err(to_chart_error)?;
        Ok(())
    }
}

/// Draw a chart into `path` with the backend matching `format`
pub fn render_to_file<C: Chart>(chart: &C, path: &Path, format: ChartFormat) -> BenchResult<()> {
    match format {
        ChartFormat::Png => {
            let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
            chart.draw(&root)?;
        }
        ChartFormat::Svg => {
            let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
            chart.draw(&root)?;
        }
    }
    tracing::info!("Chart created: {}", path.display());
    Ok(())
}

/// Bar chart data for every metric in the table, in metric order
pub fn metric_charts(table: &ResultTable, config: &VizConfig) -> Vec<(Metric, GroupedBars)> {
    table
        .metrics()
        .into_iter()
        .map(|metric| {
            let mut bars = GroupedBars::from_table(&table.filter(metric), config);
            bars.title = format!("Comparison: {}", metric.label());
            bars.y_desc = metric.label().to_string();
            (metric, bars)
        })
        .collect()
}

/// One `<Metric>_chart.<ext>` per metric present; returns the written paths
pub fn render_metric_charts(table: &ResultTable, config: &VizConfig) -> BenchResult<Vec<PathBuf>> {
    let format = config.chart_format()?;
    let charts = metric_charts(table, config);
    if charts.is_empty() {
        return Ok(Vec::new());
    }

    fs::create_dir_all(&config.output_dir)?;
    let mut written = Vec::new();
    for (metric, bars) in charts {
        let path = config.output_dir.join(metric_chart_filename(metric, format));
        render_to_file(&bars, &path, format)?;
        written.push(path);
    }
    Ok(written)
}

/// FPS per euro bars; rows of devices priced at zero are left out
pub fn fps_per_euro_chart(table: &ResultTable, prices: &PriceTable, config: &VizConfig) -> GroupedBars {
    let per_euro: ResultTable = table
        .filter(Metric::Throughput)
        .into_iter()
        .filter_map(|mut row| {
            row.value = fps_per_euro(Some(row.value), prices.price_or_zero(&row.device_id))?;
            Some(row)
        })
        .collect();

    let mut bars = GroupedBars::from_table(&per_euro, config);
    bars.title = "Price/performance: FPS per euro".to_string();
    bars.y_desc = "FPS / EUR (higher is better)".to_string();
    bars
}

/// Price scatter plots and the FPS per euro bar chart
///
/// Throughput charts need throughput rows, the energy scatter needs energy
/// rows; a chart without data is not written.
pub fn render_price_charts(
    table: &ResultTable,
    prices: &PriceTable,
    config: &VizConfig,
) -> BenchResult<Vec<PathBuf>> {
    let format = config.chart_format()?;
    let throughput = table.filter(Metric::Throughput);
    let energy = table.filter(Metric::Energy);
    if throughput.is_empty() && energy.is_empty() {
        return Ok(Vec::new());
    }

    fs::create_dir_all(&config.output_dir)?;
    let mut written = Vec::new();

    if !throughput.is_empty() {
        let mut scatter = PriceScatter::from_table(&throughput, prices, config);
        scatter.title = "Price vs. performance (throughput)".to_string();
        scatter.y_desc = Metric::Throughput.label().to_string();
        let path = config
            .output_dir
            .join(price_scatter_filename(Metric::Throughput, format));
        render_to_file(&scatter, &path, format)?;
        written.push(path);

        let bars = fps_per_euro_chart(&throughput, prices, config);
        let path = config.output_dir.join(fps_per_euro_filename(format));
        render_to_file(&bars, &path, format)?;
        written.push(path);
    }

    if !energy.is_empty() {
        let mut scatter = PriceScatter::from_table(&energy, prices, config);
        scatter.title = "Price vs. energy consumption".to_string();
        scatter.y_desc = "Energy per inference (uJ)".to_string();
        let path = config
            .output_dir
            .join(price_scatter_filename(Metric::Energy, format));
        render_to_file(&scatter, &path, format)?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::types::ResultRow;
    use std::collections::HashMap;
    use test_case::test_case;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn table() -> ResultTable {
        vec![
            ResultRow::new("teensy", "kws", Metric::Throughput, 30.0),
            ResultRow::new("esp32", "kws", Metric::Throughput, 10.0),
            ResultRow::new("esp32", "kws", Metric::Throughput, 20.0),
            ResultRow::new("esp32", "ad", Metric::Throughput, 5.0),
            ResultRow::new("nucleo", "vww", Metric::Throughput, 2.0),
            ResultRow::new("esp32", "kws", Metric::Energy, 90.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_ordered() {
        let present = strings(&["zeta", "s3", "alpha", "esp32"]);
        let preferred = strings(&["esp32", "s3", "giga"]);
        assert_eq!(
            ordered(&present, &preferred),
            strings(&["esp32", "s3", "alpha", "zeta"])
        );
    }

    #[test]
    fn test_filenames() {
        assert_eq!(
            metric_chart_filename(Metric::Throughput, ChartFormat::Png),
            "Throughput_chart.png"
        );
        assert_eq!(
            price_scatter_filename(Metric::Energy, ChartFormat::Svg),
            "Scatter_Price_Energy.svg"
        );
        assert_eq!(fps_per_euro_filename(ChartFormat::Png), "Bar_FPS_per_Euro.png");
    }

    #[test]
    fn test_palette_spread() {
        assert_eq!(palette_color(0, 1), VIRIDIS[0]);
        assert_eq!(palette_color(0, 4), VIRIDIS[0]);
        assert_eq!(palette_color(3, 4), VIRIDIS[9]);
        assert_eq!(palette_color(1, 4), VIRIDIS[3]);
    }

    #[test]
    fn test_grouped_bars_average_repeated_rows() {
        let config = VizConfig::default();
        let bars = GroupedBars::from_table(&table().filter(Metric::Throughput), &config);

        assert_eq!(bars.categories, strings(&["kws", "vww", "ad"]));
        let names: Vec<&str> = bars.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["esp32", "teensy", "nucleo"]);
        assert_eq!(bars.series[0].values, vec![Some(15.0), None, Some(5.0)]);
        assert_eq!(bars.series[1].values, vec![Some(30.0), None, None]);
        assert_eq!(bars.max_value(), 30.0);
    }

    #[test]
    fn test_category_labels() {
        let config = VizConfig::default();
        let bars = GroupedBars::from_table(&table().filter(Metric::Throughput), &config);
        assert_eq!(bars.category_label(0.0), "kws");
        assert_eq!(bars.category_label(2.0), "ad");
        assert_eq!(bars.category_label(0.5), "");
        assert_eq!(bars.category_label(3.0), "");
        assert_eq!(bars.category_label(-1.0), "");
    }

    #[test]
    fn test_metric_charts_one_per_metric() {
        let charts = metric_charts(&table(), &VizConfig::default());
        let metrics: Vec<Metric> = charts.iter().map(|(m, _)| *m).collect();
        assert_eq!(metrics, vec![Metric::Throughput, Metric::Energy]);
        assert_eq!(charts[1].1.title, "Comparison: Energy (uJ)");
        assert_eq!(charts[1].1.series.len(), 1);
    }

    #[test]
    fn test_fps_per_euro_chart_skips_unpriced() {
        let prices = PriceTable::new(HashMap::from([
            ("esp32".to_string(), 5.0),
            ("teensy".to_string(), 25.0),
        ]));
        let bars = fps_per_euro_chart(&table(), &prices, &VizConfig::default());

        let names: Vec<&str> = bars.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["esp32", "teensy"]);
        assert_eq!(bars.categories, strings(&["kws", "ad"]));
        assert_eq!(bars.series[0].values, vec![Some(3.0), Some(1.0)]);
        assert_eq!(bars.series[1].values, vec![Some(1.2), None]);
    }

    #[test]
    fn test_price_scatter_points() {
        let prices = PriceTable::new(HashMap::from([("esp32".to_string(), 6.0)]));
        let scatter = PriceScatter::from_table(
            &table().filter(Metric::Energy),
            &prices,
            &VizConfig::default(),
        );
        assert_eq!(scatter.devices, strings(&["esp32"]));
        assert_eq!(
            scatter.points,
            vec![ScatterPoint {
                device_id: "esp32".into(),
                model_id: "kws".into(),
                price: 6.0,
                value: 90.0,
            }]
        );
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = VizConfig {
            output_dir: dir.path().join("charts"),
            ..VizConfig::default()
        };
        let prices = PriceTable::default();

        assert!(render_metric_charts(&ResultTable::new(), &config).unwrap().is_empty());
        assert!(render_price_charts(&ResultTable::new(), &prices, &config)
            .unwrap()
            .is_empty());
        assert!(!config.output_dir.exists());
    }

    #[test_case("png" ; "bitmap backend")]
    #[test_case("svg" ; "svg backend")]
    fn test_renders_chart_files(save_format: &str) {
        let dir = tempfile::tempdir().unwrap();
        let config = VizConfig {
            output_dir: dir.path().join("charts"),
            save_format: save_format.to_string(),
            ..VizConfig::default()
        };
        let table: ResultTable = vec![
            ResultRow::new("esp32", "kws", Metric::Throughput, 12.5),
            ResultRow::new("s3", "kws", Metric::Energy, 48.0),
        ]
        .into_iter()
        .collect();
        let prices = PriceTable::new(HashMap::from([
            ("esp32".to_string(), 6.0),
            ("s3".to_string(), 20.0),
        ]));

        let names = |paths: Vec<PathBuf>| -> Vec<String> {
            paths
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                .collect()
        };

        let written = render_metric_charts(&table, &config).unwrap();
        assert!(written.iter().all(|p| p.is_file()));
        assert_eq!(
            names(written),
            vec![
                format!("Throughput_chart.{}", save_format),
                format!("Energy_chart.{}", save_format),
            ]
        );

        let written = render_price_charts(&table, &prices, &config).unwrap();
        assert!(written.iter().all(|p| p.is_file()));
        assert_eq!(
            names(written),
            vec![
                format!("Scatter_Price_Throughput.{}", save_format),
                format!("Bar_FPS_per_Euro.{}", save_format),
                format!("Scatter_Price_Energy.{}", save_format),
            ]
        );
    }
}

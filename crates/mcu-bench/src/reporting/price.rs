use crate::reporting::types::{mean, Metric, ResultTable};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Hand-maintained unit prices in EUR, keyed by device id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    prices: HashMap<String, f64>,
}

impl PriceTable {
    pub fn new(prices: HashMap<String, f64>) -> Self {
        Self { prices }
    }

    pub fn get(&self, device_id: &str) -> Option<f64> {
        self.prices.get(device_id).copied()
    }

    /// Price of a device, `0.0` when it is not listed
    pub fn price_or_zero(&self, device_id: &str) -> f64 {
        self.get(device_id).unwrap_or(0.0)
    }

    /// Devices in the table that have no price, sorted
    pub fn unpriced_devices(&self, table: &ResultTable) -> Vec<String> {
        table
            .devices()
            .into_iter()
            .filter(|device| !self.prices.contains_key(device))
            .collect()
    }

    /// Log one warning per device without a price
    pub fn warn_unpriced(&self, table: &ResultTable) {
        for device in self.unpriced_devices(table) {
            tracing::warn!("No price found for '{}', using 0", device);
        }
    }
}

impl From<&HashMap<String, f64>> for PriceTable {
    fn from(prices: &HashMap<String, f64>) -> Self {
        Self::new(prices.clone())
    }
}

/// Throughput divided by price, `None` for a missing value or a zero price
pub fn fps_per_euro(throughput: Option<f64>, price: f64) -> Option<f64> {
    match throughput {
        Some(fps) if price != 0.0 => Some(fps / price),
        _ => None,
    }
}

/// One device/model line of the price comparison
#[derive(Debug, Clone, PartialEq)]
pub struct PriceComparisonRow {
    pub device_id: String,
    pub model_id: String,
    pub price: f64,
    pub throughput: Option<f64>,
    pub energy: Option<f64>,
    pub fps_per_euro: Option<f64>,
}

/// Result rows pivoted into one line per device and model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceComparison {
    pub rows: Vec<PriceComparisonRow>,
}

impl PriceComparison {
    /// Pivot throughput and energy side by side, averaging repeated rows
    ///
    /// Lines are ordered by model, then device.
    pub fn build(table: &ResultTable, prices: &PriceTable) -> Self {
        let mut values: BTreeMap<(String, String), HashMap<Metric, Vec<f64>>> = BTreeMap::new();
        for row in table.rows() {
            if row.metric == Metric::Power {
                continue;
            }
            values
                .entry((row.model_id.clone(), row.device_id.clone()))
                .or_default()
                .entry(row.metric)
                .or_default()
                .push(row.value);
        }

        let rows = values
            .into_iter()
            .map(|((model_id, device_id), metrics)| {
                let metric_mean =
                    |metric: Metric| metrics.get(&metric).and_then(|v| mean(v.iter().copied()));
                let price = prices.price_or_zero(&device_id);
                let throughput = metric_mean(Metric::Throughput);
                PriceComparisonRow {
                    price,
                    throughput,
                    energy: metric_mean(Metric::Energy),
                    fps_per_euro: fps_per_euro(throughput, price),
                    device_id,
                    model_id,
                }
            })
            .collect();

        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Models in first-seen order
    pub fn models(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.rows
            .iter()
            .map(|row| row.model_id.as_str())
            .filter(|model| seen.insert(*model))
            .collect()
    }

    pub fn rows_for_model<'a>(
        &'a self,
        model_id: &'a str,
    ) -> impl Iterator<Item = &'a PriceComparisonRow> + 'a {
        self.rows.iter().filter(move |row| row.model_id == model_id)
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A metric extracted from a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Inferences per second, from `results.json`
    Throughput,
    /// Energy per inference in uJ, from `results.txt`
    Energy,
    /// Average power draw in mW, from `results.txt`
    Power,
}

impl Metric {
    /// Label used for chart axes and titles
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Throughput => "Throughput (FPS)",
            Metric::Energy => "Energy (uJ)",
            Metric::Power => "Power (mW)",
        }
    }

    /// First word of the label, used to name chart files
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Metric::Throughput => "Throughput",
            Metric::Energy => "Energy",
            Metric::Power => "Power",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_prefix())
    }
}

/// One averaged measurement for a device/model pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub device_id: String,
    pub model_id: String,
    pub metric: Metric,
    pub value: f64,
}

impl ResultRow {
    pub fn new(device_id: &str, model_id: &str, metric: Metric, value: f64) -> Self {
        Self {
            device_id: device_id.to_string(),
            model_id: model_id.to_string(),
            metric,
            value,
        }
    }
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {}: {}",
            self.device_id, self.model_id, self.metric, self.value
        )
    }
}

/// The flat table of rows produced by one extraction
///
/// Row order follows the directory walk and carries no meaning. Use
/// [`ResultTable::sorted`] before displaying rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    pub fn extend<I: IntoIterator<Item = ResultRow>>(&mut self, rows: I) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Metrics present in the table, in declaration order
    pub fn metrics(&self) -> Vec<Metric> {
        let present: BTreeSet<Metric> = self.rows.iter().map(|r| r.metric).collect();
        present.into_iter().collect()
    }

    /// Rows for a single metric
    pub fn filter(&self, metric: Metric) -> ResultTable {
        self.rows
            .iter()
            .filter(|r| r.metric == metric)
            .cloned()
            .collect()
    }

    /// Rows ordered by device, model, metric, then value
    pub fn sorted(&self) -> ResultTable {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            (&a.device_id, &a.model_id, a.metric)
                .cmp(&(&b.device_id, &b.model_id, b.metric))
                .then(a.value.total_cmp(&b.value))
        });
        ResultTable { rows }
    }

    /// Distinct device ids, sorted
    pub fn devices(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.rows.iter().map(|r| r.device_id.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// Distinct model ids, sorted
    pub fn models(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.rows.iter().map(|r| r.model_id.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    /// Mean of all rows matching a device, model and metric
    pub fn mean_for(&self, device_id: &str, model_id: &str, metric: Metric) -> Option<f64> {
        mean(
            self.rows
                .iter()
                .filter(|r| r.device_id == device_id && r.model_id == model_id && r.metric == metric)
                .map(|r| r.value),
        )
    }
}

impl FromIterator<ResultRow> for ResultTable {
    fn from_iter<I: IntoIterator<Item = ResultRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ResultTable {
    type Item = ResultRow;
    type IntoIter = std::vec::IntoIter<ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Arithmetic mean, `None` for an empty input
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

use crate::errors::BenchResult;
use crate::reporting::types::mean;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;

// Python-written results may contain bare NaN/Infinity, which strict JSON rejects
static NON_FINITE_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([:\[,]\s*)-?(?:NaN|Infinity)\b").unwrap());

/// Read a `results.json` file and return the mean throughput across its runs
///
/// Returns `Ok(None)` when the document holds no usable throughput value.
pub fn extract_throughput(path: &Path) -> BenchResult<Option<f64>> {
    let content = fs::read_to_string(path)?;
    let document = parse_results_json(&content)?;
    Ok(mean_throughput(&document))
}

/// Parse the document, mapping non-finite literals to `null`
pub fn parse_results_json(content: &str) -> BenchResult<Value> {
    let sanitized = NON_FINITE_LITERAL.replace_all(content, "${1}null");
    Ok(serde_json::from_str(&sanitized)?)
}

/// Valid `infer.throughput` readings of a single record or a list of records
pub fn throughput_values(document: &Value) -> Vec<f64> {
    let runs: Vec<&Value> = match document {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    runs.into_iter()
        .filter_map(|run| run.get("infer")?.get("throughput")?.as_f64())
        .filter(|value| !value.is_nan())
        .collect()
}

pub fn mean_throughput(document: &Value) -> Option<f64> {
    mean(throughput_values(document))
}

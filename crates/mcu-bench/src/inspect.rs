use crate::errors::{util::ensure_file_exists, BenchResult};
use crate::extractor::throughput::parse_results_json;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Describe the key layout of a JSON document, one line per key
///
/// Arrays are assumed homogeneous: only the first element is described.
pub fn describe_structure(value: &Value) -> String {
    let mut lines = Vec::new();
    describe(value, 0, &mut lines);
    lines.join("\n")
}

fn describe(value: &Value, level: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(level);
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                lines.push(format!("{}- {}", indent, key));
                describe(child, level + 1, lines);
            }
        }
        Value::Array(items) => match items.first() {
            Some(first) => {
                lines.push(format!("{}[ list with {} entries ]", indent, items.len()));
                lines.push(format!("{}  (structure of one element:)", indent));
                describe(first, level + 2, lines);
            }
            None => lines.push(format!("{}[] (empty list)", indent)),
        },
        _ => {}
    }
}

/// Read a JSON file and describe its structure
pub fn inspect_file(path: &Path) -> BenchResult<String> {
    ensure_file_exists(path)?;
    let content = fs::read_to_string(path)?;
    let value = parse_results_json(&content)?;
    Ok(describe_structure(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_objects_and_lists() {
        let value = json!([
            {"infer": {"throughput": 10.0, "runs": []}},
            {"infer": {"throughput": 20.0, "runs": []}}
        ]);
        let expected = "\
[ list with 2 entries ]
  (structure of one element:)
    - infer
      - throughput
      - runs
        [] (empty list)";
        assert_eq!(describe_structure(&value), expected);
    }

    #[test]
    fn test_keys_keep_document_order() {
        let value: Value = serde_json::from_str(r#"{"setup": 1, "infer": 2}"#).unwrap();
        assert_eq!(describe_structure(&value), "- setup\n- infer");
    }

    #[test]
    fn test_scalar_has_no_structure() {
        assert_eq!(describe_structure(&json!(3)), "");
    }

    #[test]
    fn test_inspect_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        assert!(inspect_file(&path).is_err());

        std::fs::write(&path, r#"{"setup": {"device": "esp32"}}"#).unwrap();
        assert_eq!(inspect_file(&path).unwrap(), "- setup\n  - device");

        std::fs::write(&path, r#"{"infer": {"throughput": NaN}, "device": "s3"}"#).unwrap();
        assert_eq!(inspect_file(&path).unwrap(), "- infer\n  - throughput\n- device");

        std::fs::write(&path, "[").unwrap();
        assert!(inspect_file(&path).is_err());
    }
}

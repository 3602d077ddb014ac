use crate::errors::BenchResult;
use crate::reporting::types::mean;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static POWER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Power\s*:\s*([0-9\w.-]+)\s*mW").unwrap());
static ENERGY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Energy/Inf\s*:\s*([0-9\w.-]+)\s*uJ/inf").unwrap());

/// Valid power and energy readings found in one energy log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyReadings {
    /// Power draw samples in mW
    pub power: Vec<f64>,
    /// Energy per inference samples in uJ
    pub energy: Vec<f64>,
}

impl EnergyReadings {
    pub fn mean_power(&self) -> Option<f64> {
        mean(self.power.iter().copied())
    }

    pub fn mean_energy(&self) -> Option<f64> {
        mean(self.energy.iter().copied())
    }
}

/// Read a `results.txt` log, dropping bytes that are not valid UTF-8
pub fn read_energy_log(path: &Path) -> BenchResult<EnergyReadings> {
    let bytes = fs::read(path)?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(parse_energy_log(&content))
}

pub fn parse_energy_log(content: &str) -> EnergyReadings {
    EnergyReadings {
        power: capture_values(&POWER_PATTERN, content),
        energy: capture_values(&ENERGY_PATTERN, content),
    }
}

// Captures that don't parse, `nan` included, are skipped without complaint
fn capture_values(pattern: &Regex, content: &str) -> Vec<f64> {
    pattern
        .captures_iter(content)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
        .filter(|value| !value.is_nan())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LOG: &str = "\
00042.123 ulp-mlperf: Power : 100.0 mW
00042.124 ulp-mlperf: Power : nan mW
00042.125 ulp-mlperf: Energy/Inf : 50.0 uJ/inf
";

    #[test]
    fn test_nan_power_is_excluded() {
        let readings = parse_energy_log(SAMPLE_LOG);
        assert_eq!(readings.power, vec![100.0]);
        assert_eq!(readings.energy, vec![50.0]);
        assert_eq!(readings.mean_power(), Some(100.0));
        assert_eq!(readings.mean_energy(), Some(50.0));
    }

    #[test]
    fn test_flexible_spacing_and_averaging() {
        let content = "Power:146.5 mW\nPower :  153.5mW\nEnergy/Inf:10 uJ/inf\nEnergy/Inf : 30 uJ/inf";
        let readings = parse_energy_log(content);
        assert_eq!(readings.mean_power(), Some(150.0));
        assert_eq!(readings.mean_energy(), Some(20.0));
    }

    #[test]
    fn test_noise_is_discarded() {
        let content = "Power : n/a mW\nPower : 1.2.3 mW\nEnergy/Inf : NaN uJ/inf\nEnergy/Inf : -- uJ/inf";
        let readings = parse_energy_log(content);
        assert!(readings.power.is_empty());
        assert!(readings.energy.is_empty());
        assert_eq!(readings.mean_power(), None);
        assert_eq!(readings.mean_energy(), None);
    }

    #[test]
    fn test_read_log_with_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        let mut bytes = b"Power : 80.0 mW\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        bytes.extend_from_slice(b"Energy/Inf : 12.5 uJ/inf\n");
        std::fs::write(&path, bytes).unwrap();

        let readings = read_energy_log(&path).unwrap();
        assert_eq!(readings.power, vec![80.0]);
        assert_eq!(readings.energy, vec![12.5]);
    }

    #[test]
    fn test_read_missing_log() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_energy_log(&dir.path().join("results.txt")).is_err());
    }
}

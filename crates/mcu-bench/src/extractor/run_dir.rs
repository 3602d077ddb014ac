use std::fmt;

/// Token marking a performance (throughput) run directory
pub const PERFORMANCE_TOKEN: &str = "p";
/// Token marking an energy/power run directory
pub const ENERGY_TOKEN: &str = "e";

/// What kind of results a run directory holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Performance,
    Energy,
}

impl RunMode {
    /// Result file expected inside a directory of this mode
    pub fn results_file(&self) -> &'static str {
        match self {
            RunMode::Performance => "results.json",
            RunMode::Energy => "results.txt",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Performance => write!(f, "performance"),
            RunMode::Energy => write!(f, "energy"),
        }
    }
}

/// Device, model and mode decoded from a run directory name
///
/// Names look like `<device tokens>_<model>_<p|e>[_<suffix tokens>]`, so
/// `x_y_kws_p` is the `kws` model on device `x_y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirectory {
    pub device_id: String,
    pub model_id: String,
    pub mode: RunMode,
}

impl RunDirectory {
    /// Classify a directory basename, `None` when it is not a run directory
    pub fn parse(name: &str) -> Option<Self> {
        let parts: Vec<&str> = name.split('_').collect();

        // `p` is looked up first, so a name holding both tokens is a performance run
        let (mode, mode_idx) = if let Some(idx) = position(&parts, PERFORMANCE_TOKEN) {
            (RunMode::Performance, idx)
        } else if let Some(idx) = position(&parts, ENERGY_TOKEN) {
            (RunMode::Energy, idx)
        } else {
            return None;
        };

        if mode_idx == 0 {
            return None;
        }

        Some(Self {
            device_id: parts[..mode_idx - 1].join("_"),
            model_id: parts[mode_idx - 1].to_string(),
            mode,
        })
    }
}

fn position(parts: &[&str], token: &str) -> Option<usize> {
    parts.iter().position(|part| *part == token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("x_y_kws_p", "x_y", "kws", RunMode::Performance ; "multi token device")]
    #[test_case("esp32_ic_e", "esp32", "ic", RunMode::Energy ; "energy run")]
    #[test_case("giga_vww_p_run2", "giga", "vww", RunMode::Performance ; "suffix tokens")]
    #[test_case("kws_p", "", "kws", RunMode::Performance ; "no device tokens")]
    #[test_case("s3_kws_e_ic_p", "s3_kws_e", "ic", RunMode::Performance ; "p preferred over e")]
    fn test_parse(name: &str, device: &str, model: &str, mode: RunMode) {
        let run = RunDirectory::parse(name).unwrap();
        assert_eq!(run.device_id, device);
        assert_eq!(run.model_id, model);
        assert_eq!(run.mode, mode);
    }

    #[test_case("Data" ; "plain name")]
    #[test_case("esp32_kws" ; "no mode token")]
    #[test_case("esp32_kws_perf" ; "token must match exactly")]
    #[test_case("p_kws" ; "mode token first")]
    #[test_case("e" ; "only mode token")]
    #[test_case("" ; "empty name")]
    fn test_parse_skips(name: &str) {
        assert_eq!(RunDirectory::parse(name), None);
    }

    #[test]
    fn test_results_file() {
        assert_eq!(RunMode::Performance.results_file(), "results.json");
        assert_eq!(RunMode::Energy.results_file(), "results.txt");
    }
}

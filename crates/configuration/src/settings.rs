use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section falls back to its defaults, so an empty or absent
/// `config.toml` is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
    pub dice: DiceSettings,
    pub clustering: ClusteringSettings,
    pub segmentation: SegmentThresholds,
}

/// Where the CSV datasets live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub directory: PathBuf,
}

/// How command results are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Table,
    /// The full report as pretty-printed JSON.
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// When set, SVG charts are written to this directory.
    pub charts_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive such as `"info"` or `"clustering=debug"`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

/// Parameters for the two-dice Monte Carlo simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceSettings {
    pub trials: u64,
    pub seed: Option<u64>,
    /// Trial counts visited by the convergence study.
    pub convergence_trials: Vec<u64>,
}

/// Parameters for k-means customer segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringSettings {
    /// Number of segments for a plain `cluster` run.
    pub k: usize,
    /// Range swept by the elbow analysis.
    pub k_min: usize,
    pub k_max: usize,
    pub n_init: usize,
    pub max_iter: usize,
    pub tol: f64,
    pub seed: u64,
}

/// Income and spending cut-offs used to name customer segments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentThresholds {
    /// Income and spending below this are "low".
    pub low: f64,
    /// Income above this is "high".
    pub high_income: f64,
    /// Spending above this is "high".
    pub high_spending: f64,
}

// --- Default Implementations ---
// These allow a user to omit any section from their toml
// and still have it work with sensible defaults.

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "mlcourse.log".to_string(),
        }
    }
}

impl Default for DiceSettings {
    fn default() -> Self {
        Self {
            trials: 10_000,
            seed: None,
            convergence_trials: vec![100, 1_000, 10_000, 100_000, 1_000_000],
        }
    }
}

impl Default for ClusteringSettings {
    fn default() -> Self {
        Self {
            k: 5,
            k_min: 1,
            k_max: 10,
            n_init: 10,
            max_iter: 300,
            tol: 1e-4,
            seed: 42,
        }
    }
}

impl Default for SegmentThresholds {
    fn default() -> Self {
        Self {
            low: 40.0,
            high_income: 70.0,
            high_spending: 60.0,
        }
    }
}

impl Config {
    /// Rejects parameter combinations the commands cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dice.trials == 0 {
            return Err(ConfigError::ValidationError(
                "dice.trials must be at least 1".to_string(),
            ));
        }
        if self.dice.convergence_trials.contains(&0) {
            return Err(ConfigError::ValidationError(
                "dice.convergence_trials entries must be at least 1".to_string(),
            ));
        }

        let c = &self.clustering;
        if c.k == 0 || c.k_min == 0 {
            return Err(ConfigError::ValidationError(
                "clustering.k and clustering.k_min must be at least 1".to_string(),
            ));
        }
        if c.k_max < c.k_min {
            return Err(ConfigError::ValidationError(format!(
                "clustering.k_max ({}) must not be below clustering.k_min ({})",
                c.k_max, c.k_min
            )));
        }
        if c.n_init == 0 || c.max_iter == 0 {
            return Err(ConfigError::ValidationError(
                "clustering.n_init and clustering.max_iter must be at least 1".to_string(),
            ));
        }
        if !c.tol.is_finite() || c.tol < 0.0 {
            return Err(ConfigError::ValidationError(
                "clustering.tol must be a non-negative number".to_string(),
            ));
        }

        let t = &self.segmentation;
        if t.low > t.high_income || t.low > t.high_spending {
            return Err(ConfigError::ValidationError(format!(
                "segmentation.low ({}) must not exceed high_income ({}) or high_spending ({})",
                t.low, t.high_income, t.high_spending
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dice.trials, 10_000);
        assert_eq!(config.segmentation.high_income, 70.0);
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = Config::default();
        config.dice.trials = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.clustering.k_min = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.clustering.k_min = 6;
        config.clustering.k_max = 5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.clustering.n_init = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.segmentation.low = 80.0;
        assert!(config.validate().is_err());
    }
}

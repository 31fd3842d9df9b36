//! # Configuration
//!
//! Strongly-typed application settings and logging setup.
//!
//! Settings are read from an optional `config.toml` and then overlaid with
//! `MLCOURSE__<SECTION>__<KEY>` environment variables, e.g.
//! `MLCOURSE__DICE__TRIALS=50000`.

use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{
    ClusteringSettings, Config, DataSettings, DiceSettings, LoggingSettings, OutputFormat,
    OutputSettings, SegmentThresholds,
};

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "MLCOURSE";

fn build<S>(file: S) -> Result<Config, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

/// Loads the application configuration from `config.toml` in the working directory.
///
/// A missing file is not an error; every setting has a default.
pub fn load_config() -> Result<Config, ConfigError> {
    build(config::File::with_name(DEFAULT_CONFIG_FILE).required(false))
}

/// Loads the application configuration from an explicit path, which must exist.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    build(config::File::from(path.as_ref()).required(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_from_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "[dice]\ntrials = 500\nseed = 7\n\n[clustering]\nk = 4\n\n[output]\nformat = \"json\""
        )
        .expect("write");

        let config = load_config_from(file.path()).expect("valid config");
        assert_eq!(config.dice.trials, 500);
        assert_eq!(config.dice.seed, Some(7));
        assert_eq!(config.clustering.k, 4);
        assert_eq!(config.clustering.k_max, 10);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_config_from_missing_file() {
        assert!(matches!(
            load_config_from("definitely/not/here.toml"),
            Err(ConfigError::LoadError(_))
        ));
    }

    #[test]
    fn test_invalid_file_values_fail_validation() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[clustering]\nk_min = 5\nk_max = 2").expect("write");
        assert!(matches!(
            load_config_from(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }
}

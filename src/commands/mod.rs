//! One module per subcommand. Each handler receives the resolved [`AppContext`].

use configuration::{Config, OutputFormat};
use datasets::DatasetRepository;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

pub mod cluster;
pub mod demo;
pub mod dice;
pub mod icrisat;
pub mod neuron;
pub mod spam;
pub mod swiggy;

/// Settings after command-line overrides have been applied.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub format: OutputFormat,
    pub charts_dir: Option<PathBuf>,
}

impl AppContext {
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// The dataset repository, rooted at `data_dir` when given.
    pub fn repository(&self, data_dir: Option<&Path>) -> DatasetRepository {
        DatasetRepository::new(data_dir.unwrap_or(self.config.data.directory.as_path()))
    }
}

/// A progress bar in the application style, hidden for JSON output.
pub fn progress_bar(len: u64, hidden: bool) -> anyhow::Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let progress_bar = ProgressBar::new(len);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );
    Ok(progress_bar)
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open dataset '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Column '{column}' not found. Available columns: {available}")]
    MissingColumn { column: String, available: String },

    #[error("Dataset '{0}' contains no rows")]
    Empty(PathBuf),
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusteringError {
    #[error("Input data has no samples or no features")]
    EmptyInput,

    #[error("Input data contains a non-finite value at row {row}, column {col}")]
    NonFinite { row: usize, col: usize },

    #[error("Cannot form {k} clusters from {n_samples} samples")]
    InvalidClusterCount { k: usize, n_samples: usize },

    #[error("Expected {expected} features, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Expected {expected} labels, found {found}")]
    LabelCountMismatch { expected: usize, found: usize },

    #[error("The transformer must be fitted before use")]
    NotFitted,

    #[error("Unknown label '{0}'")]
    UnknownLabel(String),

    #[error("Encoded value {0} does not correspond to any class")]
    UnknownCode(usize),

    #[error("Invalid labels for silhouette score: {0}")]
    InvalidLabels(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

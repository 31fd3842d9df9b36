use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Input lengths differ: {left} and {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Input '{0}' is constant; correlation is undefined")]
    ConstantInput(&'static str),

    #[error("Quantile must be in [0, 1], got {0}")]
    InvalidQuantile(f64),

    #[error("Bin edges must be strictly increasing and contain at least two values")]
    InvalidBins,

    #[error("Non-finite value encountered in '{0}'")]
    NonFinite(&'static str),

    #[error("Error in calculation: {0}")]
    Calculation(#[from] mlmath::MathError),
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpamError {
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: &'static str, min: u64 },

    #[error("{field} cannot exceed {limit}")]
    ExceedsLimit {
        field: &'static str,
        limit: &'static str,
    },

    #[error("Error in calculation: {0}")]
    Calculation(#[from] mlmath::MathError),
}

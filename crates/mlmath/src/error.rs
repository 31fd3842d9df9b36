use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Vectors must have the same length. Got {left} and {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Cannot {operation} an empty vector")]
    EmptyVector { operation: &'static str },

    #[error("Cannot normalize zero vector")]
    ZeroVector,

    #[error("All elements must be finite. Found non-finite value at index {index}")]
    NonFinite { index: usize },

    #[error("Result of {operation} overflowed to a non-finite value")]
    Overflow { operation: &'static str },

    #[error("Matrices cannot be empty")]
    EmptyMatrix,

    #[error("Matrix rows cannot be empty")]
    EmptyRow,

    #[error("All rows must have the same length: row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("All elements must be finite. Found non-finite value at [{row}][{col}]")]
    NonFiniteEntry { row: usize, col: usize },

    #[error(
        "Cannot multiply matrices: {}×{} and {}×{}. Number of columns in first matrix ({}) must equal number of rows in second matrix ({})",
        .lhs.0, .lhs.1, .rhs.0, .rhs.1, .lhs.1, .rhs.0
    )]
    IncompatibleDimensions {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error(
        "Cannot perform {} on matrices with different dimensions: {}×{} and {}×{}",
        .operation, .lhs.0, .lhs.1, .rhs.0, .rhs.1
    )]
    ShapeMismatch {
        operation: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("Size must be positive")]
    InvalidSize,

    #[error("{name} must be between 0 and 1, got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("Evidence probability cannot be zero")]
    ZeroEvidence,

    #[error("Invalid counts: {0}")]
    InvalidCounts(String),

    #[error("Joint probability cannot exceed individual probabilities")]
    JointExceedsMarginal,

    #[error("Sum of probabilities cannot exceed 1 (got {0})")]
    ProbabilitySumExceedsOne(f64),

    #[error("List cannot be empty")]
    EmptyList,
}

pub type Result<T> = std::result::Result<T, MathError>;

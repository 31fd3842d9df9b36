use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NeuronError {
    #[error("A neuron needs at least one weight")]
    NoWeights,

    #[error("Bias must be a finite number, got {0}")]
    InvalidBias(f64),

    #[error("Weighted sum is not a finite number (got {0})")]
    NonFiniteSum(f64),

    #[error("Error in calculation: {0}")]
    Calculation(#[from] mlmath::MathError),
}

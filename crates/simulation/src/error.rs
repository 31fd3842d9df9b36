use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("The number of trials must be at least 1")]
    NoTrials,
}

//! # Simulation
//!
//! Monte Carlo estimation of two-dice sum probabilities.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** No I/O. Results are plain serializable structs; presenting them
//!   is the binary's job.
//! - **Seeded Randomness:** A `DiceSimulation` owns its `StdRng`. Given a seed, every
//!   estimate is reproducible, and each convergence point is an independent run that can
//!   be computed on any thread.
//!
//! ## Public API
//!
//! - `DiceSimulation`: rolls pairs and tallies the tracked outcomes or the full distribution.
//! - `theoretical_outcomes`, `theoretical_sum_probability`: the exact values for comparison.
//! - `convergence_study` / `convergence_point`: estimate error as the trial count grows.
//! - `SimulationError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod dice;
pub mod error;

// Re-export the key components to create a clean, public-facing API.
pub use dice::{
    convergence_point, convergence_study, theoretical_outcomes, theoretical_sum_probability,
    ConvergencePoint, DiceSimulation, OutcomeProbabilities, RollCounts, SumDistribution,
};
pub use error::SimulationError;

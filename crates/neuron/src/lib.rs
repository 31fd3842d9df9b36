//! # Neuron
//!
//! A single artificial neuron with a sigmoid activation.
//!
//! ## Public API
//!
//! - `sigmoid`: the logistic function, evaluated without overflow.
//! - `Neuron` / `NeuronTrace`: weighted sum plus bias, then the activation.
//! - `calculate_neuron_output`: the two-input shortcut.
//! - `NeuronError`: The specific error types that can be returned from this crate.

pub mod activation;
pub mod error;
pub mod neuron;

pub use activation::sigmoid;
pub use error::NeuronError;
pub use neuron::{calculate_neuron_output, Neuron, NeuronTrace};

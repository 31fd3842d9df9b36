use crate::activation::sigmoid;
use crate::error::NeuronError;
use mlmath::dot_product;
use serde::{Deserialize, Serialize};

/// Intermediate and final values of one forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuronTrace {
    /// Weighted sum plus bias, before activation.
    pub z: f64,
    pub output: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    weights: Vec<f64>,
    bias: f64,
}

impl Neuron {
    pub fn new(weights: Vec<f64>, bias: f64) -> Result<Self, NeuronError> {
        if weights.is_empty() {
            return Err(NeuronError::NoWeights);
        }
        if !bias.is_finite() {
            return Err(NeuronError::InvalidBias(bias));
        }
        Ok(Self { weights, bias })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// `w · x + b`. Fails when `inputs` and the weights differ in length, or
    /// when the sum overflows.
    pub fn weighted_sum(&self, inputs: &[f64]) -> Result<f64, NeuronError> {
        let z = dot_product(&self.weights, inputs)? + self.bias;
        if !z.is_finite() {
            return Err(NeuronError::NonFiniteSum(z));
        }
        Ok(z)
    }

    pub fn activate(&self, inputs: &[f64]) -> Result<NeuronTrace, NeuronError> {
        let z = self.weighted_sum(inputs)?;
        let output = sigmoid(z);
        tracing::debug!(z, output, "Neuron activated");
        Ok(NeuronTrace { z, output })
    }
}

/// `sigmoid(x1·w1 + x2·w2 + bias)`.
pub fn calculate_neuron_output(
    x1: f64,
    x2: f64,
    w1: f64,
    w2: f64,
    bias: f64,
) -> Result<f64, NeuronError> {
    Ok(Neuron::new(vec![w1, w2], bias)?.activate(&[x1, x2])?.output)
}

//! # MLMath
//!
//! Small, validated building blocks for the maths that shows up in introductory
//! machine learning: vectors, dense matrices and elementary probability.
//!
//! ## Architectural Principles
//!
//! - **Layer 0 Logic:** No I/O, no global state. Every function takes its inputs by
//!   reference and returns a fresh value or a `MathError`.
//! - **Validate, then compute:** Each operation checks the mathematical preconditions
//!   (equal lengths, matching shapes, probabilities in `[0, 1]`) before applying the
//!   textbook formula.
//!
//! ## Public API
//!
//! - Vector helpers: `dot_product`, `vector_add`, `vector_subtract`, `vector_magnitude`,
//!   `vector_normalize`, `are_orthogonal`.
//! - `Matrix` plus `matrix_multiply`, `matrix_transpose`, `matrix_add`, `matrix_subtract`,
//!   `identity_matrix`.
//! - Probability helpers: `conditional_probability`, `bayes_theorem`, `joint_probability`,
//!   `marginal_probability`.

pub mod error;
pub mod matrix;
pub mod probability;
pub mod vector;

pub use error::{MathError, Result};
pub use matrix::{
    identity_matrix, matrix_add, matrix_multiply, matrix_subtract, matrix_transpose, Matrix,
};
pub use probability::{
    bayes_theorem, conditional_probability, joint_probability, marginal_probability,
    Conditional, Dependence, DirectConditionals, EventData, SpamCounts, SpamConditionals,
};
pub use vector::{
    are_orthogonal, dot_product, vector_add, vector_magnitude, vector_normalize,
    vector_subtract,
};

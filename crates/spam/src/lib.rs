//! # Spam
//!
//! Probability that an email is spam given that it contains the word "free",
//! from four dataset counts and Bayes' theorem:
//!
//! `P(Spam | Free) = P(Free | Spam) × P(Spam) / P(Free)`
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** Validation and arithmetic only. Prompting for the counts
//!   belongs to the binary; this crate never reads from stdin.
//! - **Stateless Calculation:** `calculate_spam_probability` is a pure function of
//!   a validated `EmailStats`.
//!
//! ## Public API
//!
//! - `EmailStats`: the four input counts and their constraint checks.
//! - `calculate_spam_probability` / `SpamProbabilities`: the derived probabilities.
//! - `SpamReport`: a printable breakdown of the calculation.
//! - `thousands`: count formatting shared with the CLI reports.
//! - `SpamError`: The specific error types that can be returned from this crate.

pub mod calculator;
pub mod error;
pub mod report;

pub use calculator::{calculate_spam_probability, EmailStats, SpamProbabilities};
pub use error::SpamError;
pub use report::{thousands, SpamReport};

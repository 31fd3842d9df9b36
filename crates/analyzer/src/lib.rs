//! # Analyzer
//!
//! Exploratory analyses of the course datasets, each producing a serializable report.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Orchestration:** This crate combines the Layer 1 logic crates (`analytics`,
//!   `clustering`) over records loaded by `datasets`. It performs no I/O of its own: callers
//!   hand it records or a `Table` and decide how to present the report.
//! - **Reports Are Data:** Every report derives `Serialize` and carries its `generated_at`
//!   timestamp, so the same value can be printed as tables or exported as JSON.
//!
//! ## Public API
//!
//! - `mall`: dataset overview, k-means segmentation, elbow sweep and initialization comparison.
//! - `swiggy`: the restaurant listing questions, from simple counts to grouped statistics.
//! - `icrisat`: the district-level agriculture questions over a generic `Table`.
//! - `AnalyzerError`: The specific error types that can be returned from this crate.

pub mod error;
pub mod icrisat;
pub mod mall;
pub mod summary;
pub mod swiggy;

pub use error::AnalyzerError;
pub use summary::CorrelationSummary;

//! # Analytics
//!
//! Descriptive statistics for the exploratory data analysis commands.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files or
//!   datasets; it works on `&[f64]` slices and `(key, value)` pairs and depends only on
//!   `mlmath` (Layer 0).
//! - **Stateless Calculation:** Every function takes its data by reference and returns a
//!   summary value. Missing values are the caller's concern; filter them out first.
//!
//! ## Public API
//!
//! - `describe` / `Summary`: count, mean, std and the five-number summary.
//! - `pearson` / `Correlation`: Pearson's r with a two-sided p-value.
//! - `iqr_fence` / `outlier_indices`: Tukey fences at 1.5·IQR.
//! - `value_counts`, `group_stats`, `bin_index`: the grouping helpers used by the reports.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod correlation;
pub mod descriptive;
pub mod error;
pub mod grouping;
pub mod outliers;
mod special;

// Re-export the key components to create a clean, public-facing API.
pub use correlation::{correlation_matrix, pearson, Correlation, Direction, Strength};
pub use descriptive::{describe, mean, median, quantile, sample_std, Summary};
pub use error::AnalyticsError;
pub use grouping::{bin_index, group_stats, nlargest_by, value_counts, GroupStats};
pub use outliers::{iqr_fence, outlier_indices, IqrFence};

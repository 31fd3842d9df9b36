//! # Clustering
//!
//! Feature preprocessing and k-means clustering for the customer segmentation analysis.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It operates on `ndarray::Array2<f64>`
//!   feature matrices (rows are samples, columns are features) and knows nothing about
//!   where the data came from.
//! - **Reproducible Randomness:** Every random choice flows through a single `StdRng`.
//!   A model fitted with `with_seed` is identical from run to run, which lets callers fan
//!   independent fits out across threads without changing the result.
//!
//! ## Public API
//!
//! - `StandardScaler`: zero-mean, unit-variance feature scaling.
//! - `LabelEncoder`: maps categorical strings to sorted integer codes.
//! - `KMeans` / `KMeansModel`: Lloyd's algorithm with k-means++ or random initialization.
//! - `wcss`, `silhouette_score`: cluster quality metrics.
//! - `elbow_sweep`, `best_k_by_silhouette`: choosing the number of clusters.
//! - `ClusteringError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod elbow;
pub mod encoder;
pub mod error;
pub mod kmeans;
pub mod metrics;
pub mod scaler;

// Re-export the key components to create a clean, public-facing API.
pub use elbow::{best_k_by_silhouette, elbow_point, elbow_sweep, ElbowPoint};
pub use encoder::LabelEncoder;
pub use error::ClusteringError;
pub use kmeans::{Init, KMeans, KMeansModel};
pub use metrics::{silhouette_score, wcss};
pub use scaler::StandardScaler;

use ndarray::{Array2, ArrayView1};

/// Rejects empty matrices and matrices containing NaN or infinity.
pub(crate) fn validate_data(data: &Array2<f64>) -> Result<(), ClusteringError> {
    let (rows, cols) = data.dim();
    if rows == 0 || cols == 0 {
        return Err(ClusteringError::EmptyInput);
    }
    if let Some(((row, col), _)) = data.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(ClusteringError::NonFinite { row, col });
    }
    Ok(())
}

pub(crate) fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

use crate::error::ClusteringError;
use crate::kmeans::KMeans;
use crate::metrics::silhouette_score;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Fit quality for one candidate number of clusters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElbowPoint {
    pub k: usize,
    pub wcss: f64,
    /// `None` where the silhouette is undefined (k = 1 or k = n_samples).
    pub silhouette: Option<f64>,
}

/// Fits `template` with `k` clusters and scores the result.
///
/// Every other parameter (seed included) comes from `template`, so the point for
/// a given `k` does not depend on which other values are swept.
pub fn elbow_point(data: &Array2<f64>, k: usize, template: &KMeans) -> Result<ElbowPoint, ClusteringError> {
    let model = template.clone().with_n_clusters(k).fit(data)?;

    let distinct = model.cluster_sizes().iter().filter(|&&s| s > 0).count();
    let silhouette = if distinct >= 2 && distinct < data.nrows() {
        Some(silhouette_score(data, &model.labels)?)
    } else {
        None
    };

    tracing::debug!(k, wcss = model.inertia, ?silhouette, "Elbow point computed");
    Ok(ElbowPoint {
        k,
        wcss: model.inertia,
        silhouette,
    })
}

/// Runs [`elbow_point`] for every `k` in `ks`, in order.
pub fn elbow_sweep(
    data: &Array2<f64>,
    ks: impl IntoIterator<Item = usize>,
    template: &KMeans,
) -> Result<Vec<ElbowPoint>, ClusteringError> {
    ks.into_iter().map(|k| elbow_point(data, k, template)).collect()
}

/// The `k` with the highest silhouette score; the smaller `k` wins a tie.
pub fn best_k_by_silhouette(points: &[ElbowPoint]) -> Option<usize> {
    points
        .iter()
        .filter_map(|p| p.silhouette.map(|s| (p.k, s)))
        .fold(None, |best: Option<(usize, f64)>, (k, s)| match best {
            Some((_, best_s)) if best_s >= s => best,
            _ => Some((k, s)),
        })
        .map(|(k, _)| k)
}

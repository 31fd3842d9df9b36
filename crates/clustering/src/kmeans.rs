//! K-Means clustering.
//!
//! Lloyd's algorithm with k-means++ (or uniform random) initialization and
//! `n_init` independent restarts, keeping the run with the lowest inertia.

use crate::error::ClusteringError;
use crate::{squared_distance, validate_data};
use ndarray::{Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Centroid initialization strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Init {
    /// Spread initial centroids out with D² sampling.
    #[default]
    KMeansPlusPlus,
    /// Pick `k` distinct samples uniformly.
    Random,
}

/// K-Means parameters. Build with [`KMeans::new`] and the `with_*` methods, then call
/// [`KMeans::fit`].
///
/// # Examples
///
/// ```
/// use clustering::KMeans;
/// use ndarray::array;
///
/// let data = array![[1.0, 2.0], [1.5, 1.8], [8.0, 8.0], [9.0, 11.0]];
/// let model = KMeans::new(2).with_seed(42).fit(&data).unwrap();
/// assert_eq!(model.labels[0], model.labels[1]);
/// assert_ne!(model.labels[0], model.labels[2]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeans {
    pub n_clusters: usize,
    pub init: Init,
    pub n_init: usize,
    pub max_iter: usize,
    /// Relative tolerance; multiplied by the mean feature variance of the data.
    pub tol: f64,
    pub seed: Option<u64>,
}

impl Default for KMeans {
    fn default() -> Self {
        Self::new(8)
    }
}

/// The result of fitting [`KMeans`].
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansModel {
    /// One row per cluster.
    pub centroids: Array2<f64>,
    pub labels: Vec<usize>,
    /// Within-cluster sum of squared distances.
    pub inertia: f64,
    /// Lloyd iterations run by the best restart.
    pub n_iter: usize,
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            init: Init::KMeansPlusPlus,
            n_init: 10,
            max_iter: 300,
            tol: 1e-4,
            seed: None,
        }
    }

    pub fn with_n_clusters(mut self, n_clusters: usize) -> Self {
        self.n_clusters = n_clusters;
        self
    }

    pub fn with_init(mut self, init: Init) -> Self {
        self.init = init;
        self
    }

    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn fit(&self, data: &Array2<f64>) -> Result<KMeansModel, ClusteringError> {
        validate_data(data)?;
        let n_samples = data.nrows();
        if self.n_clusters == 0 || self.n_clusters > n_samples {
            return Err(ClusteringError::InvalidClusterCount {
                k: self.n_clusters,
                n_samples,
            });
        }
        if self.n_init == 0 || self.max_iter == 0 {
            return Err(ClusteringError::InvalidParameter(
                "n_init and max_iter must be at least 1".to_string(),
            ));
        }
        if !self.tol.is_finite() || self.tol < 0.0 {
            return Err(ClusteringError::InvalidParameter(format!(
                "tol must be a non-negative number, got {}",
                self.tol
            )));
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let tol = self.tol * mean_feature_variance(data);

        let mut best: Option<KMeansModel> = None;
        for run in 0..self.n_init {
            let initial = match self.init {
                Init::KMeansPlusPlus => kmeans_plus_plus(data, self.n_clusters, &mut rng),
                Init::Random => random_init(data, self.n_clusters, &mut rng),
            };
            let model = lloyd(data, initial, self.max_iter, tol);
            tracing::debug!(
                run,
                inertia = model.inertia,
                n_iter = model.n_iter,
                "K-means restart finished"
            );
            if best.as_ref().is_none_or(|b| model.inertia < b.inertia) {
                best = Some(model);
            }
        }

        best.ok_or_else(|| ClusteringError::InvalidParameter("no restarts were run".to_string()))
    }
}

impl KMeansModel {
    pub fn n_clusters(&self) -> usize {
        self.centroids.nrows()
    }

    /// Assigns each row of `data` to its nearest centroid.
    pub fn predict(&self, data: &Array2<f64>) -> Result<Vec<usize>, ClusteringError> {
        validate_data(data)?;
        if data.ncols() != self.centroids.ncols() {
            return Err(ClusteringError::DimensionMismatch {
                expected: self.centroids.ncols(),
                found: data.ncols(),
            });
        }
        Ok(data
            .rows()
            .into_iter()
            .map(|row| nearest(row, &self.centroids).0)
            .collect())
    }

    /// Number of samples assigned to each cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.n_clusters()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }
}

fn mean_feature_variance(data: &Array2<f64>) -> f64 {
    data.var_axis(Axis(0), 0.0).mean().unwrap_or(0.0)
}

/// Index of and squared distance to the closest centroid.
fn nearest(point: ArrayView1<f64>, centroids: &Array2<f64>) -> (usize, f64) {
    centroids
        .rows()
        .into_iter()
        .map(|c| squared_distance(point, c))
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, d)| if d < best.1 { (i, d) } else { best })
}

fn random_init(data: &Array2<f64>, k: usize, rng: &mut StdRng) -> Array2<f64> {
    let indices = rand::seq::index::sample(rng, data.nrows(), k).into_vec();
    data.select(Axis(0), &indices)
}

/// D² sampling: each new centroid is drawn with probability proportional to its
/// squared distance from the nearest centroid chosen so far.
fn kmeans_plus_plus(data: &Array2<f64>, k: usize, rng: &mut StdRng) -> Array2<f64> {
    let n = data.nrows();
    let mut chosen = Vec::with_capacity(k);
    chosen.push(rng.gen_range(0..n));

    let mut min_distances: Vec<f64> = data
        .rows()
        .into_iter()
        .map(|row| squared_distance(row, data.row(chosen[0])))
        .collect();

    while chosen.len() < k {
        let total: f64 = min_distances.iter().sum();
        let next = if total > 0.0 {
            let target = rng.gen_range(0.0..total);
            let mut cumulative = 0.0;
            min_distances
                .iter()
                .position(|d| {
                    cumulative += d;
                    cumulative > target
                })
                .unwrap_or(n - 1)
        } else {
            // Every remaining point coincides with a centroid.
            rng.gen_range(0..n)
        };
        chosen.push(next);

        let newest = data.row(next);
        for (dist, row) in min_distances.iter_mut().zip(data.rows()) {
            *dist = dist.min(squared_distance(row, newest));
        }
    }

    data.select(Axis(0), &chosen)
}

fn assign(data: &Array2<f64>, centroids: &Array2<f64>, labels: &mut [usize], distances: &mut [f64]) {
    for (i, row) in data.rows().into_iter().enumerate() {
        let (label, dist) = nearest(row, centroids);
        labels[i] = label;
        distances[i] = dist;
    }
}

fn lloyd(data: &Array2<f64>, mut centroids: Array2<f64>, max_iter: usize, tol: f64) -> KMeansModel {
    let (n, d) = data.dim();
    let k = centroids.nrows();
    let mut labels = vec![0; n];
    let mut distances = vec![0.0; n];
    let mut n_iter = 0;

    for iter in 1..=max_iter {
        n_iter = iter;
        assign(data, &centroids, &mut labels, &mut distances);

        let mut sums = Array2::<f64>::zeros((k, d));
        let mut counts = vec![0usize; k];
        for (i, row) in data.rows().into_iter().enumerate() {
            let mut sum = sums.row_mut(labels[i]);
            sum += &row;
            counts[labels[i]] += 1;
        }

        for cluster in 0..k {
            if counts[cluster] > 0 {
                let mut row = sums.row_mut(cluster);
                row /= counts[cluster] as f64;
            } else {
                // Reseed an empty cluster with the point farthest from its centroid.
                let far = distances
                    .iter()
                    .enumerate()
                    .max_by(|a, b| a.1.total_cmp(b.1))
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                tracing::debug!(cluster, point = far, "Reseeding empty cluster");
                sums.row_mut(cluster).assign(&data.row(far));
                distances[far] = 0.0;
            }
        }

        let shift: f64 = centroids
            .rows()
            .into_iter()
            .zip(sums.rows())
            .map(|(old, new)| squared_distance(old, new))
            .sum();
        centroids = sums;

        if shift <= tol {
            break;
        }
    }

    // Final assignment against the converged centroids.
    assign(data, &centroids, &mut labels, &mut distances);
    let inertia = distances.iter().sum();

    KMeansModel {
        centroids,
        labels,
        inertia,
        n_iter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn three_blobs() -> Array2<f64> {
        array![
            [1.0, 1.0],
            [1.2, 0.8],
            [0.9, 1.1],
            [10.0, 10.0],
            [10.2, 9.9],
            [9.8, 10.1],
            [20.0, 1.0],
            [20.1, 1.2],
            [19.9, 0.9],
        ]
    }

    #[test]
    fn test_fit_separates_blobs() {
        let data = three_blobs();
        let model = KMeans::new(3).with_seed(7).fit(&data).expect("valid fit");

        assert_eq!(model.labels.len(), 9);
        for blob in model.labels.chunks(3) {
            assert!(blob.iter().all(|&l| l == blob[0]));
        }
        assert_ne!(model.labels[0], model.labels[3]);
        assert_ne!(model.labels[3], model.labels[6]);
        assert_ne!(model.labels[0], model.labels[6]);
        assert_eq!(model.cluster_sizes(), vec![3, 3, 3]);
        assert!(model.inertia < 1.0);
    }

    #[test]
    fn test_seed_makes_fit_deterministic() {
        let data = three_blobs();
        let template = KMeans::new(2).with_init(Init::Random).with_seed(11);
        let a = template.fit(&data).expect("valid fit");
        let b = template.fit(&data).expect("valid fit");
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_cluster_is_the_mean() {
        let data = array![[0.0, 0.0], [2.0, 4.0]];
        let model = KMeans::new(1).with_seed(1).fit(&data).expect("valid fit");
        assert_eq!(model.centroids, array![[1.0, 2.0]]);
        assert_eq!(model.inertia, 10.0);
    }

    #[test]
    fn test_k_equal_to_samples_gives_zero_inertia() {
        let data = array![[0.0], [5.0], [9.0]];
        let model = KMeans::new(3).with_seed(3).fit(&data).expect("valid fit");
        assert_eq!(model.inertia, 0.0);
    }

    #[test]
    fn test_invalid_cluster_counts() {
        let data = three_blobs();
        assert_eq!(
            KMeans::new(0).fit(&data),
            Err(ClusteringError::InvalidClusterCount { k: 0, n_samples: 9 })
        );
        assert_eq!(
            KMeans::new(10).fit(&data),
            Err(ClusteringError::InvalidClusterCount { k: 10, n_samples: 9 })
        );
    }

    #[test]
    fn test_predict_uses_nearest_centroid() {
        let data = three_blobs();
        let model = KMeans::new(3).with_seed(5).fit(&data).expect("valid fit");
        let predicted = model
            .predict(&array![[0.0, 0.0], [11.0, 11.0]])
            .expect("matching width");
        assert_eq!(predicted[0], model.labels[0]);
        assert_eq!(predicted[1], model.labels[3]);
        assert!(model.predict(&array![[1.0, 2.0, 3.0]]).is_err());
    }

    #[test]
    fn test_rejects_nan() {
        let data = array![[1.0, f64::NAN]];
        assert_eq!(
            KMeans::new(1).fit(&data),
            Err(ClusteringError::NonFinite { row: 0, col: 1 })
        );
    }
}

use crate::error::ClusteringError;
use crate::{squared_distance, validate_data};
use ndarray::Array2;
use std::collections::BTreeMap;

fn check_labels(data: &Array2<f64>, labels: &[usize]) -> Result<(), ClusteringError> {
    if labels.len() != data.nrows() {
        return Err(ClusteringError::LabelCountMismatch {
            expected: data.nrows(),
            found: labels.len(),
        });
    }
    Ok(())
}

/// Within-cluster sum of squares: the squared distance of every sample to the
/// centroid of its cluster, summed.
pub fn wcss(
    data: &Array2<f64>,
    labels: &[usize],
    centroids: &Array2<f64>,
) -> Result<f64, ClusteringError> {
    validate_data(data)?;
    check_labels(data, labels)?;
    if centroids.ncols() != data.ncols() {
        return Err(ClusteringError::DimensionMismatch {
            expected: data.ncols(),
            found: centroids.ncols(),
        });
    }

    data.rows()
        .into_iter()
        .zip(labels)
        .map(|(row, &label)| {
            if label >= centroids.nrows() {
                return Err(ClusteringError::InvalidLabels(format!(
                    "label {label} has no centroid"
                )));
            }
            Ok(squared_distance(row, centroids.row(label)))
        })
        .sum()
}

/// Mean silhouette coefficient over all samples.
///
/// For sample `i`, `a` is the mean distance to the other members of its cluster
/// and `b` the smallest mean distance to the members of another cluster;
/// `s(i) = (b - a) / max(a, b)`. A sample alone in its cluster scores 0.
///
/// Requires `2 <= number of distinct labels <= n_samples - 1`.
pub fn silhouette_score(data: &Array2<f64>, labels: &[usize]) -> Result<f64, ClusteringError> {
    validate_data(data)?;
    check_labels(data, labels)?;

    let n = data.nrows();
    let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        members.entry(label).or_default().push(i);
    }
    let n_labels = members.len();
    if n_labels < 2 || n_labels > n - 1 {
        return Err(ClusteringError::InvalidLabels(format!(
            "number of labels is {n_labels}; valid values are 2 to n_samples - 1 ({})",
            n - 1
        )));
    }

    let distance = |i: usize, j: usize| squared_distance(data.row(i), data.row(j)).sqrt();

    let total: f64 = (0..n)
        .map(|i| {
            let own = &members[&labels[i]];
            if own.len() == 1 {
                return 0.0;
            }
            let a = own.iter().filter(|&&j| j != i).map(|&j| distance(i, j)).sum::<f64>()
                / (own.len() - 1) as f64;
            let b = members
                .iter()
                .filter(|(label, _)| **label != labels[i])
                .map(|(_, others)| {
                    others.iter().map(|&j| distance(i, j)).sum::<f64>() / others.len() as f64
                })
                .fold(f64::INFINITY, f64::min);

            let max_ab = a.max(b);
            if max_ab == 0.0 { 0.0 } else { (b - a) / max_ab }
        })
        .sum();

    Ok(total / n as f64)
}

use crate::descriptive::{mean, median, sample_std};
use crate::error::AnalyticsError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::hash::Hash;

/// Aggregates of the values falling in one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; `None` for a group of one.
    pub std: Option<f64>,
}

impl GroupStats {
    fn from_values(values: &[f64]) -> Result<Self, AnalyticsError> {
        Ok(Self {
            count: values.len(),
            sum: values.iter().sum(),
            mean: mean(values)?,
            median: median(values)?,
            std: if values.len() > 1 {
                Some(sample_std(values)?)
            } else {
                None
            },
        })
    }
}

/// Frequency of every distinct key, most frequent first. Ties are broken by key.
pub fn value_counts<K, I>(items: I) -> Vec<(K, usize)>
where
    I: IntoIterator<Item = K>,
    K: Hash + Eq + Ord,
{
    items
        .into_iter()
        .counts()
        .into_iter()
        .sorted_by(|(ka, ca), (kb, cb)| cb.cmp(ca).then_with(|| ka.cmp(kb)))
        .collect()
}

/// Groups `(key, value)` pairs by key and summarises each group.
pub fn group_stats<K, I>(pairs: I) -> Result<BTreeMap<K, GroupStats>, AnalyticsError>
where
    I: IntoIterator<Item = (K, f64)>,
    K: Hash + Eq + Ord,
{
    pairs
        .into_iter()
        .into_group_map()
        .into_iter()
        .map(|(key, values)| Ok((key, GroupStats::from_values(&values)?)))
        .collect()
}

/// The `n` items with the largest `key`, in descending order.
///
/// The sort is stable, so equal keys keep their input order.
pub fn nlargest_by<T, F>(items: impl IntoIterator<Item = T>, n: usize, key: F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    items
        .into_iter()
        .sorted_by(|a, b| key(b).total_cmp(&key(a)))
        .take(n)
        .collect()
}

/// Index of the right-closed bin `(edges[i], edges[i + 1]]` containing `value`.
///
/// With `include_lowest` the first bin is closed on the left too, so
/// `edges[0]` lands in bin 0. Values outside every bin yield `None`.
pub fn bin_index(
    value: f64,
    edges: &[f64],
    include_lowest: bool,
) -> Result<Option<usize>, AnalyticsError> {
    if edges.len() < 2 || edges.iter().tuple_windows().any(|(a, b)| a >= b) {
        return Err(AnalyticsError::InvalidBins);
    }
    if !value.is_finite() {
        return Ok(None);
    }
    if include_lowest && value == edges[0] {
        return Ok(Some(0));
    }

    Ok(edges
        .iter()
        .tuple_windows()
        .position(|(lo, hi)| value > *lo && value <= *hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_counts_orders_by_count_then_key() {
        let cities = ["Pune", "Delhi", "Pune", "Agra", "Delhi", "Pune"];
        let counts = value_counts(cities);
        assert_eq!(counts, vec![("Pune", 3), ("Delhi", 2), ("Agra", 1)]);
    }

    #[test]
    fn test_group_stats() {
        let pairs = vec![("a", 1.0), ("b", 10.0), ("a", 3.0), ("a", 5.0)];
        let groups = group_stats(pairs).expect("valid groups");
        let a = groups["a"];
        assert_eq!(a.count, 3);
        assert_eq!(a.sum, 9.0);
        assert_eq!(a.mean, 3.0);
        assert_eq!(a.median, 3.0);
        assert_eq!(a.std, Some(2.0));
        assert_eq!(groups["b"].std, None);
    }

    #[test]
    fn test_nlargest_by_is_stable() {
        let items = vec![("x", 2.0), ("y", 5.0), ("z", 2.0), ("w", 1.0)];
        let top = nlargest_by(items, 3, |(_, v)| *v);
        assert_eq!(top, vec![("y", 5.0), ("x", 2.0), ("z", 2.0)]);
    }

    #[test]
    fn test_bin_index_right_closed() {
        let edges = [0.0, 3.0, 4.0, 5.0];
        assert_eq!(bin_index(0.0, &edges, true).expect("valid"), Some(0));
        assert_eq!(bin_index(0.0, &edges, false).expect("valid"), None);
        assert_eq!(bin_index(3.0, &edges, true).expect("valid"), Some(0));
        assert_eq!(bin_index(3.5, &edges, true).expect("valid"), Some(1));
        assert_eq!(bin_index(4.0, &edges, true).expect("valid"), Some(1));
        assert_eq!(bin_index(4.3, &edges, true).expect("valid"), Some(2));
        assert_eq!(bin_index(5.1, &edges, true).expect("valid"), None);
        assert_eq!(bin_index(f64::NAN, &edges, true).expect("valid"), None);
    }

    #[test]
    fn test_bin_index_rejects_bad_edges() {
        assert_eq!(bin_index(1.0, &[1.0], true), Err(AnalyticsError::InvalidBins));
        assert_eq!(
            bin_index(1.0, &[0.0, 2.0, 2.0], true),
            Err(AnalyticsError::InvalidBins)
        );
    }
}

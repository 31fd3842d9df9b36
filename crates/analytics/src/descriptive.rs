use crate::error::AnalyticsError;
use serde::{Deserialize, Serialize};

/// Count, moments and five-number summary of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` for a single observation.
    pub std: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

fn ensure_finite(data: &[f64], what: &'static str) -> Result<(), AnalyticsError> {
    if data.iter().any(|v| !v.is_finite()) {
        return Err(AnalyticsError::NonFinite(what));
    }
    Ok(())
}

fn sorted(data: &[f64]) -> Vec<f64> {
    let mut values = data.to_vec();
    values.sort_by(f64::total_cmp);
    values
}

/// R-7 linear interpolation on an already sorted, non-empty slice.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

pub fn mean(data: &[f64]) -> Result<f64, AnalyticsError> {
    if data.is_empty() {
        return Err(AnalyticsError::NotEnoughData("mean of empty data".to_string()));
    }
    ensure_finite(data, "mean")?;
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

pub fn median(data: &[f64]) -> Result<f64, AnalyticsError> {
    quantile(data, 0.5)
}

/// Sample standard deviation (`ddof = 1`).
pub fn sample_std(data: &[f64]) -> Result<f64, AnalyticsError> {
    if data.len() < 2 {
        return Err(AnalyticsError::NotEnoughData(
            "standard deviation needs at least two observations".to_string(),
        ));
    }
    let m = mean(data)?;
    let ss: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
    Ok((ss / (data.len() - 1) as f64).sqrt())
}

/// The `q`-th quantile using linear interpolation between closest ranks (R-7).
///
/// # Examples
///
/// ```
/// let data = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(analytics::quantile(&data, 0.25).unwrap(), 1.75);
/// ```
pub fn quantile(data: &[f64], q: f64) -> Result<f64, AnalyticsError> {
    if !(0.0..=1.0).contains(&q) {
        return Err(AnalyticsError::InvalidQuantile(q));
    }
    if data.is_empty() {
        return Err(AnalyticsError::NotEnoughData(
            "quantile of empty data".to_string(),
        ));
    }
    ensure_finite(data, "quantile")?;
    Ok(quantile_sorted(&sorted(data), q))
}

/// Summarises a column the way `DataFrame.describe()` does.
pub fn describe(data: &[f64]) -> Result<Summary, AnalyticsError> {
    let mean = mean(data)?;
    let values = sorted(data);
    let std = if values.len() > 1 {
        Some(sample_std(data)?)
    } else {
        None
    };

    Ok(Summary {
        count: values.len(),
        mean,
        std,
        min: values[0],
        q1: quantile_sorted(&values, 0.25),
        median: quantile_sorted(&values, 0.5),
        q3: quantile_sorted(&values, 0.75),
        max: values[values.len() - 1],
    })
}

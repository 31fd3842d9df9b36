use crate::descriptive::quantile;
use crate::error::AnalyticsError;
use serde::{Deserialize, Serialize};

const FENCE_MULTIPLIER: f64 = 1.5;

/// Tukey fences around the interquartile range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrFence {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrFence {
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

pub fn iqr_fence(data: &[f64]) -> Result<IqrFence, AnalyticsError> {
    let q1 = quantile(data, 0.25)?;
    let q3 = quantile(data, 0.75)?;
    let iqr = q3 - q1;
    Ok(IqrFence {
        q1,
        q3,
        iqr,
        lower: q1 - FENCE_MULTIPLIER * iqr,
        upper: q3 + FENCE_MULTIPLIER * iqr,
    })
}

/// Positions of the values lying strictly outside the 1.5·IQR fences.
pub fn outlier_indices(data: &[f64]) -> Result<Vec<usize>, AnalyticsError> {
    let fence = iqr_fence(data)?;
    let indices: Vec<usize> = data
        .iter()
        .enumerate()
        .filter(|(_, v)| fence.is_outlier(**v))
        .map(|(i, _)| i)
        .collect();
    tracing::debug!(
        lower = fence.lower,
        upper = fence.upper,
        outliers = indices.len(),
        "IQR outlier scan"
    );
    Ok(indices)
}

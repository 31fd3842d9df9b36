use analytics::{AnalyticsError, Correlation, Direction, Strength};
use serde::Serialize;

/// A Pearson correlation together with its interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CorrelationSummary {
    pub r: f64,
    pub p_value: f64,
    pub n: usize,
    pub strength: Strength,
    pub direction: Direction,
}

impl From<Correlation> for CorrelationSummary {
    fn from(c: Correlation) -> Self {
        Self {
            r: c.r,
            p_value: c.p_value,
            n: c.n,
            strength: c.strength(),
            direction: c.direction(),
        }
    }
}

/// Turns "too little or too uniform data" into `None` so a report can still be
/// produced; any other error is passed through.
pub(crate) fn optional<T>(result: Result<T, AnalyticsError>, what: &str) -> Result<Option<T>, AnalyticsError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e @ (AnalyticsError::NotEnoughData(_) | AnalyticsError::ConstantInput(_))) => {
            tracing::warn!(error = %e, "Skipping {what}");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Pairs where both sides are present.
pub(crate) fn complete_pairs(x: &[Option<f64>], y: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y)
        .filter_map(|(a, b)| a.zip(*b))
        .unzip()
}

/// Mean of the present values, `None` when there are none.
pub(crate) fn mean_present(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

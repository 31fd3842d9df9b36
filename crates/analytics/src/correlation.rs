use crate::descriptive::mean;
use crate::error::AnalyticsError;
use crate::special::student_t_two_sided;
use mlmath::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative size of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Strength::Weak => "Weak",
            Strength::Moderate => "Moderate",
            Strength::Strong => "Strong",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Positive,
    Negative,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Positive => write!(f, "positive"),
            Direction::Negative => write!(f, "negative"),
        }
    }
}

/// Pearson's r together with its two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    pub r: f64,
    pub p_value: f64,
    pub n: usize,
}

impl Correlation {
    pub fn strength(&self) -> Strength {
        let magnitude = self.r.abs();
        if magnitude < 0.3 {
            Strength::Weak
        } else if magnitude < 0.7 {
            Strength::Moderate
        } else {
            Strength::Strong
        }
    }

    pub fn direction(&self) -> Direction {
        if self.r >= 0.0 {
            Direction::Positive
        } else {
            Direction::Negative
        }
    }

    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

fn coefficient(x: &[f64], y: &[f64]) -> Result<f64, AnalyticsError> {
    let mx = mean(x)?;
    let my = mean(y)?;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return Err(AnalyticsError::ConstantInput("pearson correlation"));
    }
    Ok((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

/// Pearson correlation coefficient with a p-value from Student's t on `n - 2`
/// degrees of freedom.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation, AnalyticsError> {
    if x.len() != y.len() {
        return Err(AnalyticsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    let n = x.len();
    if n < 3 {
        return Err(AnalyticsError::NotEnoughData(format!(
            "pearson correlation needs at least 3 pairs, got {n}"
        )));
    }

    let r = coefficient(x, y)?;
    let df = (n - 2) as f64;
    let p_value = if r.abs() >= 1.0 {
        0.0
    } else {
        let t = r * (df / (1.0 - r * r)).sqrt();
        student_t_two_sided(t, df)
    };

    tracing::debug!(n, r, p_value, "Computed Pearson correlation");
    Ok(Correlation { r, p_value, n })
}

/// Pairwise Pearson coefficients between equally long columns.
///
/// The diagonal is exactly 1.
pub fn correlation_matrix(columns: &[Vec<f64>]) -> Result<Matrix, AnalyticsError> {
    let k = columns.len();
    let mut rows = vec![vec![0.0; k]; k];

    for i in 0..k {
        rows[i][i] = 1.0;
        for j in (i + 1)..k {
            if columns[i].len() != columns[j].len() {
                return Err(AnalyticsError::LengthMismatch {
                    left: columns[i].len(),
                    right: columns[j].len(),
                });
            }
            let r = coefficient(&columns[i], &columns[j])?;
            rows[i][j] = r;
            rows[j][i] = r;
        }
    }

    Ok(Matrix::from_rows(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_correlation() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];
        let c = pearson(&x, &y).expect("valid input");
        assert!((c.r - 1.0).abs() < 1e-12);
        assert_eq!(c.p_value, 0.0);
        assert_eq!(c.strength(), Strength::Strong);
        assert_eq!(c.direction(), Direction::Positive);
    }

    #[test]
    fn test_known_p_value() {
        // r = 0.8 for these points; t = 0.8 * sqrt(3 / 0.36) = 2.3094, df = 3.
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 3.0, 2.0, 5.0, 4.0];
        let c = pearson(&x, &y).expect("valid input");
        assert!((c.r - 0.8).abs() < 1e-12);
        assert!((c.p_value - 0.104_088).abs() < 1e-4);
        assert!(!c.is_significant(0.05));
    }

    #[test]
    fn test_strength_bands() {
        let make = |r| Correlation { r, p_value: 0.5, n: 10 };
        assert_eq!(make(0.29).strength(), Strength::Weak);
        assert_eq!(make(-0.5).strength(), Strength::Moderate);
        assert_eq!(make(-0.5).direction(), Direction::Negative);
        assert_eq!(make(0.7).strength(), Strength::Strong);
    }

    #[test]
    fn test_pearson_rejects_bad_input() {
        assert!(matches!(
            pearson(&[1.0, 2.0], &[1.0, 2.0]),
            Err(AnalyticsError::NotEnoughData(_))
        ));
        assert_eq!(
            pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]),
            Err(AnalyticsError::ConstantInput("pearson correlation"))
        );
        assert_eq!(
            pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(AnalyticsError::LengthMismatch { left: 3, right: 2 })
        );
    }

    #[test]
    fn test_correlation_matrix_is_symmetric() {
        let columns = vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![4.0, 3.0, 2.0, 1.0],
            vec![1.0, 3.0, 2.0, 4.0],
        ];
        let m = correlation_matrix(&columns).expect("valid columns");
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m[(0, 0)], 1.0);
        assert!((m[(0, 1)] + 1.0).abs() < 1e-12);
        assert_eq!(m[(1, 2)], m[(2, 1)]);
    }
}

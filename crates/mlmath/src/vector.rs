//! Vector operations over `&[f64]` slices.

use crate::error::{MathError, Result};

/// Two vectors are treated as orthogonal when `|a · b|` is at most this value.
pub const ORTHOGONALITY_TOLERANCE: f64 = 1e-10;

fn check_same_length(a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(MathError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

fn check_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(MathError::NonFinite { index }),
        None => Ok(()),
    }
}

/// Finite inputs can still overflow once multiplied or summed.
pub(crate) fn finite_result(value: f64, operation: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::Overflow { operation })
    }
}

fn finite_vector(values: Vec<f64>, operation: &'static str) -> Result<Vec<f64>> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(values)
    } else {
        Err(MathError::Overflow { operation })
    }
}

fn check_pair(a: &[f64], b: &[f64]) -> Result<()> {
    check_same_length(a, b)?;
    check_finite(a)?;
    check_finite(b)
}

/// Calculates the dot product `a1*b1 + a2*b2 + ... + an*bn`.
///
/// Two empty vectors have a dot product of `0.0`.
///
/// # Examples
///
/// ```
/// use mlmath::dot_product;
///
/// assert_eq!(dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap(), 32.0);
/// assert_eq!(dot_product(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).unwrap(), 0.0);
/// ```
pub fn dot_product(a: &[f64], b: &[f64]) -> Result<f64> {
    check_pair(a, b)?;
    finite_result(a.iter().zip(b).map(|(x, y)| x * y).sum(), "dot product")
}

/// Adds two vectors element-wise.
pub fn vector_add(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_pair(a, b)?;
    finite_vector(a.iter().zip(b).map(|(x, y)| x + y).collect(), "vector addition")
}

/// Subtracts `b` from `a` element-wise.
pub fn vector_subtract(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    check_pair(a, b)?;
    finite_vector(a.iter().zip(b).map(|(x, y)| x - y).collect(), "vector subtraction")
}

/// Euclidean norm `sqrt(a1² + ... + an²)`.
pub fn vector_magnitude(a: &[f64]) -> Result<f64> {
    if a.is_empty() {
        return Err(MathError::EmptyVector {
            operation: "calculate magnitude of",
        });
    }
    check_finite(a)?;
    finite_result(a.iter().map(|x| x * x).sum::<f64>().sqrt(), "magnitude")
}

/// Scales `a` to unit length.
///
/// # Errors
///
/// `EmptyVector` for an empty input, `ZeroVector` when every element is zero,
/// `Overflow` when the magnitude itself is too large for `f64`.
pub fn vector_normalize(a: &[f64]) -> Result<Vec<f64>> {
    if a.is_empty() {
        return Err(MathError::EmptyVector {
            operation: "normalize",
        });
    }
    let magnitude = vector_magnitude(a)?;
    if magnitude == 0.0 {
        return Err(MathError::ZeroVector);
    }
    Ok(a.iter().map(|x| x / magnitude).collect())
}

/// Whether `a` and `b` are perpendicular, i.e. their dot product is (numerically) zero.
pub fn are_orthogonal(a: &[f64], b: &[f64]) -> Result<bool> {
    let dot = dot_product(a, b)?;
    Ok(dot.abs() <= ORTHOGONALITY_TOLERANCE)
}

//! Dense, row-major matrices with shape validation.

use crate::error::{MathError, Result};
use crate::vector::finite_result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// A non-empty, rectangular matrix of finite `f64` values stored row-major.
///
/// Construct one with [`Matrix::from_rows`], which checks shape and finiteness.
/// Arithmetic keeps entries finite; an overflowing result returns
/// [`MathError::Overflow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Builds a matrix from a list of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use mlmath::Matrix;
    ///
    /// let m = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    /// assert_eq!(m.shape(), (2, 3));
    /// assert_eq!(m[(1, 2)], 6.0);
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let first = rows.first().ok_or(MathError::EmptyMatrix)?;
        let cols = first.len();
        if rows.iter().any(|r| r.is_empty()) {
            return Err(MathError::EmptyRow);
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MathError::RaggedRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(MathError::NonFiniteEntry { row: i, col: j });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Creates an `n×n` identity matrix.
    pub fn identity(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(MathError::InvalidSize);
        }
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Ok(Self {
            rows: n,
            cols: n,
            data,
        })
    }

    fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Borrow row `i` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }

    /// Standard `O(m·n·p)` product of an `m×n` and an `n×p` matrix.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(MathError::IncompatibleDimensions {
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }

        let mut result = Matrix::zeros(self.rows, other.cols);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut acc = 0.0;
                for k in 0..self.cols {
                    acc += self[(i, k)] * other[(k, j)];
                }
                result.data[i * other.cols + j] = finite_result(acc, "matrix multiplication")?;
            }
        }
        tracing::trace!(lhs = ?self.shape(), rhs = ?other.shape(), "matrix product computed");
        Ok(result)
    }

    pub fn transpose(&self) -> Matrix {
        let mut result = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                result.data[j * self.rows + i] = self[(i, j)];
            }
        }
        result
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "addition", |a, b| a + b)
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "subtraction", |a, b| a - b)
    }

    fn zip_with(
        &self,
        other: &Matrix,
        operation: &'static str,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Matrix> {
        if self.shape() != other.shape() {
            return Err(MathError::ShapeMismatch {
                operation,
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| finite_result(f(a, b), operation))
            .collect::<Result<Vec<f64>>>()?;
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}×{} matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            let cells: Vec<String> = self.row(i).iter().map(|v| format!("{v}")).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

/// `a × b`. See [`Matrix::multiply`].
pub fn matrix_multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.multiply(b)
}

/// `aᵀ`
pub fn matrix_transpose(a: &Matrix) -> Matrix {
    a.transpose()
}

/// Element-wise `a + b`; shapes must match.
pub fn matrix_add(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.add(b)
}

/// Element-wise `a - b`; shapes must match.
pub fn matrix_subtract(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.subtract(b)
}

/// `n×n` identity; `n` must be positive.
pub fn identity_matrix(n: usize) -> Result<Matrix> {
    Matrix::identity(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).expect("well-formed matrix")
    }

    #[test]
    fn test_from_rows_validation() {
        assert_eq!(Matrix::from_rows(vec![]), Err(MathError::EmptyMatrix));
        assert_eq!(
            Matrix::from_rows(vec![vec![1.0], vec![]]),
            Err(MathError::EmptyRow)
        );
        assert_eq!(
            Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]),
            Err(MathError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Matrix::from_rows(vec![vec![1.0, f64::NAN]]),
            Err(MathError::NonFiniteEntry { row: 0, col: 1 })
        );
    }

    #[test]
    fn test_multiply() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
        assert_eq!(
            matrix_multiply(&a, &b).expect("2x2 by 2x2"),
            m(vec![vec![19.0, 22.0], vec![43.0, 50.0]])
        );

        let row = m(vec![vec![1.0, 2.0, 3.0]]);
        let col = m(vec![vec![4.0], vec![5.0], vec![6.0]]);
        assert_eq!(
            matrix_multiply(&row, &col).expect("1x3 by 3x1"),
            m(vec![vec![32.0]])
        );

        let c = m(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ]);
        let d = m(vec![
            vec![9.0, 8.0, 7.0],
            vec![6.0, 5.0, 4.0],
            vec![3.0, 2.0, 1.0],
        ]);
        assert_eq!(
            matrix_multiply(&c, &d).expect("3x3 by 3x3"),
            m(vec![
                vec![30.0, 24.0, 18.0],
                vec![84.0, 69.0, 54.0],
                vec![138.0, 114.0, 90.0],
            ])
        );
    }

    #[test]
    fn test_multiply_incompatible() {
        let a = m(vec![vec![1.0, 2.0, 3.0]]);
        let err = matrix_multiply(&a, &a).unwrap_err();
        assert_eq!(
            err,
            MathError::IncompatibleDimensions {
                lhs: (1, 3),
                rhs: (1, 3)
            }
        );
        assert!(err.to_string().starts_with("Cannot multiply matrices: 1×3 and 1×3"));
    }

    #[test]
    fn test_overflowing_arithmetic_is_rejected() {
        let big = m(vec![vec![1e200, 1e200]]);
        assert_eq!(
            matrix_multiply(&big, &matrix_transpose(&big)),
            Err(MathError::Overflow {
                operation: "matrix multiplication"
            })
        );
        let max = m(vec![vec![f64::MAX]]);
        assert_eq!(
            matrix_add(&max, &max),
            Err(MathError::Overflow { operation: "addition" })
        );
        assert!(matrix_subtract(&max, &m(vec![vec![-f64::MAX]])).is_err());
    }

    #[test]
    fn test_identity_is_neutral() {
        let a = m(vec![vec![2.0, -1.0, 0.5], vec![3.0, 4.0, 7.0]]);
        let left = identity_matrix(2).expect("positive size");
        let right = identity_matrix(3).expect("positive size");
        assert_eq!(matrix_multiply(&left, &a).expect("2x2 by 2x3"), a);
        assert_eq!(matrix_multiply(&a, &right).expect("2x3 by 3x3"), a);
        assert_eq!(identity_matrix(0), Err(MathError::InvalidSize));
    }

    #[test]
    fn test_identity_layout() {
        assert_eq!(
            identity_matrix(3).expect("positive size").to_rows(),
            vec![
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
                vec![0.0, 0.0, 1.0]
            ]
        );
    }

    #[test]
    fn test_transpose() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let t = matrix_transpose(&a);
        assert_eq!(t, m(vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]));
        assert_eq!(matrix_transpose(&t), a);
    }

    #[test]
    fn test_add_subtract() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
        assert_eq!(
            matrix_add(&a, &b).expect("same shape"),
            m(vec![vec![6.0, 8.0], vec![10.0, 12.0]])
        );
        assert_eq!(
            matrix_subtract(&b, &a).expect("same shape"),
            m(vec![vec![4.0, 4.0], vec![4.0, 4.0]])
        );
    }

    #[test]
    fn test_shape_mismatch_names_operation() {
        let a = m(vec![vec![1.0, 2.0]]);
        let b = m(vec![vec![1.0], vec![2.0]]);
        let err = matrix_add(&a, &b).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot perform addition on matrices with different dimensions: 1×2 and 2×1"
        );
        assert!(matches!(
            matrix_subtract(&a, &b),
            Err(MathError::ShapeMismatch {
                operation: "subtraction",
                ..
            })
        ));
    }

    #[test]
    fn test_accessors_and_display() {
        let a = m(vec![vec![1.0, 2.5], vec![3.0, 4.0]]);
        assert_eq!(a.get(0, 1), Some(2.5));
        assert_eq!(a.get(2, 0), None);
        assert_eq!(a.row(1), &[3.0, 4.0]);
        assert_eq!(a.to_string(), "[1, 2.5]\n[3, 4]\n");
    }
}

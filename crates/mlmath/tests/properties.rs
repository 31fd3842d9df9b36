use mlmath::{
    are_orthogonal, dot_product, identity_matrix, matrix_multiply, matrix_transpose,
    vector_magnitude, vector_normalize, Matrix,
};
use proptest::prelude::*;

/// Small integer-valued matrices keep every product exact in `f64`, so the
/// algebraic laws can be compared with `==`.
fn matrix(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(prop::collection::vec(-9i32..=9, cols), rows).prop_map(|rows| {
        Matrix::from_rows(
            rows.into_iter()
                .map(|r| r.into_iter().map(f64::from).collect())
                .collect(),
        )
        .expect("generated rows are rectangular")
    })
}

fn chain() -> impl Strategy<Value = (Matrix, Matrix, Matrix)> {
    (1usize..5, 1usize..5, 1usize..5, 1usize..5)
        .prop_flat_map(|(m, n, p, q)| (matrix(m, n), matrix(n, p), matrix(p, q)))
}

proptest! {
    #[test]
    fn prop_multiplication_is_associative((a, b, c) in chain()) {
        let left = matrix_multiply(&matrix_multiply(&a, &b).unwrap(), &c).unwrap();
        let right = matrix_multiply(&a, &matrix_multiply(&b, &c).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }

    #[test]
    fn prop_identity_is_neutral(a in (1usize..6, 1usize..6).prop_flat_map(|(r, c)| matrix(r, c))) {
        let (rows, cols) = a.shape();
        let left = identity_matrix(rows).unwrap();
        let right = identity_matrix(cols).unwrap();
        prop_assert_eq!(matrix_multiply(&left, &a).unwrap(), a.clone());
        prop_assert_eq!(matrix_multiply(&a, &right).unwrap(), a);
    }

    #[test]
    fn prop_transpose_reverses_product((a, b, _) in chain()) {
        let ab_t = matrix_transpose(&matrix_multiply(&a, &b).unwrap());
        let bt_at = matrix_multiply(&matrix_transpose(&b), &matrix_transpose(&a)).unwrap();
        prop_assert_eq!(ab_t, bt_at);
    }

    #[test]
    fn prop_normalized_vector_has_unit_length(v in prop::collection::vec(-1.0e3f64..1.0e3, 1..16)) {
        prop_assume!(v.iter().any(|x| x.abs() > 1e-6));
        let unit = vector_normalize(&v).unwrap();
        let magnitude = vector_magnitude(&unit).unwrap();
        prop_assert!((magnitude - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_dot_product_is_symmetric(pair in (1usize..16).prop_flat_map(|n| (
        prop::collection::vec(-100.0f64..100.0, n),
        prop::collection::vec(-100.0f64..100.0, n),
    ))) {
        let (a, b) = pair;
        prop_assert_eq!(dot_product(&a, &b).unwrap(), dot_product(&b, &a).unwrap());
    }
}

#[test]
fn test_standard_basis_is_mutually_orthogonal() {
    let n = 5;
    let identity = identity_matrix(n).expect("positive size");
    for i in 0..n {
        for j in (i + 1)..n {
            assert!(are_orthogonal(identity.row(i), identity.row(j)).expect("same length"));
        }
    }
}

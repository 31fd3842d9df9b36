/// The logistic function `1 / (1 + e^-z)`.
///
/// Only ever exponentiates a non-positive number, so large `|z|` saturates to
/// 0 or 1 instead of overflowing.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_midpoint_and_symmetry() {
        assert_eq!(sigmoid(0.0), 0.5);
        for z in [0.1, 1.0, 2.5, 10.0] {
            assert!((sigmoid(z) + sigmoid(-z) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sigmoid_saturates_without_overflow() {
        assert_eq!(sigmoid(1000.0), 1.0);
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert!(!sigmoid(-750.0).is_nan());
    }

    #[test]
    fn test_sigmoid_known_value() {
        assert!((sigmoid(1.0) - 0.731_058_578_6).abs() < 1e-9);
    }
}

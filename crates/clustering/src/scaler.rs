use crate::error::ClusteringError;
use crate::validate_data;
use ndarray::{Array1, Array2, Axis};

/// Standardizes features by removing the mean and scaling to unit variance.
///
/// The standard deviation is the population one (`ddof = 0`). A feature whose
/// deviation is zero is left unscaled.
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    means: Option<Array1<f64>>,
    stds: Option<Array1<f64>>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit(&mut self, data: &Array2<f64>) -> Result<(), ClusteringError> {
        validate_data(data)?;

        let means = data.mean_axis(Axis(0)).ok_or(ClusteringError::EmptyInput)?;
        let stds = data
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s < 1e-10 { 1.0 } else { s });

        tracing::debug!(features = means.len(), "Fitted standard scaler");
        self.means = Some(means);
        self.stds = Some(stds);
        Ok(())
    }

    fn parameters(&self, n_features: usize) -> Result<(&Array1<f64>, &Array1<f64>), ClusteringError> {
        let (means, stds) = self
            .means
            .as_ref()
            .zip(self.stds.as_ref())
            .ok_or(ClusteringError::NotFitted)?;
        if means.len() != n_features {
            return Err(ClusteringError::DimensionMismatch {
                expected: means.len(),
                found: n_features,
            });
        }
        Ok((means, stds))
    }

    pub fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, ClusteringError> {
        let (means, stds) = self.parameters(data.ncols())?;
        Ok((data - means) / stds)
    }

    pub fn fit_transform(&mut self, data: &Array2<f64>) -> Result<Array2<f64>, ClusteringError> {
        self.fit(data)?;
        self.transform(data)
    }

    /// Maps scaled values (for example cluster centroids) back to original units.
    pub fn inverse_transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, ClusteringError> {
        let (means, stds) = self.parameters(data.ncols())?;
        Ok(data * stds + means)
    }

    pub fn means(&self) -> Option<&Array1<f64>> {
        self.means.as_ref()
    }

    pub fn stds(&self) -> Option<&Array1<f64>> {
        self.stds.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_fit_transform_centers_and_scales() {
        let data = array![[1.0, 10.0], [2.0, 10.0], [3.0, 10.0]];
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&data).expect("valid data");

        let means = scaler.means().expect("fitted");
        assert_eq!(means[0], 2.0);
        // Population std of [1, 2, 3] is sqrt(2/3).
        let std = (2.0f64 / 3.0).sqrt();
        assert!((scaled[[0, 0]] + 1.0 / std).abs() < 1e-12);
        assert_eq!(scaled[[1, 0]], 0.0);
        // Constant column keeps a unit scale.
        assert_eq!(scaler.stds().expect("fitted")[1], 1.0);
        assert_eq!(scaled[[2, 1]], 0.0);
    }

    #[test]
    fn test_inverse_transform_restores_original() {
        let data = array![[15.0, 39.0], [16.0, 81.0], [17.0, 6.0], [120.0, 77.0]];
        let mut scaler = StandardScaler::new();
        let scaled = scaler.fit_transform(&data).expect("valid data");
        let restored = scaler.inverse_transform(&scaled).expect("fitted");
        for (a, b) in restored.iter().zip(data.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_transform_requires_fit() {
        let scaler = StandardScaler::new();
        assert_eq!(
            scaler.transform(&array![[1.0]]),
            Err(ClusteringError::NotFitted)
        );
    }

    #[test]
    fn test_transform_checks_width() {
        let mut scaler = StandardScaler::new();
        scaler.fit(&array![[1.0, 2.0], [3.0, 4.0]]).expect("valid data");
        assert_eq!(
            scaler.transform(&array![[1.0, 2.0, 3.0]]),
            Err(ClusteringError::DimensionMismatch { expected: 2, found: 3 })
        );
    }
}

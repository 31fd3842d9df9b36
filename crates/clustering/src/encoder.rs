use crate::error::ClusteringError;

/// Encodes categorical labels as integers `0..n_classes`.
///
/// Classes are stored sorted, so `"Female"` encodes to 0 and `"Male"` to 1.
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit<S: AsRef<str>>(&mut self, labels: &[S]) {
        let mut classes: Vec<String> = labels.iter().map(|s| s.as_ref().to_string()).collect();
        classes.sort();
        classes.dedup();
        self.classes = classes;
    }

    pub fn transform<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<usize>, ClusteringError> {
        if self.classes.is_empty() {
            return Err(ClusteringError::NotFitted);
        }
        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                self.classes
                    .binary_search_by(|c| c.as_str().cmp(label))
                    .map_err(|_| ClusteringError::UnknownLabel(label.to_string()))
            })
            .collect()
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<Vec<usize>, ClusteringError> {
        self.fit(labels);
        self.transform(labels)
    }

    pub fn inverse_transform(&self, codes: &[usize]) -> Result<Vec<String>, ClusteringError> {
        codes
            .iter()
            .map(|&code| {
                self.classes
                    .get(code)
                    .cloned()
                    .ok_or(ClusteringError::UnknownCode(code))
            })
            .collect()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_are_sorted() {
        let mut encoder = LabelEncoder::new();
        let codes = encoder
            .fit_transform(&["Male", "Female", "Male", "Female"])
            .expect("known labels");
        assert_eq!(encoder.classes(), ["Female", "Male"]);
        assert_eq!(codes, vec![1, 0, 1, 0]);
    }

    #[test]
    fn test_unknown_label() {
        let mut encoder = LabelEncoder::new();
        encoder.fit(&["a", "b"]);
        assert_eq!(
            encoder.transform(&["c"]),
            Err(ClusteringError::UnknownLabel("c".to_string()))
        );
    }

    #[test]
    fn test_inverse_transform() {
        let mut encoder = LabelEncoder::new();
        encoder.fit(&["x", "y", "z"]);
        let labels = encoder.inverse_transform(&[2, 0]).expect("valid codes");
        assert_eq!(labels, vec!["z".to_string(), "x".to_string()]);
        assert_eq!(encoder.inverse_transform(&[3]), Err(ClusteringError::UnknownCode(3)));
    }
}

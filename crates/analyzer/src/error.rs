use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] datasets::DatasetError),

    #[error("Statistics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Clustering error: {0}")]
    Clustering(#[from] clustering::ClusteringError),

    #[error("Not enough data for {0}")]
    NoData(String),
}

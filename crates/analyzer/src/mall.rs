//! Mall customer segmentation.

use crate::error::AnalyzerError;
use analytics::{correlation_matrix, describe, value_counts, Summary};
use chrono::{DateTime, Utc};
use clustering::{
    best_k_by_silhouette, elbow_sweep, silhouette_score, ElbowPoint, Init, KMeans, KMeansModel,
    LabelEncoder, StandardScaler,
};
use configuration::{ClusteringSettings, SegmentThresholds};
use core_types::{Gender, MallCustomer};
use mlmath::Matrix;
use ndarray::Array2;
use serde::Serialize;
use std::fmt;

pub const AGE: &str = "Age";
pub const INCOME: &str = "Annual Income (k$)";
pub const SPENDING: &str = "Spending Score (1-100)";

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub summary: Summary,
}

#[derive(Debug, Clone, Serialize)]
pub struct MallOverview {
    pub generated_at: DateTime<Utc>,
    pub rows: usize,
    /// Blank or `NA` cells in the raw file, summed over every column.
    pub missing_values: usize,
    pub missing_by_column: Vec<(String, usize)>,
    pub columns: Vec<ColumnSummary>,
    pub gender_counts: Vec<(String, usize)>,
    /// Column order of `correlation`.
    pub correlation_columns: Vec<String>,
    pub correlation: Matrix,
}

/// Row count, per-column statistics, gender split and correlations.
///
/// `missing_counts` comes from the raw file (see `datasets::Table::missing_counts`),
/// since typed records cannot hold a missing cell.
pub fn overview(
    customers: &[MallCustomer],
    missing_counts: Vec<(String, usize)>,
) -> Result<MallOverview, AnalyzerError> {
    if customers.is_empty() {
        return Err(AnalyzerError::NoData("the mall overview".to_string()));
    }

    let columns: Vec<(&str, Vec<f64>)> = vec![
        (AGE, customers.iter().map(|c| c.age).collect()),
        (INCOME, customers.iter().map(|c| c.annual_income).collect()),
        (SPENDING, customers.iter().map(|c| c.spending_score).collect()),
    ];

    let summaries = columns
        .iter()
        .map(|(name, values)| {
            Ok(ColumnSummary {
                column: name.to_string(),
                summary: describe(values)?,
            })
        })
        .collect::<Result<Vec<_>, AnalyzerError>>()?;

    let gender_counts = value_counts(customers.iter().map(|c| c.gender.as_str()))
        .into_iter()
        .map(|(g, n)| (g.to_string(), n))
        .collect();

    let data: Vec<Vec<f64>> = columns.iter().map(|(_, v)| v.clone()).collect();
    let correlation = correlation_matrix(&data)?;

    Ok(MallOverview {
        generated_at: Utc::now(),
        rows: customers.len(),
        missing_values: missing_counts.iter().map(|(_, n)| n).sum(),
        missing_by_column: missing_counts,
        columns: summaries,
        gender_counts,
        correlation_columns: columns.iter().map(|(n, _)| n.to_string()).collect(),
        correlation,
    })
}

/// Which customer attributes the clustering sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FeatureSet {
    /// Annual income and spending score, unscaled.
    #[default]
    IncomeSpending,
    /// Encoded gender, age, income and spending, standard-scaled.
    Full,
}

impl FeatureSet {
    pub fn feature_names(&self) -> Vec<&'static str> {
        match self {
            FeatureSet::IncomeSpending => vec![INCOME, SPENDING],
            FeatureSet::Full => vec!["Gender_Encoded", AGE, INCOME, SPENDING],
        }
    }
}

/// The feature matrix handed to k-means, and the scaler that produced it.
#[derive(Debug, Clone)]
pub struct PreparedFeatures {
    pub data: Array2<f64>,
    pub scaler: Option<StandardScaler>,
}

impl PreparedFeatures {
    /// Maps centroids from the clustering space back to original units.
    pub fn to_original_units(&self, centroids: &Array2<f64>) -> Result<Array2<f64>, AnalyzerError> {
        match &self.scaler {
            Some(scaler) => Ok(scaler.inverse_transform(centroids)?),
            None => Ok(centroids.clone()),
        }
    }
}

pub fn prepare_features(
    customers: &[MallCustomer],
    feature_set: FeatureSet,
) -> Result<PreparedFeatures, AnalyzerError> {
    if customers.is_empty() {
        return Err(AnalyzerError::NoData("clustering".to_string()));
    }

    let n = customers.len();
    match feature_set {
        FeatureSet::IncomeSpending => {
            let data = Array2::from_shape_fn((n, 2), |(i, j)| match j {
                0 => customers[i].annual_income,
                _ => customers[i].spending_score,
            });
            Ok(PreparedFeatures { data, scaler: None })
        }
        FeatureSet::Full => {
            let genders: Vec<&str> = customers.iter().map(|c| c.gender.as_str()).collect();
            let mut encoder = LabelEncoder::new();
            let encoded = encoder.fit_transform(&genders)?;

            let raw = Array2::from_shape_fn((n, 4), |(i, j)| match j {
                0 => encoded[i] as f64,
                1 => customers[i].age,
                2 => customers[i].annual_income,
                _ => customers[i].spending_score,
            });
            let mut scaler = StandardScaler::new();
            let data = scaler.fit_transform(&raw)?;
            Ok(PreparedFeatures {
                data,
                scaler: Some(scaler),
            })
        }
    }
}

/// A `KMeans` carrying every configured parameter; `n_clusters` is `settings.k`.
pub fn kmeans_template(settings: &ClusteringSettings) -> KMeans {
    KMeans::new(settings.k)
        .with_n_init(settings.n_init)
        .with_max_iter(settings.max_iter)
        .with_tol(settings.tol)
        .with_seed(settings.seed)
}

/// A business label derived from a cluster's average income and spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Segment {
    BudgetConscious,
    YoungSpenders,
    ConservativeHighEarners,
    Premium,
    Moderate,
}

impl Segment {
    pub fn classify(income: f64, spending: f64, t: &SegmentThresholds) -> Self {
        let low_income = income < t.low;
        let high_income = income > t.high_income;
        if low_income && spending < t.low {
            Segment::BudgetConscious
        } else if low_income && spending > t.high_spending {
            Segment::YoungSpenders
        } else if high_income && spending < t.low {
            Segment::ConservativeHighEarners
        } else if high_income && spending > t.high_spending {
            Segment::Premium
        } else {
            Segment::Moderate
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Segment::BudgetConscious => "Budget-Conscious Shoppers",
            Segment::YoungSpenders => "Young Spenders",
            Segment::ConservativeHighEarners => "Conservative High Earners",
            Segment::Premium => "Premium Customers",
            Segment::Moderate => "Moderate Shoppers",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterProfile {
    pub cluster: usize,
    pub size: usize,
    pub percentage: f64,
    pub avg_age: f64,
    pub avg_income: f64,
    pub avg_spending: f64,
    pub female_pct: f64,
    pub segment: Segment,
}

#[derive(Debug, Clone, Serialize)]
pub struct SegmentationReport {
    pub generated_at: DateTime<Utc>,
    pub feature_set: FeatureSet,
    pub features: Vec<String>,
    pub k: usize,
    pub wcss: f64,
    pub silhouette: Option<f64>,
    pub n_iter: usize,
    /// Non-empty clusters only.
    pub clusters: Vec<ClusterProfile>,
    /// Centroids in original feature units, one row per cluster.
    pub centroids: Vec<Vec<f64>>,
    /// Cluster of each customer, in input order.
    pub assignments: Vec<usize>,
}

fn profile(
    cluster: usize,
    members: &[&MallCustomer],
    total: usize,
    thresholds: &SegmentThresholds,
) -> ClusterProfile {
    let size = members.len() as f64;
    let avg = |f: fn(&MallCustomer) -> f64| members.iter().map(|c| f(c)).sum::<f64>() / size;
    let avg_income = avg(|c| c.annual_income);
    let avg_spending = avg(|c| c.spending_score);
    let females = members.iter().filter(|c| c.gender == Gender::Female).count();

    ClusterProfile {
        cluster,
        size: members.len(),
        percentage: size / total as f64 * 100.0,
        avg_age: avg(|c| c.age),
        avg_income,
        avg_spending,
        female_pct: females as f64 / size * 100.0,
        segment: Segment::classify(avg_income, avg_spending, thresholds),
    }
}

/// The silhouette score, or `None` when fewer than two clusters are occupied or
/// every point sits alone.
fn defined_silhouette(
    data: &Array2<f64>,
    model: &KMeansModel,
) -> Result<Option<f64>, AnalyzerError> {
    let distinct = model.cluster_sizes().iter().filter(|&&s| s > 0).count();
    if distinct >= 2 && distinct < data.nrows() {
        Ok(Some(silhouette_score(data, &model.labels)?))
    } else {
        Ok(None)
    }
}

/// Clusters the customers into `k` groups and profiles each group.
pub fn segment(
    customers: &[MallCustomer],
    feature_set: FeatureSet,
    k: usize,
    settings: &ClusteringSettings,
    thresholds: &SegmentThresholds,
) -> Result<SegmentationReport, AnalyzerError> {
    let features = prepare_features(customers, feature_set)?;
    let model = kmeans_template(settings).with_n_clusters(k).fit(&features.data)?;

    let silhouette = defined_silhouette(&features.data, &model)?;

    let clusters = (0..model.n_clusters())
        .filter_map(|cluster| {
            let members: Vec<&MallCustomer> = customers
                .iter()
                .zip(&model.labels)
                .filter(|(_, l)| **l == cluster)
                .map(|(c, _)| c)
                .collect();
            (!members.is_empty()).then(|| profile(cluster, &members, customers.len(), thresholds))
        })
        .collect();

    let centroids = features
        .to_original_units(&model.centroids)?
        .rows()
        .into_iter()
        .map(|row| row.to_vec())
        .collect();

    tracing::info!(k, wcss = model.inertia, ?silhouette, "Customer segmentation finished");
    Ok(SegmentationReport {
        generated_at: Utc::now(),
        feature_set,
        features: feature_set.feature_names().into_iter().map(String::from).collect(),
        k,
        wcss: model.inertia,
        silhouette,
        n_iter: model.n_iter,
        clusters,
        centroids,
        assignments: model.labels,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ElbowReport {
    pub generated_at: DateTime<Utc>,
    pub feature_set: FeatureSet,
    pub points: Vec<ElbowPoint>,
    /// The `k` with the highest silhouette score.
    pub best_k: Option<usize>,
}

impl ElbowReport {
    /// Builds the report from points computed elsewhere, e.g. in parallel.
    pub fn from_points(feature_set: FeatureSet, mut points: Vec<ElbowPoint>) -> Self {
        points.sort_by_key(|p| p.k);
        Self {
            generated_at: Utc::now(),
            feature_set,
            best_k: best_k_by_silhouette(&points),
            points,
        }
    }
}

/// WCSS and silhouette for every `k` in `settings.k_min..=settings.k_max`.
pub fn elbow(
    customers: &[MallCustomer],
    feature_set: FeatureSet,
    settings: &ClusteringSettings,
) -> Result<ElbowReport, AnalyzerError> {
    let features = prepare_features(customers, feature_set)?;
    let k_max = settings.k_max.min(customers.len());
    let points = elbow_sweep(&features.data, settings.k_min..=k_max, &kmeans_template(settings))?;
    Ok(ElbowReport::from_points(feature_set, points))
}

#[derive(Debug, Clone, Serialize)]
pub struct InitComparison {
    pub name: String,
    pub init: Init,
    pub n_init: usize,
    pub wcss: f64,
    /// `None` when every point lands in one cluster or in its own.
    pub silhouette: Option<f64>,
}

/// Fits `k` clusters under three initialization schemes and compares the results.
pub fn compare_initializations(
    customers: &[MallCustomer],
    feature_set: FeatureSet,
    k: usize,
    settings: &ClusteringSettings,
) -> Result<Vec<InitComparison>, AnalyzerError> {
    let features = prepare_features(customers, feature_set)?;
    let configs = [
        ("K-means++ (default)", Init::KMeansPlusPlus, 10),
        ("Random initialization", Init::Random, 10),
        ("K-means++ (more runs)", Init::KMeansPlusPlus, 20),
    ];

    configs
        .into_iter()
        .map(|(name, init, n_init)| {
            let model = kmeans_template(settings)
                .with_n_clusters(k)
                .with_init(init)
                .with_n_init(n_init)
                .fit(&features.data)?;
            Ok(InitComparison {
                name: name.to_string(),
                init,
                n_init,
                wcss: model.inertia,
                silhouette: defined_silhouette(&features.data, &model)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: u32, gender: Gender, age: f64, income: f64, spending: f64) -> MallCustomer {
        MallCustomer {
            customer_id: id,
            gender,
            age,
            annual_income: income,
            spending_score: spending,
        }
    }

    /// Three well separated income/spending groups.
    fn customers() -> Vec<MallCustomer> {
        let mut out = Vec::new();
        let groups = [(20.0, 20.0, 45.0), (20.0, 85.0, 22.0), (90.0, 85.0, 32.0)];
        let mut id = 1;
        for (income, spending, age) in groups {
            for d in 0..4 {
                let gender = if d % 2 == 0 { Gender::Female } else { Gender::Male };
                let offset = d as f64;
                out.push(customer(id, gender, age + offset, income + offset, spending - offset));
                id += 1;
            }
        }
        out
    }

    fn settings() -> ClusteringSettings {
        ClusteringSettings {
            k: 3,
            k_min: 1,
            k_max: 5,
            ..ClusteringSettings::default()
        }
    }

    #[test]
    fn test_segment_classification() {
        let t = SegmentThresholds::default();
        assert_eq!(Segment::classify(25.0, 20.0, &t), Segment::BudgetConscious);
        assert_eq!(Segment::classify(25.0, 80.0, &t), Segment::YoungSpenders);
        assert_eq!(Segment::classify(90.0, 15.0, &t), Segment::ConservativeHighEarners);
        assert_eq!(Segment::classify(90.0, 85.0, &t), Segment::Premium);
        assert_eq!(Segment::classify(55.0, 50.0, &t), Segment::Moderate);
        // Boundaries are exclusive.
        assert_eq!(Segment::classify(40.0, 20.0, &t), Segment::Moderate);
        assert_eq!(Segment::Premium.to_string(), "Premium Customers");
    }

    #[test]
    fn test_overview() {
        let data = customers();
        let missing = vec![("Age".to_string(), 2), ("Gender".to_string(), 1)];
        let report = overview(&data, missing).expect("non-empty");
        assert_eq!(report.rows, 12);
        assert_eq!(report.missing_values, 3);
        assert_eq!(report.missing_by_column[0], ("Age".to_string(), 2));
        assert_eq!(report.columns.len(), 3);
        assert_eq!(report.gender_counts, vec![("Female".to_string(), 6), ("Male".to_string(), 6)]);
        assert_eq!(report.correlation.shape(), (3, 3));
        assert_eq!(report.correlation[(1, 1)], 1.0);
    }

    #[test]
    fn test_segment_finds_the_three_groups() {
        let data = customers();
        let report = segment(
            &data,
            FeatureSet::IncomeSpending,
            3,
            &settings(),
            &SegmentThresholds::default(),
        )
        .expect("valid segmentation");

        assert_eq!(report.clusters.len(), 3);
        assert!(report.clusters.iter().all(|c| c.size == 4));
        let mut segments: Vec<String> = report.clusters.iter().map(|c| c.segment.to_string()).collect();
        segments.sort();
        assert_eq!(
            segments,
            vec!["Budget-Conscious Shoppers", "Premium Customers", "Young Spenders"]
        );
        assert!(report.silhouette.expect("k = 3 < n") > 0.8);
        assert_eq!(report.assignments.len(), 12);
        assert!(report.clusters.iter().all(|c| c.female_pct == 50.0));
    }

    #[test]
    fn test_full_features_centroids_in_original_units() {
        let data = customers();
        let report = segment(&data, FeatureSet::Full, 3, &settings(), &SegmentThresholds::default())
            .expect("valid segmentation");
        assert_eq!(report.features.len(), 4);
        for centroid in &report.centroids {
            // Income back in k$, not z-scores.
            assert!(centroid[2] > 15.0);
        }
        let json = serde_json::to_value(&report).expect("serializable");
        assert!(json.get("generated_at").is_some());
    }

    #[test]
    fn test_elbow_and_comparison() {
        let data = customers();
        let report = elbow(&data, FeatureSet::IncomeSpending, &settings()).expect("valid sweep");
        assert_eq!(report.points.len(), 5);
        assert_eq!(report.points[0].silhouette, None);
        assert_eq!(report.best_k, Some(3));

        let comparison = compare_initializations(&data, FeatureSet::IncomeSpending, 3, &settings())
            .expect("valid fits");
        assert_eq!(comparison.len(), 3);
        assert_eq!(comparison[1].init, Init::Random);
        assert_eq!(comparison[2].n_init, 20);
        assert!(comparison.iter().all(|c| c.silhouette.is_some()));
    }

    #[test]
    fn test_comparison_degrades_without_a_silhouette() {
        let data = customers();
        for k in [1, data.len()] {
            let comparison = compare_initializations(&data, FeatureSet::IncomeSpending, k, &settings())
                .expect("k = 1 and k = n still fit");
            assert_eq!(comparison.len(), 3);
            assert!(comparison.iter().all(|c| c.silhouette.is_none()));
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(overview(&[], Vec::new()), Err(AnalyzerError::NoData(_))));
    }
}

use crate::charts::{self, Axes, Marker, ScatterGroup};
use crate::commands::{progress_bar, AppContext};
use crate::output::{self, new_table, opt, section};
use analyzer::mall::{self, ElbowReport, FeatureSet, InitComparison, MallOverview, SegmentationReport};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clustering::elbow_point;
use configuration::ClusteringSettings;
use core_types::MallCustomer;
use datasets::MALL_CUSTOMERS_FILE;
use futures::future::join_all;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Features {
    /// Annual income and spending score, unscaled.
    #[default]
    Basic,
    /// Gender, age, income and spending, standard-scaled.
    Full,
}

impl From<Features> for FeatureSet {
    fn from(features: Features) -> Self {
        match features {
            Features::Basic => FeatureSet::IncomeSpending,
            Features::Full => FeatureSet::Full,
        }
    }
}

#[derive(Parser)]
pub struct ClusterArgs {
    /// Directory containing Mall_Customers.csv [default: `data.directory`].
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Which customer attributes to cluster on.
    #[arg(long, value_enum, default_value_t = Features::Basic)]
    pub features: Features,

    /// Number of segments [default: `clustering.k`].
    #[arg(long)]
    pub k: Option<usize>,

    /// Print the dataset overview first.
    #[arg(long)]
    pub overview: bool,

    /// Sweep k over `clustering.k_min..=clustering.k_max` and report WCSS and silhouette.
    #[arg(long)]
    pub elbow: bool,

    /// Compare k-means++ and random initialization.
    #[arg(long)]
    pub compare_init: bool,
}

#[derive(Debug, Serialize)]
struct ClusterReport {
    overview: Option<MallOverview>,
    elbow: Option<ElbowReport>,
    segmentation: SegmentationReport,
    init_comparison: Option<Vec<InitComparison>>,
}

pub async fn handle_cluster(args: ClusterArgs, ctx: &AppContext) -> Result<()> {
    let repository = ctx.repository(args.data_dir.as_deref());
    let missing_counts = if args.overview {
        let raw = repository.load_table(MALL_CUSTOMERS_FILE).with_context(|| {
            format!(
                "Failed to read {}",
                repository.resolve(MALL_CUSTOMERS_FILE).display()
            )
        })?;
        raw.missing_counts()
    } else {
        Vec::new()
    };
    let customers = repository.load_mall_customers().with_context(|| {
        format!(
            "Failed to load customers from {}",
            repository.resolve(MALL_CUSTOMERS_FILE).display()
        )
    })?;

    let feature_set = FeatureSet::from(args.features);
    let settings = &ctx.config.clustering;
    let k = args.k.unwrap_or(settings.k);
    tracing::info!(customers = customers.len(), k, ?feature_set, "Starting customer segmentation");

    let overview = if args.overview {
        Some(mall::overview(&customers, missing_counts)?)
    } else {
        None
    };
    let elbow = if args.elbow {
        Some(run_elbow(&customers, feature_set, settings, ctx.is_json()).await?)
    } else {
        None
    };
    let segmentation = mall::segment(&customers, feature_set, k, settings, &ctx.config.segmentation)?;
    let init_comparison = if args.compare_init {
        Some(mall::compare_initializations(&customers, feature_set, k, settings)?)
    } else {
        None
    };

    let report = ClusterReport {
        overview,
        elbow,
        segmentation,
        init_comparison,
    };

    if ctx.is_json() {
        output::print_json(&report)?;
    } else {
        print_report(&report);
    }

    if let Some(dir) = &ctx.charts_dir {
        write_charts(dir, &report, &customers)?;
    }
    Ok(())
}

/// Fits every k of the sweep as its own blocking task.
async fn run_elbow(
    customers: &[MallCustomer],
    feature_set: FeatureSet,
    settings: &ClusteringSettings,
    hidden: bool,
) -> Result<ElbowReport> {
    let features = mall::prepare_features(customers, feature_set)?;
    let data = Arc::new(features.data);
    let template = mall::kmeans_template(settings);
    let ks: Vec<usize> = (settings.k_min..=settings.k_max.min(customers.len())).collect();

    let progress_bar = progress_bar(ks.len() as u64, hidden)?;
    let tasks: Vec<_> = ks
        .into_iter()
        .map(|k| {
            let data = Arc::clone(&data);
            let template = template.clone();
            let pb_clone = progress_bar.clone();
            tokio::task::spawn_blocking(move || {
                pb_clone.set_message(format!("Fitting k = {k}..."));
                let point = elbow_point(&data, k, &template);
                pb_clone.inc(1);
                point
            })
        })
        .collect();

    let results = join_all(tasks).await;
    progress_bar.finish_with_message("Elbow sweep complete!");

    let mut points = Vec::with_capacity(results.len());
    for result in results {
        points.push(result.context("Elbow task failed to complete")??);
    }
    Ok(ElbowReport::from_points(feature_set, points))
}

fn print_report(report: &ClusterReport) {
    if let Some(overview) = &report.overview {
        print_overview(overview);
    }

    if let Some(elbow) = &report.elbow {
        section("Elbow Method");
        let mut table = new_table(&["k", "WCSS", "Silhouette"]);
        for point in &elbow.points {
            table.add_row(vec![
                point.k.to_string(),
                format!("{:.2}", point.wcss),
                opt(point.silhouette, 3),
            ]);
        }
        println!("{table}");
        if let Some(best) = elbow.best_k {
            println!("Best k by silhouette score: {best}");
        }
    }

    let s = &report.segmentation;
    section(&format!("Customer Segmentation (k = {})", s.k));
    println!("Features: {}", s.features.join(", "));
    println!("WCSS: {:.2}", s.wcss);
    println!("Silhouette score: {}", opt(s.silhouette, 3));
    println!("Iterations: {}", s.n_iter);

    let mut table = new_table(&[
        "Cluster", "Size", "%", "Avg Age", "Avg Income (k$)", "Avg Spending", "Female %", "Segment",
    ]);
    for c in &s.clusters {
        table.add_row(vec![
            c.cluster.to_string(),
            c.size.to_string(),
            format!("{:.1}", c.percentage),
            format!("{:.1}", c.avg_age),
            format!("{:.1}", c.avg_income),
            format!("{:.1}", c.avg_spending),
            format!("{:.1}", c.female_pct),
            c.segment.to_string(),
        ]);
    }
    println!("{table}");

    println!("\nCluster centers (original units):");
    let mut header = vec!["Cluster"];
    header.extend(s.features.iter().map(String::as_str));
    let mut centers = new_table(&header);
    for (i, centroid) in s.centroids.iter().enumerate() {
        let mut row = vec![i.to_string()];
        row.extend(centroid.iter().map(|v| format!("{v:.2}")));
        centers.add_row(row);
    }
    println!("{centers}");

    if let Some(comparison) = &report.init_comparison {
        section("Initialization Comparison");
        let mut table = new_table(&["Method", "Restarts", "WCSS", "Silhouette"]);
        for c in comparison {
            table.add_row(vec![
                c.name.clone(),
                c.n_init.to_string(),
                format!("{:.2}", c.wcss),
                opt(c.silhouette, 3),
            ]);
        }
        println!("{table}");
    }
}

fn print_overview(overview: &MallOverview) {
    section("Dataset Overview");
    println!("Rows: {}", overview.rows);
    println!("Missing values: {}", overview.missing_values);
    for (column, missing) in overview.missing_by_column.iter().filter(|(_, n)| *n > 0) {
        println!("  {column}: {missing}");
    }

    let mut table = new_table(&["Column", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max"]);
    for c in &overview.columns {
        let s = &c.summary;
        table.add_row(vec![
            c.column.clone(),
            s.count.to_string(),
            format!("{:.2}", s.mean),
            opt(s.std, 2),
            format!("{:.2}", s.min),
            format!("{:.2}", s.q1),
            format!("{:.2}", s.median),
            format!("{:.2}", s.q3),
            format!("{:.2}", s.max),
        ]);
    }
    println!("{table}");

    let mut genders = new_table(&["Gender", "Customers"]);
    for (gender, count) in &overview.gender_counts {
        genders.add_row(vec![gender.clone(), count.to_string()]);
    }
    println!("{genders}");

    println!("\nCorrelation matrix:");
    let mut header = vec![""];
    header.extend(overview.correlation_columns.iter().map(String::as_str));
    let mut corr = new_table(&header);
    for (i, name) in overview.correlation_columns.iter().enumerate() {
        let mut row = vec![name.clone()];
        row.extend(overview.correlation.row(i).iter().map(|v| format!("{v:.3}")));
        corr.add_row(row);
    }
    println!("{corr}");
}

fn write_charts(dir: &Path, report: &ClusterReport, customers: &[MallCustomer]) -> Result<()> {
    if let Some(elbow) = &report.elbow {
        let points: Vec<(f64, f64)> = elbow.points.iter().map(|p| (p.k as f64, p.wcss)).collect();
        let svg = charts::line_chart(
            &Axes {
                title: "Elbow Method for Optimal k",
                x_label: "Number of clusters (k)",
                y_label: "WCSS",
            },
            &points,
        );
        charts::write_svg(dir, "elbow.svg", &svg)?;
    }

    let s = &report.segmentation;
    let mut groups: Vec<ScatterGroup> = s
        .clusters
        .iter()
        .map(|c| ScatterGroup {
            label: format!("Cluster {}: {}", c.cluster, c.segment),
            points: customers
                .iter()
                .zip(&s.assignments)
                .filter(|(_, label)| **label == c.cluster)
                .map(|(customer, _)| (customer.annual_income, customer.spending_score))
                .collect(),
            marker: Marker::Dot,
        })
        .collect();

    let income = s.features.iter().position(|f| f == mall::INCOME);
    let spending = s.features.iter().position(|f| f == mall::SPENDING);
    if let (Some(i), Some(j)) = (income, spending) {
        groups.push(ScatterGroup {
            label: "Centroids".to_string(),
            points: s.centroids.iter().map(|c| (c[i], c[j])).collect(),
            marker: Marker::Cross,
        });
    }

    let svg = charts::scatter_chart(
        &Axes {
            title: "Customer Segments",
            x_label: mall::INCOME,
            y_label: mall::SPENDING,
        },
        &groups,
    );
    charts::write_svg(dir, "clusters.svg", &svg)?;
    Ok(())
}

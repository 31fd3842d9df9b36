//! ICRISAT district-level agriculture analysis.
//!
//! The dataset has well over a hundred columns, so it is read as a generic
//! [`Table`] and only the columns each question needs are parsed. The export
//! marks unreported figures with `-1`; sums follow the raw values, while the
//! yield and ratio questions drop `0` and `-1` explicitly.

use crate::error::AnalyzerError;
use crate::summary::{optional, CorrelationSummary};
use analytics::{describe, nlargest_by, pearson, Summary};
use chrono::{DateTime, Utc};
use datasets::Table;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const YEAR: &str = "Year";
pub const STATE: &str = "State Name";
pub const DISTRICT: &str = "Dist Name";
pub const RICE_AREA: &str = "RICE AREA (1000 ha)";
pub const WHEAT_AREA: &str = "WHEAT AREA (1000 ha)";
pub const MAIZE_AREA: &str = "MAIZE AREA (1000 ha)";
pub const RICE_PRODUCTION: &str = "RICE PRODUCTION (1000 tons)";
pub const WHEAT_PRODUCTION: &str = "WHEAT PRODUCTION (1000 tons)";
pub const SORGHUM_YIELD: &str = "SORGHUM YIELD (Kg per ha)";
pub const VEGETABLES_AREA: &str = "VEGETABLES AREA (1000 ha)";
pub const CHICKPEA_AREA: &str = "CHICKPEA AREA (1000 ha)";
pub const CHICKPEA_PRODUCTION: &str = "CHICKPEA PRODUCTION (1000 tons)";
pub const KHARIF_SORGHUM_AREA: &str = "KHARIF SORGHUM AREA (1000 ha)";
pub const RABI_SORGHUM_AREA: &str = "RABI SORGHUM AREA (1000 ha)";

pub const PULSE_YIELDS: [&str; 3] = [
    "CHICKPEA YIELD (Kg per ha)",
    "PIGEONPEA YIELD (Kg per ha)",
    "MINOR PULSES YIELD (Kg per ha)",
];

/// Aggregate columns that would double count their component crops.
const AGGREGATE_AREAS: [&str; 2] = [
    "FRUITS AND VEGETABLES AREA (1000 ha)",
    "OILSEEDS AREA (1000 ha)",
];

const YIELD_SUFFIX: &str = " YIELD (Kg per ha)";

#[derive(Debug, Clone, Serialize)]
pub struct IcrisatOverview {
    pub rows: usize,
    pub columns: usize,
    pub missing_values: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub states: usize,
    pub districts: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AreaTotals {
    pub rice: f64,
    pub wheat: f64,
    pub maize: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearValue {
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateValue {
    pub state: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictValue {
    pub district: String,
    pub state: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropDiversity {
    pub state: String,
    pub crops: usize,
}

/// First and last year with a positive mean yield.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PulseTrend {
    pub crop: String,
    pub first_year: i32,
    pub first_yield: f64,
    pub last_year: i32,
    pub last_yield: f64,
    pub change_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SorghumSeason {
    pub season: String,
    pub districts_with_area: usize,
    pub top_districts: Vec<DistrictValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IcrisatReport {
    pub generated_at: DateTime<Utc>,
    pub overview: IcrisatOverview,
    pub area_totals: AreaTotals,
    pub rice_by_year: Vec<YearValue>,
    pub peak_rice_year: Option<YearValue>,
    pub top_wheat_state: Option<StateValue>,
    pub bottom_wheat_state: Option<StateValue>,
    pub sorghum_yield: Option<Summary>,
    pub vegetable_area_total: f64,
    pub top_vegetable_state: Option<StateValue>,
    pub chickpea_area_production: Option<CorrelationSummary>,
    pub crop_diversity: Vec<CropDiversity>,
    pub pulse_trends: Vec<PulseTrend>,
    pub sorghum_seasons: Vec<SorghumSeason>,
}

pub fn analyze(table: &Table) -> Result<IcrisatReport, AnalyzerError> {
    if table.height() == 0 {
        return Err(AnalyzerError::NoData("the ICRISAT analysis".to_string()));
    }

    let years = year_column(table)?;
    let states = table.str_column(STATE)?;
    let districts = table.str_column(DISTRICT)?;

    let rice = years
        .iter()
        .zip(table.f64_column(RICE_PRODUCTION)?)
        .filter_map(|(year, value)| year.map(|year| (year, value)));
    let rice_by_year: Vec<YearValue> = sum_by(rice)
        .into_iter()
        .map(|(year, value)| YearValue { year, value })
        .collect();
    let peak_rice_year = nlargest_by(rice_by_year.iter().copied(), 1, |p| p.value)
        .into_iter()
        .next();

    let wheat_by_state = sum_by(states.iter().copied().zip(table.f64_column(WHEAT_PRODUCTION)?));
    let vegetables = table.f64_column(VEGETABLES_AREA)?;
    let vegetables_by_state = sum_by(states.iter().copied().zip(vegetables.iter().copied()));

    let report = IcrisatReport {
        generated_at: Utc::now(),
        overview: overview(table, &years, &states, &districts),
        area_totals: AreaTotals {
            rice: total(&table.f64_column(RICE_AREA)?),
            wheat: total(&table.f64_column(WHEAT_AREA)?),
            maize: total(&table.f64_column(MAIZE_AREA)?),
        },
        rice_by_year,
        peak_rice_year,
        top_wheat_state: largest(&wheat_by_state),
        bottom_wheat_state: smallest(&wheat_by_state),
        sorghum_yield: sorghum_yield(table)?,
        vegetable_area_total: total(&vegetables),
        top_vegetable_state: largest(&vegetables_by_state),
        chickpea_area_production: chickpea_correlation(table)?,
        crop_diversity: crop_diversity(table, &states)?,
        pulse_trends: pulse_trends(table, &years)?,
        sorghum_seasons: vec![
            sorghum_season(table, "Kharif", KHARIF_SORGHUM_AREA, &states, &districts)?,
            sorghum_season(table, "Rabi", RABI_SORGHUM_AREA, &states, &districts)?,
        ],
    };
    tracing::info!(rows = table.height(), "ICRISAT analysis finished");
    Ok(report)
}

fn overview(
    table: &Table,
    years: &[Option<i32>],
    states: &[&str],
    districts: &[&str],
) -> IcrisatOverview {
    let known_years = years.iter().flatten().copied();
    IcrisatOverview {
        rows: table.height(),
        columns: table.width(),
        missing_values: table.missing_counts().iter().map(|(_, n)| n).sum(),
        first_year: known_years.clone().min(),
        last_year: known_years.max(),
        states: states.iter().collect::<BTreeSet<_>>().len(),
        districts: districts.iter().collect::<BTreeSet<_>>().len(),
    }
}

/// Sorghum yield statistics over reported values only.
pub fn sorghum_yield(table: &Table) -> Result<Option<Summary>, AnalyzerError> {
    let yields: Vec<f64> = table
        .f64_column(SORGHUM_YIELD)?
        .into_iter()
        .flatten()
        .filter(|&v| is_reported(v))
        .collect();
    if yields.is_empty() {
        return Ok(None);
    }
    Ok(Some(describe(&yields)?))
}

pub fn chickpea_correlation(table: &Table) -> Result<Option<CorrelationSummary>, AnalyzerError> {
    let (area, production): (Vec<f64>, Vec<f64>) = table
        .f64_column(CHICKPEA_AREA)?
        .into_iter()
        .zip(table.f64_column(CHICKPEA_PRODUCTION)?)
        .filter_map(|(a, p)| a.zip(p))
        .filter(|&(a, p)| is_reported(a) && is_reported(p))
        .unzip();

    Ok(optional(pearson(&area, &production), "chickpea area/production correlation")?
        .map(CorrelationSummary::from))
}

/// Crop area columns that name a single crop.
pub fn crop_area_columns(table: &Table) -> Vec<&str> {
    table
        .headers()
        .iter()
        .map(String::as_str)
        .filter(|h| h.contains("AREA") && h.contains("(1000 ha)"))
        .filter(|h| !AGGREGATE_AREAS.contains(h))
        .collect()
}

/// Number of crops grown in each state, most diverse first.
pub fn crop_diversity(table: &Table, states: &[&str]) -> Result<Vec<CropDiversity>, AnalyzerError> {
    let mut grown: BTreeMap<&str, BTreeSet<&str>> =
        states.iter().map(|&s| (s, BTreeSet::new())).collect();

    for column in crop_area_columns(table) {
        for (&state, value) in states.iter().zip(table.f64_column(column)?) {
            if value.is_some_and(|v| v > 0.0) {
                grown.entry(state).or_default().insert(column);
            }
        }
    }

    let counts = grown.into_iter().map(|(state, crops)| CropDiversity {
        state: state.to_string(),
        crops: crops.len(),
    });
    Ok(nlargest_by(counts, usize::MAX, |c| c.crops as f64))
}

/// First against last positive yearly mean yield. Pulses with fewer than two
/// positive years are left out.
pub fn pulse_trends(table: &Table, years: &[Option<i32>]) -> Result<Vec<PulseTrend>, AnalyzerError> {
    let mut trends = Vec::new();
    for column in PULSE_YIELDS {
        let mut by_year: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
        for (year, value) in years.iter().zip(table.f64_column(column)?) {
            if let (Some(year), Some(value)) = (year, value) {
                let entry = by_year.entry(*year).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
        }

        let positive: Vec<(i32, f64)> = by_year
            .into_iter()
            .map(|(year, (sum, n))| (year, sum / n as f64))
            .filter(|&(_, mean)| mean > 0.0)
            .collect();
        let (Some(&first), Some(&last)) = (positive.first(), positive.last()) else {
            tracing::debug!(column, "No positive yearly yield; skipping trend");
            continue;
        };
        if positive.len() < 2 {
            tracing::debug!(column, year = first.0, "Single positive year; no trend");
            continue;
        }

        trends.push(PulseTrend {
            crop: column.trim_end_matches(YIELD_SUFFIX).to_string(),
            first_year: first.0,
            first_yield: first.1,
            last_year: last.0,
            last_yield: last.1,
            change_pct: (last.1 - first.1) / first.1 * 100.0,
        });
    }
    Ok(trends)
}

pub fn sorghum_season(
    table: &Table,
    season: &str,
    column: &str,
    states: &[&str],
    districts: &[&str],
) -> Result<SorghumSeason, AnalyzerError> {
    let keys = states.iter().copied().zip(districts.iter().copied());
    let area = sum_by(keys.zip(table.f64_column(column)?));

    let planted = area
        .into_iter()
        .filter(|&(_, v)| v > 0.0)
        .map(|((state, district), value)| DistrictValue {
            district: district.to_string(),
            state: state.to_string(),
            value,
        })
        .collect::<Vec<_>>();

    Ok(SorghumSeason {
        season: season.to_string(),
        districts_with_area: planted.len(),
        top_districts: nlargest_by(planted, 5, |d| d.value),
    })
}

fn year_column(table: &Table) -> Result<Vec<Option<i32>>, AnalyzerError> {
    Ok(table
        .f64_column(YEAR)?
        .into_iter()
        .map(|y| y.filter(|y| y.is_finite()).map(|y| y as i32))
        .collect())
}

/// Sum of every present value; `-1` markers are included.
fn total(values: &[Option<f64>]) -> f64 {
    values.iter().flatten().sum()
}

/// `0` and `-1` both mean "not reported" in yield and ratio columns.
fn is_reported(value: f64) -> bool {
    value != 0.0 && value != -1.0
}

/// Per-key sums. A key whose values are all missing sums to zero.
fn sum_by<K: Ord>(pairs: impl IntoIterator<Item = (K, Option<f64>)>) -> BTreeMap<K, f64> {
    let mut sums = BTreeMap::new();
    for (key, value) in pairs {
        *sums.entry(key).or_insert(0.0) += value.unwrap_or(0.0);
    }
    sums
}

/// Ties go to the alphabetically first state.
fn largest(sums: &BTreeMap<&str, f64>) -> Option<StateValue> {
    nlargest_by(sums.iter(), 1, |(_, v)| **v)
        .into_iter()
        .next()
        .map(|(state, value)| StateValue {
            state: state.to_string(),
            value: *value,
        })
}

fn smallest(sums: &BTreeMap<&str, f64>) -> Option<StateValue> {
    nlargest_by(sums.iter(), 1, |(_, v)| -**v)
        .into_iter()
        .next()
        .map(|(state, value)| StateValue {
            state: state.to_string(),
            value: *value,
        })
}

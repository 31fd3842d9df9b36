use crate::enums::Gender;
use serde::{Deserialize, Serialize};

/// One row of `Mall_Customers.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MallCustomer {
    #[serde(rename = "CustomerID")]
    pub customer_id: u32,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Age")]
    pub age: f64,
    /// Annual income in thousands of dollars.
    #[serde(rename = "Annual Income (k$)")]
    pub annual_income: f64,
    /// Mall-assigned score between 1 and 100.
    #[serde(rename = "Spending Score (1-100)")]
    pub spending_score: f64,
}

/// One restaurant listing from the Swiggy dataset.
///
/// Numeric columns are optional: a blank or unparseable cell (`N/A`, `--`) is
/// treated as a missing value rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "ID", default, deserialize_with = "csv::invalid_option")]
    pub id: Option<u64>,
    #[serde(rename = "Area", default)]
    pub area: Option<String>,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Restaurant")]
    pub name: String,
    #[serde(rename = "Price", default, deserialize_with = "csv::invalid_option")]
    pub price: Option<f64>,
    #[serde(rename = "Avg ratings", default, deserialize_with = "csv::invalid_option")]
    pub avg_rating: Option<f64>,
    #[serde(rename = "Total ratings", default, deserialize_with = "csv::invalid_option")]
    pub total_ratings: Option<f64>,
    /// Comma-separated cuisines, e.g. `"Biryani,Chinese"`.
    #[serde(rename = "Food type", default)]
    pub food_type: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
    /// Minutes.
    #[serde(rename = "Delivery time", default, deserialize_with = "csv::invalid_option")]
    pub delivery_time: Option<f64>,
}

impl Restaurant {
    /// Individual cuisines of this listing, trimmed, with empty entries dropped.
    pub fn food_types(&self) -> Vec<&str> {
        self.food_type
            .as_deref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

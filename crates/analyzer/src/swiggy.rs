//! Swiggy restaurant listing analysis.

use crate::error::AnalyzerError;
use crate::summary::{complete_pairs, mean_present, optional, CorrelationSummary};
use analytics::{bin_index, describe, iqr_fence, nlargest_by, pearson, value_counts};
use chrono::{DateTime, Utc};
use core_types::Restaurant;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Right-closed rating bins; the first also includes 0.
const RATING_EDGES: [f64; 4] = [0.0, 3.0, 4.0, 5.0];
const RATING_LABELS: [&str; 3] = ["Below 3", "3-4", "Above 4"];

#[derive(Debug, Clone, Serialize)]
pub struct EasyAnswers {
    pub restaurant_count: usize,
    pub max_price: Option<f64>,
    pub avg_rating: Option<f64>,
    pub total_ratings: f64,
    pub unique_food_types: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityCount {
    pub city: String,
    pub restaurants: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FoodTypePrice {
    pub food_type: String,
    pub avg_price: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopRestaurant {
    pub name: String,
    pub city: String,
    pub rating: f64,
    pub food_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediumAnswers {
    pub top_cities: Vec<CityCount>,
    pub top_food_types_by_price: Vec<FoodTypePrice>,
    /// Mean delivery time of restaurants rated above 4.
    pub avg_delivery_time_high_rated: Option<f64>,
    pub top_rated: Vec<TopRestaurant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeliveryOutliers {
    pub count: usize,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingCategoryPrice {
    pub category: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityStats {
    pub city: String,
    pub restaurant_count: usize,
    pub avg_price: Option<f64>,
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HardAnswers {
    pub price_rating_correlation: Option<CorrelationSummary>,
    pub delivery_outliers: Option<DeliveryOutliers>,
    pub price_by_rating: Vec<RatingCategoryPrice>,
    /// Top 10 cities by restaurant count.
    pub city_stats: Vec<CityStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwiggyReport {
    pub generated_at: DateTime<Utc>,
    pub easy: EasyAnswers,
    pub medium: MediumAnswers,
    pub hard: HardAnswers,
}

pub fn analyze(restaurants: &[Restaurant]) -> Result<SwiggyReport, AnalyzerError> {
    if restaurants.is_empty() {
        return Err(AnalyzerError::NoData("the Swiggy analysis".to_string()));
    }

    let report = SwiggyReport {
        generated_at: Utc::now(),
        easy: easy(restaurants),
        medium: medium(restaurants),
        hard: hard(restaurants)?,
    };
    tracing::info!(restaurants = restaurants.len(), "Swiggy analysis finished");
    Ok(report)
}

pub fn easy(restaurants: &[Restaurant]) -> EasyAnswers {
    let unique: BTreeSet<&str> = restaurants.iter().flat_map(|r| r.food_types()).collect();

    EasyAnswers {
        restaurant_count: restaurants.len(),
        max_price: restaurants
            .iter()
            .filter_map(|r| r.price)
            .max_by(f64::total_cmp),
        avg_rating: mean_present(restaurants.iter().map(|r| r.avg_rating)),
        total_ratings: restaurants.iter().filter_map(|r| r.total_ratings).sum(),
        unique_food_types: unique.len(),
    }
}

pub fn medium(restaurants: &[Restaurant]) -> MediumAnswers {
    let top_cities = value_counts(restaurants.iter().map(|r| r.city.as_str()))
        .into_iter()
        .take(3)
        .map(|(city, restaurants)| CityCount {
            city: city.to_string(),
            restaurants,
        })
        .collect();

    // Each listing contributes its price to every cuisine it serves.
    let mut prices_by_type: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in restaurants {
        if let Some(price) = r.price {
            for food_type in r.food_types() {
                prices_by_type.entry(food_type).or_default().push(price);
            }
        }
    }
    let averages = prices_by_type.into_iter().map(|(food_type, prices)| FoodTypePrice {
        food_type: food_type.to_string(),
        avg_price: prices.iter().sum::<f64>() / prices.len() as f64,
    });
    let top_food_types_by_price = nlargest_by(averages, 10, |f| f.avg_price);

    let avg_delivery_time_high_rated = mean_present(
        restaurants
            .iter()
            .filter(|r| r.avg_rating.is_some_and(|rating| rating > 4.0))
            .map(|r| r.delivery_time),
    );

    let rated = restaurants
        .iter()
        .filter_map(|r| r.avg_rating.map(|rating| (r, rating)));
    let top_rated = nlargest_by(rated, 5, |(_, rating)| *rating)
        .into_iter()
        .map(|(r, rating)| TopRestaurant {
            name: r.name.clone(),
            city: r.city.clone(),
            rating,
            food_type: r.food_type.clone(),
        })
        .collect();

    MediumAnswers {
        top_cities,
        top_food_types_by_price,
        avg_delivery_time_high_rated,
        top_rated,
    }
}

pub fn hard(restaurants: &[Restaurant]) -> Result<HardAnswers, AnalyzerError> {
    let prices: Vec<Option<f64>> = restaurants.iter().map(|r| r.price).collect();
    let ratings: Vec<Option<f64>> = restaurants.iter().map(|r| r.avg_rating).collect();

    let (x, y) = complete_pairs(&prices, &ratings);
    let price_rating_correlation =
        optional(pearson(&x, &y), "price/rating correlation")?.map(CorrelationSummary::from);

    let delivery: Vec<f64> = restaurants.iter().filter_map(|r| r.delivery_time).collect();
    let delivery_outliers = if delivery.is_empty() {
        None
    } else {
        let fence = iqr_fence(&delivery)?;
        let summary = describe(&delivery)?;
        Some(DeliveryOutliers {
            count: delivery.iter().filter(|&&d| fence.is_outlier(d)).count(),
            lower_bound: fence.lower,
            upper_bound: fence.upper,
            min: summary.min,
            max: summary.max,
        })
    };

    Ok(HardAnswers {
        price_rating_correlation,
        delivery_outliers,
        price_by_rating: price_by_rating(restaurants)?,
        city_stats: city_stats(restaurants),
    })
}

/// Price statistics per rating band. Every band is listed, empty or not.
fn price_by_rating(restaurants: &[Restaurant]) -> Result<Vec<RatingCategoryPrice>, AnalyzerError> {
    let mut bands: Vec<Vec<f64>> = vec![Vec::new(); RATING_LABELS.len()];
    for r in restaurants {
        if let (Some(rating), Some(price)) = (r.avg_rating, r.price) {
            if let Some(band) = bin_index(rating, &RATING_EDGES, true)? {
                bands[band].push(price);
            }
        }
    }

    bands
        .into_iter()
        .zip(RATING_LABELS)
        .map(|(prices, label)| -> Result<RatingCategoryPrice, AnalyzerError> {
            let summary = if prices.is_empty() {
                None
            } else {
                Some(describe(&prices)?)
            };
            Ok(RatingCategoryPrice {
                category: label.to_string(),
                count: prices.len(),
                mean: summary.map(|s| s.mean),
                median: summary.map(|s| s.median),
                std: summary.and_then(|s| s.std),
            })
        })
        .collect()
}

fn city_stats(restaurants: &[Restaurant]) -> Vec<CityStats> {
    let mut by_city: BTreeMap<&str, Vec<&Restaurant>> = BTreeMap::new();
    for r in restaurants {
        by_city.entry(r.city.as_str()).or_default().push(r);
    }

    let stats = by_city.into_iter().map(|(city, members)| CityStats {
        city: city.to_string(),
        restaurant_count: members.len(),
        avg_price: mean_present(members.iter().map(|r| r.price)),
        avg_rating: mean_present(members.iter().map(|r| r.avg_rating)),
    });
    nlargest_by(stats, 10, |c| c.restaurant_count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(
        city: &str,
        name: &str,
        price: Option<f64>,
        rating: Option<f64>,
        food: &str,
        delivery: Option<f64>,
    ) -> Restaurant {
        Restaurant {
            id: None,
            area: None,
            city: city.to_string(),
            name: name.to_string(),
            price,
            avg_rating: rating,
            total_ratings: Some(100.0),
            food_type: Some(food.to_string()),
            address: None,
            delivery_time: delivery,
        }
    }

    fn sample() -> Vec<Restaurant> {
        vec![
            restaurant("Pune", "A", Some(200.0), Some(4.5), "Biryani, Chinese", Some(30.0)),
            restaurant("Pune", "B", Some(400.0), Some(3.5), "Chinese", Some(35.0)),
            restaurant("Delhi", "C", Some(600.0), Some(4.2), "Italian", Some(40.0)),
            restaurant("Pune", "D", None, Some(2.5), "Snacks", Some(32.0)),
            restaurant("Goa", "E", Some(300.0), None, "Seafood,Chinese", Some(120.0)),
            restaurant("Delhi", "F", Some(100.0), Some(3.0), "Snacks", Some(38.0)),
        ]
    }

    #[test]
    fn test_easy_answers() {
        let easy = easy(&sample());
        assert_eq!(easy.restaurant_count, 6);
        assert_eq!(easy.max_price, Some(600.0));
        assert!((easy.avg_rating.expect("ratings present") - 3.54).abs() < 1e-12);
        assert_eq!(easy.total_ratings, 600.0);
        // Biryani, Chinese, Italian, Snacks, Seafood
        assert_eq!(easy.unique_food_types, 5);
    }

    #[test]
    fn test_medium_answers() {
        let medium = medium(&sample());
        assert_eq!(medium.top_cities[0].city, "Pune");
        assert_eq!(medium.top_cities[0].restaurants, 3);
        assert_eq!(medium.top_cities[1].city, "Delhi");

        assert_eq!(medium.top_food_types_by_price[0].food_type, "Italian");
        let chinese = medium
            .top_food_types_by_price
            .iter()
            .find(|f| f.food_type == "Chinese")
            .expect("Chinese is priced");
        assert_eq!(chinese.avg_price, 300.0);

        // Ratings above 4: A (30) and C (40).
        assert_eq!(medium.avg_delivery_time_high_rated, Some(35.0));
        assert_eq!(medium.top_rated[0].name, "A");
        assert_eq!(medium.top_rated.len(), 5);
    }

    #[test]
    fn test_hard_answers() {
        let hard = hard(&sample()).expect("valid data");
        assert!(hard.price_rating_correlation.is_some());

        let outliers = hard.delivery_outliers.expect("delivery times present");
        assert_eq!(outliers.count, 1);
        assert_eq!(outliers.max, 120.0);

        let bands: Vec<(&str, usize)> = hard
            .price_by_rating
            .iter()
            .map(|b| (b.category.as_str(), b.count))
            .collect();
        // F (3.0) is in the first band; D has no price; E has no rating.
        assert_eq!(bands, vec![("Below 3", 1), ("3-4", 1), ("Above 4", 2)]);
        assert_eq!(hard.price_by_rating[2].mean, Some(400.0));
        assert_eq!(hard.price_by_rating[0].std, None);

        assert_eq!(hard.city_stats[0].city, "Pune");
        assert_eq!(hard.city_stats[0].avg_price, Some(300.0));
        assert_eq!(hard.city_stats[2].city, "Goa");
        assert_eq!(hard.city_stats[2].avg_rating, None);
    }

    #[test]
    fn test_report_serializes() {
        let report = analyze(&sample()).expect("valid data");
        let json = serde_json::to_value(&report).expect("serializable");
        assert_eq!(json["easy"]["restaurant_count"], 6);
        assert!(analyze(&[]).is_err());
    }
}

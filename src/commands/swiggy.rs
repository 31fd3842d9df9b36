use crate::charts::{self, Axes, Marker, ScatterGroup};
use crate::commands::AppContext;
use crate::output::{self, new_table, opt, section};
use analyzer::swiggy::{self, SwiggyReport};
use anyhow::{Context, Result};
use clap::Parser;
use core_types::Restaurant;
use datasets::SWIGGY_FILE;
use std::path::{Path, PathBuf};

#[derive(Parser)]
pub struct SwiggyArgs {
    /// Directory containing swiggy.csv [default: `data.directory`].
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

pub fn handle_swiggy(args: SwiggyArgs, ctx: &AppContext) -> Result<()> {
    let repository = ctx.repository(args.data_dir.as_deref());
    let restaurants = repository.load_restaurants().with_context(|| {
        format!(
            "Failed to load restaurants from {}",
            repository.resolve(SWIGGY_FILE).display()
        )
    })?;

    let report = swiggy::analyze(&restaurants)?;
    if ctx.is_json() {
        output::print_json(&report)?;
    } else {
        print_report(&report);
    }

    if let Some(dir) = &ctx.charts_dir {
        write_charts(dir, &report, &restaurants)?;
    }
    Ok(())
}

fn print_report(report: &SwiggyReport) {
    let easy = &report.easy;
    section("Easy Questions");
    println!("1. Total restaurants: {}", easy.restaurant_count);
    println!("2. Highest price: {}", opt(easy.max_price, 2));
    println!("3. Average rating: {}", opt(easy.avg_rating, 2));
    println!("4. Total ratings across restaurants: {:.0}", easy.total_ratings);
    println!("5. Unique food types: {}", easy.unique_food_types);

    let medium = &report.medium;
    section("Medium Questions");
    println!("1. Top 3 cities by restaurant count:");
    let mut cities = new_table(&["City", "Restaurants"]);
    for c in &medium.top_cities {
        cities.add_row(vec![c.city.clone(), c.restaurants.to_string()]);
    }
    println!("{cities}");

    println!("2. Top 10 food types by average price:");
    let mut food = new_table(&["Food type", "Avg price"]);
    for f in &medium.top_food_types_by_price {
        food.add_row(vec![f.food_type.clone(), format!("{:.2}", f.avg_price)]);
    }
    println!("{food}");

    println!(
        "3. Average delivery time for ratings above 4: {} minutes",
        opt(medium.avg_delivery_time_high_rated, 2)
    );

    println!("4. Top 5 restaurants by rating:");
    let mut top = new_table(&["Restaurant", "City", "Rating", "Food type"]);
    for r in &medium.top_rated {
        top.add_row(vec![
            r.name.clone(),
            r.city.clone(),
            format!("{:.1}", r.rating),
            r.food_type.clone().unwrap_or_default(),
        ]);
    }
    println!("{top}");

    let hard = &report.hard;
    section("Hard Questions");
    match &hard.price_rating_correlation {
        Some(c) => println!(
            "1. Price vs rating: r = {:.4} (p = {:.4}, n = {}), a {} {} correlation",
            c.r, c.p_value, c.n, c.strength, c.direction
        ),
        None => println!("1. Price vs rating: not enough data for a correlation"),
    }

    match &hard.delivery_outliers {
        Some(o) => println!(
            "2. Delivery time outliers: {} outside [{:.1}, {:.1}] (observed range {:.0} to {:.0} minutes)",
            o.count, o.lower_bound, o.upper_bound, o.min, o.max
        ),
        None => println!("2. Delivery time outliers: no delivery times recorded"),
    }

    println!("3. Price by rating category:");
    let mut bands = new_table(&["Rating", "Count", "Mean", "Median", "Std"]);
    for b in &hard.price_by_rating {
        bands.add_row(vec![
            b.category.clone(),
            b.count.to_string(),
            opt(b.mean, 2),
            opt(b.median, 2),
            opt(b.std, 2),
        ]);
    }
    println!("{bands}");

    println!("4. Top 10 cities with average price and rating:");
    let mut stats = new_table(&["City", "Restaurants", "Avg price", "Avg rating"]);
    for c in &hard.city_stats {
        stats.add_row(vec![
            c.city.clone(),
            c.restaurant_count.to_string(),
            opt(c.avg_price, 2),
            opt(c.avg_rating, 2),
        ]);
    }
    println!("{stats}");
}

fn write_charts(dir: &Path, report: &SwiggyReport, restaurants: &[Restaurant]) -> Result<()> {
    let bars: Vec<(String, f64)> = report
        .medium
        .top_food_types_by_price
        .iter()
        .map(|f| (f.food_type.clone(), f.avg_price))
        .collect();
    let svg = charts::bar_chart(
        &Axes {
            title: "Top 10 Food Types by Average Price",
            x_label: "Food type",
            y_label: "Average price",
        },
        &bars,
    );
    charts::write_svg(dir, "swiggy_price_by_food_type.svg", &svg)?;

    let cities: Vec<(String, f64)> = report
        .hard
        .city_stats
        .iter()
        .map(|c| (c.city.clone(), c.restaurant_count as f64))
        .collect();
    let svg = charts::bar_chart(
        &Axes {
            title: "Restaurants per City",
            x_label: "City",
            y_label: "Restaurants",
        },
        &cities,
    );
    charts::write_svg(dir, "swiggy_city_counts.svg", &svg)?;

    let points = restaurants
        .iter()
        .filter_map(|r| r.price.zip(r.avg_rating))
        .collect();
    let svg = charts::scatter_chart(
        &Axes {
            title: "Price vs Rating",
            x_label: "Price",
            y_label: "Average rating",
        },
        &[ScatterGroup {
            label: "Restaurants".to_string(),
            points,
            marker: Marker::Dot,
        }],
    );
    charts::write_svg(dir, "swiggy_price_vs_rating.svg", &svg)?;
    Ok(())
}

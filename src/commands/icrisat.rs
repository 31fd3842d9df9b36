use crate::charts::{self, Axes};
use crate::commands::AppContext;
use crate::output::{self, new_table, opt, section};
use analyzer::icrisat::{self, IcrisatReport, StateValue};
use anyhow::{Context, Result};
use clap::Parser;
use datasets::ICRISAT_FILE;
use std::path::{Path, PathBuf};

#[derive(Parser)]
pub struct IcrisatArgs {
    /// Directory containing the ICRISAT district CSV [default: `data.directory`].
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

pub fn handle_icrisat(args: IcrisatArgs, ctx: &AppContext) -> Result<()> {
    let repository = ctx.repository(args.data_dir.as_deref());
    let table = repository.load_table(ICRISAT_FILE).with_context(|| {
        format!(
            "Failed to load district data from {}",
            repository.resolve(ICRISAT_FILE).display()
        )
    })?;

    let report = icrisat::analyze(&table)?;
    if ctx.is_json() {
        output::print_json(&report)?;
    } else {
        print_report(&report);
    }

    if let Some(dir) = &ctx.charts_dir {
        write_charts(dir, &report)?;
    }
    Ok(())
}

fn state(value: Option<&StateValue>) -> String {
    value.map_or_else(|| "n/a".to_string(), |s| format!("{} ({:.2})", s.state, s.value))
}

fn print_report(report: &IcrisatReport) {
    let o = &report.overview;
    section("Dataset Overview");
    println!("Rows: {}, columns: {}, missing cells: {}", o.rows, o.columns, o.missing_values);
    match (o.first_year, o.last_year) {
        (Some(first), Some(last)) => println!("Years covered: {first} to {last}"),
        _ => println!("Years covered: n/a"),
    }
    println!("States: {}, districts: {}", o.states, o.districts);

    section("Easy Questions");
    let a = &report.area_totals;
    println!("1. Total rice area: {:.2} (1000 ha)", a.rice);
    println!("2. Total wheat area: {:.2} (1000 ha)", a.wheat);
    println!("3. Total maize area: {:.2} (1000 ha)", a.maize);
    match &report.peak_rice_year {
        Some(p) => println!("4. Peak rice production: {} ({:.2} thousand tons)", p.year, p.value),
        None => println!("4. Peak rice production: n/a"),
    }

    section("Medium Questions");
    println!("1. Highest wheat-producing state: {}", state(report.top_wheat_state.as_ref()));
    println!("2. Lowest wheat-producing state: {}", state(report.bottom_wheat_state.as_ref()));
    match &report.sorghum_yield {
        Some(s) => println!(
            "3. Sorghum yield (Kg per ha): mean {:.2}, median {:.2}, std {}",
            s.mean,
            s.median,
            opt(s.std, 2)
        ),
        None => println!("3. Sorghum yield: no reported values"),
    }
    println!("4. Total vegetable area: {:.2} (1000 ha)", report.vegetable_area_total);
    println!("   Largest vegetable area: {}", state(report.top_vegetable_state.as_ref()));

    section("Hard Questions");
    match &report.chickpea_area_production {
        Some(c) => println!(
            "1. Chickpea area vs production: r = {:.4} (p = {:.4}, n = {}), a {} {} correlation",
            c.r, c.p_value, c.n, c.strength, c.direction
        ),
        None => println!("1. Chickpea area vs production: not enough data for a correlation"),
    }

    println!("2. Crop diversity by state:");
    let mut diversity = new_table(&["State", "Crops grown"]);
    for d in &report.crop_diversity {
        diversity.add_row(vec![d.state.clone(), d.crops.to_string()]);
    }
    println!("{diversity}");

    println!("3. Pulse yield trends:");
    let mut pulses = new_table(&["Crop", "First year", "Yield", "Last year", "Yield", "Change %"]);
    for t in &report.pulse_trends {
        pulses.add_row(vec![
            t.crop.clone(),
            t.first_year.to_string(),
            format!("{:.1}", t.first_yield),
            t.last_year.to_string(),
            format!("{:.1}", t.last_yield),
            format!("{:+.1}", t.change_pct),
        ]);
    }
    println!("{pulses}");

    println!("4. Sorghum by season:");
    for season in &report.sorghum_seasons {
        println!(
            "{} sorghum: {} districts with planted area",
            season.season, season.districts_with_area
        );
        let mut top = new_table(&["District", "State", "Area (1000 ha)"]);
        for d in &season.top_districts {
            top.add_row(vec![d.district.clone(), d.state.clone(), format!("{:.2}", d.value)]);
        }
        println!("{top}");
    }
}

fn write_charts(dir: &Path, report: &IcrisatReport) -> Result<()> {
    let rice: Vec<(f64, f64)> = report
        .rice_by_year
        .iter()
        .map(|p| (f64::from(p.year), p.value))
        .collect();
    let svg = charts::line_chart(
        &Axes {
            title: "Rice Production by Year",
            x_label: "Year",
            y_label: "Production (1000 tons)",
        },
        &rice,
    );
    charts::write_svg(dir, "icrisat_rice_by_year.svg", &svg)?;

    let diversity: Vec<(String, f64)> = report
        .crop_diversity
        .iter()
        .map(|d| (d.state.clone(), d.crops as f64))
        .collect();
    let svg = charts::bar_chart(
        &Axes {
            title: "Crop Diversity by State",
            x_label: "State",
            y_label: "Crops grown",
        },
        &diversity,
    );
    charts::write_svg(dir, "icrisat_crop_diversity.svg", &svg)?;
    Ok(())
}

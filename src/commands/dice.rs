use crate::charts::{self, Axes};
use crate::commands::{progress_bar, AppContext};
use crate::output::{self, new_table, section, thousands};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use futures::future::join_all;
use serde::Serialize;
use simulation::{
    convergence_point, theoretical_outcomes, ConvergencePoint, DiceSimulation, OutcomeProbabilities,
    RollCounts, SumDistribution,
};

#[derive(Parser)]
pub struct DiceArgs {
    /// Number of rolls [default: `dice.trials` from the configuration].
    #[arg(long)]
    pub trials: Option<u64>,

    /// Seed for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also show the observed frequency of every sum from 2 to 12.
    #[arg(long)]
    pub detailed: bool,

    /// Also estimate P(sum = 7) at each of `dice.convergence_trials`.
    #[arg(long)]
    pub convergence: bool,
}

#[derive(Debug, Serialize)]
struct DiceReport {
    generated_at: DateTime<Utc>,
    trials: u64,
    seed: Option<u64>,
    counts: RollCounts,
    estimated: OutcomeProbabilities,
    theoretical: OutcomeProbabilities,
    distribution: Option<SumDistribution>,
    convergence: Option<Vec<ConvergencePoint>>,
}

pub async fn handle_dice(args: DiceArgs, ctx: &AppContext) -> Result<()> {
    let trials = args.trials.unwrap_or(ctx.config.dice.trials);
    let seed = args.seed.or(ctx.config.dice.seed);
    tracing::info!(trials, ?seed, "Starting dice simulation");

    let mut simulation = DiceSimulation::new(seed);
    let counts = simulation.simulate(trials)?;
    let distribution = if args.detailed || ctx.charts_dir.is_some() {
        Some(simulation.distribution(trials)?)
    } else {
        None
    };
    let convergence = if args.convergence {
        Some(run_convergence(&ctx.config.dice.convergence_trials, seed, ctx.is_json()).await?)
    } else {
        None
    };

    let report = DiceReport {
        generated_at: Utc::now(),
        trials,
        seed,
        estimated: counts.probabilities(),
        theoretical: theoretical_outcomes(),
        counts,
        distribution,
        convergence,
    };

    if ctx.is_json() {
        output::print_json(&report)?;
    } else {
        print_report(&report, args.detailed);
    }

    if let Some(dir) = &ctx.charts_dir {
        write_charts(dir, &report)?;
    }
    Ok(())
}

/// Runs every trial count as its own blocking task.
async fn run_convergence(
    trial_counts: &[u64],
    seed: Option<u64>,
    hidden: bool,
) -> Result<Vec<ConvergencePoint>> {
    let progress_bar = progress_bar(trial_counts.len() as u64, hidden)?;

    let tasks: Vec<_> = trial_counts
        .iter()
        .map(|&trials| {
            let pb_clone = progress_bar.clone();
            tokio::task::spawn_blocking(move || {
                pb_clone.set_message(format!("Rolling {} times...", thousands(trials)));
                let point = convergence_point(trials, seed);
                pb_clone.inc(1);
                point
            })
        })
        .collect();

    let results = join_all(tasks).await;
    progress_bar.finish_with_message("Convergence study complete!");

    let mut points = Vec::with_capacity(results.len());
    for result in results {
        points.push(result.context("Convergence task failed to complete")??);
    }
    Ok(points)
}

fn print_report(report: &DiceReport, detailed: bool) {
    let rule = "=".repeat(40);
    println!("Simulating Rolling Two Dice {} Times", thousands(report.trials));

    println!("\nDice Rolling Simulation Results:");
    println!("{rule}");
    println!("P(Sum = 7): {:.4}", report.estimated.p_sum_7);
    println!("P(Sum = 2): {:.4}", report.estimated.p_sum_2);
    println!("P(Sum > 10): {:.4}", report.estimated.p_sum_greater_10);

    println!("\nTheoretical Probabilities (for comparison):");
    println!("{rule}");
    println!("P(Sum = 7): {:.4} (6/36)", report.theoretical.p_sum_7);
    println!("P(Sum = 2): {:.4} (1/36)", report.theoretical.p_sum_2);
    println!("P(Sum > 10): {:.4} (3/36)", report.theoretical.p_sum_greater_10);

    if detailed {
        if let Some(distribution) = &report.distribution {
            section(&format!("Detailed Analysis ({} simulations)", thousands(distribution.trials())));
            let mut table = new_table(&["Sum", "Count", "Probability", "Theoretical"]);
            for (sum, count, frequency, theoretical) in distribution.rows() {
                table.add_row(vec![
                    sum.to_string(),
                    thousands(count),
                    format!("{frequency:.4}"),
                    format!("{theoretical:.4}"),
                ]);
            }
            println!("{table}");
        }
    }

    if let Some(points) = &report.convergence {
        section("Convergence of P(Sum = 7)");
        let mut table = new_table(&["Trials", "Estimate", "Theoretical", "Abs. error"]);
        for point in points {
            table.add_row(vec![
                thousands(point.trials),
                format!("{:.4}", point.estimate),
                format!("{:.4}", report.theoretical.p_sum_7),
                format!("{:.4}", point.abs_error),
            ]);
        }
        println!("{table}");
    }

    println!("\nSimulation Details:");
    println!("{}", "=".repeat(20));
    println!("Total rolls: {}", thousands(report.counts.trials));
    println!("Sum = 7 occurred: {} times", thousands(report.counts.sum_7));
    println!("Sum = 2 occurred: {} times", thousands(report.counts.sum_2));
    println!("Sum > 10 occurred: {} times", thousands(report.counts.sum_greater_10));
}

fn write_charts(dir: &std::path::Path, report: &DiceReport) -> Result<()> {
    if let Some(distribution) = &report.distribution {
        let bars: Vec<(String, f64)> = distribution
            .rows()
            .map(|(sum, _, frequency, _)| (sum.to_string(), frequency))
            .collect();
        let svg = charts::bar_chart(
            &Axes {
                title: "Distribution of Two-Dice Sums",
                x_label: "Sum",
                y_label: "Observed frequency",
            },
            &bars,
        );
        charts::write_svg(dir, "dice_distribution.svg", &svg)?;
    }

    if let Some(points) = &report.convergence {
        let line: Vec<(f64, f64)> = points
            .iter()
            .map(|p| ((p.trials as f64).log10(), p.estimate))
            .collect();
        let svg = charts::line_chart(
            &Axes {
                title: "Convergence of P(Sum = 7)",
                x_label: "log10(trials)",
                y_label: "Estimated probability",
            },
            &line,
        );
        charts::write_svg(dir, "dice_convergence.svg", &svg)?;
    }
    Ok(())
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::cluster::ClusterArgs;
use commands::dice::DiceArgs;
use commands::icrisat::IcrisatArgs;
use commands::neuron::NeuronArgs;
use commands::spam::SpamArgs;
use commands::swiggy::SwiggyArgs;
use commands::AppContext;
use configuration::{init_logging, load_config, load_config_from, OutputFormat};
use std::path::PathBuf;

mod charts;
mod commands;
mod output;
mod prompt;

/// The main entry point for the mlcourse application.
#[tokio::main]
async fn main() -> Result<()> {
    // Load MLCOURSE__* overrides from a .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => load_config().context("Failed to load configuration")?,
    };

    // Keep the guard alive so the log file is flushed on exit
    let _log_guard = init_logging(&config.logging).context("Failed to initialise logging")?;

    let ctx = AppContext {
        format: cli.format.unwrap_or(config.output.format),
        charts_dir: cli.charts.or_else(|| config.output.charts_dir.clone()),
        config,
    };

    // Execute the appropriate command
    match cli.command {
        Commands::Spam(args) => commands::spam::handle_spam(args, &ctx),
        Commands::Dice(args) => commands::dice::handle_dice(args, &ctx).await,
        Commands::Neuron(args) => commands::neuron::handle_neuron(args, &ctx),
        Commands::Demo => commands::demo::handle_demo(),
        Commands::Cluster(args) => commands::cluster::handle_cluster(args, &ctx).await,
        Commands::Swiggy(args) => commands::swiggy::handle_swiggy(args, &ctx),
        Commands::Icrisat(args) => commands::icrisat::handle_icrisat(args, &ctx),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Statistics and machine-learning exercises: probability demos, a dice
/// simulation, a sigmoid neuron and exploratory analyses of three datasets.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file [default: ./config.toml when present].
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format [default: `output.format` from the configuration].
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Write SVG charts into this directory.
    #[arg(long, global = true)]
    charts: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// P(Spam | email contains "free") by Bayes' theorem.
    Spam(SpamArgs),
    /// Monte Carlo estimate of two-dice sum probabilities.
    Dice(DiceArgs),
    /// Output of a two-input sigmoid neuron.
    Neuron(NeuronArgs),
    /// Walk through the vector, matrix and probability helpers.
    Demo,
    /// K-means segmentation of the mall customers.
    Cluster(ClusterArgs),
    /// Exploratory analysis of the Swiggy restaurant listings.
    Swiggy(SwiggyArgs),
    /// Exploratory analysis of the ICRISAT district-level agriculture data.
    Icrisat(IcrisatArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["mlcourse", "dice", "--trials", "500", "--format", "json"])
            .expect("valid arguments");
        assert_eq!(cli.format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Dice(args) => assert_eq!(args.trials, Some(500)),
            _ => panic!("expected the dice command"),
        }
    }

    #[test]
    fn test_spam_flags_must_come_together() {
        assert!(Cli::try_parse_from(["mlcourse", "spam", "--total", "10"]).is_err());
        assert!(Cli::try_parse_from(["mlcourse", "spam", "--example", "--total", "10"]).is_err());
        assert!(Cli::try_parse_from([
            "mlcourse", "spam", "--total", "10", "--free", "2", "--spam", "3", "--both", "1"
        ])
        .is_ok());
    }

    #[test]
    fn test_neuron_accepts_negative_pairs() {
        let cli = Cli::try_parse_from([
            "mlcourse", "neuron", "--inputs", "0.5,-0.8", "--weights", "0.4,0.7", "--bias", "-0.1",
        ])
        .expect("valid arguments");
        match cli.command {
            Commands::Neuron(args) => {
                assert_eq!(args.inputs, Some(vec![0.5, -0.8]));
                assert_eq!(args.bias, Some(-0.1));
            }
            _ => panic!("expected the neuron command"),
        }
    }
}

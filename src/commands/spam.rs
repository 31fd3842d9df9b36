use crate::commands::AppContext;
use crate::output;
use crate::prompt::{prompt_value, read_line};
use anyhow::Result;
use clap::Parser;
use spam::{EmailStats, SpamReport};
use std::io::{self, BufRead, Write};

const NOT_A_COUNT: &str = "Error: Please enter a valid non-negative integer.";

#[derive(Parser)]
pub struct SpamArgs {
    /// Run the default example (1000 emails, 300 with 'free', 400 spam, 120 both).
    #[arg(long, conflicts_with_all = ["total", "free", "spam", "both"])]
    pub example: bool,

    /// Total number of emails.
    #[arg(long, requires_all = ["free", "spam", "both"])]
    pub total: Option<u64>,

    /// Number of emails containing 'free'.
    #[arg(long, requires = "total")]
    pub free: Option<u64>,

    /// Number of spam emails.
    #[arg(long, requires = "total")]
    pub spam: Option<u64>,

    /// Number of emails that are both spam and contain 'free'.
    #[arg(long, requires = "total")]
    pub both: Option<u64>,
}

/// Computes one case from flags, or opens the interactive menu when none are given.
pub fn handle_spam(args: SpamArgs, ctx: &AppContext) -> Result<()> {
    if args.example {
        return print_report(ctx, EmailStats::default_example());
    }
    if let (Some(total), Some(free), Some(spam), Some(both)) = (args.total, args.free, args.spam, args.both) {
        return print_report(ctx, EmailStats::new(total, free, spam, both));
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    run_menu(&mut input, &mut out)
}

fn print_report(ctx: &AppContext, stats: EmailStats) -> Result<()> {
    let report = SpamReport::new(stats)?;
    tracing::info!(p_spam_given_free = report.probabilities.p_spam_given_free, "Spam probability calculated");
    if ctx.is_json() {
        output::print_json(&report)
    } else {
        println!("{report}");
        Ok(())
    }
}

/// The menu loop. End of input behaves like choosing "Exit".
pub fn run_menu<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<()> {
    writeln!(output, "Email Spam Probability Calculator using Bayes' Theorem")?;
    writeln!(output, "{}", "=".repeat(55))?;

    loop {
        writeln!(output, "\nChoose an option:")?;
        writeln!(output, "1. Use default example (1000 emails, 300 with 'free', 400 spam, 120 both)")?;
        writeln!(output, "2. Enter custom values")?;
        writeln!(output, "3. Exit")?;

        let Some(choice) = read_line(input, output, "\nEnter your choice (1-3): ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => {
                writeln!(output, "Running with default example from problem statement:")?;
                writeln!(output, "{}", SpamReport::new(EmailStats::default_example())?)?;
            }
            "2" => {
                let stats = read_stats(input, output)?;
                writeln!(output, "{}", SpamReport::new(stats)?)?;
            }
            "3" => {
                writeln!(output, "Thank you for using the spam probability calculator!")?;
                return Ok(());
            }
            _ => writeln!(output, "Invalid choice. Please enter 1, 2, or 3.")?,
        }
    }
}

/// Prompts for the four counts until they satisfy every constraint.
pub fn read_stats<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<EmailStats> {
    loop {
        writeln!(output, "Enter email dataset statistics:")?;
        writeln!(output, "{}", "-".repeat(35))?;

        let total = prompt_value(input, output, "Total emails: ", NOT_A_COUNT)?;
        let free = prompt_value(input, output, "Emails containing 'free': ", NOT_A_COUNT)?;
        let spam = prompt_value(input, output, "Spam emails: ", NOT_A_COUNT)?;
        let both = prompt_value(
            input,
            output,
            "Emails that are both spam and contain 'free': ",
            NOT_A_COUNT,
        )?;

        let stats = EmailStats::new(total, free, spam, both);
        match stats.validate() {
            Ok(()) => return Ok(stats),
            Err(e) => writeln!(
                output,
                "Error: {e}\n\nPlease enter valid values that satisfy all constraints.\n"
            )?,
        }
    }
}

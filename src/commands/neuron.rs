use crate::commands::AppContext;
use crate::output;
use crate::prompt::{prompt_pair, prompt_value};
use anyhow::{bail, Result};
use clap::Parser;
use neuron::Neuron;
use serde::Serialize;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
pub struct NeuronArgs {
    /// The two inputs, e.g. `--inputs 0.5,0.8`.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub inputs: Option<Vec<f64>>,

    /// The two weights, e.g. `--weights 0.4,0.7`.
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub weights: Option<Vec<f64>>,

    #[arg(long, allow_negative_numbers = true)]
    pub bias: Option<f64>,
}

#[derive(Debug, Serialize)]
struct NeuronOutput {
    inputs: [f64; 2],
    weights: [f64; 2],
    bias: f64,
    z: f64,
    output: f64,
}

/// Values missing from the command line are prompted for.
pub fn handle_neuron(args: NeuronArgs, ctx: &AppContext) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    if args.inputs.is_none() || args.weights.is_none() || args.bias.is_none() {
        writeln!(out, "Enter the input values and parameters for the neuron:")?;
    }
    let (x1, x2) = pair_or_prompt(args.inputs, &mut input, &mut out, "Enter x1, x2: ")?;
    let (w1, w2) = pair_or_prompt(args.weights, &mut input, &mut out, "Enter w1, w2: ")?;
    let bias = match args.bias {
        Some(bias) => bias,
        None => prompt_value(
            &mut input,
            &mut out,
            "Enter bias: ",
            "Error: Please enter a valid numerical value.",
        )?,
    };

    let trace = Neuron::new(vec![w1, w2], bias)?.activate(&[x1, x2])?;
    tracing::info!(z = trace.z, output = trace.output, "Neuron activated");

    if ctx.is_json() {
        return output::print_json(&NeuronOutput {
            inputs: [x1, x2],
            weights: [w1, w2],
            bias,
            z: trace.z,
            output: trace.output,
        });
    }

    println!("\nNeuron output: {:.3}", trace.output);
    println!(
        "Intermediate calculation: z = {x1}*{w1} + {x2}*{w2} + {bias} = {:.3}",
        trace.z
    );
    println!("Sigmoid(z) = 1 / (1 + e^-{:.3}) = {:.3}", trace.z, trace.output);
    Ok(())
}

fn pair_or_prompt<R: BufRead, W: Write>(
    given: Option<Vec<f64>>,
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<(f64, f64)> {
    match given.as_deref() {
        Some(&[a, b]) => Ok((a, b)),
        Some(other) => bail!("expected exactly two values, got {}", other.len()),
        None => prompt_pair(input, output, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_pair_or_prompt_prefers_flags() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        let pair = pair_or_prompt(Some(vec![0.5, -0.8]), &mut input, &mut out, "Enter x1, x2: ")
            .expect("flag values");
        assert_eq!(pair, (0.5, -0.8));
        assert!(out.is_empty());
    }

    #[test]
    fn test_pair_or_prompt_reads_stdin() {
        let mut input = Cursor::new("x y\n0.5 0.8\n");
        let mut out = Vec::new();
        let pair = pair_or_prompt(None, &mut input, &mut out, "Enter x1, x2: ").expect("second line");
        assert_eq!(pair, (0.5, 0.8));
    }

    #[test]
    fn test_pair_or_prompt_rejects_wrong_arity() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        assert!(pair_or_prompt(Some(vec![1.0]), &mut input, &mut out, "").is_err());
    }
}

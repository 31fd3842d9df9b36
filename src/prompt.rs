//! Line-oriented prompts that ask again until the answer parses.
//!
//! Every helper is generic over the reader and writer so the loops can be
//! driven from a byte buffer in tests.

use anyhow::{anyhow, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Prints `message` and reads one trimmed line; `None` at end of input.
pub fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<Option<String>> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn required_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    read_line(input, output, message)?.ok_or_else(|| anyhow!("input ended while waiting for a value"))
}

/// Re-prompts with `error` until the line parses as `T`.
pub fn prompt_value<T, R, W>(input: &mut R, output: &mut W, message: &str, error: &str) -> Result<T>
where
    T: FromStr,
    R: BufRead,
    W: Write,
{
    loop {
        match required_line(input, output, message)?.parse() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(output, "{error}")?,
        }
    }
}

/// Two numbers separated by whitespace and/or a comma.
pub fn parse_pair(line: &str) -> Option<(f64, f64)> {
    let values: Vec<f64> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match values[..] {
        [a, b] if a.is_finite() && b.is_finite() => Some((a, b)),
        _ => None,
    }
}

pub fn prompt_pair<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<(f64, f64)> {
    loop {
        match parse_pair(&required_line(input, output, message)?) {
            Some(pair) => return Ok(pair),
            None => writeln!(output, "Error: Please enter two numbers, e.g. 0.5 0.8")?,
        }
    }
}

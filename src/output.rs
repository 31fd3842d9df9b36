//! Shared presentation helpers for the command handlers.

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

pub use spam::thousands;

/// A table with the house style and the given header row.
pub fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

pub fn section(title: &str) {
    println!("\n=== {title} ===");
}

/// Pretty-printed JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// A value to `decimals` places, or `n/a` when it could not be computed.
pub fn opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.decimals$}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opt_formats_missing_values() {
        assert_eq!(opt(Some(1.23456), 2), "1.23");
        assert_eq!(opt(None, 2), "n/a");
    }

    #[test]
    fn test_thousands_in_table_cells() {
        let mut table = new_table(&["Trials"]);
        table.add_row(vec![thousands(1_000_000)]);
        assert!(table.to_string().contains("1,000,000"));
    }

    #[test]
    fn test_new_table_renders_header() {
        let mut table = new_table(&["Sum", "Count"]);
        table.add_row(vec!["7", "1,667"]);
        let rendered = table.to_string();
        assert!(rendered.contains("Sum"));
        assert!(rendered.contains("1,667"));
    }
}

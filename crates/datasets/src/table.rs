use crate::error::DatasetError;
use std::io::Read;

/// A CSV file held as strings, addressed by header name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Reads a headed CSV. Short rows are padded with empty cells.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let width = headers.len();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().take(width).map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn column_index(&self, name: &str) -> Result<usize, DatasetError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DatasetError::MissingColumn {
                column: name.to_string(),
                available: self.headers.join(", "),
            })
    }

    pub fn str_column(&self, name: &str) -> Result<Vec<&str>, DatasetError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Parses a column as numbers. Empty, unparseable and non-finite cells are `None`.
    pub fn f64_column(&self, name: &str) -> Result<Vec<Option<f64>>, DatasetError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| parse_cell(&row[idx])).collect())
    }

    /// Per column, the number of cells that are empty or `NA`/`NaN`.
    pub fn missing_counts(&self) -> Vec<(String, usize)> {
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let missing = self.rows.iter().filter(|row| is_missing(&row[idx])).count();
                (header.clone(), missing)
            })
            .collect()
    }
}

fn is_missing(cell: &str) -> bool {
    matches!(cell, "" | "NA" | "NaN" | "nan" | "null")
}

fn parse_cell(cell: &str) -> Option<f64> {
    if is_missing(cell) {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Year,State Name,RICE AREA (1000 ha)\n\
                          1966,Assam, 12.5\n\
                          1967,Assam,\n\
                          1968,Bihar,abc\n\
                          1969,Bihar\n";

    #[test]
    fn test_shape_and_headers() {
        let table = Table::from_reader(SAMPLE.as_bytes()).expect("valid csv");
        assert_eq!(table.height(), 4);
        assert_eq!(table.width(), 3);
        assert_eq!(table.headers()[1], "State Name");
    }

    #[test]
    fn test_f64_column_marks_missing() {
        let table = Table::from_reader(SAMPLE.as_bytes()).expect("valid csv");
        let area = table.f64_column("RICE AREA (1000 ha)").expect("column exists");
        assert_eq!(area, vec![Some(12.5), None, None, None]);
        let years = table.f64_column("Year").expect("column exists");
        assert_eq!(years[3], Some(1969.0));
    }

    #[test]
    fn test_missing_column_lists_available() {
        let table = Table::from_reader(SAMPLE.as_bytes()).expect("valid csv");
        let err = table.column_index("Dist Name").expect_err("no such column");
        assert_eq!(
            err.to_string(),
            "Column 'Dist Name' not found. Available columns: Year, State Name, RICE AREA (1000 ha)"
        );
    }

    #[test]
    fn test_missing_counts() {
        let table = Table::from_reader(SAMPLE.as_bytes()).expect("valid csv");
        let counts = table.missing_counts();
        assert_eq!(counts[0], ("Year".to_string(), 0));
        assert_eq!(counts[2], ("RICE AREA (1000 ha)".to_string(), 2));
        assert_eq!(
            table.str_column("State Name").expect("column exists"),
            vec!["Assam", "Assam", "Bihar", "Bihar"]
        );
    }
}

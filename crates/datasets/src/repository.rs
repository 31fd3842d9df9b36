use crate::error::DatasetError;
use crate::table::Table;
use core_types::{MallCustomer, Restaurant};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const MALL_CUSTOMERS_FILE: &str = "Mall_Customers.csv";
pub const SWIGGY_FILE: &str = "swiggy.csv";
pub const ICRISAT_FILE: &str = "ICRISAT-District Level Data.csv";

/// Provides typed access to the dataset files under one data directory.
#[derive(Debug, Clone)]
pub struct DatasetRepository {
    root: PathBuf,
}

impl DatasetRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves `file` against the data directory. Absolute paths are returned as is.
    pub fn resolve(&self, file: impl AsRef<Path>) -> PathBuf {
        self.root.join(file)
    }

    fn open(&self, file: impl AsRef<Path>) -> Result<(PathBuf, File), DatasetError> {
        let path = self.resolve(file);
        let handle = File::open(&path).map_err(|source| DatasetError::Io {
            path: path.clone(),
            source,
        })?;
        Ok((path, handle))
    }

    /// Deserializes every row of `file` into `T`.
    pub fn load_records<T: DeserializeOwned>(&self, file: impl AsRef<Path>) -> Result<Vec<T>, DatasetError> {
        let (path, handle) = self.open(file)?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(handle);

        let records = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
        if records.is_empty() {
            return Err(DatasetError::Empty(path));
        }
        tracing::info!(path = %path.display(), rows = records.len(), "Loaded dataset");
        Ok(records)
    }

    pub fn load_mall_customers(&self) -> Result<Vec<MallCustomer>, DatasetError> {
        self.load_records(MALL_CUSTOMERS_FILE)
    }

    pub fn load_restaurants(&self) -> Result<Vec<Restaurant>, DatasetError> {
        self.load_records(SWIGGY_FILE)
    }

    pub fn load_table(&self, file: impl AsRef<Path>) -> Result<Table, DatasetError> {
        let (path, handle) = self.open(file)?;
        let table = Table::from_reader(handle)?;
        if table.height() == 0 {
            return Err(DatasetError::Empty(path));
        }
        tracing::info!(
            path = %path.display(),
            rows = table.height(),
            columns = table.width(),
            "Loaded table"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Gender;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_load_mall_customers() {
        let dir = tempdir().expect("temp dir");
        let mut file = File::create(dir.path().join(MALL_CUSTOMERS_FILE)).expect("create file");
        writeln!(file, "CustomerID,Gender,Age,Annual Income (k$),Spending Score (1-100)").expect("write");
        writeln!(file, "1,Male,19,15,39").expect("write");
        writeln!(file, "2,Female,21,15,81").expect("write");

        let repo = DatasetRepository::new(dir.path());
        let customers = repo.load_mall_customers().expect("valid dataset");
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[1].gender, Gender::Female);
        assert_eq!(customers[1].spending_score, 81.0);
    }

    #[test]
    fn test_load_restaurants_with_blanks() {
        let dir = tempdir().expect("temp dir");
        let mut file = File::create(dir.path().join(SWIGGY_FILE)).expect("create file");
        writeln!(
            file,
            "ID,Area,City,Restaurant,Price,Avg ratings,Total ratings,Food type,Address,Delivery time"
        )
        .expect("write");
        writeln!(file, "1,Area A,Pune,Cafe One,300,4.2,100,\"Chinese,Indian\",Street 1,40").expect("write");
        writeln!(file, "2,Area B,Delhi,Cafe Two,,3.1,20,Snacks,Street 2,").expect("write");

        let repo = DatasetRepository::new(dir.path());
        let restaurants = repo.load_restaurants().expect("valid dataset");
        assert_eq!(restaurants.len(), 2);
        assert_eq!(restaurants[1].price, None);
        assert_eq!(restaurants[1].delivery_time, None);
        assert_eq!(restaurants[0].food_types(), vec!["Chinese", "Indian"]);
    }

    #[test]
    fn test_load_restaurants_keeps_rows_with_unparseable_numbers() {
        let dir = tempdir().expect("temp dir");
        let mut file = File::create(dir.path().join(SWIGGY_FILE)).expect("create file");
        writeln!(
            file,
            "ID,Area,City,Restaurant,Price,Avg ratings,Total ratings,Food type,Address,Delivery time"
        )
        .expect("write");
        writeln!(file, "1,Area A,Pune,Cafe One,N/A,4.1,100,Snacks,Street 1,40").expect("write");
        writeln!(file, "2,Area B,Delhi,Cafe Two,250,3.1,20,Snacks,Street 2,35").expect("write");

        let repo = DatasetRepository::new(dir.path());
        let restaurants = repo.load_restaurants().expect("a bad cell does not reject the file");
        assert_eq!(restaurants.len(), 2);
        assert_eq!(restaurants[0].price, None);
        assert_eq!(restaurants[0].avg_rating, Some(4.1));
        assert_eq!(restaurants[1].price, Some(250.0));
    }

    #[test]
    fn test_load_table_from_absolute_path() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "a,b\n1,2\n3,").expect("write");

        let repo = DatasetRepository::new("/does/not/matter");
        let table = repo.load_table(file.path()).expect("valid table");
        assert_eq!(table.height(), 2);
        assert_eq!(table.f64_column("b").expect("column exists"), vec![Some(2.0), None]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().expect("temp dir");
        let repo = DatasetRepository::new(dir.path());
        let err = repo.load_mall_customers().expect_err("file absent");
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains(MALL_CUSTOMERS_FILE));
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "a,b").expect("write");
        let repo = DatasetRepository::new(".");
        assert!(matches!(repo.load_table(file.path()), Err(DatasetError::Empty(_))));
    }
}

//! # Datasets
//!
//! Loads the CSV datasets the analyses run on.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Adapter:** This crate encapsulates all file access. The analysis crates
//!   receive typed records or a `Table` and never touch the filesystem themselves.
//! - **Missing Values Are Data:** Blank or unparseable numeric cells become `None` rather
//!   than failing the whole load, mirroring how the datasets are explored.
//!
//! ## Public API
//!
//! - `DatasetRepository`: resolves dataset files against a data directory and loads them.
//! - `Table`: a header-addressed string table with typed column accessors.
//! - `DatasetError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod repository;
pub mod table;

// Re-export the key components to create a clean, public-facing API.
pub use error::DatasetError;
pub use repository::{DatasetRepository, ICRISAT_FILE, MALL_CUSTOMERS_FILE, SWIGGY_FILE};
pub use table::Table;

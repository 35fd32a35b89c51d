//! Dataset ingestion for statx exports.
//!
//! - **loader**: resolve a dataset name under the data root, read the parquet
//!   file and check the required columns
//! - **filter**: year filter, derived-code extraction and variable filter

pub mod error;
pub mod filter;
pub mod loader;

pub use error::{IngestError, Result};
pub use filter::{
    DERIVED_CODE_COLUMN, derive_code, extract_code, filter_by_variable, filter_by_year,
};
pub use loader::{
    Dataset, DatasetLoader, NAME_CODE_COLUMN, REQUIRED_COLUMNS, YEAR_COLUMN,
    missing_required_columns, validate_schema,
};

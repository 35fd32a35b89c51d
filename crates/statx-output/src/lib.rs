//! Workbook output for statx exports.
//!
//! - **workbook**: render sheets into an `.xlsx` workbook
//! - **commit**: stage-and-rename commit with rollback on failure
//! - **store**: artifact identifiers, canonical paths and retrieval

pub mod commit;
pub mod error;
pub mod store;
pub mod workbook;

pub use commit::{commit_workbook, discard, temp_path_for};
pub use error::{OutputError, Result};
pub use store::{ArtifactStore, XLSX_CONTENT_TYPE, download_filename};
pub use workbook::{WorkbookWriter, XlsxWriter};

//! Sheet construction for statx exports.
//!
//! - **builder**: export column policy and "no data" placeholder sheets
//! - **naming**: sheet name derivation and per-job uniqueness
//! - **sheet**: sheet types handed to the workbook writer

pub mod builder;
pub mod naming;
pub mod sheet;

pub use builder::{MEASURE_COLUMNS, build_sheet, export_columns, no_data_message};
pub use naming::{MAX_SHEET_NAME_LEN, SheetNameSet, base_sheet_name, next_unique};
pub use sheet::{SheetKind, SheetRows, SheetSpec};

//! Export job orchestration for statx.

pub mod pipeline;
pub mod summary;

pub use pipeline::{ExportOutcome, ExportPipeline};
pub use summary::{PreparedSheet, SheetSummary};

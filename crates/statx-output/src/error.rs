//! Output error types.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use rust_xlsxwriter::XlsxError;
use statx_model::ExportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// File system operation failed.
    #[error("failed to {operation} {}", path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The spreadsheet library rejected a sheet or could not save.
    #[error("failed to build workbook {}", path.display())]
    Workbook {
        path: PathBuf,
        #[source]
        source: XlsxError,
    },

    /// Reading a cell from a sheet frame failed.
    #[error("failed to read cell for sheet '{sheet}'")]
    Cell {
        sheet: String,
        #[source]
        source: PolarsError,
    },

    /// A sheet exceeds the spreadsheet row or column limits.
    #[error("sheet '{sheet}' is too large for a worksheet")]
    SheetTooLarge { sheet: String },

    #[error("refusing to write a workbook without sheets")]
    EmptyWorkbook,

    /// The finished temp file could not be moved onto the target path.
    #[error("failed to commit workbook to {}", target_path.display())]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact '{id}' not found")]
    ArtifactNotFound { id: String },
}

pub type Result<T> = std::result::Result<T, OutputError>;

impl OutputError {
    /// Target path the failed operation was writing, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } | Self::Workbook { path, .. } => Some(path),
            Self::AtomicWriteFailed { target_path, .. } => Some(target_path),
            Self::Cell { .. }
            | Self::SheetTooLarge { .. }
            | Self::EmptyWorkbook
            | Self::ArtifactNotFound { .. } => None,
        }
    }
}

/// Render an error with its source chain, e.g. `failed to build workbook x: sheet name invalid`.
fn with_sources(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl From<OutputError> for ExportError {
    fn from(error: OutputError) -> Self {
        match error {
            OutputError::ArtifactNotFound { id } => ExportError::artifact_not_found(id),
            other => ExportError::Write {
                path: other.path().cloned().unwrap_or_default(),
                message: with_sources(&other),
            },
        }
    }
}

use std::path::PathBuf;

use polars::prelude::PolarsError;
use statx_model::ExportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid dataset name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("dataset '{name}' not found at {}", path.display())]
    NotFound { name: String, path: PathBuf },

    #[error("failed to open dataset '{name}'")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset '{name}'")]
    Parse {
        name: String,
        #[source]
        source: PolarsError,
    },

    #[error("dataset '{name}' is missing required columns: {}", missing.join(", "))]
    MissingColumns { name: String, missing: Vec<String> },

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, IngestError>;

impl From<IngestError> for ExportError {
    fn from(error: IngestError) -> Self {
        match error {
            IngestError::InvalidName { name, reason } => {
                ExportError::InvalidRequest(format!("dataset name '{name}': {reason}"))
            }
            IngestError::NotFound { name, .. } => ExportError::dataset_not_found(name),
            IngestError::Io { name, source } => ExportError::Read {
                dataset: name,
                message: source.to_string(),
            },
            IngestError::Parse { name, source } => ExportError::Read {
                dataset: name,
                message: source.to_string(),
            },
            IngestError::MissingColumns { name, missing } => ExportError::Schema {
                dataset: name,
                missing,
            },
            IngestError::Polars(source) => ExportError::Processing(source.to_string()),
        }
    }
}

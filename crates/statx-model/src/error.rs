//! Job-level error taxonomy.
//!
//! Every failure of an export job is reported as an [`ExportError`]. Each
//! variant belongs to a [`FaultCategory`] that decides whether the caller or
//! the service is to blame, and carries an HTTP status for the web surface.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Who caused a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCategory {
    /// The request named something absent or malformed.
    Client,
    /// The service failed while processing a valid request.
    Server,
}

/// Kind of resource a [`ExportError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Dataset,
    Artifact,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dataset => f.write_str("dataset"),
            Self::Artifact => f.write_str("artifact"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    /// The request violates a structural invariant (empty option list, empty variables, ...).
    #[error("invalid export request: {0}")]
    InvalidRequest(String),

    #[error("{kind} '{name}' does not exist")]
    NotFound { kind: ResourceKind, name: String },

    /// The dataset lacks one or more required columns.
    #[error("dataset '{dataset}' is missing required columns: {}", missing.join(", "))]
    Schema {
        dataset: String,
        missing: Vec<String>,
    },

    /// The dataset file exists but could not be parsed.
    #[error("failed to read dataset '{dataset}': {message}")]
    Read { dataset: String, message: String },

    /// The workbook could not be produced at its target path.
    #[error("failed to write workbook {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    /// Every option was filtered away; the job produced no sheets at all.
    #[error("no data to export; check the requested years and variables")]
    NoData,

    /// Unexpected failure inside the pipeline.
    #[error("processing error: {0}")]
    Processing(String),
}

impl ExportError {
    pub fn dataset_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: ResourceKind::Dataset,
            name: name.into(),
        }
    }

    pub fn artifact_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: ResourceKind::Artifact,
            name: id.into(),
        }
    }

    pub fn category(&self) -> FaultCategory {
        match self {
            Self::InvalidRequest(_) | Self::NotFound { .. } | Self::Schema { .. } | Self::NoData => {
                FaultCategory::Client
            }
            Self::Read { .. } | Self::Write { .. } | Self::Processing(_) => FaultCategory::Server,
        }
    }

    /// HTTP status code reported for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) | Self::NoData => 400,
            Self::NotFound { .. } => 404,
            Self::Schema { .. } => 422,
            Self::Read { .. } | Self::Write { .. } | Self::Processing(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A committed workbook, addressable by its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub id: Uuid,
    pub path: PathBuf,
    /// Sheet names in workbook order.
    pub sheet_names: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ExportArtifact {
    pub fn new(id: Uuid, path: PathBuf, sheet_names: Vec<String>) -> Self {
        Self {
            id,
            path,
            sheet_names,
            created_at: Utc::now(),
        }
    }

    pub fn sheet_count(&self) -> usize {
        self.sheet_names.len()
    }
}

//! Artifact storage.
//!
//! Artifacts live flat under the temp root as `export_<uuid>.xlsx`. The
//! identifier is minted before the job writes anything so cleanup always
//! targets the exact path. Retrieval only checks presence, not content.

use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{OutputError, Result};

/// MIME type of an `.xlsx` workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const ARTIFACT_PREFIX: &str = "export_";
const ARTIFACT_EXTENSION: &str = "xlsx";

/// Maps artifact identifiers to workbook files under a temp root.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the temp root if it does not exist yet.
    pub fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|source| OutputError::Io {
            operation: "create directory",
            path: self.root.clone(),
            source,
        })
    }

    /// Canonical path of an artifact.
    pub fn path_for(&self, id: &Uuid) -> PathBuf {
        self.root
            .join(format!("{ARTIFACT_PREFIX}{id}.{ARTIFACT_EXTENSION}"))
    }

    /// Mint a fresh identifier and its target path.
    pub fn allocate(&self) -> (Uuid, PathBuf) {
        let id = Uuid::new_v4();
        let path = self.path_for(&id);
        (id, path)
    }

    /// Path of an existing artifact.
    ///
    /// Identifiers that are not UUIDs are treated as absent, which also keeps
    /// lookups inside the temp root.
    pub fn retrieve(&self, id: &str) -> Result<PathBuf> {
        let not_found = || OutputError::ArtifactNotFound { id: id.to_string() };
        let uuid = Uuid::parse_str(id).map_err(|_| not_found())?;
        let path = self.path_for(&uuid);
        if path.is_file() {
            Ok(path)
        } else {
            Err(not_found())
        }
    }
}

/// Display filename for a download, unrelated to the storage identifier.
pub fn download_filename() -> String {
    format!("report_{}.{ARTIFACT_EXTENSION}", Uuid::new_v4())
}

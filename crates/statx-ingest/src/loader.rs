//! Dataset loading.
//!
//! Datasets are parquet files stored under a configured data root. Each load
//! reads the whole file into a Polars [`DataFrame`] and checks that the
//! columns the export pipeline depends on are present.

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use polars::prelude::{DataFrame, ParquetReader, SerReader};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Column holding the reporting year.
pub const YEAR_COLUMN: &str = "VAR_YEAR";
/// Column holding the compound `<code>:<description>` variable field.
pub const NAME_CODE_COLUMN: &str = "VAR_NAME_CODE";
/// Columns every dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 2] = [YEAR_COLUMN, NAME_CODE_COLUMN];

/// A loaded dataset. Read-only and discarded after one export option.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub path: PathBuf,
    pub data: DataFrame,
}

impl Dataset {
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.data.height()
    }
}

/// Resolves dataset names against a data root and loads them.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    data_root: PathBuf,
}

impl DatasetLoader {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
        }
    }

    /// Map a dataset name to its path under the data root.
    ///
    /// Only relative paths made of plain names (and `.`) are accepted so a
    /// request can never reach outside the data root.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.trim().is_empty() {
            return Err(IngestError::InvalidName {
                name: name.to_string(),
                reason: "name is empty",
            });
        }
        let mut path = self.data_root.clone();
        for component in Path::new(name).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(IngestError::InvalidName {
                        name: name.to_string(),
                        reason: "must be a relative path inside the data directory",
                    });
                }
            }
        }
        Ok(path)
    }

    /// Load and validate a dataset.
    pub fn load(&self, name: &str) -> Result<Dataset> {
        let path = self.resolve(name)?;
        if !path.is_file() {
            return Err(IngestError::NotFound {
                name: name.to_string(),
                path,
            });
        }
        let file = File::open(&path).map_err(|source| IngestError::Io {
            name: name.to_string(),
            source,
        })?;
        let data = ParquetReader::new(file)
            .finish()
            .map_err(|source| IngestError::Parse {
                name: name.to_string(),
                source,
            })?;
        validate_schema(name, &data)?;
        debug!(
            dataset = name,
            rows = data.height(),
            columns = data.width(),
            "dataset loaded"
        );
        Ok(Dataset {
            name: name.to_string(),
            path,
            data,
        })
    }
}

/// Columns from [`REQUIRED_COLUMNS`] absent in `df`, in declaration order.
pub fn missing_required_columns(df: &DataFrame) -> Vec<String> {
    let present = df.get_column_names();
    REQUIRED_COLUMNS
        .iter()
        .filter(|required| !present.iter().any(|name| name.as_str() == **required))
        .map(|required| (*required).to_string())
        .collect()
}

pub fn validate_schema(name: &str, df: &DataFrame) -> Result<()> {
    let missing = missing_required_columns(df);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(IngestError::MissingColumns {
            name: name.to_string(),
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, NamedFrom, Series};

    #[test]
    fn resolve_rejects_escaping_names() {
        let loader = DatasetLoader::new("/srv/data");
        assert!(matches!(
            loader.resolve("../secrets.parquet"),
            Err(IngestError::InvalidName { .. })
        ));
        assert!(matches!(
            loader.resolve("/etc/passwd"),
            Err(IngestError::InvalidName { .. })
        ));
        assert!(matches!(
            loader.resolve(""),
            Err(IngestError::InvalidName { .. })
        ));
        assert!(matches!(
            loader.resolve("motor/../../A.parquet"),
            Err(IngestError::InvalidName { .. })
        ));
        assert_eq!(
            loader.resolve("motor/A.parquet").unwrap(),
            PathBuf::from("/srv/data/motor/A.parquet")
        );
    }

    #[test]
    fn resolve_accepts_current_dir_prefix() {
        let loader = DatasetLoader::new("/srv/data");
        assert_eq!(
            loader.resolve("./A.parquet").unwrap(),
            PathBuf::from("/srv/data/A.parquet")
        );
        assert_eq!(
            loader.resolve("motor/./A.parquet").unwrap(),
            PathBuf::from("/srv/data/motor/A.parquet")
        );
    }

    #[test]
    fn reports_every_missing_column() {
        let df = DataFrame::new(vec![Column::from(Series::new(
            "NUM_POLS".into(),
            vec![1i64, 2],
        ))])
        .unwrap();
        assert_eq!(
            missing_required_columns(&df),
            vec!["VAR_YEAR".to_string(), "VAR_NAME_CODE".to_string()]
        );

        let df = DataFrame::new(vec![Column::from(Series::new(
            "VAR_YEAR".into(),
            vec!["2020"],
        ))])
        .unwrap();
        assert_eq!(missing_required_columns(&df), vec!["VAR_NAME_CODE".to_string()]);
    }
}

//! Sheet types passed from the builder to the workbook writer.

use polars::prelude::DataFrame;

/// Whether a sheet carries data rows or a "no data" notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Data,
    Placeholder,
}

impl SheetKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Data => "data",
            Self::Placeholder => "no data",
        }
    }
}

/// Rows for one sheet, before it is named.
#[derive(Debug, Clone)]
pub struct SheetRows {
    pub kind: SheetKind,
    pub data: DataFrame,
}

/// A named sheet, owned by a single export job.
#[derive(Debug, Clone)]
pub struct SheetSpec {
    /// Unique within the job, at most 31 characters.
    pub name: String,
    pub kind: SheetKind,
    pub data: DataFrame,
}

impl SheetSpec {
    pub fn new(name: impl Into<String>, rows: SheetRows) -> Self {
        Self {
            name: name.into(),
            kind: rows.kind,
            data: rows.data,
        }
    }

    pub fn row_count(&self) -> usize {
        self.data.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }
}

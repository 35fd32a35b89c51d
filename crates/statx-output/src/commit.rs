//! All-or-nothing workbook commit.
//!
//! The workbook is written to a sibling temp file and renamed onto the
//! target only once complete. On failure both paths are removed, so the
//! target is either absent or a fully formed workbook.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use statx_transform::SheetSpec;
use tracing::{debug, warn};

use crate::error::{OutputError, Result};
use crate::workbook::WorkbookWriter;

/// Sibling path the workbook is staged at before the rename.
pub fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Write `sheets` to `target` atomically.
pub fn commit_workbook<W>(writer: &W, sheets: &[SheetSpec], target: &Path) -> Result<()>
where
    W: WorkbookWriter + ?Sized,
{
    if sheets.is_empty() {
        return Err(OutputError::EmptyWorkbook);
    }
    let temp_path = temp_path_for(target);
    let result = writer.write(sheets, &temp_path).and_then(|()| {
        fs::rename(&temp_path, target).map_err(|source| OutputError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: target.to_path_buf(),
            source,
        })
    });
    if let Err(error) = result {
        discard(&temp_path);
        discard(target);
        return Err(error);
    }
    debug!(path = %target.display(), sheets = sheets.len(), "workbook committed");
    Ok(())
}

/// Remove a file if present. Returns true when a file was deleted.
pub fn discard(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed partial output");
            true
        }
        Err(error) if error.kind() == ErrorKind::NotFound => false,
        Err(error) => {
            warn!(path = %path.display(), %error, "failed to remove partial output");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, DataFrame, NamedFrom, Series};
    use statx_transform::{SheetKind, SheetRows};
    use std::io::Write;

    /// Writes a few bytes and then fails, like a save interrupted mid-way.
    struct InterruptedWriter;

    impl WorkbookWriter for InterruptedWriter {
        fn write(&self, _sheets: &[SheetSpec], path: &Path) -> Result<()> {
            let mut file = fs::File::create(path).unwrap();
            file.write_all(b"PK\x03\x04partial").unwrap();
            Err(OutputError::Io {
                operation: "write",
                path: path.to_path_buf(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    fn sheet(name: &str) -> SheetSpec {
        let data = DataFrame::new(vec![Column::from(Series::new("NUM_POLS".into(), [1i64]))])
            .unwrap();
        SheetSpec::new(
            name,
            SheetRows {
                kind: SheetKind::Data,
                data,
            },
        )
    }

    #[test]
    fn temp_path_is_a_sibling() {
        assert_eq!(
            temp_path_for(Path::new("/tmp/out/export_1.xlsx")),
            PathBuf::from("/tmp/out/export_1.xlsx.tmp")
        );
    }

    #[test]
    fn interrupted_write_leaves_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("export_x.xlsx");
        let error = commit_workbook(&InterruptedWriter, &[sheet("a")], &target).unwrap_err();
        assert!(matches!(error, OutputError::Io { .. }));
        assert!(!target.exists());
        assert!(!temp_path_for(&target).exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn empty_sheet_list_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("export_y.xlsx");
        let error = commit_workbook(&crate::XlsxWriter, &[], &target).unwrap_err();
        assert!(matches!(error, OutputError::EmptyWorkbook));
        assert!(!target.exists());
    }

    #[test]
    fn discard_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.xlsx");
        assert!(!discard(&path));
        fs::write(&path, b"x").unwrap();
        assert!(discard(&path));
        assert!(!path.exists());
    }
}

//! Workbook rendering.
//!
//! Each [`SheetSpec`] becomes one worksheet: a bold header row with the
//! column names followed by one row per frame row. Numbers stay numeric,
//! nulls stay blank.

use std::path::Path;

use polars::prelude::{AnyValue, DataFrame};
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};
use statx_transform::SheetSpec;

use crate::error::{OutputError, Result};

/// Last addressable worksheet row (zero based).
const MAX_ROW: usize = 1_048_575;
/// Last addressable worksheet column (zero based).
const MAX_COL: usize = 16_383;

/// Writes a set of sheets as one workbook file.
pub trait WorkbookWriter: Send + Sync {
    fn write(&self, sheets: &[SheetSpec], path: &Path) -> Result<()>;
}

/// Office Open XML (`.xlsx`) writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriter;

impl WorkbookWriter for XlsxWriter {
    fn write(&self, sheets: &[SheetSpec], path: &Path) -> Result<()> {
        if sheets.is_empty() {
            return Err(OutputError::EmptyWorkbook);
        }
        let workbook_error = |source: XlsxError| OutputError::Workbook {
            path: path.to_path_buf(),
            source,
        };
        let header_format = Format::new().set_bold();
        let mut workbook = Workbook::new();
        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name).map_err(workbook_error)?;
            write_frame(worksheet, &sheet.name, &sheet.data, &header_format).map_err(
                |error| match error {
                    FrameError::Xlsx(source) => workbook_error(source),
                    FrameError::Output(error) => error,
                },
            )?;
        }
        workbook.save(path).map_err(workbook_error)?;
        tracing::debug!(path = %path.display(), sheets = sheets.len(), "workbook saved");
        Ok(())
    }
}

enum FrameError {
    Xlsx(XlsxError),
    Output(OutputError),
}

impl From<XlsxError> for FrameError {
    fn from(error: XlsxError) -> Self {
        Self::Xlsx(error)
    }
}

fn write_frame(
    worksheet: &mut Worksheet,
    sheet: &str,
    data: &DataFrame,
    header_format: &Format,
) -> std::result::Result<(), FrameError> {
    if data.height() > MAX_ROW || data.width() > MAX_COL + 1 {
        return Err(FrameError::Output(OutputError::SheetTooLarge {
            sheet: sheet.to_string(),
        }));
    }
    for (col_idx, column) in data.get_columns().iter().enumerate() {
        let col = ColNum::try_from(col_idx).map_err(|_| too_large(sheet))?;
        worksheet.write_string_with_format(0, col, column.name().as_str(), header_format)?;
        for row_idx in 0..data.height() {
            let row = RowNum::try_from(row_idx + 1).map_err(|_| too_large(sheet))?;
            let value = column.get(row_idx).map_err(|source| {
                FrameError::Output(OutputError::Cell {
                    sheet: sheet.to_string(),
                    source,
                })
            })?;
            write_cell(worksheet, row, col, value)?;
        }
    }
    Ok(())
}

fn too_large(sheet: &str) -> FrameError {
    FrameError::Output(OutputError::SheetTooLarge {
        sheet: sheet.to_string(),
    })
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: AnyValue<'_>,
) -> std::result::Result<(), XlsxError> {
    match value {
        AnyValue::Null => {}
        AnyValue::Boolean(v) => {
            worksheet.write_boolean(row, col, v)?;
        }
        AnyValue::Int8(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::Int16(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::Int32(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::Int64(v) => write_number(worksheet, row, col, v as f64)?,
        AnyValue::UInt8(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::UInt16(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::UInt32(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::UInt64(v) => write_number(worksheet, row, col, v as f64)?,
        AnyValue::Float32(v) => write_number(worksheet, row, col, f64::from(v))?,
        AnyValue::Float64(v) => write_number(worksheet, row, col, v)?,
        AnyValue::String(v) => {
            worksheet.write_string(row, col, v)?;
        }
        AnyValue::StringOwned(v) => {
            worksheet.write_string(row, col, v.as_str())?;
        }
        other => {
            worksheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}

/// NaN and infinities are left blank.
fn write_number(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: f64,
) -> std::result::Result<(), XlsxError> {
    if value.is_finite() {
        worksheet.write_number(row, col, value)?;
    }
    Ok(())
}

//! Sheet row construction.
//!
//! A sheet exports the descriptive `VAR_*` columns of its dataset followed by
//! the fixed measure columns. A combination without rows becomes a one-row
//! placeholder so the workbook still shows that it was requested.

use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult, Series};
use statx_ingest::YEAR_COLUMN;
use tracing::debug;

use crate::sheet::{SheetKind, SheetRows};

/// Marker identifying descriptive columns.
pub const DESCRIPTIVE_MARKER: &str = "VAR_";

/// Measure columns exported after the descriptive ones, in this order.
pub const MEASURE_COLUMNS: [&str; 12] = [
    "NUM_POLS",
    "NUM_CLAIMS",
    "EXPOSURE_PREM",
    "CLAIM_PMT",
    "FREQUENCY",
    "SEVERITY",
    "AVG_PREMIUM",
    "PURE_PREMIUM",
    "LOSS_RATIO",
    "GWP_%",
    "SUM_ASSURED",
    "AVG_SUM_ASSURED",
];

pub const PLACEHOLDER_YEAR_COLUMN: &str = "YEAR";
pub const PLACEHOLDER_VARIABLE_COLUMN: &str = "VARIABLE";
pub const PLACEHOLDER_MESSAGE_COLUMN: &str = "MESSAGE";

pub fn no_data_message(year: i64, variable: &str) -> String {
    format!("No data for variable '{variable}' in year {year}.")
}

/// Ordered export column set.
///
/// Descriptive columns of the dataset (minus the year column) come first,
/// then [`MEASURE_COLUMNS`]; duplicates are dropped and anything absent from
/// `present` is skipped.
pub fn export_columns(dataset_columns: &[String], present: &[String]) -> Vec<String> {
    let descriptive = dataset_columns
        .iter()
        .map(String::as_str)
        .filter(|name| name.contains(DESCRIPTIVE_MARKER) && *name != YEAR_COLUMN);
    let mut columns: Vec<String> = Vec::new();
    for name in descriptive.chain(MEASURE_COLUMNS) {
        if columns.iter().any(|existing| existing == name) {
            continue;
        }
        if present.iter().any(|column| column == name) {
            columns.push(name.to_string());
        }
    }
    columns
}

/// One-row frame with the year, the variable and a "no data" message.
pub fn placeholder_frame(year: i64, variable: &str) -> PolarsResult<DataFrame> {
    DataFrame::new(vec![
        Column::from(Series::new(PLACEHOLDER_YEAR_COLUMN.into(), [year])),
        Column::from(Series::new(
            PLACEHOLDER_VARIABLE_COLUMN.into(),
            [variable.to_string()],
        )),
        Column::from(Series::new(
            PLACEHOLDER_MESSAGE_COLUMN.into(),
            [no_data_message(year, variable)],
        )),
    ])
}

/// Build the rows of one sheet from the rows matching (year, variable).
pub fn build_sheet(
    dataset_columns: &[String],
    rows: &DataFrame,
    year: i64,
    variable: &str,
) -> PolarsResult<SheetRows> {
    if rows.height() == 0 {
        debug!(year, variable, "no matching rows; building placeholder");
        return Ok(SheetRows {
            kind: SheetKind::Placeholder,
            data: placeholder_frame(year, variable)?,
        });
    }
    let present: Vec<String> = rows
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let columns = export_columns(dataset_columns, &present);
    Ok(SheetRows {
        kind: SheetKind::Data,
        data: rows.select(columns)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn descriptive_columns_precede_measures() {
        let dataset = names(&[
            "NUM_CLAIMS",
            "VAR_YEAR",
            "VAR_NAME_CODE",
            "VAR_REGION",
            "NUM_POLS",
            "NOTES",
        ]);
        let present = names(&[
            "NUM_CLAIMS",
            "VAR_YEAR",
            "VAR_NAME_CODE",
            "VAR_REGION",
            "NUM_POLS",
            "NOTES",
            "DERIVED_CODE",
        ]);
        assert_eq!(
            export_columns(&dataset, &present),
            names(&["VAR_NAME_CODE", "VAR_REGION", "NUM_POLS", "NUM_CLAIMS"])
        );
    }

    #[test]
    fn absent_measures_are_skipped() {
        let dataset = names(&["VAR_NAME_CODE", "LOSS_RATIO"]);
        assert_eq!(
            export_columns(&dataset, &dataset),
            names(&["VAR_NAME_CODE", "LOSS_RATIO"])
        );
    }

    #[test]
    fn empty_rows_become_placeholder() {
        let rows = DataFrame::new(vec![Column::from(Series::new(
            "VAR_NAME_CODE".into(),
            Vec::<String>::new(),
        ))])
        .unwrap();
        let sheet = build_sheet(&names(&["VAR_NAME_CODE"]), &rows, 2020, "42").unwrap();
        assert_eq!(sheet.kind, SheetKind::Placeholder);
        assert_eq!(sheet.data.height(), 1);
        let message = sheet
            .data
            .column(PLACEHOLDER_MESSAGE_COLUMN)
            .unwrap()
            .str()
            .unwrap()
            .get(0)
            .unwrap()
            .to_string();
        assert_eq!(message, "No data for variable '42' in year 2020.");
    }
}

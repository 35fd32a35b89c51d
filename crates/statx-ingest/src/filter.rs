//! Row filtering by year and by derived variable code.
//!
//! An empty result is never an error here; callers decide whether an empty
//! frame means "skip" or "emit a placeholder".

use std::sync::LazyLock;

use polars::prelude::{BooleanChunked, DataFrame, DataType, IntoSeries, StringChunked};
use regex::Regex;

use crate::error::Result;
use crate::loader::{NAME_CODE_COLUMN, YEAR_COLUMN};

/// Column added by [`derive_code`]. It deliberately lacks the `VAR_` marker
/// so it never ends up in an exported sheet.
pub const DERIVED_CODE_COLUMN: &str = "DERIVED_CODE";

/// Leading digit run terminated by a colon, e.g. `10` in `10:Premium`.
static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+):").expect("Invalid variable code regex"));

/// Extract the derived code from a compound `<code>:<description>` value.
///
/// ```
/// use statx_ingest::extract_code;
///
/// assert_eq!(extract_code("10:Premium"), Some("10"));
/// assert_eq!(extract_code("Premium"), None);
/// assert_eq!(extract_code("10 Premium"), None);
/// ```
pub fn extract_code(value: &str) -> Option<&str> {
    CODE_PATTERN
        .captures(value)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

/// Keep rows whose trimmed year text equals `year` exactly.
///
/// Values are compared in their string form: `2021` matches an integer
/// `2021` or the text `" 2021 "`, but not a float `2021.0` nor `"21"`.
pub fn filter_by_year(df: &DataFrame, year: &str) -> Result<DataFrame> {
    let years = df.column(YEAR_COLUMN)?.cast(&DataType::String)?;
    let mask: BooleanChunked = years
        .str()?
        .into_iter()
        .map(|value| Some(value.is_some_and(|v| v.trim() == year)))
        .collect();
    Ok(df.filter(&mask)?)
}

/// Append [`DERIVED_CODE_COLUMN`], null where the name field has no code.
pub fn derive_code(df: &DataFrame) -> Result<DataFrame> {
    let names = df.column(NAME_CODE_COLUMN)?.cast(&DataType::String)?;
    let codes: StringChunked = names
        .str()?
        .into_iter()
        .map(|value| value.and_then(extract_code))
        .collect();
    let mut out = df.clone();
    out.with_column(codes.with_name(DERIVED_CODE_COLUMN.into()).into_series())?;
    Ok(out)
}

/// Keep rows whose derived code equals `variable`. Null codes never match.
pub fn filter_by_variable(df: &DataFrame, variable: &str) -> Result<DataFrame> {
    let mask: BooleanChunked = df
        .column(DERIVED_CODE_COLUMN)?
        .str()?
        .into_iter()
        .map(|code| Some(code == Some(variable)))
        .collect();
    Ok(df.filter(&mask)?)
}

//! Deterministic, collision-free sheet names.
//!
//! A sheet name is `<year>_<term>_<variable code>`, sanitized for
//! spreadsheet use and capped at [`MAX_SHEET_NAME_LEN`] characters. Names are
//! unique within one export job; the job owns a [`SheetNameSet`] and every
//! name is reserved through it.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Longest sheet name spreadsheet applications accept.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters not allowed in sheet names.
pub const FORBIDDEN_SHEET_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

pub const UNKNOWN_TERM: &str = "AC_unknown";
pub const UNKNOWN_VARIABLE_CODE: &str = "000";

static TERM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_AC(\d+)_").expect("Invalid term code regex"));

static LEADING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)").expect("Invalid variable code regex"));

/// Term token of a dataset name: `AC<digits>` from `_AC<digits>_`, else `AC_unknown`.
///
/// ```
/// use statx_transform::naming::term_code;
///
/// assert_eq!(term_code("motor_AC12_2020.parquet"), "AC12");
/// assert_eq!(term_code("A.parquet"), "AC_unknown");
/// ```
pub fn term_code(dataset_name: &str) -> String {
    TERM_PATTERN
        .captures(dataset_name)
        .and_then(|captures| captures.get(1))
        .map_or_else(|| UNKNOWN_TERM.to_string(), |m| format!("AC{}", m.as_str()))
}

/// Leading digit run of a variable, else `000`.
pub fn variable_code(variable: &str) -> &str {
    LEADING_DIGITS
        .captures(variable)
        .and_then(|captures| captures.get(1))
        .map_or(UNKNOWN_VARIABLE_CODE, |m| m.as_str())
}

/// Replace forbidden characters with `_` and cap the length.
pub fn sanitize_sheet_name(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|ch| {
            if FORBIDDEN_SHEET_CHARS.contains(&ch) {
                '_'
            } else {
                ch
            }
        })
        .collect();
    truncate_chars(&replaced, MAX_SHEET_NAME_LEN)
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Sanitized base name before collision handling.
pub fn base_sheet_name(year: i64, dataset_name: &str, variable: &str) -> String {
    sanitize_sheet_name(&format!(
        "{year}_{}_{}",
        term_code(dataset_name),
        variable_code(variable)
    ))
}

/// Candidate with collision suffix `_<n>`.
///
/// The base is shortened so the suffix always survives the length cap;
/// otherwise a 31-character base would truncate back to itself for every n.
fn with_suffix(candidate: &str, n: usize) -> String {
    let suffix = format!("_{n}");
    let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
    let mut name = truncate_chars(candidate, keep);
    name.push_str(&suffix);
    name
}

/// Insertion-ordered set of sheet names reserved by one export job.
#[derive(Debug, Clone, Default)]
pub struct SheetNameSet {
    ordered: Vec<String>,
    lookup: HashSet<String>,
}

impl SheetNameSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Reserved names in reservation order.
    pub fn names(&self) -> &[String] {
        &self.ordered
    }

    /// Reserve a unique name derived from `candidate` and return it.
    pub fn reserve(&mut self, candidate: &str) -> String {
        let name = next_unique(candidate, self);
        self.lookup.insert(name.clone());
        self.ordered.push(name.clone());
        name
    }

    /// Derive, reserve and return the sheet name for one combination.
    pub fn reserve_for(&mut self, year: i64, dataset_name: &str, variable: &str) -> String {
        let base = base_sheet_name(year, dataset_name, variable);
        self.reserve(&base)
    }
}

/// First of `candidate`, `candidate_1`, `candidate_2`, ... not in `taken`.
///
/// Terminates after at most `taken.len() + 1` suffixes: the text after the
/// last `_` is the suffix number, so distinct suffixes give distinct names.
/// For candidates of 28 characters or fewer (and suffixes below 100) the
/// result is exactly `candidate_<n>` truncated to 31 characters; only longer
/// candidates are shortened before the suffix is appended.
pub fn next_unique(candidate: &str, taken: &SheetNameSet) -> String {
    let candidate = sanitize_sheet_name(candidate);
    if !taken.contains(&candidate) {
        return candidate;
    }
    let mut n = 1;
    loop {
        let name = with_suffix(&candidate, n);
        if !taken.contains(&name) {
            return name;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_year_term_and_variable() {
        assert_eq!(base_sheet_name(2020, "A.parquet", "10"), "2020_AC_unknown_10");
        assert_eq!(base_sheet_name(2021, "life_AC3_v2.parquet", "45abc"), "2021_AC3_45");
        assert_eq!(base_sheet_name(2021, "life_AC3.parquet", "abc"), "2021_AC_unknown_000");
    }

    #[test]
    fn sanitizes_forbidden_characters() {
        assert_eq!(sanitize_sheet_name("a:b\\c/d?e*f[g]h"), "a_b_c_d_e_f_g_h");
    }

    #[test]
    fn truncates_to_limit() {
        let long = "x".repeat(40);
        assert_eq!(sanitize_sheet_name(&long).chars().count(), MAX_SHEET_NAME_LEN);
    }

    #[test]
    fn second_collision_gets_suffix() {
        let mut names = SheetNameSet::new();
        assert_eq!(names.reserve_for(2020, "a_AC1_.parquet", "10"), "2020_AC1_10");
        assert_eq!(names.reserve_for(2020, "b_AC1_.parquet", "10"), "2020_AC1_10_1");
        assert_eq!(names.reserve_for(2020, "c_AC1_.parquet", "10"), "2020_AC1_10_2");
        assert_eq!(names.names().len(), 3);
    }

    #[test]
    fn suffix_fits_for_full_length_names() {
        let mut names = SheetNameSet::new();
        let base = "y".repeat(MAX_SHEET_NAME_LEN);
        assert_eq!(names.reserve(&base), base);
        let second = names.reserve(&base);
        assert_eq!(second.chars().count(), MAX_SHEET_NAME_LEN);
        assert!(second.ends_with("_1"));
        let third = names.reserve(&base);
        assert!(third.ends_with("_2"));
    }

    #[test]
    fn short_bases_get_the_plain_suffix() {
        let mut names = SheetNameSet::new();
        let base = "z".repeat(28);
        names.reserve(&base);
        assert_eq!(names.reserve(&base), format!("{base}_1"));
    }

    #[test]
    fn suffixed_names_do_not_shadow_later_bases() {
        let mut names = SheetNameSet::new();
        names.reserve("2020_AC1_10");
        names.reserve("2020_AC1_10");
        // A literal base equal to an earlier suffixed name still gets a fresh one.
        assert_eq!(names.reserve("2020_AC1_10_1"), "2020_AC1_10_1_1");
    }
}

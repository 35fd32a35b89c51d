use statx_model::ExportOption;
use statx_transform::{SheetKind, SheetSpec};

/// Per-sheet record of a job, for logs and reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub name: String,
    pub kind: SheetKind,
    pub rows: usize,
    pub dataset: String,
    pub year: i64,
    pub variable: String,
}

impl SheetSummary {
    pub fn is_placeholder(&self) -> bool {
        self.kind == SheetKind::Placeholder
    }
}

/// A built sheet together with the combination that produced it.
#[derive(Debug, Clone)]
pub struct PreparedSheet {
    pub spec: SheetSpec,
    pub summary: SheetSummary,
}

impl PreparedSheet {
    pub fn new(spec: SheetSpec, option: &ExportOption, variable: &str) -> Self {
        let summary = SheetSummary {
            name: spec.name.clone(),
            kind: spec.kind,
            rows: spec.row_count(),
            dataset: option.dataset_name.clone(),
            year: option.year,
            variable: variable.to_string(),
        };
        Self { spec, summary }
    }

    pub fn into_parts(self) -> (SheetSpec, SheetSummary) {
        (self.spec, self.summary)
    }
}

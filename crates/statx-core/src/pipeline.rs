//! Export orchestration.
//!
//! A job walks the request options in order: load the dataset, keep the rows
//! of the requested year, derive variable codes, then build and name one
//! sheet per variable. The sheets are committed as a single workbook. Any
//! failure aborts the whole job and removes whatever was written.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, error, info, info_span, warn};

use statx_ingest::{DatasetLoader, derive_code, filter_by_variable, filter_by_year};
use statx_model::{ExportArtifact, ExportError, ExportOption, ExportRequest, Result};
use statx_output::{ArtifactStore, WorkbookWriter, XlsxWriter, commit_workbook, discard};
use statx_transform::{SheetNameSet, SheetSpec, build_sheet};

use crate::summary::{PreparedSheet, SheetSummary};

/// Result of a committed export job.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    pub artifact: ExportArtifact,
    pub sheets: Vec<SheetSummary>,
    pub elapsed: Duration,
}

impl ExportOutcome {
    pub fn placeholder_count(&self) -> usize {
        self.sheets.iter().filter(|sheet| sheet.is_placeholder()).count()
    }
}

/// Runs export jobs against one data root and one artifact store.
///
/// The pipeline holds no per-job state, so a single instance can serve
/// concurrent jobs.
#[derive(Debug, Clone)]
pub struct ExportPipeline<W = XlsxWriter> {
    loader: DatasetLoader,
    store: ArtifactStore,
    writer: W,
}

impl ExportPipeline<XlsxWriter> {
    pub fn new(data_root: impl Into<PathBuf>, temp_root: impl Into<PathBuf>) -> Self {
        Self {
            loader: DatasetLoader::new(data_root),
            store: ArtifactStore::new(temp_root),
            writer: XlsxWriter,
        }
    }
}

impl<W: WorkbookWriter> ExportPipeline<W> {
    /// Replace the workbook writer.
    pub fn with_writer<V: WorkbookWriter>(self, writer: V) -> ExportPipeline<V> {
        ExportPipeline {
            loader: self.loader,
            store: self.store,
            writer,
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Run one export job and commit its workbook.
    pub fn run(&self, request: &ExportRequest) -> Result<ExportOutcome> {
        request.validate()?;
        let (id, path) = self.store.allocate();
        let span = info_span!("export", job_id = %id);
        let _guard = span.enter();
        let started = Instant::now();
        info!(
            options = request.options.len(),
            requested_sheets = request.expected_sheet_count(),
            "export started"
        );

        match self.build_and_commit(request, &path) {
            Ok((sheet_names, sheets)) => {
                let elapsed = started.elapsed();
                let artifact = ExportArtifact::new(id, path, sheet_names);
                info!(
                    sheets = sheets.len(),
                    path = %artifact.path.display(),
                    created_at = %artifact.created_at,
                    duration_ms = elapsed.as_millis(),
                    "export committed"
                );
                Ok(ExportOutcome {
                    artifact,
                    sheets,
                    elapsed,
                })
            }
            Err(err) => {
                discard(&path);
                error!(error = %err, "export failed; output discarded");
                Err(err)
            }
        }
    }

    fn build_and_commit(
        &self,
        request: &ExportRequest,
        path: &Path,
    ) -> Result<(Vec<String>, Vec<SheetSummary>)> {
        let prepared = self.collect_sheets(request)?;
        if prepared.is_empty() {
            return Err(ExportError::NoData);
        }
        let (specs, summaries): (Vec<SheetSpec>, Vec<SheetSummary>) =
            prepared.into_iter().map(PreparedSheet::into_parts).unzip();
        commit_workbook(&self.writer, &specs, path)?;
        let names = specs.into_iter().map(|spec| spec.name).collect();
        Ok((names, summaries))
    }

    /// Build every sheet of a request, in order, without writing anything.
    pub fn collect_sheets(&self, request: &ExportRequest) -> Result<Vec<PreparedSheet>> {
        let mut names = SheetNameSet::new();
        let mut sheets = Vec::with_capacity(request.expected_sheet_count());
        for option in &request.options {
            self.collect_option(option, &mut names, &mut sheets)?;
        }
        Ok(sheets)
    }

    fn collect_option(
        &self,
        option: &ExportOption,
        names: &mut SheetNameSet,
        sheets: &mut Vec<PreparedSheet>,
    ) -> Result<()> {
        let dataset = self.loader.load(&option.dataset_name)?;
        let year_rows = filter_by_year(&dataset.data, &option.year_key())?;
        debug!(
            dataset = %option.dataset_name,
            path = %dataset.path.display(),
            year = option.year,
            rows = year_rows.height(),
            "year filter applied"
        );
        if year_rows.height() == 0 {
            warn!(
                dataset = %option.dataset_name,
                year = option.year,
                "no rows for year; option skipped"
            );
            return Ok(());
        }

        let coded = derive_code(&year_rows)?;
        let dataset_columns = dataset.column_names();
        for variable in &option.variables {
            let rows = filter_by_variable(&coded, variable)?;
            debug!(
                dataset = %option.dataset_name,
                year = option.year,
                variable = %variable,
                rows = rows.height(),
                "variable filter applied"
            );
            let sheet_rows = build_sheet(&dataset_columns, &rows, option.year, variable)
                .map_err(|err| ExportError::Processing(err.to_string()))?;
            let name = names.reserve_for(option.year, &option.dataset_name, variable);
            sheets.push(PreparedSheet::new(
                SheetSpec::new(name, sheet_rows),
                option,
                variable,
            ));
        }
        Ok(())
    }
}

use std::path::Path;

use engine_logging::{engine_info, engine_warn};
use tablescrape_core::{AppState, ExportFormat, ExportSummary, TabularDataset};
use tablescrape_engine::{FileTableSink, LogProgressSink, TableEngine};

/// Where fetched tables come from; the engine in production, a stub in tests.
pub trait TableSource {
    fn fetch_tables(&self, url: &str) -> Result<Vec<TabularDataset>, String>;
}

impl TableSource for TableEngine {
    fn fetch_tables(&self, url: &str) -> Result<Vec<TabularDataset>, String> {
        self.load_tables(url, &LogProgressSink).map_err(|err| {
            engine_warn!("fetch of {} failed: {}", url, err);
            err.to_string()
        })
    }
}

/// Writes the current selection of `state` to `path`.
pub fn write_export(
    state: &AppState,
    format: ExportFormat,
    path: &Path,
) -> Result<ExportSummary, String> {
    let session = state
        .session()
        .ok_or_else(|| "no tables are loaded".to_string())?;
    let mut sink = FileTableSink::new(path);
    let summary = session.export(&mut sink).map_err(|err| {
        engine_warn!("export to {:?} failed: {}", path, err);
        err.to_string()
    })?;
    if summary.format != format {
        engine_warn!(
            "selection changed before writing: prompted for {}, wrote {}",
            format.label(),
            summary.format.label()
        );
    }
    engine_info!(
        "exported {} table(s) as {} to {}",
        summary.tables_written,
        summary.format.label(),
        summary.destination
    );
    Ok(summary)
}

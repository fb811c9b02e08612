use crate::{TableCollection, TabularDataset};

/// Output shape chosen for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// One table as a flat CSV stream.
    Csv,
    /// Several tables as sheets of one workbook.
    Xlsx,
}

impl ExportFormat {
    /// File extension hint for the destination prompt, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Xlsx => "Excel",
        }
    }
}

/// Sheet name for the table at collection index `index`.
///
/// Derived from the collection index, not the rank within the selection.
pub fn sheet_name(index: usize) -> String {
    format!("Sheet{}", index + 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportPlan {
    Flat { index: usize },
    Workbook { sheets: Vec<(String, usize)> },
}

impl ExportPlan {
    /// Decides the output shape for the given ascending selection.
    pub fn for_selection(selected: &[usize]) -> Result<Self, ExportError> {
        match selected {
            [] => Err(ExportError::NoSelection),
            [index] => Ok(ExportPlan::Flat { index: *index }),
            many => Ok(ExportPlan::Workbook {
                sheets: many.iter().map(|&i| (sheet_name(i), i)).collect(),
            }),
        }
    }

    pub fn format(&self) -> ExportFormat {
        match self {
            ExportPlan::Flat { .. } => ExportFormat::Csv,
            ExportPlan::Workbook { .. } => ExportFormat::Xlsx,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Destination an export is written to.
pub trait TableSink {
    /// Human-readable destination, e.g. a file path.
    fn destination(&self) -> String;

    fn write_flat(&mut self, table: &TabularDataset) -> Result<(), SinkError>;

    /// Sheets arrive in ascending collection-index order.
    fn write_workbook(&mut self, sheets: &[(String, &TabularDataset)]) -> Result<(), SinkError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("no tables selected for export")]
    NoSelection,
    #[error("table index {index} is out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("failed to write export: {0}")]
    Write(String),
}

impl From<SinkError> for ExportError {
    fn from(err: SinkError) -> Self {
        ExportError::Write(err.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub format: ExportFormat,
    pub tables_written: usize,
    pub sheet_names: Vec<String>,
    pub destination: String,
}

/// Writes the selected tables to `sink` following the flat/workbook rule.
///
/// `selected` must be ascending, as produced by `SelectionState::selected_indices`.
pub fn export(
    collection: &TableCollection,
    selected: &[usize],
    sink: &mut dyn TableSink,
) -> Result<ExportSummary, ExportError> {
    let plan = ExportPlan::for_selection(selected)?;
    let len = collection.len();
    let table_at = move |index: usize| {
        collection
            .get(index)
            .ok_or(ExportError::IndexOutOfRange { index, len })
    };

    let sheet_names = match &plan {
        ExportPlan::Flat { index } => {
            sink.write_flat(table_at(*index)?)?;
            Vec::new()
        }
        ExportPlan::Workbook { sheets } => {
            let resolved = sheets
                .iter()
                .map(|(name, index)| table_at(*index).map(|table| (name.clone(), table)))
                .collect::<Result<Vec<_>, ExportError>>()?;
            sink.write_workbook(&resolved)?;
            sheets.iter().map(|(name, _)| name.clone()).collect()
        }
    };

    Ok(ExportSummary {
        format: plan.format(),
        tables_written: selected.len(),
        sheet_names,
        destination: sink.destination(),
    })
}

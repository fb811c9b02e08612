use std::path::PathBuf;

use engine_logging::engine_info;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tablescrape_core::{CellValue, SinkError, TableSink, TabularDataset};

use crate::persist::{AtomicFileWriter, PersistError};

/// Excel's per-sheet column limit.
const MAX_XLSX_COLUMNS: usize = 16_384;

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("excel write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("table has {0} columns, more than a worksheet can hold")]
    TooManyColumns(usize),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

impl From<WriteError> for SinkError {
    fn from(err: WriteError) -> Self {
        SinkError::new(err.to_string())
    }
}

/// Serializes one table as CSV: a header row of column labels, then every row in order.
pub fn csv_bytes(table: &TabularDataset) -> Result<Vec<u8>, WriteError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }
    writer
        .into_inner()
        .map_err(|err| WriteError::Io(err.into_error()))
}

/// Serializes named tables as sheets of one `.xlsx` workbook, in the order given.
pub fn workbook_bytes(sheets: &[(String, &TabularDataset)]) -> Result<Vec<u8>, WriteError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for (name, table) in sheets {
        if table.column_count() > MAX_XLSX_COLUMNS {
            return Err(WriteError::TooManyColumns(table.column_count()));
        }
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;
        write_sheet(worksheet, table, &header_format)?;
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    table: &TabularDataset,
    header_format: &Format,
) -> Result<(), WriteError> {
    for (col_idx, header) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col_idx as u16, header, header_format)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let excel_col = col_idx as u16;
            match cell {
                CellValue::Text(text) => {
                    worksheet.write_string(excel_row, excel_col, text)?;
                }
                CellValue::Number(number) => {
                    worksheet.write_number(excel_row, excel_col, *number)?;
                }
                CellValue::Empty => {}
            }
        }
    }
    Ok(())
}

/// Export destination on the local file system.
#[derive(Debug, Clone)]
pub struct FileTableSink {
    path: PathBuf,
}

impl FileTableSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn persist(&self, content: &[u8]) -> Result<(), WriteError> {
        let (writer, filename) = AtomicFileWriter::for_destination(&self.path)?;
        let written = writer.write(&filename, content)?;
        engine_info!("wrote {} bytes to {:?}", content.len(), written);
        Ok(())
    }
}

impl TableSink for FileTableSink {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    fn write_flat(&mut self, table: &TabularDataset) -> Result<(), SinkError> {
        let bytes = csv_bytes(table)?;
        self.persist(&bytes)?;
        Ok(())
    }

    fn write_workbook(&mut self, sheets: &[(String, &TabularDataset)]) -> Result<(), SinkError> {
        let bytes = workbook_bytes(sheets)?;
        self.persist(&bytes)?;
        Ok(())
    }
}

#![allow(dead_code)]

use std::sync::Once;

use tablescrape_core::{CellValue, SinkError, TableSink, TabularDataset};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// A small table whose first cell identifies it.
pub fn table(tag: &str, rows: usize) -> TabularDataset {
    TabularDataset::new(
        vec!["Name".to_string(), "Value".to_string()],
        (0..rows)
            .map(|i| vec![CellValue::text(format!("{tag}-{i}")), CellValue::Number(i as f64)])
            .collect(),
    )
    .expect("aligned rows")
}

pub fn tables(count: usize) -> Vec<TabularDataset> {
    (0..count).map(|i| table(&format!("t{i}"), i + 1)).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Written {
    Flat(TabularDataset),
    Workbook(Vec<(String, TabularDataset)>),
}

/// Sink that records what it was asked to write.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub written: Vec<Written>,
    pub fail_with: Option<String>,
}

impl RecordingSink {
    pub fn failing(message: &str) -> Self {
        Self {
            written: Vec::new(),
            fail_with: Some(message.to_string()),
        }
    }
}

impl TableSink for RecordingSink {
    fn destination(&self) -> String {
        "memory".to_string()
    }

    fn write_flat(&mut self, table: &TabularDataset) -> Result<(), SinkError> {
        if let Some(message) = &self.fail_with {
            return Err(SinkError::new(message.clone()));
        }
        self.written.push(Written::Flat(table.clone()));
        Ok(())
    }

    fn write_workbook(&mut self, sheets: &[(String, &TabularDataset)]) -> Result<(), SinkError> {
        if let Some(message) = &self.fail_with {
            return Err(SinkError::new(message.clone()));
        }
        self.written.push(Written::Workbook(
            sheets
                .iter()
                .map(|(name, table)| (name.clone(), (*table).clone()))
                .collect(),
        ));
        Ok(())
    }
}

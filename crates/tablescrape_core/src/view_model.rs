use crate::{Notice, TabularDataset};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url_input: String,
    pub notice: Option<Notice>,
    pub fetch_in_flight: bool,
    pub table_count: usize,
    pub position: Option<usize>,
    pub selected_count: usize,
    pub checkboxes: Vec<TableCheckbox>,
    pub current_table: Option<TableView>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCheckbox {
    pub index: usize,
    pub label: String,
    pub checked: bool,
}

/// Display strings for the table under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub index: usize,
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub(crate) fn from_dataset(index: usize, table: &TabularDataset) -> Self {
        Self {
            index,
            title: format!("Table {}", index + 1),
            columns: table.columns().to_vec(),
            rows: table
                .rows()
                .iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect(),
        }
    }
}
